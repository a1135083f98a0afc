use std::sync::Arc;

use fwscan_core::scanner::ProgressCallback;
use indicatif::ProgressStyle;
use tracing::{Span, info_span};
use tracing_indicatif::span_ext::IndicatifSpanExt;

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.blue} {msg} [{bar:32.green/bright_black}] {pos}/{len} ({elapsed})")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .tick_strings(&[
            "▁▁▁▁▁",
            "▁▂▂▂▁",
            "▁▄▂▄▁",
            "▂▄▆▄▂",
            "▄▆█▆▄",
            "▂▄▆▄▂",
            "▁▄▂▄▁",
            "▁▂▂▂▁",
        ])
}

/// Span carrying the scan progress bar. The bar disappears once the span closes.
pub fn scan_span(total: u64) -> Span {
    let span = info_span!("scan", indicatif.pb_show = true);
    span.pb_set_style(&bar_style());
    span.pb_set_length(total);
    span.pb_set_message("Probing");
    span
}

/// Advances the bar of `span` once per finished probe.
pub fn probe_callback(span: Span) -> ProgressCallback {
    Arc::new(move |_done: usize, _total: usize| span.pb_inc(1))
}
