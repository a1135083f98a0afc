use std::time::Duration;

use colored::*;
use fwscan_common::device::Device;
use fwscan_core::discovery::ScanReport;
use fwscan_core::updater::UpdateOutcome;
use tracing::info;
use unicode_width::UnicodeWidthStr;

use crate::terminal::{colors, format, logging::PRINT_TARGET};

pub const TOTAL_WIDTH: usize = 64;

pub fn print(msg: &str) {
    info!(target: PRINT_TARGET, "{msg}");
}

pub fn banner(q_level: u8) {
    if q_level > 0 {
        return;
    }

    let text_content: String = format!("⟦ FWSCAN v{} ⟧", env!("CARGO_PKG_VERSION"));
    let text_width: usize = UnicodeWidthStr::width(text_content.as_str());
    let text: ColoredString = text_content.bright_green().bold();
    let sep: ColoredString = "═".repeat(TOTAL_WIDTH.saturating_sub(text_width) / 2).bright_black();

    print(&format!("{sep}{text}{sep}"));
}

pub fn header(msg: &str) {
    let formatted: String = format!("⟦ {} ⟧", msg);
    let msg_len: usize = formatted.chars().count();

    let dash_count: usize = TOTAL_WIDTH.saturating_sub(msg_len);
    let left: usize = dash_count / 2;
    let right: usize = dash_count - left;

    let line: ColoredString = format!(
        "{}{}{}",
        "─".repeat(left),
        formatted.to_uppercase().bright_green(),
        "─".repeat(right)
    )
    .bright_black();

    print(&format!("{}", line));
}

pub fn fat_separator() {
    let sep: ColoredString = "═".repeat(TOTAL_WIDTH).bright_black();
    print(&format!("{}", sep));
}

pub fn centerln(msg: &str) {
    let space = " ".repeat(TOTAL_WIDTH.saturating_sub(console::measure_text_width(msg)) / 2);
    print(&format!("{}{}{}", space, msg, space));
}

pub fn device_table(devices: &[Device]) {
    let rows: Vec<String> = format::device_table(devices);
    let Some((head, body)) = rows.split_first() else {
        return;
    };

    print(&format!("{}", head.color(colors::PRIMARY).bold()));
    for (row, device) in body.iter().zip(devices) {
        let color = if device.outdated { colors::OUTDATED } else { colors::TEXT_DEFAULT };
        print(&format!("{}", row.color(color)));
    }
}

pub fn no_results() {
    print(&format!("{}", "No devices found in this network.".red().bold()));
}

pub fn summary(report: &ScanReport, total_time: Duration) {
    let found: ColoredString = format!("{} devices", report.devices.len()).bold().green();
    let outdated: ColoredString = format!("{} outdated", report.outdated().count())
        .bold()
        .color(colors::OUTDATED);
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().color(colors::ACCENT);
    let output: String = format!("Scan complete: {found}, {outdated} in {total_time}");

    fat_separator();
    centerln(&output);
}

pub fn update_results(outcomes: &[UpdateOutcome]) {
    for outcome in outcomes {
        let marker: ColoredString = if outcome.succeeded() {
            "triggered".color(colors::CURRENT)
        } else {
            format!("{} step(s) failed", outcome.errors.len()).red().bold()
        };
        print(&format!(
            "{} {} {} {}",
            ">".color(colors::SEPARATOR),
            outcome.address.to_string().color(colors::PRIMARY),
            outcome.firmware_url.color(colors::TEXT_DEFAULT),
            marker
        ));
    }
}
