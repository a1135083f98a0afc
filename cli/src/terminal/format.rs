use fwscan_common::device::Device;
use unicode_width::UnicodeWidthStr;

const HEADERS: [&str; 5] = ["ADDRESS", "NAME", "VERSION", "VARIANT", "STATUS"];
const COLUMN_GAP: &str = "  ";

pub fn status_label(device: &Device) -> &'static str {
    if device.outdated { "outdated" } else { "" }
}

fn device_cells(device: &Device) -> [String; 5] {
    [
        device.address.to_string(),
        device.name.clone(),
        device.firmware_version.clone(),
        device.firmware_variant.clone(),
        status_label(device).to_string(),
    ]
}

/// Renders devices as aligned plain-text rows, header first.
pub fn device_table(devices: &[Device]) -> Vec<String> {
    let mut rows: Vec<[String; 5]> = Vec::with_capacity(devices.len() + 1);
    rows.push(HEADERS.map(str::to_string));
    rows.extend(devices.iter().map(device_cells));

    let mut widths = [0usize; 5];
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(UnicodeWidthStr::width(cell.as_str()));
        }
    }

    rows.iter()
        .map(|row| {
            row.iter()
                .zip(widths)
                .map(|(cell, width)| pad(cell, width))
                .collect::<Vec<String>>()
                .join(COLUMN_GAP)
                .trim_end()
                .to_string()
        })
        .collect()
}

fn pad(cell: &str, width: usize) -> String {
    let fill = width.saturating_sub(UnicodeWidthStr::width(cell));
    format!("{cell}{}", " ".repeat(fill))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
