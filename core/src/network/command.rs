//! URLs for the device command endpoint `http://<host>/cm?...&cmnd=<command>`.

use std::net::Ipv4Addr;

pub const STATUS_COMMAND: &str = "Status%200";
pub const UPGRADE_COMMAND: &str = "Upgrade%201";

/// Query prefix that authenticates against a password protected web UI.
///
/// Empty when no password is configured.
pub fn auth_query(password: Option<&str>) -> String {
    match password {
        Some(pw) if !pw.is_empty() => format!("user=admin&password={pw}&"),
        _ => String::new(),
    }
}

pub fn command_url(host: Ipv4Addr, password: Option<&str>, command: &str) -> String {
    format!("http://{host}/cm?{}cmnd={command}", auth_query(password))
}

pub fn status_url(host: Ipv4Addr, password: Option<&str>) -> String {
    command_url(host, password, STATUS_COMMAND)
}

pub fn ota_url_command(firmware_url: &str) -> String {
    format!("OtaUrl%20{firmware_url}")
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
