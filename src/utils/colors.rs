/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Zero figures are greyed out, everything else printed as is.
pub fn colorize_amount(value: f64, text: &str) -> String {
    if value == 0.0 {
        format!("{GREY}{text}{RESET}")
    } else {
        text.to_string()
    }
}

/// Outbox status: queued → yellow, sent → green.
pub fn color_for_status(status: &str) -> &'static str {
    match status {
        "queued" => YELLOW,
        "sent" => GREEN,
        _ => RESET,
    }
}
