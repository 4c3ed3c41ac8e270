//! Per-request access logging.
//!
//! One colorized line per request: grey timestamp, status code colored by
//! class, request path, elapsed time in fractional milliseconds. The log
//! write never affects the response; the whole thing is a no-op when
//! logging is disabled.

use std::time::{Instant, SystemTime, UNIX_EPOCH};

use crate::http::response::StatusCode;

#[derive(Debug, Clone, Copy)]
pub struct AccessLog {
    enabled: bool,
}

impl AccessLog {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Emits one log line for a finished request.
    pub fn record(&self, path: &str, status: StatusCode, started: Instant) {
        if !self.enabled {
            return;
        }

        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
        let code = status.as_u16();

        println!(
            "\x1b[90m[{}]\x1b[0m \x1b[{}m{}\x1b[0m {} \x1b[90m({:.2}ms)\x1b[0m",
            clock_time(),
            status_color(code),
            code,
            path,
            elapsed_ms,
        );
    }
}

/// ANSI color for a status code: success green, 3xx yellow, >=400 red.
pub fn status_color(code: u16) -> &'static str {
    if code >= 400 {
        "31"
    } else if code >= 300 {
        "33"
    } else {
        "32"
    }
}

/// Wall-clock time of day as HH:MM:SS (UTC).
fn clock_time() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let day_secs = secs % 86_400;
    format!(
        "{:02}:{:02}:{:02}",
        day_secs / 3600,
        (day_secs % 3600) / 60,
        day_secs % 60
    )
}
