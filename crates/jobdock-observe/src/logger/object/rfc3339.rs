use std::fmt;

use time::{OffsetDateTime, UtcOffset, macros::format_description};
use tracing_subscriber::fmt::{format::Writer, time::FormatTime};

/// UTC timestamp formatter for log lines: `2024-01-15T10:30:00.123Z`.
///
/// Millisecond precision with a literal `Z`, the same stamp shape container
/// runtimes put in front of their own log lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggerRfc3339;

/// Format `at` (converted to UTC) as a log timestamp.
pub fn format_stamp(at: OffsetDateTime) -> String {
    at.to_offset(UtcOffset::UTC)
        .format(format_description!(
            "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
        ))
        .unwrap_or_else(|_| "<invalid-time>".to_string())
}

impl FormatTime for LoggerRfc3339 {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        write!(w, "{} ", format_stamp(OffsetDateTime::now_utc()))
    }
}
