//! Turning raw container output chunks into log lines.
use std::fmt;

/// Fixed-width part of the timestamp prefix: `YYYY-MM-DDTHH:MM:SS.`
/// (`d` marks a digit position).
const STAMP_SHAPE: &[u8] = b"dddd-dd-ddTdd:dd:dd.";

/// Identifier used to tag an execution's lines: the part after the last `/`.
///
/// `"group/run-42"` becomes `"run-42"`; a name without `/` is used as is.
pub fn short_execution_id(execution_name: &str) -> &str {
    execution_name.rsplit('/').next().unwrap_or(execution_name)
}

/// Remove a leading `YYYY-MM-DDTHH:MM:SS.fffZ` stamp and the whitespace after it.
///
/// The stamp must carry at least one fractional digit and be followed by at
/// least one whitespace character; otherwise `text` is returned unchanged.
pub fn strip_timestamp_prefix(text: &str) -> &str {
    match timestamp_prefix_len(text) {
        Some(len) => &text[len..],
        None => text,
    }
}

fn timestamp_prefix_len(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    if bytes.len() < STAMP_SHAPE.len() {
        return None;
    }

    let shape_ok = bytes.iter().zip(STAMP_SHAPE).all(|(b, s)| match s {
        b'd' => b.is_ascii_digit(),
        _ => b == s,
    });
    if !shape_ok {
        return None;
    }

    let mut pos = STAMP_SHAPE.len();
    let fraction = bytes[pos..].iter().take_while(|b| b.is_ascii_digit()).count();
    if fraction == 0 {
        return None;
    }
    pos += fraction;

    if bytes.get(pos) != Some(&b'Z') {
        return None;
    }
    pos += 1;

    // Everything consumed so far is ASCII, so `pos` is a char boundary.
    let rest = &text[pos..];
    let body = rest.trim_start();
    if body.len() == rest.len() {
        return None;
    }
    Some(text.len() - body.len())
}

/// Decode one chunk into the text to log, or `None` when nothing is left.
///
/// Invalid UTF-8 is replaced rather than rejected.
pub fn frame_chunk(chunk: &[u8]) -> Option<String> {
    let decoded = String::from_utf8_lossy(chunk);
    let text = strip_timestamp_prefix(decoded.trim());
    (!text.is_empty()).then(|| text.to_string())
}

/// One forwarded line of execution output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// Short execution identifier (see [`short_execution_id`]).
    pub execution: String,
    /// Line text with the timestamp prefix removed.
    pub message: String,
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.execution, self.message)
    }
}
