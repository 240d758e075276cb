//! Single-placeholder grammar for configuration values.
//!
//! A value is a placeholder only when the *whole* string is one of:
//!
//! ```text
//! ${NAME}
//! ${NAME:-default}
//! ```
//!
//! where `NAME` is `[A-Za-z_][A-Za-z0-9_]*` and `default` is any text without `}`.
//! Anything else, including placeholders embedded in longer text, is a literal.
use crate::env::EnvLookup;

/// Classification of a raw configuration value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder<'a> {
    /// Plain text, used verbatim.
    Literal(&'a str),
    /// Reference to an environment variable.
    Variable {
        name: &'a str,
        /// Text after `:-`; `None` when the clause is absent.
        default: Option<&'a str>,
    },
}

impl<'a> Placeholder<'a> {
    /// Classify `input`.
    pub fn parse(input: &'a str) -> Self {
        match parse_variable(input) {
            Some((name, default)) => Placeholder::Variable { name, default },
            None => Placeholder::Literal(input),
        }
    }

    /// Produce the final value.
    ///
    /// A set variable always wins over the default, even when it is empty.
    pub fn resolve<E: EnvLookup + ?Sized>(&self, env: &E) -> String {
        match *self {
            Placeholder::Literal(text) => text.to_string(),
            Placeholder::Variable { name, default } => env
                .var(name)
                .unwrap_or_else(|| default.unwrap_or_default().to_string()),
        }
    }
}

/// Matches `^\$\{([A-Za-z_][A-Za-z0-9_]*)(:-([^}]*))?\}$`.
fn parse_variable(input: &str) -> Option<(&str, Option<&str>)> {
    let body = input.strip_prefix("${")?.strip_suffix('}')?;
    if body.contains('}') {
        return None;
    }

    let name_end = body
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(body.len());
    let (name, rest) = body.split_at(name_end);

    match name.chars().next() {
        Some(first) if !first.is_ascii_digit() => {}
        _ => return None,
    }

    if rest.is_empty() {
        return Some((name, None));
    }
    rest.strip_prefix(":-").map(|default| (name, Some(default)))
}
