//! Pure transformation from a parsed document into a resolved [`Configuration`].
use std::collections::BTreeMap;

use jobdock_model::{
    Configuration, JobDefinition, JobName, RawConfigDocument, RawJobDefinition, RawPort,
    RawTimeout, TimeoutSecs,
};
use tracing::{trace, warn};

use crate::{
    config::placeholder::Placeholder,
    env::EnvLookup,
    error::{ConfigError, ConfigResult},
};

/// Substitute a value that is exactly one `${NAME}` / `${NAME:-default}` expression.
///
/// Any other input is returned unchanged.
pub fn resolve_env_value<E: EnvLookup + ?Sized>(value: &str, env: &E) -> String {
    Placeholder::parse(value).resolve(env)
}

/// Validate a job's timeout.
///
/// - absent: `Ok(None)`;
/// - a number, or a string whose leading base-10 integer is positive: `Ok(Some(_))`;
/// - anything else (zero, negative, blank after resolution, no leading digits,
///   out of range): [`ConfigError::InvalidTimeout`].
pub fn resolve_timeout_seconds<E: EnvLookup + ?Sized>(
    job: &str,
    raw: Option<&RawTimeout>,
    env: &E,
) -> ConfigResult<Option<TimeoutSecs>> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    let parsed = match raw {
        RawTimeout::Integer(n) => Some(i128::from(*n)),
        RawTimeout::Float(f) if f.is_finite() => Some(f.trunc() as i128),
        RawTimeout::Float(_) => None,
        RawTimeout::Text(text) => {
            let resolved = resolve_env_value(text, env);
            parse_leading_int(resolved.trim())
        }
    };

    parsed
        .and_then(|n| u64::try_from(n).ok())
        .and_then(|n| TimeoutSecs::new(n).ok())
        .map(Some)
        .ok_or_else(|| ConfigError::InvalidTimeout {
            job: job.to_string(),
            raw: raw.to_string(),
        })
}

/// Parse the leading base-10 integer of `text`.
///
/// Leading whitespace and a single sign are accepted, parsing stops at the first
/// non-digit. Returns `None` when no digit follows, or when the value does not
/// fit in an `i128`.
pub(crate) fn parse_leading_int(text: &str) -> Option<i128> {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let value: i128 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Validate a document port. `None` when it is not a `u16`.
pub fn resolve_port(raw: &RawPort) -> Option<u16> {
    let parsed = match raw {
        RawPort::Integer(n) => Some(i128::from(*n)),
        RawPort::Float(f) if f.is_finite() => Some(f.trunc() as i128),
        RawPort::Float(_) => None,
        RawPort::Text(text) => parse_leading_int(text),
    };
    parsed.and_then(|n| u16::try_from(n).ok())
}

/// Resolve one job: substitute env values and validate the timeout.
///
/// An invalid timeout is logged and dropped; it never fails the job.
pub fn resolve_job<E: EnvLookup + ?Sized>(
    name: &str,
    raw: RawJobDefinition,
    env: &E,
) -> JobDefinition {
    let resolved_env = if raw.env.is_empty() {
        raw.env
    } else {
        raw.env.map_values(|value| resolve_env_value(value, env))
    };

    let timeout_seconds = resolve_timeout_seconds(name, raw.timeout_seconds.as_ref(), env)
        .unwrap_or_else(|err| {
            warn!(job = name, error = %err, "invalid job timeoutSeconds value");
            None
        });

    trace!(
        job = name,
        image = %raw.image,
        env_len = resolved_env.len(),
        timeout = ?timeout_seconds.map(|t| t.get()),
        "job resolved"
    );

    JobDefinition {
        image: raw.image,
        command: raw.command,
        env: resolved_env,
        timeout_seconds,
    }
}

/// Resolve every job of a document. Jobs are independent of each other.
pub fn resolve_jobs<E: EnvLookup + ?Sized>(
    jobs: BTreeMap<JobName, RawJobDefinition>,
    env: &E,
) -> BTreeMap<JobName, JobDefinition> {
    jobs.into_iter()
        .map(|(name, raw)| {
            let job = resolve_job(&name, raw, env);
            (name, job)
        })
        .collect()
}

/// Apply a parsed document on top of `defaults`.
///
/// Each top-level key present in the document replaces the default field;
/// absent keys keep the default.
pub fn resolve_document<E: EnvLookup + ?Sized>(
    defaults: Configuration,
    doc: RawConfigDocument,
    env: &E,
) -> Configuration {
    Configuration {
        host: doc.host.unwrap_or(defaults.host),
        port: match doc.port {
            None => defaults.port,
            Some(raw) => resolve_port(&raw).unwrap_or_else(|| {
                warn!(port = %raw, default = defaults.port, "invalid port value, keeping default");
                defaults.port
            }),
        },
        jobs: match doc.jobs {
            Some(jobs) => resolve_jobs(jobs, env),
            None => defaults.jobs,
        },
        application_default_credentials: doc
            .application_default_credentials
            .or(defaults.application_default_credentials),
        docker_network: doc.docker_network.or(defaults.docker_network),
    }
}
