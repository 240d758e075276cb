use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

use super::scalar;
use crate::{Env, JobDefinition, JobName};

/// Jobs document exactly as parsed, before any resolution.
///
/// Every top-level field is optional: a missing (or `null`) key leaves the
/// corresponding default in place when the document is applied. Unknown
/// keys are accepted and ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawConfigDocument {
    #[serde(
        default,
        deserialize_with = "scalar::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<RawPort>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jobs: Option<BTreeMap<JobName, RawJobDefinition>>,
    #[serde(
        default,
        deserialize_with = "scalar::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub application_default_credentials: Option<String>,
    #[serde(
        default,
        deserialize_with = "scalar::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub docker_network: Option<String>,
}

/// A single job entry as written in the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawJobDefinition {
    /// Container image reference.
    #[serde(deserialize_with = "scalar::text")]
    pub image: String,
    /// Entrypoint override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<Vec<String>>,
    /// Environment entries; values may still hold placeholders.
    #[serde(default, skip_serializing_if = "Env::is_empty")]
    pub env: Env,
    /// Unvalidated timeout: a number or a (possibly placeholder) string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<RawTimeout>,
}

/// Listen port before validation: a number or numeric text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawPort {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for RawPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawPort::Integer(n) => write!(f, "{n}"),
            RawPort::Float(n) => write!(f, "{n}"),
            RawPort::Text(s) => f.write_str(s),
        }
    }
}

/// Timeout value before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTimeout {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for RawTimeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawTimeout::Integer(n) => write!(f, "{n}"),
            RawTimeout::Float(n) => write!(f, "{n}"),
            RawTimeout::Text(s) => f.write_str(s),
        }
    }
}

impl From<JobDefinition> for RawJobDefinition {
    /// Turn a resolved job back into document form, e.g. to resolve it again.
    fn from(job: JobDefinition) -> Self {
        Self {
            image: job.image,
            command: job.command,
            env: job.env,
            timeout_seconds: job
                .timeout_seconds
                .map(|t| RawTimeout::Integer(i64::try_from(t.get()).unwrap_or(i64::MAX))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = r#"
host: 127.0.0.1
jobs:
  nightly:
    image: alpine:3
    command: ["sh", "-c", "echo hi"]
    env:
      - name: TOKEN
        value: "${TOKEN:-none}"
    timeoutSeconds: 30
  adhoc:
    image: busybox
    timeoutSeconds: "${ADHOC_TIMEOUT}"
extra: ignored
"#;

    #[test]
    fn parses_jobs_document() {
        let doc: RawConfigDocument = serde_yaml::from_str(DOCUMENT).unwrap();

        assert_eq!(doc.host.as_deref(), Some("127.0.0.1"));
        assert!(doc.port.is_none());
        assert!(doc.docker_network.is_none());

        let jobs = doc.jobs.unwrap();
        assert_eq!(jobs.len(), 2);

        let nightly = &jobs["nightly"];
        assert_eq!(nightly.image, "alpine:3");
        assert_eq!(nightly.command.as_ref().map(Vec::len), Some(3));
        assert_eq!(nightly.env.get("TOKEN"), Some("${TOKEN:-none}"));
        assert_eq!(nightly.timeout_seconds, Some(RawTimeout::Integer(30)));

        let adhoc = &jobs["adhoc"];
        assert!(adhoc.env.is_empty());
        assert_eq!(
            adhoc.timeout_seconds,
            Some(RawTimeout::Text("${ADHOC_TIMEOUT}".into()))
        );
    }

    #[test]
    fn camel_case_top_level_keys() {
        let doc: RawConfigDocument = serde_yaml::from_str(
            "applicationDefaultCredentials: /secrets/adc.json\ndockerNetwork: jobs-net\n",
        )
        .unwrap();
        assert_eq!(
            doc.application_default_credentials.as_deref(),
            Some("/secrets/adc.json")
        );
        assert_eq!(doc.docker_network.as_deref(), Some("jobs-net"));
        assert!(doc.jobs.is_none());
    }

    #[test]
    fn port_accepts_number_or_text() {
        let doc: RawConfigDocument = serde_yaml::from_str("port: 9000\n").unwrap();
        assert_eq!(doc.port, Some(RawPort::Integer(9000)));

        let doc: RawConfigDocument = serde_yaml::from_str("port: \"9000\"\n").unwrap();
        assert_eq!(doc.port, Some(RawPort::Text("9000".into())));
        assert_eq!(doc.port.unwrap().to_string(), "9000");
    }

    #[test]
    fn unquoted_top_level_scalars_are_text() {
        let doc: RawConfigDocument =
            serde_yaml::from_str("host: 10\ndockerNetwork: true\n").unwrap();
        assert_eq!(doc.host.as_deref(), Some("10"));
        assert_eq!(doc.docker_network.as_deref(), Some("true"));
    }

    #[test]
    fn job_without_image_is_rejected() {
        let res = serde_yaml::from_str::<RawConfigDocument>("jobs:\n  broken:\n    command: [ls]\n");
        assert!(res.is_err());
    }

    #[test]
    fn raw_timeout_display_keeps_original_text() {
        assert_eq!(RawTimeout::Integer(-3).to_string(), "-3");
        assert_eq!(RawTimeout::Float(1.5).to_string(), "1.5");
        assert_eq!(RawTimeout::Text("soon".into()).to_string(), "soon");
    }
}
