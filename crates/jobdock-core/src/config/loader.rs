use std::{collections::BTreeMap, fs, path::Path};

use jobdock_model::{
    Configuration, DEFAULT_HOST, DEFAULT_PORT, ENV_DOCKER_NETWORK, ENV_HOST, ENV_PORT, JobName,
    RawConfigDocument, RawJobDefinition,
};
use serde_yaml::{Mapping, Value};
use tracing::{debug, error, info, warn};

use crate::{
    config::resolve::{parse_leading_int, resolve_document},
    env::EnvLookup,
    error::{ConfigError, ConfigResult},
};

/// Configuration built from environment variables alone.
///
/// `PORT` is read by its leading integer; a value that is not a valid port
/// falls back to the default with a warning.
pub fn defaults<E: EnvLookup + ?Sized>(env: &E) -> Configuration {
    let port = match env.var(ENV_PORT) {
        None => DEFAULT_PORT,
        Some(raw) => match parse_leading_int(&raw).and_then(|n| u16::try_from(n).ok()) {
            Some(port) => port,
            None => {
                warn!(port = %raw, default = DEFAULT_PORT, "invalid PORT value, using default");
                DEFAULT_PORT
            }
        },
    };

    Configuration {
        host: env.var(ENV_HOST).unwrap_or_else(|| DEFAULT_HOST.to_string()),
        port,
        docker_network: env.var(ENV_DOCKER_NETWORK),
        ..Configuration::default()
    }
}

/// Parse jobs document text. Empty documents are an empty mapping.
///
/// Jobs are decoded one by one: an entry that does not describe a job is
/// logged and skipped, the rest of the document still applies.
pub fn parse_document(text: &str) -> ConfigResult<RawConfigDocument> {
    if text.trim().is_empty() {
        return Ok(RawConfigDocument::default());
    }

    let mut value: Value = serde_yaml::from_str(text)?;
    if value.is_null() {
        return Ok(RawConfigDocument::default());
    }

    let jobs = value
        .as_mapping_mut()
        .and_then(|top| top.remove("jobs"))
        .filter(|jobs| !jobs.is_null());

    let mut doc: RawConfigDocument = serde_yaml::from_value(value)?;
    if let Some(jobs) = jobs {
        doc.jobs = Some(parse_jobs(jobs)?);
    }
    Ok(doc)
}

fn parse_jobs(jobs: Value) -> ConfigResult<BTreeMap<JobName, RawJobDefinition>> {
    let entries: Mapping = serde_yaml::from_value(jobs)?;

    let mut out = BTreeMap::new();
    for (key, entry) in entries {
        let Some(name) = job_name(&key) else {
            warn!(key = ?key, "skipping job with a non-scalar name");
            continue;
        };
        match serde_yaml::from_value::<RawJobDefinition>(entry) {
            Ok(job) => {
                out.insert(name, job);
            }
            Err(err) => warn!(job = %name, error = %err, "skipping invalid job definition"),
        }
    }
    Ok(out)
}

fn job_name(key: &Value) -> Option<JobName> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Read and parse the jobs document at `path`.
pub fn read_document(path: &Path) -> ConfigResult<RawConfigDocument> {
    if !path.exists() {
        return Err(ConfigError::PathNotFound(path.to_path_buf()));
    }

    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_document(&text)
}

/// Build the full configuration. Never fails.
///
/// Without a path the environment defaults are returned. With a path, a
/// read error or malformed YAML is logged and the environment defaults are
/// returned unchanged. Invalid single jobs or values only affect themselves.
pub fn load_configuration<E: EnvLookup + ?Sized>(path: Option<&Path>, env: &E) -> Configuration {
    let defaults = defaults(env);

    let Some(path) = path else {
        debug!("no config path provided, using defaults");
        return defaults;
    };

    info!(path = %path.display(), "loading config from {}", path.display());
    match read_document(path) {
        Ok(doc) => {
            let cfg = resolve_document(defaults, doc, env);
            info!(jobs = cfg.jobs.len(), "jobs config loaded");
            cfg
        }
        Err(err) => {
            error!(path = %path.display(), error = %err, "failed to load jobs config");
            defaults
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, io::Write};

    use super::*;
    use crate::config::captured::with_captured_logs;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_without_environment() {
        let cfg = defaults(&env(&[]));
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 8123);
        assert!(cfg.docker_network.is_none());
        assert!(cfg.jobs.is_empty());
    }

    #[test]
    fn defaults_read_host_port_and_network() {
        let cfg = defaults(&env(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "9000"),
            ("DOCKER_NETWORK", "jobs"),
        ]));
        assert_eq!(cfg.host, "127.0.0.1");
        assert_eq!(cfg.port, 9000);
        assert_eq!(cfg.docker_network.as_deref(), Some("jobs"));
    }

    #[test]
    fn invalid_port_falls_back() {
        assert_eq!(defaults(&env(&[("PORT", "http")])).port, 8123);
        assert_eq!(defaults(&env(&[("PORT", "70000")])).port, 8123);
        assert_eq!(defaults(&env(&[("PORT", "8080tcp")])).port, 8080);
    }

    #[test]
    fn empty_and_null_documents_are_empty_mappings() {
        for text in ["", "   \n", "~"] {
            let doc = parse_document(text).unwrap();
            assert_eq!(doc, RawConfigDocument::default(), "input: {text:?}");
        }
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let err = parse_document("jobs: [unclosed").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_path_not_found() {
        let err = read_document(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::PathNotFound(_)));
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn no_path_keeps_defaults() {
        let cfg = load_configuration(None, &env(&[]));
        assert_eq!(cfg, Configuration::default());
    }

    #[test]
    fn loads_and_resolves_document() {
        let file = write_config(
            r#"
port: 8200
dockerNetwork: from-doc
applicationDefaultCredentials: /var/secrets/adc.json
jobs:
  report:
    image: acme/report:1
    command: ["report", "--daily"]
    env:
      - name: DB_URL
        value: "${DB_URL:-postgres://localhost/report}"
      - name: REGION
        value: "${REGION}"
    timeoutSeconds: "${REPORT_TIMEOUT:-600}"
  cleanup:
    image: acme/cleanup:1
    timeoutSeconds: 0
"#,
        );
        let vars = env(&[("REGION", "eu-west-1"), ("DOCKER_NETWORK", "from-env")]);

        let cfg = load_configuration(Some(file.path()), &vars);
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 8200);
        assert_eq!(cfg.docker_network.as_deref(), Some("from-doc"));
        assert_eq!(
            cfg.application_default_credentials.as_deref(),
            Some("/var/secrets/adc.json")
        );

        let report = cfg.job("report").unwrap();
        assert_eq!(report.env.get("DB_URL"), Some("postgres://localhost/report"));
        assert_eq!(report.env.get("REGION"), Some("eu-west-1"));
        assert_eq!(report.timeout_seconds.map(|t| t.get()), Some(600));

        let cleanup = cfg.job("cleanup").unwrap();
        assert!(cleanup.timeout_seconds.is_none());
    }

    #[test]
    fn broken_document_falls_back_to_environment_defaults() {
        let file = write_config("host: 10.0.0.1\njobs:\n  bad: [\n");
        let vars = env(&[("PORT", "9100")]);

        let (logs, cfg) = with_captured_logs(|| load_configuration(Some(file.path()), &vars));
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 9100);
        assert!(cfg.jobs.is_empty());
        assert!(logs.contains("ERROR"), "logs: {logs}");
        assert!(logs.contains("failed to load jobs config"), "logs: {logs}");
    }

    #[test]
    fn unquoted_env_values_keep_the_job() {
        let file = write_config(
            r#"
host: 10.1.1.1
jobs:
  web:
    image: nginx
    env:
      - name: PORT
        value: 8080
      - name: DEBUG
        value: true
"#,
        );

        let cfg = load_configuration(Some(file.path()), &env(&[]));
        assert_eq!(cfg.host, "10.1.1.1");
        let web = cfg.job("web").unwrap();
        assert_eq!(web.env.to_assignments(), vec!["PORT=8080", "DEBUG=true"]);
    }

    #[test]
    fn quoted_port_is_accepted() {
        let file = write_config("port: \"9000\"\njobs:\n  a:\n    image: alpine\n");

        let cfg = load_configuration(Some(file.path()), &env(&[]));
        assert_eq!(cfg.port, 9000);
        assert_eq!(cfg.jobs.keys().collect::<Vec<_>>(), vec!["a"]);
    }

    #[test]
    fn invalid_job_is_skipped_and_others_survive() {
        let file = write_config(
            r#"
host: 10.2.2.2
jobs:
  good:
    image: alpine
    timeoutSeconds: 30
  noimage:
    command: [ls]
  bare: nope
  2024:
    image: busybox
"#,
        );

        let (logs, cfg) =
            with_captured_logs(|| load_configuration(Some(file.path()), &env(&[])));
        assert_eq!(cfg.host, "10.2.2.2");
        assert_eq!(cfg.jobs.keys().collect::<Vec<_>>(), vec!["2024", "good"]);
        assert_eq!(cfg.jobs["good"].timeout_seconds.map(|t| t.get()), Some(30));
        assert!(logs.contains("skipping invalid job definition"), "logs: {logs}");
        assert!(logs.contains("noimage"), "logs: {logs}");
        assert!(logs.contains("bare"), "logs: {logs}");
    }

    #[test]
    fn jobs_that_are_not_a_mapping_fail_the_document() {
        let err = parse_document("jobs: [a, b]\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn null_jobs_are_absent() {
        let doc = parse_document("jobs: ~\nhost: h\n").unwrap();
        assert!(doc.jobs.is_none());
        assert_eq!(doc.host.as_deref(), Some("h"));
    }
}
