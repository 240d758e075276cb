use serde::{Deserialize, Serialize};

/// Single environment variable passed to a job container.
///
/// Serialized as `{ name, value }`, the shape used by the jobs document.
/// Neither field is validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvVar {
    /// Variable name as seen inside the container.
    #[serde(deserialize_with = "crate::document::scalar::text")]
    name: String,
    /// Variable value; may hold a `${NAME}` placeholder before resolution.
    /// Unquoted numbers and booleans are kept as their text.
    #[serde(deserialize_with = "crate::document::scalar::text")]
    value: String,
}

impl EnvVar {
    /// Create a new variable.
    pub fn new<N, V>(name: N, value: V) -> Self
    where
        N: Into<String>,
        V: Into<String>,
    {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Get the name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Return a copy with the same name and a replaced value.
    pub fn with_value(&self, value: impl Into<String>) -> Self {
        Self {
            name: self.name.clone(),
            value: value.into(),
        }
    }

    /// Render as `NAME=value`, the form container engines expect.
    pub fn to_assignment(&self) -> String {
        format!("{}={}", self.name, self.value)
    }
}

impl From<(&str, &str)> for EnvVar {
    fn from((name, value): (&str, &str)) -> Self {
        Self::new(name, value)
    }
}
