use serde::{Deserialize, Serialize};

use crate::EnvVar;

/// Ordered list of environment variables for a job.
///
/// Duplicate names are allowed and order is preserved: engines apply entries
/// front to back, so a later duplicate wins. Serialized as a plain array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Env(pub Vec<EnvVar>);

impl Env {
    /// Create an empty environment.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &EnvVar> {
        self.0.iter()
    }

    /// Get the effective value for a name (the last matching entry).
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .rev()
            .find(|var| var.name() == name)
            .map(|var| var.value())
    }

    /// Append an entry.
    pub fn push<N, V>(&mut self, name: N, value: V)
    where
        N: Into<String>,
        V: Into<String>,
    {
        self.0.push(EnvVar::new(name, value));
    }

    /// Build a new environment by rewriting every value, keeping names and order.
    pub fn map_values<F>(&self, mut f: F) -> Env
    where
        F: FnMut(&str) -> String,
    {
        Env(self.0.iter().map(|var| var.with_value(f(var.value()))).collect())
    }

    /// Render all entries as `NAME=value` strings in declaration order.
    pub fn to_assignments(&self) -> Vec<String> {
        self.0.iter().map(EnvVar::to_assignment).collect()
    }
}

impl FromIterator<EnvVar> for Env {
    fn from_iter<I: IntoIterator<Item = EnvVar>>(iter: I) -> Self {
        Env(iter.into_iter().collect())
    }
}
