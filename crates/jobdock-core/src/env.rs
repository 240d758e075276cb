//! Environment variable lookup used during configuration resolution.
//!
//! Resolution never reads `std::env` directly; it goes through [`EnvLookup`]
//! so callers (and tests) decide which environment is visible.
use std::{collections::HashMap, hash::BuildHasher};

/// Source of environment variables.
pub trait EnvLookup {
    /// Value of `name`, or `None` when unset.
    ///
    /// A variable set to the empty string is `Some("")`.
    fn var(&self, name: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvLookup for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl<S: BuildHasher> EnvLookup for HashMap<String, String, S> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl<T: EnvLookup + ?Sized> EnvLookup for &T {
    fn var(&self, name: &str) -> Option<String> {
        (**self).var(name)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn map_lookup_distinguishes_empty_from_unset() {
        let env: HashMap<String, String> = [("EMPTY".to_string(), String::new())].into();
        assert_eq!(env.var("EMPTY"), Some(String::new()));
        assert_eq!(env.var("MISSING"), None);
    }

    #[test]
    fn process_env_sees_path() {
        // PATH is set in every sane test environment.
        assert!(ProcessEnv.var("PATH").is_some());
        assert!(ProcessEnv.var("JOBDOCK_SURELY_UNSET_VARIABLE").is_none());
    }
}
