use std::{fmt, num::NonZeroU64, time::Duration};

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Execution time budget for a job, in whole seconds.
///
/// Always strictly positive; a job without a budget carries `None` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeoutSecs(NonZeroU64);

impl TimeoutSecs {
    /// Create a timeout, rejecting zero.
    pub fn new(secs: u64) -> Result<Self, ModelError> {
        NonZeroU64::new(secs)
            .map(Self)
            .ok_or_else(|| ModelError::Invalid("timeout must be greater than zero".into()))
    }

    pub const fn get(&self) -> u64 {
        self.0.get()
    }

    /// Convert into a [`Duration`].
    pub const fn as_duration(&self) -> Duration {
        Duration::from_secs(self.0.get())
    }
}

impl TryFrom<u64> for TimeoutSecs {
    type Error = ModelError;
    fn try_from(secs: u64) -> Result<Self, Self::Error> {
        Self::new(secs)
    }
}

impl From<TimeoutSecs> for u64 {
    fn from(t: TimeoutSecs) -> Self {
        t.get()
    }
}

impl fmt::Display for TimeoutSecs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}
