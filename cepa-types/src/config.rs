//! Configuration types shared across orchestrators and providers.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for a single lookup race.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceConfig {
    /// Shared deadline for the whole race. When it fires every in-flight
    /// provider call is abandoned and the race is exhausted.
    pub timeout: Duration,
    /// Restrict the race to these provider names. Empty means every
    /// registered provider takes part.
    pub only: Vec<String>,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(1),
            only: Vec::new(),
        }
    }
}
