//! Report envelopes produced by the orchestrator.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::error::CepError;

/// Summary of one lookup race.
///
/// Carries the requested `cep`, the winning [`Address`] if any provider
/// answered in time, and the non-fatal failures observed along the way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupReport {
    /// Requested CEP in normalized 8-digit form.
    pub cep: String,
    /// Winning address, if the race produced one.
    pub address: Option<Address>,
    /// Name of the provider that won the race.
    pub winner: Option<String>,
    /// Failures observed by the coordinator, in arrival order. When the race
    /// is exhausted the terminal `Exhausted` error is the last entry.
    pub warnings: Vec<CepError>,
    /// Wall-clock time from race start to decision.
    pub elapsed: Duration,
}

impl LookupReport {
    /// Returns true when the race produced a winner.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.address.is_some()
    }
}
