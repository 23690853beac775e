//! Cepa resolves a Brazilian postal code (CEP) by racing redundant providers.
//!
//! Overview
//! - Starts every registered provider at once, each in its own task, under a
//!   single shared deadline ([`Scope`]).
//! - Returns the first address any provider delivers and cancels the rest.
//! - Normalizes upstream failures into provider-tagged [`CepError`] values.
//!
//! Key behaviors and trade-offs
//! - First success wins. There is no priority between providers; the fastest
//!   good answer is taken, which costs one request per provider per lookup.
//! - One early failure is tolerated: after it the race only waits for a
//!   success or the deadline. Later failures are recorded but never decide
//!   the race.
//! - If every provider fails the race ends right away as
//!   `Exhausted(AllFailed)` instead of waiting for the deadline.
//! - The deadline is fatal: `Exhausted(DeadlineElapsed)`. Nothing is retried;
//!   callers start a new lookup if they want another attempt.
//!
//! Examples
//! ```rust,ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//! use cepa::{Cepa, TextPresenter, Presenter};
//!
//! let cepa = Cepa::builder()
//!     .with_provider(Arc::new(cepa_brasilapi::BrasilApiProvider::new_default()))
//!     .with_provider(Arc::new(cepa_viacep::ViaCepProvider::new_default()))
//!     .timeout(Duration::from_secs(1))
//!     .build()?;
//!
//! let address = cepa.lookup_str("01001-000").await?;
//! TextPresenter::new(std::io::stdout()).present(&address)?;
//! ```
#![warn(missing_docs)]

pub(crate) mod core;
mod lookup;
pub mod present;
pub mod race;

pub use core::{Cepa, CepaBuilder};
pub use present::{JsonPresenter, Presenter, TextPresenter};
pub use race::{RaceOutcome, RaceResult, RaceTasks, TaskSummary, race};

// Re-export core types for convenience
pub use cepa_core::{
    Address, Cep, CepError, CepProvider, ExhaustedCause, LookupReport, ProviderKey, RaceConfig,
    Scope, ScopeGuard, ScopeState,
};
