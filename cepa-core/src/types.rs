//! Re-export of foundational types from `cepa-types`.
// Consolidated re-exports so downstream crates can depend on `cepa-core` only

pub use cepa_types::{Address, CepError, ExhaustedCause, LookupReport, ProviderKey, RaceConfig};
