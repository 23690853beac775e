//! cepa-specific data transfer objects and configuration primitives.
#![warn(missing_docs)]

mod address;
mod config;
mod connector;
mod error;
mod reports;

pub use address::Address;
pub use config::RaceConfig;
pub use connector::ProviderKey;
pub use error::{CepError, ExhaustedCause};
pub use reports::LookupReport;
