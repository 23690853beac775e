//! cepa-core
//!
//! Core types, traits, and utilities shared across the cepa ecosystem.
//!
//! - `cep`: the validated lookup key.
//! - `connector`: the `CepProvider` trait every upstream adapter implements.
//! - `scope`: the per-race deadline and cancellation token.
//!
//! Async runtime (Tokio)
//! ---------------------
//! `scope::Scope` is built on `tokio::sync::watch` and `tokio::time`, so races
//! and adapters must run under a Tokio 1.x runtime with the time driver
//! enabled.
//!
#![warn(missing_docs)]

/// The validated CEP lookup key.
pub mod cep;
/// Provider trait implemented by upstream adapters.
pub mod connector;
/// Per-race deadline and cancellation scope.
pub mod scope;
/// Re-exported shared types from `cepa-types`.
pub mod types;

pub use cep::Cep;
pub use connector::CepProvider;
pub use scope::{Scope, ScopeGuard, ScopeState};
pub use types::*;
