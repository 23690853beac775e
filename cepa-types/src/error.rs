use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a race ended without a winner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ExhaustedCause {
    /// The race deadline fired before any provider delivered a usable address.
    DeadlineElapsed,
    /// Every provider finished and none of them produced an address.
    AllFailed,
}

/// Unified error type for the cepa workspace.
///
/// Adapter-level failures (`Transport`, `Protocol`, `Decode`, `NotFound`) are
/// always tagged with the provider that produced them. `Exhausted` is the
/// race-level terminal failure and aggregates what the coordinator observed.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CepError {
    /// The request never produced a response (connection refused, DNS, reset, ...).
    #[error("{provider}: transport error: {msg}")]
    Transport {
        /// Provider name that failed.
        provider: String,
        /// Human-readable error message.
        msg: String,
    },

    /// The upstream answered with a non-success status code.
    #[error("{provider}: status {status}")]
    Protocol {
        /// Provider name that failed.
        provider: String,
        /// HTTP status code returned by the upstream.
        status: u16,
    },

    /// The payload could not be read or did not match the expected schema.
    #[error("{provider}: decode error: {msg}")]
    Decode {
        /// Provider name that failed.
        provider: String,
        /// Human-readable error message.
        msg: String,
    },

    /// A well-formed response said the key has no data.
    #[error("{provider}: CEP {cep} not found")]
    NotFound {
        /// Provider name that answered.
        provider: String,
        /// The CEP that was looked up.
        cep: String,
    },

    /// The provider observed its race scope fire and abandoned the call.
    #[error("{provider}: cancelled")]
    Cancelled {
        /// Provider name that abandoned the call.
        provider: String,
    },

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// No provider produced a usable address before the race ended.
    #[error("no provider answered in time")]
    Exhausted {
        /// Whether the deadline fired or every provider failed first.
        cause: ExhaustedCause,
        /// Failures observed by the coordinator, in arrival order.
        failures: Vec<CepError>,
    },
}

impl CepError {
    /// Helper: build a `Transport` error with the provider name and message.
    pub fn transport(provider: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Transport {
            provider: provider.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `Protocol` error for a non-success status.
    pub fn protocol(provider: impl Into<String>, status: u16) -> Self {
        Self::Protocol {
            provider: provider.into(),
            status,
        }
    }

    /// Helper: build a `Decode` error with the provider name and message.
    pub fn decode(provider: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Decode {
            provider: provider.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `NotFound` error for the given CEP.
    pub fn not_found(provider: impl Into<String>, cep: impl Into<String>) -> Self {
        Self::NotFound {
            provider: provider.into(),
            cep: cep.into(),
        }
    }

    /// Helper: build a `Cancelled` error.
    pub fn cancelled(provider: impl Into<String>) -> Self {
        Self::Cancelled {
            provider: provider.into(),
        }
    }

    /// Provider that produced this error, if it is provider-tagged.
    #[must_use]
    pub fn provider(&self) -> Option<&str> {
        match self {
            Self::Transport { provider, .. }
            | Self::Protocol { provider, .. }
            | Self::Decode { provider, .. }
            | Self::NotFound { provider, .. }
            | Self::Cancelled { provider } => Some(provider),
            Self::InvalidArg(_) | Self::Exhausted { .. } => None,
        }
    }

    /// Returns true for failures an adapter reports about its own upstream call.
    #[must_use]
    pub const fn is_adapter_failure(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. }
                | Self::Protocol { .. }
                | Self::Decode { .. }
                | Self::NotFound { .. }
        )
    }

    /// Returns true if this error ended a race without a winner.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted { .. })
    }

    /// Flatten an `Exhausted` aggregate into its observed failures.
    ///
    /// Other variants are returned as a single-element vector.
    #[must_use]
    pub fn flatten(self) -> Vec<Self> {
        match self {
            Self::Exhausted { failures, .. } => {
                failures.into_iter().flat_map(Self::flatten).collect()
            }
            other => vec![other],
        }
    }
}
