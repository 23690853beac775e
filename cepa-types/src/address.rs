//! Normalized lookup result shared by every provider.

use serde::{Deserialize, Serialize};

/// Address resolved for a CEP by whichever provider answered first.
///
/// Field values are copied verbatim from the upstream payload; no cleanup or
/// cross-provider reconciliation happens here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Human-facing provider label, e.g. "Brasil API".
    pub provider: String,
    /// Short machine tag of the upstream, e.g. "viacep".
    pub source: String,
    /// CEP as formatted by the upstream (may include a hyphen).
    pub cep: String,
    /// Street name (logradouro).
    pub street: String,
    /// Neighborhood (bairro).
    pub neighborhood: String,
    /// City (localidade).
    pub city: String,
    /// State abbreviation (UF).
    pub state: String,
}
