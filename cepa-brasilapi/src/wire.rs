use cepa_core::Address;
use serde::Deserialize;

/// Payload of `GET /api/cep/v1/{cep}`.
///
/// BrasilAPI sends `null` for parts it does not know (city-wide CEPs have no
/// street), so every field but `cep` is optional.
#[derive(Debug, Deserialize)]
pub(crate) struct CepV1 {
    pub cep: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub neighborhood: Option<String>,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    #[allow(dead_code)]
    pub service: Option<String>,
}

impl CepV1 {
    pub(crate) fn into_address(self, provider: &str, source: &str) -> Address {
        Address {
            provider: provider.to_string(),
            source: source.to_string(),
            cep: self.cep,
            street: self.street.unwrap_or_default(),
            neighborhood: self.neighborhood.unwrap_or_default(),
            city: self.city.unwrap_or_default(),
            state: self.state.unwrap_or_default(),
        }
    }
}
