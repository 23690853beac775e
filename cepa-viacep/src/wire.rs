use cepa_core::Address;
use serde::Deserialize;
use serde_json::Value;

/// Payload of `GET /ws/{cep}/json/`.
///
/// An unknown CEP comes back as `200 {"erro": true}` (older deployments send
/// the string `"true"`), so every field is optional here and the caller
/// decides whether the body names an address.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct WsJson {
    pub cep: String,
    pub logradouro: String,
    pub bairro: String,
    pub localidade: String,
    pub uf: String,
    pub erro: Option<Value>,
}

impl WsJson {
    /// True when the body says the CEP does not exist.
    pub(crate) fn is_missing(&self) -> bool {
        let flagged = match &self.erro {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
            _ => false,
        };
        flagged || self.cep.trim().is_empty()
    }

    pub(crate) fn into_address(self, provider: &str, source: &str) -> Address {
        Address {
            provider: provider.to_string(),
            source: source.to_string(),
            cep: self.cep,
            street: self.logradouro,
            neighborhood: self.bairro,
            city: self.localidade,
            state: self.uf,
        }
    }
}
