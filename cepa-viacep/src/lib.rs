//! cepa-viacep
//!
//! `CepProvider` backed by ViaCEP (`GET {base}/ws/{cep}/json/`).
#![warn(missing_docs)]

mod wire;

use async_trait::async_trait;
use cepa_core::{Address, Cep, CepError, CepProvider, ProviderKey, Scope};
use url::Url;

/// Public ViaCEP endpoint.
pub const DEFAULT_BASE_URL: &str = "https://viacep.com.br";

/// Provider for ViaCEP. Construct with [`ViaCepProvider::new_default`].
#[derive(Debug, Clone)]
pub struct ViaCepProvider {
    http: reqwest::Client,
    base: String,
}

impl ViaCepProvider {
    /// Static provider key for `Cepa::only` filters.
    pub const KEY: ProviderKey = ProviderKey::new("cepa-viacep");
    /// Name shown as the winning API.
    pub const DISPLAY: &'static str = "ViaCEP";
    /// Value copied into `Address::source`.
    pub const SOURCE: &'static str = "viacep";

    /// Build against the public endpoint with a fresh `reqwest::Client`.
    #[must_use]
    pub fn new_default() -> Self {
        Self::with_client(reqwest::Client::new())
    }

    /// Build against the public endpoint over an existing client.
    #[must_use]
    pub fn with_client(http: reqwest::Client) -> Self {
        Self {
            http,
            base: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the provider at another host.
    ///
    /// # Errors
    /// Returns `InvalidArg` if `base` is not an absolute URL.
    pub fn with_base_url(mut self, base: &str) -> Result<Self, CepError> {
        let parsed = Url::parse(base)
            .map_err(|e| CepError::InvalidArg(format!("invalid ViaCEP base url {base}: {e}")))?;
        self.base = parsed.as_str().trim_end_matches('/').to_string();
        Ok(self)
    }

    /// Base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base
    }

    /// Request URL for `cep`. The key is sent as one escaped path segment.
    fn endpoint(&self, cep: &Cep) -> Result<Url, CepError> {
        let mut url = Url::parse(&self.base)
            .map_err(|e| CepError::InvalidArg(format!("invalid ViaCEP base url: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| CepError::InvalidArg(format!("ViaCEP base url {} cannot take a path", self.base)))?
            .pop_if_empty()
            // trailing empty segment keeps the `/json/` slash ViaCEP expects
            .extend(["ws", cep.as_str(), "json", ""]);
        Ok(url)
    }

    async fn call(&self, cep: &Cep) -> Result<Address, CepError> {
        let name = Self::KEY.as_str();
        let url = self.endpoint(cep)?;
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| CepError::transport(name, e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CepError::protocol(name, status.as_u16()));
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| CepError::decode(name, e.to_string()))?;
        let payload: wire::WsJson =
            serde_json::from_slice(&body).map_err(|e| CepError::decode(name, e.to_string()))?;
        if payload.is_missing() {
            return Err(CepError::not_found(name, cep.as_str()));
        }
        Ok(payload.into_address(Self::DISPLAY, self.vendor()))
    }
}

#[async_trait]
impl CepProvider for ViaCepProvider {
    fn name(&self) -> &'static str {
        Self::KEY.as_str()
    }

    fn vendor(&self) -> &'static str {
        Self::SOURCE
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "cepa_viacep::fetch", skip_all, fields(cep = %cep))
    )]
    async fn fetch(&self, scope: &Scope, cep: &Cep) -> Result<Address, CepError> {
        if !scope.is_live() {
            return Err(CepError::cancelled(Self::KEY.as_str()));
        }
        let out = scope
            .run(self.call(cep))
            .await
            .unwrap_or_else(|| Err(CepError::cancelled(Self::KEY.as_str())));
        #[cfg(feature = "tracing")]
        if let Err(e) = &out {
            tracing::debug!(error = %e, "viacep lookup failed");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_keeps_trailing_slash() {
        let p = ViaCepProvider::new_default();
        let url = p.endpoint(&Cep::new_unchecked("01001000")).unwrap();
        assert_eq!(url.as_str(), "https://viacep.com.br/ws/01001000/json/");
    }

    #[test]
    fn endpoint_escapes_query_and_slash_in_key() {
        let p = ViaCepProvider::new_default()
            .with_base_url("http://localhost:8080")
            .unwrap();
        let url = p.endpoint(&Cep::new_unchecked("01001000?x=1")).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/ws/01001000%3Fx=1/json/");
        assert_eq!(url.query(), None);

        let url = p.endpoint(&Cep::new_unchecked("a/b")).unwrap();
        assert_eq!(url.path(), "/ws/a%2Fb/json/");
    }
}
