//! cepa-brasilapi
//!
//! `CepProvider` backed by BrasilAPI's CEP v1 endpoint
//! (`GET {base}/api/cep/v1/{cep}`).
#![warn(missing_docs)]

mod wire;

use async_trait::async_trait;
use cepa_core::{Address, Cep, CepError, CepProvider, ProviderKey, Scope};
use reqwest::StatusCode;
use url::Url;

/// Public BrasilAPI endpoint.
pub const DEFAULT_BASE_URL: &str = "https://brasilapi.com.br";

/// Provider for BrasilAPI. Construct with [`BrasilApiProvider::new_default`].
#[derive(Debug, Clone)]
pub struct BrasilApiProvider {
    http: reqwest::Client,
    base: String,
}

impl BrasilApiProvider {
    /// Static provider key for `Cepa::only` filters.
    pub const KEY: ProviderKey = ProviderKey::new("cepa-brasilapi");
    /// Name shown as the winning API.
    pub const DISPLAY: &'static str = "Brasil API";
    /// Value copied into `Address::source`.
    pub const SOURCE: &'static str = "brasilapi";

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

    /// Point the provider at another host, e.g. a local mock server.
    ///
    /// # Errors
    /// Returns `InvalidArg` if `base` is not an absolute URL.
    pub fn with_base_url(mut self, base: &str) -> Result<Self, CepError> {
        let parsed = Url::parse(base)
            .map_err(|e| CepError::InvalidArg(format!("invalid BrasilAPI base url {base}: {e}")))?;
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
            .map_err(|e| CepError::InvalidArg(format!("invalid BrasilAPI base url: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| CepError::InvalidArg(format!("BrasilAPI base url {} cannot take a path", self.base)))?
            .pop_if_empty()
            .extend(["api", "cep", "v1", cep.as_str()]);
        Ok(url)
    }

    async fn call(&self, cep: &Cep) -> Result<Address, CepError> {
        let name = Self::KEY.as_str();
        let resp = self
            .http
            .get(self.endpoint(cep)?)
            .send()
            .await
            .map_err(|e| CepError::transport(name, e.to_string()))?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(CepError::not_found(name, cep.as_str()));
        }
        if !status.is_success() {
            return Err(CepError::protocol(name, status.as_u16()));
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| CepError::decode(name, e.to_string()))?;
        let payload: wire::CepV1 =
            serde_json::from_slice(&body).map_err(|e| CepError::decode(name, e.to_string()))?;
        Ok(payload.into_address(Self::DISPLAY, self.vendor()))
    }
}

#[async_trait]
impl CepProvider for BrasilApiProvider {
    fn name(&self) -> &'static str {
        Self::KEY.as_str()
    }

    fn vendor(&self) -> &'static str {
        Self::SOURCE
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "cepa_brasilapi::fetch", skip_all, fields(cep = %cep))
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
            tracing::debug!(error = %e, "brasilapi lookup failed");
        }
        out
    }
}
