use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use cepa_core::{CepError, CepProvider, ProviderKey, RaceConfig};

/// Orchestrator that races lookups across registered providers.
pub struct Cepa {
    pub(crate) providers: Vec<Arc<dyn CepProvider>>,
    pub(crate) cfg: RaceConfig,
}

impl std::fmt::Debug for Cepa {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&'static str> = self.providers.iter().map(|p| p.name()).collect();
        f.debug_struct("Cepa")
            .field("providers", &names)
            .field("cfg", &self.cfg)
            .finish()
    }
}

/// Builder for constructing a `Cepa` orchestrator with custom configuration.
pub struct CepaBuilder {
    providers: Vec<Arc<dyn CepProvider>>,
    cfg: RaceConfig,
}

impl Default for CepaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CepaBuilder {
    /// Create a new builder with the default configuration.
    ///
    /// Starts with no providers and a one second race deadline. Register at
    /// least one provider via [`with_provider`](Self::with_provider).
    #[must_use]
    pub fn new() -> Self {
        Self {
            providers: vec![],
            cfg: RaceConfig::default(),
        }
    }

    /// Register a provider.
    ///
    /// Registration order carries no priority: every eligible provider is
    /// started at the same time and the first success wins.
    #[must_use]
    pub fn with_provider(mut self, p: Arc<dyn CepProvider>) -> Self {
        self.providers.push(p);
        self
    }

    /// Set the shared race deadline.
    ///
    /// The deadline bounds the whole race, not each provider; when it fires
    /// every in-flight call is abandoned.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.cfg.timeout = timeout;
        self
    }

    /// Restrict races to the given providers.
    ///
    /// Unknown keys are dropped at build time; duplicates are ignored.
    #[must_use]
    pub fn only(mut self, keys: &[ProviderKey]) -> Self {
        self.cfg.only = keys.iter().map(|k| k.as_str().to_string()).collect();
        self
    }

    /// Replace the whole race configuration.
    #[must_use]
    pub fn config(mut self, cfg: RaceConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Build the `Cepa` orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no providers have been registered, or if an
    /// `only` filter was set and none of its keys names a registered provider.
    pub fn build(mut self) -> Result<Cepa, CepError> {
        if self.providers.is_empty() {
            return Err(CepError::InvalidArg(
                "no providers registered; add at least one via with_provider(...)".to_string(),
            ));
        }

        let known: HashSet<&'static str> = self.providers.iter().map(|p| p.name()).collect();
        if !self.cfg.only.is_empty() {
            let mut seen: HashSet<String> = HashSet::new();
            let requested = std::mem::take(&mut self.cfg.only);
            for name in requested {
                if known.contains(name.as_str()) && seen.insert(name.clone()) {
                    self.cfg.only.push(name);
                }
            }
            if self.cfg.only.is_empty() {
                return Err(CepError::InvalidArg(
                    "provider filter matches no registered provider".to_string(),
                ));
            }
        }

        Ok(Cepa {
            providers: self.providers,
            cfg: self.cfg,
        })
    }
}

impl Cepa {
    /// Start building a new `Cepa` instance.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use std::time::Duration;
    ///
    /// let cepa = cepa::Cepa::builder()
    ///     .with_provider(Arc::new(cepa_brasilapi::BrasilApiProvider::new_default()))
    ///     .with_provider(Arc::new(cepa_viacep::ViaCepProvider::new_default()))
    ///     .timeout(Duration::from_secs(1))
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> CepaBuilder {
        CepaBuilder::new()
    }

    /// Active race configuration.
    #[must_use]
    pub const fn config(&self) -> &RaceConfig {
        &self.cfg
    }

    /// Providers that take part in a race, in registration order.
    pub(crate) fn eligible(&self) -> Vec<Arc<dyn CepProvider>> {
        if self.cfg.only.is_empty() {
            return self.providers.clone();
        }
        self.providers
            .iter()
            .filter(|p| self.cfg.only.iter().any(|n| n == p.name()))
            .cloned()
            .collect()
    }
}
