use async_trait::async_trait;
use cepa_core::{Address, Cep, CepError, CepProvider, Scope};

pub mod fixtures;
mod scripted;

pub use scripted::{MockBehavior, ScriptedProvider, ScriptedProviderBuilder};

/// Mock provider for CI-safe examples. Answers from static fixtures.
///
/// Magic keys: `"99999999"` fails with a transport error and `"99999998"`
/// sleeps 200ms before answering `NotFound`, so callers can exercise their
/// deadline handling.
pub struct MockProvider;

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProvider {
    /// Provider name used to tag failures.
    pub const NAME: &'static str = "cepa-mock";

    /// Create the mock provider.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CepProvider for MockProvider {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn vendor(&self) -> &'static str {
        "mock"
    }

    async fn fetch(&self, scope: &Scope, cep: &Cep) -> Result<Address, CepError> {
        if !scope.is_live() {
            return Err(CepError::cancelled(Self::NAME));
        }
        match cep.as_str() {
            "99999999" => Err(CepError::transport(Self::NAME, "forced failure")),
            "99999998" => {
                scope
                    .run(tokio::time::sleep(std::time::Duration::from_millis(200)))
                    .await
                    .ok_or_else(|| CepError::cancelled(Self::NAME))?;
                Err(CepError::not_found(Self::NAME, cep.as_str()))
            }
            s => fixtures::by_cep(s).ok_or_else(|| CepError::not_found(Self::NAME, s)),
        }
    }
}
