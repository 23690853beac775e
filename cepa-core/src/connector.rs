use async_trait::async_trait;

use crate::{Address, Cep, CepError, Scope};
pub use cepa_types::ProviderKey;

/// Upstream adapter contract consumed by the race coordinator.
///
/// One implementation per upstream service. Implementations must be safe to
/// call from a freshly spawned task and must not share mutable state between
/// invocations.
#[async_trait]
pub trait CepProvider: Send + Sync {
    /// Stable provider name, e.g. "cepa-viacep". Tags every failure.
    fn name(&self) -> &'static str;

    /// Short upstream tag copied into [`Address::source`], e.g. "viacep".
    fn vendor(&self) -> &'static str;

    /// Typed key for race configuration.
    fn key(&self) -> ProviderKey {
        ProviderKey::new(self.name())
    }

    /// Perform one lookup against the upstream.
    ///
    /// Contract:
    /// - return `Cancelled` without doing I/O when `scope` is not live;
    /// - race blocking I/O against `scope.expired()`;
    /// - map connection errors to `Transport`, non-success statuses to
    ///   `Protocol`, unreadable or unexpected payloads to `Decode`, and a
    ///   well-formed "no such CEP" answer to `NotFound`;
    /// - never retry internally.
    async fn fetch(&self, scope: &Scope, cep: &Cep) -> Result<Address, CepError>;
}
