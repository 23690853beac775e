use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use cepa_core::{Address, Cep, CepError, CepProvider, Scope};

/// Instruction for how a scripted provider answers once its delay elapses.
#[derive(Clone, Debug)]
pub enum MockBehavior {
    /// Return the provided address.
    Return(Address),
    /// Answer from the static fixtures, `NotFound` for unknown CEPs.
    Fixture,
    /// Fail with the provided error.
    Fail(CepError),
    /// Never answer (simulate a stalled upstream).
    Hang,
    /// Panic inside the provider task.
    Panic,
}

/// Provider with scripted latency and outcome, for exercising race timing.
///
/// The delay runs against the race scope, so a provider that loses the race
/// stops as soon as the scope closes.
pub struct ScriptedProvider {
    name: &'static str,
    vendor: &'static str,
    delay: Duration,
    behavior: MockBehavior,
    calls: AtomicUsize,
    completed: AtomicUsize,
}

impl ScriptedProvider {
    /// Start a builder.
    #[must_use]
    pub fn builder() -> ScriptedProviderBuilder {
        ScriptedProviderBuilder::new()
    }

    /// Number of `fetch` invocations so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of invocations that got past their delay and produced an outcome.
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CepProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        self.vendor
    }

    async fn fetch(&self, scope: &Scope, cep: &Cep) -> Result<Address, CepError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !scope.is_live() {
            return Err(CepError::cancelled(self.name));
        }
        if !self.delay.is_zero() {
            scope
                .run(tokio::time::sleep(self.delay))
                .await
                .ok_or_else(|| CepError::cancelled(self.name))?;
        }
        let out = match &self.behavior {
            MockBehavior::Return(a) => Ok(a.clone()),
            MockBehavior::Fixture => crate::fixtures::by_cep(cep.as_str())
                .map(|mut a| {
                    a.provider = self.name.to_string();
                    a.source = self.vendor.to_string();
                    a
                })
                .ok_or_else(|| CepError::not_found(self.name, cep.as_str())),
            MockBehavior::Fail(e) => Err(e.clone()),
            MockBehavior::Hang => std::future::pending().await,
            MockBehavior::Panic => panic!("scripted provider {} panicked", self.name),
        };
        self.completed.fetch_add(1, Ordering::SeqCst);
        out
    }
}

/// Builder for [`ScriptedProvider`].
pub struct ScriptedProviderBuilder {
    name: &'static str,
    vendor: &'static str,
    delay: Duration,
    behavior: MockBehavior,
}

impl Default for ScriptedProviderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedProviderBuilder {
    /// Defaults: name "scripted", no delay, fixture answers.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            name: "scripted",
            vendor: "scripted",
            delay: Duration::ZERO,
            behavior: MockBehavior::Fixture,
        }
    }

    /// Provider name reported by `name()` and used to tag failures.
    #[must_use]
    pub const fn name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Tag copied into `Address::source` for fixture answers.
    #[must_use]
    pub const fn vendor(mut self, vendor: &'static str) -> Self {
        self.vendor = vendor;
        self
    }

    /// Latency before the scripted outcome.
    #[must_use]
    pub const fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Shorthand for `delay(Duration::from_millis(ms))`.
    #[must_use]
    pub const fn delay_ms(self, ms: u64) -> Self {
        self.delay(Duration::from_millis(ms))
    }

    /// Outcome produced once the delay elapses.
    #[must_use]
    pub fn behavior(mut self, behavior: MockBehavior) -> Self {
        self.behavior = behavior;
        self
    }

    /// Answer with `address`.
    #[must_use]
    pub fn returns(self, address: Address) -> Self {
        self.behavior(MockBehavior::Return(address))
    }

    /// Fail with `err`.
    #[must_use]
    pub fn fails_with(self, err: CepError) -> Self {
        self.behavior(MockBehavior::Fail(err))
    }

    /// Fail with a transport error tagged with this provider's name.
    #[must_use]
    pub fn fails(self) -> Self {
        let err = CepError::transport(self.name, "scripted failure");
        self.fails_with(err)
    }

    /// Never answer.
    #[must_use]
    pub fn hangs(self) -> Self {
        self.behavior(MockBehavior::Hang)
    }

    /// Panic when called.
    #[must_use]
    pub fn panics(self) -> Self {
        self.behavior(MockBehavior::Panic)
    }

    /// Finish the provider, shared so tests can keep reading its counters.
    #[must_use]
    pub fn build(self) -> Arc<ScriptedProvider> {
        Arc::new(ScriptedProvider {
            name: self.name,
            vendor: self.vendor,
            delay: self.delay,
            behavior: self.behavior,
            calls: AtomicUsize::new(0),
            completed: AtomicUsize::new(0),
        })
    }
}
