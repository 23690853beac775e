use std::sync::Arc;
use std::time::Duration;

use cepa_core::{Address, Cep, CepError, CepProvider, ExhaustedCause, Scope};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Terminal decision of one race.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RaceOutcome {
    /// A provider delivered the first accepted address.
    Winner {
        /// Name of the winning provider.
        provider: &'static str,
        /// The accepted address.
        address: Address,
    },
    /// No provider produced a usable address before the race ended.
    Exhausted(ExhaustedCause),
}

/// Everything a race produced: the decision, what was observed, and the
/// spawned provider tasks.
#[derive(Debug)]
pub struct RaceResult {
    /// The coordinator's decision.
    pub outcome: RaceOutcome,
    /// Provider failures observed during the race, in arrival order.
    pub failures: Vec<CepError>,
    /// Time from race start to decision.
    pub elapsed: Duration,
    /// Handles of the spawned provider tasks; losers exit on their own once
    /// the race scope is closed.
    pub tasks: RaceTasks,
}

impl RaceResult {
    /// Name of the winning provider, if any.
    #[must_use]
    pub const fn winner(&self) -> Option<&'static str> {
        match &self.outcome {
            RaceOutcome::Winner { provider, .. } => Some(*provider),
            RaceOutcome::Exhausted(_) => None,
        }
    }

    /// Collapse into the caller-facing result.
    ///
    /// # Errors
    /// Returns `CepError::Exhausted` carrying the observed failures when the
    /// race produced no winner.
    pub fn into_result(self) -> Result<Address, CepError> {
        match self.outcome {
            RaceOutcome::Winner { address, .. } => Ok(address),
            RaceOutcome::Exhausted(cause) => Err(CepError::Exhausted {
                cause,
                failures: self.failures,
            }),
        }
    }
}

/// How the spawned provider tasks ended.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskSummary {
    /// Tasks that returned normally (delivered, or saw the scope close).
    pub finished: usize,
    /// Names of providers whose task panicked.
    pub panicked: Vec<&'static str>,
    /// Tasks aborted through [`RaceTasks::abort`].
    pub aborted: usize,
}

/// Join handles of one race's provider tasks.
#[derive(Debug, Default)]
pub struct RaceTasks {
    handles: Vec<(&'static str, JoinHandle<()>)>,
}

impl RaceTasks {
    /// Number of spawned tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Returns true if no task was spawned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Returns true once every task has completed.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handles.iter().all(|(_, h)| h.is_finished())
    }

    /// Abort every task that is still running.
    pub fn abort(&self) {
        for (_, h) in &self.handles {
            h.abort();
        }
    }

    /// Wait for every task to end and report how each one ended.
    pub async fn settle(self) -> TaskSummary {
        let mut summary = TaskSummary::default();
        for (name, h) in self.handles {
            match h.await {
                Ok(()) => summary.finished += 1,
                Err(e) if e.is_panic() => summary.panicked.push(name),
                Err(_) => summary.aborted += 1,
            }
        }
        summary
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Racing,
    OneFailureWaiting,
}

/// Race `providers` for `cep` under a single shared deadline.
///
/// Selection policy:
/// - the first success wins; the scope is cancelled and the race returns
///   without waiting for anyone else;
/// - the first failure is tolerated once: the coordinator then waits only for
///   a success or the deadline, and later failures are not acted upon;
/// - the deadline firing first is fatal (`Exhausted(DeadlineElapsed)`);
/// - once every provider task has ended without a success the race is
///   `Exhausted(AllFailed)` right away instead of waiting out the deadline.
///
/// When several signals are ready at the same instant, success beats failure
/// and failure beats the deadline. Between providers there is no priority.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "cepa::race",
        skip_all,
        fields(
            cep = %cep,
            providers = providers.len(),
            timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        ),
    )
)]
pub async fn race(cep: &Cep, providers: &[Arc<dyn CepProvider>], timeout: Duration) -> RaceResult {
    let scope = Scope::with_timeout(timeout);
    let guard = scope.guard();

    // One slot per producer: no task can ever block on a coordinator that stopped listening.
    let capacity = providers.len().max(1);
    let (ok_tx, mut ok_rx) = mpsc::channel::<(&'static str, Address)>(capacity);
    let (err_tx, mut err_rx) = mpsc::channel::<CepError>(capacity);

    let mut tasks = RaceTasks {
        handles: Vec::with_capacity(providers.len()),
    };
    for p in providers {
        let join = tokio::spawn(run_provider(
            Arc::clone(p),
            scope.clone(),
            cep.clone(),
            ok_tx.clone(),
            err_tx.clone(),
        ));
        tasks.handles.push((p.name(), join));
    }
    // Only the tasks hold senders now; both channels close when the last task ends.
    drop(ok_tx);
    drop(err_tx);

    let mut failures: Vec<CepError> = Vec::new();
    let mut failures_closed = false;
    let mut phase = Phase::Racing;

    let outcome = loop {
        match phase {
            Phase::Racing => {
                tokio::select! {
                    biased;
                    msg = ok_rx.recv() => match msg {
                        Some((provider, address)) => break RaceOutcome::Winner { provider, address },
                        None => break RaceOutcome::Exhausted(ExhaustedCause::AllFailed),
                    },
                    msg = err_rx.recv(), if !failures_closed => match msg {
                        Some(e) => {
                            #[cfg(feature = "tracing")]
                            tracing::debug!(error = %e, "tolerating first provider failure");
                            failures.push(e);
                            phase = Phase::OneFailureWaiting;
                        }
                        // Every task ended; a queued success may still be pending.
                        None => failures_closed = true,
                    },
                    () = scope.expired() => break RaceOutcome::Exhausted(ExhaustedCause::DeadlineElapsed),
                }
            }
            Phase::OneFailureWaiting => {
                tokio::select! {
                    biased;
                    msg = ok_rx.recv() => match msg {
                        Some((provider, address)) => break RaceOutcome::Winner { provider, address },
                        None => break RaceOutcome::Exhausted(ExhaustedCause::AllFailed),
                    },
                    () = scope.expired() => break RaceOutcome::Exhausted(ExhaustedCause::DeadlineElapsed),
                }
            }
        }
    };

    // Close the scope before draining so no loser can deliver after the decision.
    scope.cancel();
    while let Ok(e) = err_rx.try_recv() {
        #[cfg(feature = "tracing")]
        tracing::debug!(error = %e, "provider failure not acted upon");
        failures.push(e);
    }

    #[cfg(feature = "tracing")]
    match &outcome {
        RaceOutcome::Winner { provider, .. } => {
            tracing::debug!(winner = provider, failures = failures.len(), "race decided");
        }
        RaceOutcome::Exhausted(cause) => {
            tracing::debug!(cause = ?cause, failures = failures.len(), "race exhausted");
        }
    }

    let elapsed = scope.elapsed();
    drop(guard);
    RaceResult {
        outcome,
        failures,
        elapsed,
        tasks,
    }
}

/// Body of one provider task: fetch, then deliver only while the scope is live.
async fn run_provider(
    provider: Arc<dyn CepProvider>,
    scope: Scope,
    cep: Cep,
    ok_tx: mpsc::Sender<(&'static str, Address)>,
    err_tx: mpsc::Sender<CepError>,
) {
    let name = provider.name();
    let Some(result) = scope.run(provider.fetch(&scope, &cep)).await else {
        #[cfg(feature = "tracing")]
        tracing::debug!(provider = name, "provider abandoned: race scope closed");
        return;
    };
    if !scope.is_live() {
        return;
    }
    let delivered = match result {
        Ok(address) => scope
            .run(ok_tx.send((name, address)))
            .await
            .is_some_and(|sent| sent.is_ok()),
        Err(CepError::Cancelled { .. }) => return,
        Err(e) => scope
            .run(err_tx.send(e))
            .await
            .is_some_and(|sent| sent.is_ok()),
    };
    #[cfg(feature = "tracing")]
    if !delivered {
        tracing::debug!(provider = name, "outcome discarded: race already decided");
    }
    #[cfg(not(feature = "tracing"))]
    let _ = delivered;
}
