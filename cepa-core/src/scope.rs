use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;

/// Lifecycle of a [`Scope`]. Leaves `Live` exactly once and never returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeState {
    /// Work may proceed and outcomes may be delivered.
    Live,
    /// Someone called [`Scope::cancel`] before the deadline.
    Cancelled,
    /// The deadline passed before anyone cancelled.
    Expired,
}

struct Inner {
    started: Instant,
    deadline: Instant,
    state: watch::Sender<ScopeState>,
}

/// Shared deadline and cancellation token governing one race.
///
/// Cloning is cheap; every clone observes the same state. The first
/// transition out of `Live` (explicit cancel or deadline) wins and is final.
#[derive(Clone)]
pub struct Scope {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scope")
            .field("state", &self.state())
            .field("remaining", &self.remaining())
            .finish()
    }
}

impl Scope {
    /// Create a live scope that expires `timeout` from now.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        let started = Instant::now();
        // Instant + Duration panics on overflow; clamp absurd timeouts to ~30 years.
        let deadline = started
            .checked_add(timeout)
            .unwrap_or_else(|| started + Duration::from_secs(86_400 * 365 * 30));
        let (state, _) = watch::channel(ScopeState::Live);
        Self {
            inner: Arc::new(Inner {
                started,
                deadline,
                state,
            }),
        }
    }

    /// Current state, folding in a deadline that has passed but not yet been observed.
    #[must_use]
    pub fn state(&self) -> ScopeState {
        let current = *self.inner.state.borrow();
        if current == ScopeState::Live && Instant::now() >= self.inner.deadline {
            self.transition(ScopeState::Expired);
            return *self.inner.state.borrow();
        }
        current
    }

    /// Returns true until the scope is cancelled or its deadline passes.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.state() == ScopeState::Live
    }

    /// Cancel the scope. Returns true if this call performed the transition.
    ///
    /// Idempotent: cancelling an already cancelled or expired scope is a no-op.
    pub fn cancel(&self) -> bool {
        self.transition(ScopeState::Cancelled)
    }

    /// Resolve once the scope is no longer live.
    ///
    /// Cancel-safe and callable concurrently from any number of tasks.
    pub async fn expired(&self) {
        if !self.is_live() {
            return;
        }
        let mut rx = self.inner.state.subscribe();
        tokio::select! {
            () = tokio::time::sleep_until(self.inner.deadline) => {
                self.transition(ScopeState::Expired);
            }
            _ = rx.wait_for(|s| *s != ScopeState::Live) => {}
        }
    }

    /// Drive `fut` until it completes or the scope fires, whichever is first.
    ///
    /// Returns `None` without polling `fut` if the scope is already done, and
    /// `None` if the scope fires while `fut` is pending.
    pub async fn run<F>(&self, fut: F) -> Option<F::Output>
    where
        F: Future,
    {
        if !self.is_live() {
            return None;
        }
        tokio::select! {
            biased;
            () = self.expired() => None,
            out = fut => Some(out),
        }
    }

    /// Absolute deadline of this scope.
    #[must_use]
    pub fn deadline(&self) -> Instant {
        self.inner.deadline
    }

    /// Time left before the deadline; zero once it has passed.
    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.inner
            .deadline
            .saturating_duration_since(Instant::now())
    }

    /// Time since the scope was created.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.inner.started.elapsed()
    }

    /// Guard that cancels this scope when dropped.
    #[must_use]
    pub fn guard(&self) -> ScopeGuard {
        ScopeGuard {
            scope: self.clone(),
        }
    }

    fn transition(&self, to: ScopeState) -> bool {
        let changed = self.inner.state.send_if_modified(|s| {
            if *s == ScopeState::Live {
                *s = to;
                true
            } else {
                false
            }
        });
        #[cfg(feature = "tracing")]
        if changed {
            let elapsed_ms = u64::try_from(self.elapsed().as_millis()).unwrap_or(u64::MAX);
            tracing::debug!(state = ?to, elapsed_ms, "race scope closed");
        }
        changed
    }
}

/// Cancels its [`Scope`] on drop, so every exit path of a race closes it.
#[derive(Debug)]
pub struct ScopeGuard {
    scope: Scope,
}

impl ScopeGuard {
    /// The guarded scope.
    #[must_use]
    pub const fn scope(&self) -> &Scope {
        &self.scope
    }
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        self.scope.cancel();
    }
}
