// Shared builders for race tests: `use crate::helpers::*;`
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use cepa::{Cep, CepProvider};
use cepa_mock::ScriptedProvider;

/// Default CEP used across tests (Praça da Sé).
pub const SE: &str = "01001000";

pub fn cep() -> Cep {
    Cep::parse(SE).unwrap()
}

/// Provider answering from fixtures after `ms` milliseconds.
pub fn ok(name: &'static str, ms: u64) -> Arc<ScriptedProvider> {
    ScriptedProvider::builder().name(name).delay_ms(ms).build()
}

/// Provider failing with a transport error after `ms` milliseconds.
pub fn fail(name: &'static str, ms: u64) -> Arc<ScriptedProvider> {
    ScriptedProvider::builder()
        .name(name)
        .delay_ms(ms)
        .fails()
        .build()
}

/// Provider that never answers.
pub fn hang(name: &'static str) -> Arc<ScriptedProvider> {
    ScriptedProvider::builder().name(name).hangs().build()
}

/// Provider that panics after `ms` milliseconds.
pub fn panics(name: &'static str, ms: u64) -> Arc<ScriptedProvider> {
    ScriptedProvider::builder()
        .name(name)
        .delay_ms(ms)
        .panics()
        .build()
}

pub fn dyns(ps: &[&Arc<ScriptedProvider>]) -> Vec<Arc<dyn CepProvider>> {
    ps.iter()
        .map(|p| Arc::clone(*p) as Arc<dyn CepProvider>)
        .collect()
}

pub const fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

/// Assert `d` lies in `[lo, lo + 5ms)`; the paused clock can round timers up by a tick.
pub fn assert_near(d: Duration, lo: u64) {
    assert!(
        d >= ms(lo) && d < ms(lo + 5),
        "elapsed {d:?} not within 5ms after {lo}ms"
    );
}
