use cepa::{CepError, ExhaustedCause, RaceOutcome, race};
use cepa_mock::ScriptedProvider;

use crate::helpers::*;

#[tokio::test(start_paused = true)]
async fn failure_then_deadline_is_exhausted_by_deadline() {
    let p1 = fail("p1", 5);
    let p2 = ok("p2", 1500);
    let res = race(&cep(), &dyns(&[&p1, &p2]), ms(1000)).await;

    assert_eq!(
        res.outcome,
        RaceOutcome::Exhausted(ExhaustedCause::DeadlineElapsed)
    );
    assert_near(res.elapsed, 1000);
    assert_eq!(res.failures.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn later_failures_never_decide_the_race() {
    let p1 = fail("p1", 5);
    let p2 = fail("p2", 10);
    let p3 = ok("p3", 50);
    let res = race(&cep(), &dyns(&[&p1, &p2, &p3]), ms(1000)).await;

    assert_eq!(res.winner(), Some("p3"));
    assert_near(res.elapsed, 50);
    let names: Vec<_> = res.failures.iter().filter_map(CepError::provider).collect();
    assert_eq!(names, vec!["p1", "p2"]);
}

#[tokio::test(start_paused = true)]
async fn two_failures_with_a_stalled_third_wait_for_the_deadline() {
    let p1 = fail("p1", 5);
    let p2 = fail("p2", 10);
    let p3 = hang("p3");
    let res = race(&cep(), &dyns(&[&p1, &p2, &p3]), ms(200)).await;

    assert_eq!(
        res.outcome,
        RaceOutcome::Exhausted(ExhaustedCause::DeadlineElapsed)
    );
    assert_near(res.elapsed, 200);
    assert_eq!(res.failures.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn not_found_counts_as_a_failure() {
    let p1 = ScriptedProvider::builder()
        .name("p1")
        .delay_ms(5)
        .fails_with(CepError::not_found("p1", SE))
        .build();
    let p2 = ok("p2", 30);
    let res = race(&cep(), &dyns(&[&p1, &p2]), ms(1000)).await;

    assert_eq!(res.winner(), Some("p2"));
    assert!(matches!(res.failures[0], CepError::NotFound { .. }));
}

#[tokio::test(start_paused = true)]
async fn simultaneous_failure_and_success_picks_the_success() {
    let p1 = fail("p1", 10);
    let p2 = ok("p2", 10);
    let res = race(&cep(), &dyns(&[&p1, &p2]), ms(1000)).await;
    assert_eq!(res.winner(), Some("p2"));
}

#[tokio::test(start_paused = true)]
async fn simultaneous_successes_produce_exactly_one_winner() {
    let p1 = ok("p1", 10);
    let p2 = ok("p2", 10);
    let p3 = ok("p3", 10);
    let res = race(&cep(), &dyns(&[&p1, &p2, &p3]), ms(1000)).await;

    let w = res.winner().unwrap();
    assert!(["p1", "p2", "p3"].contains(&w));
    assert!(res.failures.is_empty());
}

#[tokio::test(start_paused = true)]
async fn cancelled_errors_are_never_recorded() {
    let p1 = ScriptedProvider::builder()
        .name("p1")
        .delay_ms(5)
        .fails_with(CepError::cancelled("p1"))
        .build();
    let p2 = ok("p2", 20);
    let res = race(&cep(), &dyns(&[&p1, &p2]), ms(1000)).await;

    assert_eq!(res.winner(), Some("p2"));
    assert!(res.failures.is_empty());
}
