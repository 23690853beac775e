use cepa::{ExhaustedCause, RaceOutcome, race};

use crate::helpers::*;

#[tokio::test(start_paused = true)]
async fn faster_success_wins() {
    let p1 = ok("p1", 50);
    let p2 = ok("p2", 10);
    let res = race(&cep(), &dyns(&[&p1, &p2]), ms(1000)).await;

    assert_eq!(res.winner(), Some("p2"));
    assert_near(res.elapsed, 10);
    assert!(res.failures.is_empty());
    let RaceOutcome::Winner { address, .. } = &res.outcome else {
        panic!("expected a winner, got {:?}", res.outcome);
    };
    assert_eq!(address.provider, "p2");
    assert_eq!(address.city, "São Paulo");
}

#[tokio::test(start_paused = true)]
async fn early_failure_is_tolerated_until_late_success() {
    let p1 = fail("p1", 5);
    let p2 = ok("p2", 900);
    let res = race(&cep(), &dyns(&[&p1, &p2]), ms(1000)).await;

    assert_eq!(res.winner(), Some("p2"));
    assert_near(res.elapsed, 900);
    assert_eq!(res.failures.len(), 1);
    assert_eq!(res.failures[0].provider(), Some("p1"));
}

#[tokio::test(start_paused = true)]
async fn every_provider_failing_ends_before_the_deadline() {
    let p1 = fail("p1", 10);
    let p2 = fail("p2", 10);
    let res = race(&cep(), &dyns(&[&p1, &p2]), ms(1000)).await;

    assert_eq!(res.outcome, RaceOutcome::Exhausted(ExhaustedCause::AllFailed));
    assert_near(res.elapsed, 10);
    assert_eq!(res.failures.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn deadline_fires_when_everyone_is_too_slow() {
    let p1 = ok("p1", 1500);
    let p2 = ok("p2", 1500);
    let res = race(&cep(), &dyns(&[&p1, &p2]), ms(1000)).await;

    assert_eq!(
        res.outcome,
        RaceOutcome::Exhausted(ExhaustedCause::DeadlineElapsed)
    );
    assert_near(res.elapsed, 1000);
    assert!(res.failures.is_empty());
    assert_eq!(p1.completed() + p2.completed(), 0);
}

#[tokio::test(start_paused = true)]
async fn into_result_reports_exhausted_with_observed_failures() {
    let p1 = fail("p1", 5);
    let p2 = hang("p2");
    let err = race(&cep(), &dyns(&[&p1, &p2]), ms(100))
        .await
        .into_result()
        .unwrap_err();

    assert!(err.is_exhausted());
    assert_eq!(err.to_string(), "no provider answered in time");
    let flat = err.flatten();
    assert_eq!(flat.len(), 1);
    assert_eq!(flat[0].provider(), Some("p1"));
}

#[tokio::test(start_paused = true)]
async fn single_provider_success() {
    let p = ok("solo", 20);
    let res = race(&cep(), &dyns(&[&p]), ms(1000)).await;
    assert_eq!(res.winner(), Some("solo"));
    assert_eq!(res.tasks.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn no_providers_is_exhausted_immediately() {
    let res = race(&cep(), &[], ms(1000)).await;
    assert_eq!(res.outcome, RaceOutcome::Exhausted(ExhaustedCause::AllFailed));
    assert!(res.tasks.is_empty());
    assert_near(res.elapsed, 0);
}
