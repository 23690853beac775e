use cepa::{ExhaustedCause, RaceOutcome, race};

use crate::helpers::*;

#[tokio::test(start_paused = true)]
async fn losers_stop_once_the_winner_is_picked() {
    let fast = ok("fast", 10);
    let slow = ok("slow", 500);
    let stuck = hang("stuck");
    let res = race(&cep(), &dyns(&[&fast, &slow, &stuck]), ms(1000)).await;
    assert_eq!(res.winner(), Some("fast"));

    let summary = res.tasks.settle().await;
    assert_eq!(summary.finished, 3);
    assert!(summary.panicked.is_empty());
    assert_eq!(summary.aborted, 0);
    assert_eq!(slow.calls(), 1);
    assert_eq!(slow.completed(), 0);
    assert_eq!(stuck.completed(), 0);
}

#[tokio::test(start_paused = true)]
async fn tasks_settle_after_the_deadline() {
    let a = hang("a");
    let b = ok("b", 5000);
    let res = race(&cep(), &dyns(&[&a, &b]), ms(100)).await;
    assert_eq!(
        res.outcome,
        RaceOutcome::Exhausted(ExhaustedCause::DeadlineElapsed)
    );

    let summary = res.tasks.settle().await;
    assert_eq!(summary.finished, 2);
    assert_eq!(b.completed(), 0);
}

#[tokio::test(start_paused = true)]
async fn panicking_provider_does_not_poison_the_race() {
    let boom = panics("boom", 5);
    let good = ok("good", 20);
    let res = race(&cep(), &dyns(&[&boom, &good]), ms(1000)).await;
    assert_eq!(res.winner(), Some("good"));

    let summary = res.tasks.settle().await;
    assert_eq!(summary.panicked, vec!["boom"]);
    assert_eq!(summary.finished, 1);
}

#[tokio::test(start_paused = true)]
async fn lone_panicking_provider_ends_the_race_as_all_failed() {
    let boom = panics("boom", 5);
    let res = race(&cep(), &dyns(&[&boom]), ms(1000)).await;
    assert_eq!(res.outcome, RaceOutcome::Exhausted(ExhaustedCause::AllFailed));
    assert_near(res.elapsed, 5);
    assert!(res.failures.is_empty());
}

#[tokio::test(start_paused = true)]
async fn abort_stops_tasks_still_running() {
    let fast = ok("fast", 10);
    let stuck = hang("stuck");
    let res = race(&cep(), &dyns(&[&fast, &stuck]), ms(1000)).await;
    res.tasks.abort();
    let summary = res.tasks.settle().await;
    assert_eq!(summary.finished + summary.aborted, 2);
    assert!(summary.panicked.is_empty());
}

#[tokio::test(start_paused = true)]
async fn back_to_back_races_are_independent() {
    let p1 = fail("p1", 5);
    let p2 = ok("p2", 30);
    let providers = dyns(&[&p1, &p2]);

    let first = race(&cep(), &providers, ms(1000)).await;
    let second = race(&cep(), &providers, ms(1000)).await;
    assert_eq!(first.winner(), Some("p2"));
    assert_eq!(second.winner(), Some("p2"));
    assert_eq!(second.failures.len(), 1);
    assert_eq!(p1.calls(), 2);
    assert_eq!(p2.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn losers_finish_shortly_after_the_decision() {
    let fast = ok("fast", 10);
    let slow = ok("slow", 500);
    let stuck = hang("stuck");
    let res = race(&cep(), &dyns(&[&fast, &slow, &stuck]), ms(1000)).await;
    assert_eq!(res.winner(), Some("fast"));

    for _ in 0..20 {
        if res.tasks.is_finished() {
            break;
        }
        tokio::time::sleep(ms(1)).await;
    }
    assert!(res.tasks.is_finished());
    // The losers' own delays never ran out.
    assert_eq!(slow.completed(), 0);
}
