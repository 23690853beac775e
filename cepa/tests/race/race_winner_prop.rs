use std::sync::Arc;

use cepa::{CepProvider, ExhaustedCause, RaceOutcome, race};
use cepa_mock::ScriptedProvider;
use proptest::prelude::*;

use crate::helpers::*;

const NAMES: [&str; 5] = ["p0", "p1", "p2", "p3", "p4"];
// Delays are `tens * 10 + index`, so no provider ever ties the deadline or another provider.
const TIMEOUT_MS: u64 = 505;

proptest! {
    #![proptest_config(ProptestConfig { cases: 40, .. ProptestConfig::default() })]

    #[test]
    fn winner_is_the_fastest_success_within_the_deadline(
        plan in proptest::collection::vec((1u64..100, any::<bool>()), 1..=5)
    ) {
        let delays: Vec<(u64, bool)> = plan
            .iter()
            .enumerate()
            .map(|(i, (tens, succeeds))| (tens * 10 + i as u64, *succeeds))
            .collect();

        let providers: Vec<Arc<dyn CepProvider>> = delays
            .iter()
            .enumerate()
            .map(|(i, (delay, succeeds))| {
                let b = ScriptedProvider::builder().name(NAMES[i]).delay_ms(*delay);
                let b = if *succeeds { b } else { b.fails() };
                b.build() as Arc<dyn CepProvider>
            })
            .collect();

        let expected_winner = delays
            .iter()
            .enumerate()
            .filter(|(_, (d, ok))| *ok && *d < TIMEOUT_MS)
            .min_by_key(|(_, (d, _))| *d)
            .map(|(i, _)| NAMES[i]);
        let all_fail_early = delays.iter().all(|(d, ok)| !*ok && *d < TIMEOUT_MS);

        let outcome = tokio_test::block_on(async move {
            tokio::time::pause();
            race(&cep(), &providers, ms(TIMEOUT_MS)).await.outcome
        });

        match expected_winner {
            Some(name) => match outcome {
                RaceOutcome::Winner { provider, .. } => {
                    prop_assert_eq!(provider, name);
                }
                other => {
                    prop_assert!(false, "expected {}, got {:?}", name, other);
                }
            },
            None if all_fail_early => {
                prop_assert_eq!(outcome, RaceOutcome::Exhausted(ExhaustedCause::AllFailed));
            }
            None => {
                prop_assert_eq!(outcome, RaceOutcome::Exhausted(ExhaustedCause::DeadlineElapsed));
            }
        }
    }
}
