//! Shared-nothing batch execution.
//!
//! Each deck in a batch is an independent run: its own runner, RNG and
//! scratch buffers, with no state shared between workers beyond the
//! task and result channels. Results come back in deck order, and a
//! failing deck never disturbs its siblings.

use std::thread;

use crossbeam_channel::unbounded;
use thrum_core::Deck;

use crate::cancel::CancelToken;
use crate::error::BatchError;
use crate::runner::SimulationRunner;
use crate::series::TimeSeries;

/// Derive the seed for the deck at `idx` from the batch seed.
///
/// Each deck gets its own RNG stream so RAND draws in one run never
/// depend on how work was divided across workers.
fn deck_seed(batch_seed: u64, idx: usize) -> u64 {
    batch_seed ^ idx as u64
}

fn run_one(deck: &Deck, seed: u64, cancel: &CancelToken) -> Result<TimeSeries, BatchError> {
    let mut runner = SimulationRunner::new(deck)?
        .with_seed(seed)
        .with_cancel_token(cancel.clone());
    Ok(runner.run()?)
}

/// Run every deck to completion, one worker thread per core (capped at
/// the batch size), returning per-deck results in input order.
///
/// `cancel` aborts all still-running and not-yet-started decks;
/// already-finished decks keep their results. The per-deck RNG seed is
/// derived from `seed` and the deck's position, so a batch replays
/// identically regardless of worker count.
pub fn run_batch(
    decks: &[Deck],
    seed: u64,
    cancel: &CancelToken,
) -> Vec<Result<TimeSeries, BatchError>> {
    if decks.is_empty() {
        return Vec::new();
    }
    let workers = thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .min(decks.len());

    let (task_tx, task_rx) = unbounded::<(usize, &Deck)>();
    let (result_tx, result_rx) = unbounded::<(usize, Result<TimeSeries, BatchError>)>();
    for task in decks.iter().enumerate() {
        if task_tx.send(task).is_err() {
            break;
        }
    }
    drop(task_tx);

    thread::scope(|scope| {
        for _ in 0..workers {
            let task_rx = task_rx.clone();
            let result_tx = result_tx.clone();
            scope.spawn(move || {
                while let Ok((idx, deck)) = task_rx.recv() {
                    let result = run_one(deck, deck_seed(seed, idx), cancel);
                    if result_tx.send((idx, result)).is_err() {
                        return;
                    }
                }
            });
        }
    });
    drop(result_tx);

    let mut results: Vec<Option<Result<TimeSeries, BatchError>>> =
        (0..decks.len()).map(|_| None).collect();
    for (idx, result) in result_rx {
        results[idx] = Some(result);
    }
    results
        .into_iter()
        .map(|slot| slot.expect("every deck yields exactly one result"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{RunError, SetupError};
    use thrum_core::ConfigError;
    use thrum_test_utils::{deck_of, single_body_deck, two_body_chain_deck};

    #[test]
    fn empty_batch_yields_no_results() {
        assert!(run_batch(&[], 0, &CancelToken::new()).is_empty());
    }

    #[test]
    fn results_come_back_in_deck_order() {
        let decks = vec![
            single_body_deck(1.0, 10.0, 0.1),
            two_body_chain_deck(),
            single_body_deck(2.0, 5.0, 0.3),
        ];
        let results = run_batch(&decks, 42, &CancelToken::new());
        assert_eq!(results.len(), 3);
        for (deck, result) in decks.iter().zip(&results) {
            let series = result.as_ref().unwrap();
            assert_eq!(series.len(), deck.config.step_count() + 1);
            assert_eq!(series.last().unwrap().t, deck.config.tmax);
            assert_eq!(series.sample(0).unwrap().dof_count(), deck.body_count());
        }
    }

    #[test]
    fn batch_matches_individual_runs() {
        let decks = vec![single_body_deck(1.0, 10.0, 0.1), two_body_chain_deck()];
        let results = run_batch(&decks, 7, &CancelToken::new());
        for (idx, deck) in decks.iter().enumerate() {
            let mut runner = SimulationRunner::new(deck)
                .unwrap()
                .with_seed(deck_seed(7, idx));
            let solo = runner.run().unwrap();
            assert_eq!(results[idx].as_ref().unwrap(), &solo);
        }
    }

    #[test]
    fn failing_deck_does_not_abort_siblings() {
        let decks = vec![
            single_body_deck(1.0, 10.0, 0.1),
            deck_of(10.0, 0.1, vec![]),
            single_body_deck(2.0, 5.0, 0.3),
        ];
        let results = run_batch(&decks, 0, &CancelToken::new());
        assert!(results[0].is_ok());
        match &results[1] {
            Err(BatchError::Setup(SetupError::Config(ConfigError::NoBodies))) => {}
            other => panic!("expected NoBodies, got {other:?}"),
        }
        assert!(results[2].is_ok());
    }

    #[test]
    fn pre_cancelled_batch_fails_every_run() {
        let cancel = CancelToken::new();
        cancel.cancel();
        let decks = vec![single_body_deck(1.0, 10.0, 0.1), two_body_chain_deck()];
        for result in run_batch(&decks, 0, &cancel) {
            match result {
                Err(BatchError::Run(RunError::Cancelled { step: 1 })) => {}
                other => panic!("expected Cancelled, got {other:?}"),
            }
        }
    }
}
