//! Run state and the pure per-snapshot update.
//!
//! [`advance`] takes the previous [`RunState`] by value and hands back the
//! next one together with the view for the snapshot, so the whole progress
//! computation can be driven without a controller or a clock.

use std::time::Instant;

use bs_core::{checked_ratio, clamp_count};
use bs_results::RankedResultSet;

use crate::snapshot::ProgressSnapshot;
use crate::view::StatusView;

/// Candidate pool size at which fast mode stops refining.
pub const FAST_MODE_FINAL_POOL: f64 = 20.0;

#[derive(Debug, Clone, PartialEq)]
pub struct RunState {
    /// Baseline for the iteration rate. Moves forward when a new round starts.
    pub started_at: Instant,
    pub last_total_sims: u64,
    pub current_round: u32,
    /// Set once, from the first snapshot with sims to do.
    pub total_rounds: Option<u32>,
    pub total_combinations: Option<u64>,
}

impl RunState {
    pub fn start(now: Instant) -> Self {
        Self {
            started_at: now,
            last_total_sims: 0,
            current_round: 0,
            total_rounds: None,
            total_combinations: None,
        }
    }
}

/// Result of feeding one snapshot through [`advance`].
#[derive(Debug, Clone)]
pub struct ProgressStep {
    pub state: RunState,
    pub view: StatusView,
    pub completed: Option<RankedResultSet>,
}

/// Estimated number of refining rounds for a fast-mode run that starts with
/// `total_sims` candidates, halving the pool each round until about
/// [`FAST_MODE_FINAL_POOL`] remain.
///
/// This is a display estimate. Pools already at or below the final size
/// report a single round. For `total_sims <= 10` this departs from the bare
/// `ceil(log2(total_sims / 20)) + 1`, which would give zero or a negative
/// count there.
pub fn estimate_total_rounds(total_sims: u64) -> u32 {
    if total_sims == 0 {
        return 0;
    }
    let rounds = (total_sims as f64 / FAST_MODE_FINAL_POOL).log2().ceil() + 1.0;
    rounds.max(1.0) as u32
}

/// Seconds left at the current rate, `None` while the rate is unknown.
pub fn seconds_remaining(
    completed_iterations: u64,
    total_iterations: u64,
    iterations_per_second: Option<f64>,
) -> Option<u64> {
    let remaining = total_iterations.saturating_sub(completed_iterations);
    if remaining == 0 {
        return Some(0);
    }
    iterations_per_second
        .and_then(|rate| checked_ratio(remaining as f64, rate))
        .map(|s| s.round() as u64)
}

pub fn advance(
    mut state: RunState,
    snapshot: ProgressSnapshot,
    now: Instant,
    fast_mode: bool,
) -> ProgressStep {
    let completed_iterations = clamp_count(snapshot.completed_iterations);
    let total_iterations = clamp_count(snapshot.total_iterations);
    let completed_sims = clamp_count(snapshot.completed_sims);
    let total_sims = clamp_count(snapshot.total_sims);

    // Rate is measured against the baseline as it stood before this snapshot.
    let elapsed_s = now.saturating_duration_since(state.started_at).as_secs_f64();
    let iterations_per_second = checked_ratio(completed_iterations as f64, elapsed_s);

    if state.total_combinations.is_none() && total_sims > 0 {
        state.total_combinations = Some(total_sims);
    }

    if fast_mode {
        if state.total_rounds.is_none() && total_sims > 0 {
            let rounds = estimate_total_rounds(total_sims);
            tracing::debug!(total_sims, rounds, "estimated refining rounds");
            state.total_rounds = Some(rounds);
            state.current_round = 1;
        }
        if total_sims < state.last_total_sims {
            state.current_round += 1;
            state.started_at = now;
            tracing::debug!(
                round = state.current_round,
                remaining_sims = total_sims,
                "refining round started"
            );
        }
    }

    let seconds_remaining =
        seconds_remaining(completed_iterations, total_iterations, iterations_per_second);

    state.last_total_sims = total_sims;

    let view = StatusView::build(
        state.total_combinations,
        state.current_round,
        state.total_rounds,
        completed_sims,
        total_sims,
        completed_iterations,
        total_iterations,
        iterations_per_second,
        seconds_remaining,
    );

    ProgressStep {
        state,
        view,
        completed: snapshot.final_result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn at(t0: Instant, secs: u64) -> Instant {
        t0 + Duration::from_secs(secs)
    }

    fn sims(total_sims: i64) -> ProgressSnapshot {
        ProgressSnapshot::new(0, 0, 0, total_sims)
    }

    #[test]
    fn round_estimate_matches_halving() {
        assert_eq!(estimate_total_rounds(0), 0);
        assert_eq!(estimate_total_rounds(1), 1);
        assert_eq!(estimate_total_rounds(5), 1);
        assert_eq!(estimate_total_rounds(10), 1);
        assert_eq!(estimate_total_rounds(11), 1);
        assert_eq!(estimate_total_rounds(20), 1);
        assert_eq!(estimate_total_rounds(40), 2);
        assert_eq!(estimate_total_rounds(100), 4);
        assert_eq!(estimate_total_rounds(160), 4);
        assert_eq!(estimate_total_rounds(161), 5);
    }

    #[test]
    fn rounds_follow_shrinking_pool() {
        let t0 = Instant::now();
        let mut state = RunState::start(t0);
        let mut rounds = Vec::new();

        for (i, total) in [100, 100, 60, 60, 20].into_iter().enumerate() {
            let step = advance(state, sims(total), at(t0, i as u64 + 1), true);
            assert_eq!(step.state.total_rounds, Some(4));
            rounds.push(step.state.current_round);
            state = step.state;
        }

        assert_eq!(rounds, vec![1, 1, 2, 2, 3]);
        assert_eq!(state.total_combinations, Some(100));
    }

    #[test]
    fn new_round_resets_rate_baseline() {
        let t0 = Instant::now();
        let state = RunState::start(t0);

        let step = advance(state, sims(100), at(t0, 5), true);
        assert_eq!(step.state.started_at, t0);

        let step = advance(step.state, sims(50), at(t0, 9), true);
        assert_eq!(step.state.started_at, at(t0, 9));
        assert_eq!(step.state.current_round, 2);
    }

    #[test]
    fn slow_mode_never_counts_rounds() {
        let t0 = Instant::now();
        let mut state = RunState::start(t0);
        for (i, total) in [100, 60, 20].into_iter().enumerate() {
            let step = advance(state, sims(total), at(t0, i as u64 + 1), false);
            assert_eq!(step.view.rounds_label, "");
            state = step.state;
        }
        assert_eq!(state.total_rounds, None);
        assert_eq!(state.current_round, 0);
        assert_eq!(state.started_at, t0);
    }

    #[test]
    fn zero_sims_leave_combinations_unset() {
        let t0 = Instant::now();
        let step = advance(RunState::start(t0), sims(0), at(t0, 1), true);
        assert_eq!(step.state.total_combinations, None);
        assert_eq!(step.state.total_rounds, None);
        assert_eq!(step.view.combinations_label, "0 total combinations.");

        let step = advance(step.state, sims(-3), at(t0, 2), true);
        assert_eq!(step.state.total_combinations, None);
    }

    #[test]
    fn eta_uses_iteration_rate() {
        let t0 = Instant::now();
        let snapshot = ProgressSnapshot::new(2_000, 10_000, 1, 5);
        let step = advance(RunState::start(t0), snapshot, at(t0, 4), false);

        assert_eq!(step.view.iterations_per_second, Some(500.0));
        assert_eq!(step.view.seconds_remaining, Some(16));
        assert_eq!(step.view.seconds_remaining_label, "16 seconds remaining.");
        assert_eq!(step.view.sims_label, "1 / 5 simulations complete");
        assert_eq!(step.view.iterations_label, "2000 / 10000 iterations complete");
    }

    #[test]
    fn eta_unknown_without_progress() {
        let t0 = Instant::now();
        let step = advance(
            RunState::start(t0),
            ProgressSnapshot::new(0, 10_000, 0, 5),
            at(t0, 3),
            false,
        );
        assert_eq!(step.view.seconds_remaining, None);
        assert_eq!(step.view.seconds_remaining_label, crate::view::CALCULATING_LABEL);
    }

    #[test]
    fn eta_unknown_at_zero_elapsed() {
        let t0 = Instant::now();
        let step = advance(
            RunState::start(t0),
            ProgressSnapshot::new(100, 10_000, 0, 5),
            t0,
            false,
        );
        assert_eq!(step.view.iterations_per_second, None);
        assert_eq!(step.view.seconds_remaining, None);
    }

    #[test]
    fn eta_zero_when_done() {
        let t0 = Instant::now();
        let step = advance(
            RunState::start(t0),
            ProgressSnapshot::new(10_000, 10_000, 5, 5),
            t0,
            false,
        );
        assert_eq!(step.view.seconds_remaining, Some(0));
    }

    #[test]
    fn inverted_counts_are_clamped() {
        let t0 = Instant::now();
        let step = advance(
            RunState::start(t0),
            ProgressSnapshot::new(12_000, 10_000, -1, -5),
            at(t0, 2),
            true,
        );
        assert_eq!(step.view.seconds_remaining, Some(0));
        assert_eq!(step.view.sims_label, "0 / 0 simulations complete");
        assert_eq!(step.view.total_sims, 0);
    }

    #[test]
    fn final_result_is_passed_through() {
        let t0 = Instant::now();
        let result = RankedResultSet {
            results: vec![],
            baseline: bs_results::BulkComboResult {
                items_added: vec![],
                dps_average: 1000.0,
            },
        };
        let snapshot = ProgressSnapshot::new(10, 10, 1, 1).with_final_result(result.clone());
        let step = advance(RunState::start(t0), snapshot, at(t0, 1), false);
        assert_eq!(step.completed, Some(result));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use std::time::Duration;

    fn snapshot_strategy() -> impl Strategy<Value = (i64, i64, i64, i64, u64)> {
        (
            -10i64..50_000,
            -10i64..50_000,
            -5i64..500,
            -5i64..500,
            0u64..5_000,
        )
    }

    proptest! {
        #[test]
        fn views_stay_finite_and_rounds_fixed(
            snapshots in prop::collection::vec(snapshot_strategy(), 1..40),
            fast_mode in any::<bool>(),
        ) {
            let t0 = Instant::now();
            let mut state = RunState::start(t0);
            let mut now = t0;
            let mut fixed_rounds: Option<u32> = None;
            let mut previous_round = 0u32;
            let mut previous_total = 0u64;

            for (ci, ti, cs, ts, step_ms) in snapshots {
                now += Duration::from_millis(step_ms);
                let step = advance(state, ProgressSnapshot::new(ci, ti, cs, ts), now, fast_mode);
                let view = &step.view;

                if let Some(rate) = view.iterations_per_second {
                    prop_assert!(rate.is_finite() && rate >= 0.0);
                }
                for label in [
                    &view.combinations_label,
                    &view.rounds_label,
                    &view.sims_label,
                    &view.iterations_label,
                    &view.seconds_remaining_label,
                ] {
                    prop_assert!(!label.contains("NaN"));
                    prop_assert!(!label.contains("inf"));
                    prop_assert!(!label.contains('-'));
                }

                if let Some(rounds) = fixed_rounds {
                    prop_assert_eq!(step.state.total_rounds, Some(rounds));
                } else {
                    fixed_rounds = step.state.total_rounds;
                }

                let total = ts.max(0) as u64;
                if fast_mode && previous_total > total {
                    prop_assert_eq!(step.state.current_round, previous_round + 1);
                    prop_assert_eq!(step.state.started_at, now);
                } else if previous_round > 0 {
                    prop_assert_eq!(step.state.current_round, previous_round);
                }
                if step.state.total_combinations.is_none() {
                    prop_assert_eq!(total, 0);
                }

                previous_round = step.state.current_round;
                previous_total = total;
                state = step.state;
            }
        }
    }
}
