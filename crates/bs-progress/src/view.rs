use std::fmt;

pub const CALCULATING_LABEL: &str = "Calculating time remaining...";

/// Display-ready status of a running bulk simulation.
///
/// Every numeric field is finite and non-negative; unknown values are `None`
/// and render as a placeholder label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusView {
    pub total_combinations: Option<u64>,
    pub current_round: u32,
    pub total_rounds: Option<u32>,
    pub completed_sims: u64,
    pub total_sims: u64,
    pub completed_iterations: u64,
    pub total_iterations: u64,
    pub iterations_per_second: Option<f64>,
    pub seconds_remaining: Option<u64>,
    pub combinations_label: String,
    /// Empty unless the run refines in rounds.
    pub rounds_label: String,
    pub sims_label: String,
    pub iterations_label: String,
    pub seconds_remaining_label: String,
}

impl StatusView {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn build(
        total_combinations: Option<u64>,
        current_round: u32,
        total_rounds: Option<u32>,
        completed_sims: u64,
        total_sims: u64,
        completed_iterations: u64,
        total_iterations: u64,
        iterations_per_second: Option<f64>,
        seconds_remaining: Option<u64>,
    ) -> Self {
        let rounds_label = match total_rounds {
            Some(rounds) if rounds > 0 => {
                format!("{} / {} refining rounds", current_round, rounds)
            }
            _ => String::new(),
        };
        let seconds_remaining_label = match seconds_remaining {
            Some(s) => format!("{} seconds remaining.", s),
            None => CALCULATING_LABEL.to_string(),
        };

        Self {
            total_combinations,
            current_round,
            total_rounds,
            completed_sims,
            total_sims,
            completed_iterations,
            total_iterations,
            iterations_per_second,
            seconds_remaining,
            combinations_label: format!(
                "{} total combinations.",
                total_combinations.unwrap_or(0)
            ),
            rounds_label,
            sims_label: format!("{} / {} simulations complete", completed_sims, total_sims),
            iterations_label: format!(
                "{} / {} iterations complete",
                completed_iterations, total_iterations
            ),
            seconds_remaining_label,
        }
    }

    /// Fraction of iterations done in the current pass, in [0, 1].
    pub fn fraction_complete(&self) -> f64 {
        if self.total_iterations == 0 {
            return 0.0;
        }
        (self.completed_iterations as f64 / self.total_iterations as f64).clamp(0.0, 1.0)
    }
}

impl fmt::Display for StatusView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.combinations_label)?;
        if !self.rounds_label.is_empty() {
            writeln!(f, "{}", self.rounds_label)?;
        }
        writeln!(f, "{}", self.sims_label)?;
        writeln!(f, "{}", self.iterations_label)?;
        write!(f, "{}", self.seconds_remaining_label)
    }
}
