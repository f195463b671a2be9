//! Goal progress calculation.

use crate::{Goal, GoalProgress, SessionSummary};

/// Compute numeric distance-to-goal for each goal against session history.
///
/// `current_best` is the global maximum best weight across all summaries,
/// not scoped to any window. Progress is clamped to [0, 100] and remaining
/// to 0, so an exceeded goal reports 100% with nothing remaining. A target
/// of 0 kg reports 0% progress rather than dividing by zero.
///
/// Empty goals or empty history yields an empty result. The stored
/// `achieved` flag is external policy and passes through untouched.
pub fn compute_goal_progress(goals: &[Goal], summaries: &[SessionSummary]) -> Vec<GoalProgress> {
    if goals.is_empty() || summaries.is_empty() {
        return Vec::new();
    }

    let current_best = summaries
        .iter()
        .map(|s| s.best_weight)
        .fold(0.0_f64, f64::max);

    goals
        .iter()
        .map(|goal| {
            let progress = if goal.target_weight_kg == 0.0 {
                0.0
            } else {
                (current_best / goal.target_weight_kg * 100.0).min(100.0)
            };
            let remaining = (goal.target_weight_kg - current_best).max(0.0);

            GoalProgress {
                goal: goal.clone(),
                current_best,
                progress,
                remaining,
            }
        })
        .collect()
}
