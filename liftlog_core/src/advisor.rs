//! Progressive-overload advisor.
//!
//! The central decision engine: given the most recent session summaries for
//! one exercise, classify the trend and emit a suggestion. Rules are
//! evaluated in a strict order and the first match wins:
//!
//! 1. No history → first-time guidance
//! 2. Single session → maintain the last numbers
//! 3. Declining trend → deload
//! 4. Rep target hit without stagnation → add weight
//! 5. Stagnant weight below the rep target → add a rep
//! 6. Otherwise → maintain
//!
//! The stagnation check inspects only the two most recent previous sessions
//! (short-term plateau) while the decline check averages all previous
//! sessions (longer-term drop). The asymmetry is intentional; do not unify
//! the windows.
//!
//! Pure classifier: no clock, no randomness, no state. Same history in,
//! same suggestion out.

use crate::config::ProgressionConfig;
use crate::types::format_kg;
use crate::{Confidence, ProgressiveSuggestion, SessionSummary};

/// Maximum sessions the advisor looks at (1 last + up to 9 previous)
const HISTORY_WINDOW: usize = 10;

/// Classify an exercise's recent history and suggest the next step.
///
/// `history` is ordered most-recent-first; anything past the tenth entry is
/// ignored. Thresholds (rep target, plate increment, deload factor, decline
/// threshold) come from the progression config; the defaults encode
/// standard 2.5 kg plate practice.
pub fn suggest(history: &[SessionSummary], cfg: &ProgressionConfig) -> ProgressiveSuggestion {
    let history = &history[..history.len().min(HISTORY_WINDOW)];

    if history.is_empty() {
        return ProgressiveSuggestion::FirstTime {
            message: "No history for this exercise yet. Start light, focus on form, and \
                      find a weight you can handle for 8-10 clean reps."
                .into(),
            confidence: Confidence::Low,
        };
    }

    let last = &history[0];

    if history.len() == 1 {
        return ProgressiveSuggestion::Maintain {
            message: format!(
                "One session logged: {} kg × {}. Repeat it to groove the movement.",
                format_kg(last.best_weight),
                last.best_reps
            ),
            suggested_weight: last.best_weight,
            suggested_reps: last.best_reps,
            confidence: Confidence::Medium,
        };
    }

    let previous = &history[1..];

    let avg_previous_weight =
        previous.iter().map(|s| s.best_weight).sum::<f64>() / previous.len() as f64;

    let hit_target_reps = last.best_reps >= cfg.target_reps;

    // Short-term plateau: the two most recent previous sessions both sat at
    // the same weight as the last one
    let weight_stagnant = previous.len() >= 2
        && previous[0].best_weight == last.best_weight
        && previous[1].best_weight == last.best_weight;

    // Longer-term drop: only meaningful with at least 3 previous sessions
    let declining =
        previous.len() >= 3 && last.best_weight < avg_previous_weight * cfg.decline_threshold;

    tracing::debug!(
        avg_previous_weight,
        hit_target_reps,
        weight_stagnant,
        declining,
        "Classified {} sessions",
        history.len()
    );

    if declining {
        let suggested = round_to_plate(last.best_weight * cfg.deload_factor, cfg.plate_increment_kg);
        return ProgressiveSuggestion::Deload {
            message: format!(
                "Your best weight is trending down. Deload to {} kg and build back up.",
                format_kg(suggested)
            ),
            suggested_weight: suggested,
            confidence: Confidence::Medium,
        };
    }

    if hit_target_reps && !weight_stagnant {
        let suggested = ceil_to_plate(
            last.best_weight + cfg.plate_increment_kg,
            cfg.plate_increment_kg,
        );
        return ProgressiveSuggestion::IncreaseWeight {
            message: format!(
                "You hit {} reps at {} kg. Move up to {} kg and work back to 8 reps.",
                last.best_reps,
                format_kg(last.best_weight),
                format_kg(suggested)
            ),
            suggested_weight: suggested,
            suggested_reps: 8,
            confidence: Confidence::High,
        };
    }

    if weight_stagnant && last.best_reps < cfg.target_reps {
        return ProgressiveSuggestion::IncreaseReps {
            message: format!(
                "Weight has been flat at {} kg. Keep it and aim for {} reps.",
                format_kg(last.best_weight),
                last.best_reps + 1
            ),
            suggested_weight: last.best_weight,
            suggested_reps: last.best_reps + 1,
            confidence: Confidence::Medium,
        };
    }

    ProgressiveSuggestion::Maintain {
        message: format!(
            "Keep working at {} kg × {} before progressing.",
            format_kg(last.best_weight),
            last.best_reps
        ),
        suggested_weight: last.best_weight,
        suggested_reps: last.best_reps,
        confidence: Confidence::Medium,
    }
}

/// Round to the nearest plate increment (deloads)
fn round_to_plate(weight: f64, increment: f64) -> f64 {
    (weight / increment).round() * increment
}

/// Round up to the next plate increment (progressions)
fn ceil_to_plate(weight: f64, increment: f64) -> f64 {
    (weight / increment).ceil() * increment
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn summary(day: u32, weight: f64, reps: u32) -> SessionSummary {
        SessionSummary {
            date: NaiveDate::from_ymd_opt(2024, 4, day).unwrap(),
            best_weight: weight,
            best_reps: reps,
            estimated_1rm: weight,
            total_volume: weight * reps as f64,
            sets: vec![],
        }
    }

    fn cfg() -> ProgressionConfig {
        ProgressionConfig::default()
    }

    #[test]
    fn test_no_history_is_first_time() {
        let suggestion = suggest(&[], &cfg());
        assert!(matches!(suggestion, ProgressiveSuggestion::FirstTime { .. }));
        assert_eq!(suggestion.confidence(), Confidence::Low);
        assert_eq!(suggestion.suggested_weight(), None);
    }

    #[test]
    fn test_single_session_maintains_last_numbers() {
        let history = vec![summary(1, 60.0, 8)];
        let suggestion = suggest(&history, &cfg());

        assert!(matches!(suggestion, ProgressiveSuggestion::Maintain { .. }));
        assert_eq!(suggestion.suggested_weight(), Some(60.0));
        assert_eq!(suggestion.suggested_reps(), Some(8));
        assert_eq!(suggestion.confidence(), Confidence::Medium);
    }

    #[test]
    fn test_ready_to_progress() {
        // Most-recent first: 80x10 after 77.5 and 75, no stagnation
        let history = vec![
            summary(15, 80.0, 10),
            summary(12, 77.5, 9),
            summary(9, 75.0, 10),
        ];
        let suggestion = suggest(&history, &cfg());

        assert!(matches!(
            suggestion,
            ProgressiveSuggestion::IncreaseWeight { .. }
        ));
        assert_eq!(suggestion.suggested_weight(), Some(82.5));
        assert_eq!(suggestion.suggested_reps(), Some(8));
        assert_eq!(suggestion.confidence(), Confidence::High);
    }

    #[test]
    fn test_deload_on_decline() {
        // Last at 60 vs previous average 85: well under 90%
        let history = vec![
            summary(20, 60.0, 8),
            summary(17, 85.0, 8),
            summary(14, 85.0, 8),
            summary(11, 85.0, 8),
        ];
        let suggestion = suggest(&history, &cfg());

        assert!(matches!(suggestion, ProgressiveSuggestion::Deload { .. }));
        // round_to_2.5(60 * 0.8) = round_to_2.5(48) = 47.5
        assert_eq!(suggestion.suggested_weight(), Some(47.5));
        assert_eq!(suggestion.confidence(), Confidence::Medium);
    }

    #[test]
    fn test_decline_needs_three_previous_sessions() {
        // Same drop but only 2 previous sessions: no deload path
        let history = vec![summary(20, 60.0, 8), summary(17, 85.0, 8), summary(14, 85.0, 8)];
        let suggestion = suggest(&history, &cfg());
        assert!(!matches!(suggestion, ProgressiveSuggestion::Deload { .. }));
    }

    #[test]
    fn test_plateau_adds_a_rep() {
        let history = vec![summary(20, 60.0, 7), summary(17, 60.0, 7), summary(14, 60.0, 6)];
        let suggestion = suggest(&history, &cfg());

        assert!(matches!(
            suggestion,
            ProgressiveSuggestion::IncreaseReps { .. }
        ));
        assert_eq!(suggestion.suggested_weight(), Some(60.0));
        assert_eq!(suggestion.suggested_reps(), Some(8));
    }

    #[test]
    fn test_stagnant_at_target_reps_falls_through_to_maintain() {
        // Stagnant weight but already at 10 reps: rule b is blocked by
        // stagnation, rule c by the rep target
        let history = vec![
            summary(20, 60.0, 10),
            summary(17, 60.0, 10),
            summary(14, 60.0, 10),
        ];
        let suggestion = suggest(&history, &cfg());
        assert!(matches!(suggestion, ProgressiveSuggestion::Maintain { .. }));
    }

    #[test]
    fn test_stagnation_window_is_two_previous_sessions() {
        // Older sessions at the same weight don't count; only the two most
        // recent previous ones do, and one of them differs here
        let history = vec![
            summary(20, 60.0, 10),
            summary(17, 57.5, 9),
            summary(14, 60.0, 10),
            summary(11, 60.0, 10),
        ];
        let suggestion = suggest(&history, &cfg());
        assert!(matches!(
            suggestion,
            ProgressiveSuggestion::IncreaseWeight { .. }
        ));
    }

    #[test]
    fn test_deterministic() {
        let history = vec![summary(15, 80.0, 10), summary(12, 77.5, 9), summary(9, 75.0, 10)];
        let a = suggest(&history, &cfg());
        let b = suggest(&history, &cfg());
        assert_eq!(a, b);
    }

    #[test]
    fn test_window_capped_at_ten_sessions() {
        // An ancient heavy session past the window must not trigger a deload
        let mut history: Vec<SessionSummary> =
            (0..10).map(|i| summary(20 - i, 60.0, 8)).collect();
        history.push(summary(1, 200.0, 1));

        let suggestion = suggest(&history, &cfg());
        assert!(!matches!(suggestion, ProgressiveSuggestion::Deload { .. }));
    }

    #[test]
    fn test_plate_rounding() {
        assert_eq!(round_to_plate(48.0, 2.5), 47.5);
        assert_eq!(round_to_plate(48.8, 2.5), 50.0);
        assert_eq!(ceil_to_plate(82.5, 2.5), 82.5);
        assert_eq!(ceil_to_plate(83.5, 2.5), 85.0);
    }
}
