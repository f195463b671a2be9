//! Personal record tracking over aggregated session history.

use crate::{PersonalRecord, RecordKind, SessionSummary};
use chrono::NaiveDate;

/// Scan session history for all-time maxima.
///
/// One linear pass over the summaries (ascending date) and their sets,
/// tracking three maxima independently: heaviest single working-set weight
/// (with its reps), highest per-session estimated 1RM, and highest
/// per-session volume. Ties keep the chronologically earliest occurrence.
///
/// Returns at most three entries in fixed order (weight, 1RM, volume);
/// a metric whose maximum never exceeds 0 is omitted.
pub fn compute_records(summaries: &[SessionSummary]) -> Vec<PersonalRecord> {
    let mut top_weight: f64 = 0.0;
    let mut top_weight_reps: u32 = 0;
    let mut top_weight_date: Option<NaiveDate> = None;

    let mut top_1rm: f64 = 0.0;
    let mut top_1rm_date: Option<NaiveDate> = None;

    let mut top_volume: f64 = 0.0;
    let mut top_volume_date: Option<NaiveDate> = None;

    for summary in summaries {
        for set in &summary.sets {
            // Strictly greater: first occurrence wins on ties
            if set.weight() > top_weight {
                top_weight = set.weight();
                top_weight_reps = set.rep_count();
                top_weight_date = Some(summary.date);
            }
        }

        if summary.estimated_1rm > top_1rm {
            top_1rm = summary.estimated_1rm;
            top_1rm_date = Some(summary.date);
        }

        if summary.total_volume > top_volume {
            top_volume = summary.total_volume;
            top_volume_date = Some(summary.date);
        }
    }

    let mut records = Vec::with_capacity(3);

    if let Some(date) = top_weight_date {
        records.push(PersonalRecord {
            kind: RecordKind::Weight,
            value: top_weight,
            date,
            reps: Some(top_weight_reps),
        });
    }
    if let Some(date) = top_1rm_date {
        records.push(PersonalRecord {
            kind: RecordKind::OneRepMax,
            value: top_1rm,
            date,
            reps: None,
        });
    }
    if let Some(date) = top_volume_date {
        records.push(PersonalRecord {
            kind: RecordKind::Volume,
            value: top_volume,
            date,
            reps: None,
        });
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate_sessions;
    use crate::SetRecord;
    use chrono::Utc;
    use uuid::Uuid;

    fn set(day: u32, weight: f64, reps: u32) -> SetRecord {
        SetRecord {
            id: Uuid::new_v4(),
            exercise: "deadlift".into(),
            weight_kg: Some(weight),
            reps: Some(reps),
            is_warmup: false,
            is_cardio: false,
            completed_at: Utc::now(),
            session_date: NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
        }
    }

    #[test]
    fn test_tracks_three_maxima() {
        // Day 1: heavy single; day 2: high-volume lighter work
        let summaries = aggregate_sessions(&[
            set(1, 140.0, 1),
            set(2, 100.0, 10),
            set(2, 100.0, 10),
        ]);

        let records = compute_records(&summaries);
        assert_eq!(records.len(), 3);

        assert_eq!(records[0].kind, RecordKind::Weight);
        assert_eq!(records[0].value, 140.0);
        assert_eq!(records[0].reps, Some(1));
        assert_eq!(records[0].date, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());

        // round(100*(1+10/30)) = 133 < 140 single
        assert_eq!(records[1].kind, RecordKind::OneRepMax);
        assert_eq!(records[1].value, 140.0);

        assert_eq!(records[2].kind, RecordKind::Volume);
        assert_eq!(records[2].value, 2000.0);
        assert_eq!(records[2].date, NaiveDate::from_ymd_opt(2024, 5, 2).unwrap());
    }

    #[test]
    fn test_ties_keep_earliest_date() {
        let summaries = aggregate_sessions(&[set(3, 120.0, 5), set(9, 120.0, 5)]);

        let records = compute_records(&summaries);
        let weight = &records[0];
        assert_eq!(weight.kind, RecordKind::Weight);
        assert_eq!(weight.date, NaiveDate::from_ymd_opt(2024, 5, 3).unwrap());
    }

    #[test]
    fn test_no_records_for_zero_values() {
        // Bodyweight-only history: weight, 1RM, and volume all stay 0
        let bodyweight = SetRecord {
            weight_kg: None,
            ..set(4, 0.0, 15)
        };
        let summaries = aggregate_sessions(&[bodyweight]);

        let records = compute_records(&summaries);
        assert!(records.iter().all(|r| r.value > 0.0));
        assert!(records.is_empty());
    }

    #[test]
    fn test_empty_history() {
        assert!(compute_records(&[]).is_empty());
    }
}
