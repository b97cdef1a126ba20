//! The statistics reduction over a user's interview records.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use jiff::{SignedDuration, Timestamp};

use crate::models::interview::{InterviewRecord, QuestionType};
use crate::models::stats::{StatsSummary, TypeStats};

/// Trailing window counted by `last_7_days`.
pub const RECENT_WINDOW: SignedDuration = SignedDuration::from_hours(7 * 24);

/// How many records `recent` carries.
pub const RECENT_LIMIT: usize = 3;

/// Reduce a user's records to a [`StatsSummary`] as of `now`.
///
/// Pure and order-independent: the same record set and `now` always produce
/// the same summary.
pub fn compute_stats(records: &[InterviewRecord], now: Timestamp) -> StatsSummary {
    let window_start = now - RECENT_WINDOW;

    let last_7_days = records
        .iter()
        .filter(|r| r.created_at >= window_start)
        .count() as u64;

    let scored: Vec<f64> = records.iter().filter_map(|r| r.overall_score).collect();
    let avg_score = rounded_mean(scored.iter().sum(), scored.len() as u64);

    let total_points = records
        .iter()
        .map(|r| u64::from(r.points.unwrap_or(0)))
        .sum();

    let mut recent: Vec<&InterviewRecord> = records.iter().collect();
    recent.sort_by_key(|r| (Reverse(r.created_at), r.id));
    let recent = recent.into_iter().take(RECENT_LIMIT).cloned().collect();

    StatsSummary {
        total: records.len() as u64,
        last_7_days,
        avg_score,
        total_points,
        recent,
        type_stats: type_stats(records),
    }
}

fn type_stats(records: &[InterviewRecord]) -> BTreeMap<QuestionType, TypeStats> {
    QuestionType::ALL
        .into_iter()
        .map(|kind| {
            let mut total = 0;
            let mut attempted = 0;
            let mut score_sum = 0.0;

            for question in records
                .iter()
                .flat_map(|r| &r.questions)
                .filter(|q| q.question_type() == Some(kind))
            {
                total += 1;
                if question.is_attempted() {
                    attempted += 1;
                    score_sum += question.score().unwrap_or(0.0);
                }
            }

            let stats = TypeStats {
                total,
                attempted,
                avg_score: rounded_mean(score_sum, attempted),
            };
            (kind, stats)
        })
        .collect()
}

/// Mean rounded half-up and held to the 0–100 scale; 0 for an empty set.
fn rounded_mean(sum: f64, count: u64) -> u32 {
    if count == 0 {
        return 0;
    }
    let mean = sum / count as f64;
    (mean + 0.5).floor().clamp(0.0, 100.0) as u32
}
