use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::interview::{InterviewRecord, QuestionType};

/// Per-user summary derived from the full set of interview records.
///
/// Never authoritative: it can always be rebuilt from the records, which is
/// what makes it safe to cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StatsSummary {
    pub total: u64,
    #[serde(rename = "last7Days")]
    pub last_7_days: u64,
    pub avg_score: u32,
    pub total_points: u64,
    pub recent: Vec<InterviewRecord>,
    pub type_stats: BTreeMap<QuestionType, TypeStats>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TypeStats {
    pub total: u64,
    pub attempted: u64,
    pub avg_score: u32,
}
