use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::CoreError;

/// Category of a mock-interview question.
///
/// [`QuestionType::ALL`] is the one enumeration of tracked categories; the
/// frontend consumes the exported TypeScript binding of this type.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum QuestionType {
    Technical,
    Behavioral,
    SystemDesign,
    Curveball,
}

impl QuestionType {
    pub const ALL: [QuestionType; 4] = [
        QuestionType::Technical,
        QuestionType::Behavioral,
        QuestionType::SystemDesign,
        QuestionType::Curveball,
    ];

    /// The stored tag, matching the serde name.
    pub fn as_str(self) -> &'static str {
        match self {
            QuestionType::Technical => "technical",
            QuestionType::Behavioral => "behavioral",
            QuestionType::SystemDesign => "system_design",
            QuestionType::Curveball => "curveball",
        }
    }

    /// `None` for tags this build does not track.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == tag)
    }
}

/// One mock-interview session owned by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct InterviewRecord {
    pub id: Uuid,
    pub role: String,
    pub created_at: jiff::Timestamp,
    pub questions: Vec<InterviewQuestion>,
    #[serde(
        default,
        deserialize_with = "lenient_score",
        skip_serializing_if = "Option::is_none"
    )]
    #[ts(optional)]
    pub overall_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub feedback: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub points: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct InterviewQuestion {
    pub question: String,
    /// Raw type tag. Untracked tags are kept verbatim so rewrites never
    /// lose them.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub answer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub analysis: Option<QuestionAnalysis>,
}

impl InterviewQuestion {
    pub fn is_attempted(&self) -> bool {
        self.answer.as_deref().is_some_and(|a| !a.trim().is_empty())
    }

    pub fn question_type(&self) -> Option<QuestionType> {
        QuestionType::from_tag(&self.kind)
    }

    pub fn score(&self) -> Option<f64> {
        self.analysis.as_ref().and_then(|a| a.score)
    }
}

/// Feedback produced for a single answered question.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct QuestionAnalysis {
    #[serde(
        default,
        deserialize_with = "lenient_score",
        skip_serializing_if = "Option::is_none"
    )]
    #[ts(optional)]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub feedback: Option<String>,
}

/// Accepts any JSON value; only numbers on the 0–100 scale survive as scores.
fn lenient_score<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_f64()).filter(|s| in_scale(*s)))
}

fn in_scale(score: f64) -> bool {
    score.is_finite() && (0.0..=100.0).contains(&score)
}

/// Reject scores outside the 0–100 scale before they are persisted.
pub fn check_score(field: &str, score: f64) -> Result<f64, CoreError> {
    if in_scale(score) {
        Ok(score)
    } else {
        Err(CoreError::InvalidField {
            field: field.to_string(),
            reason: format!("score {score} is outside 0..=100"),
        })
    }
}
