use axum::Json;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mockraft_core::error::CoreError;
use mockraft_core::models::interview::{
    InterviewQuestion, InterviewRecord, QuestionAnalysis, QuestionType, check_score,
};
use mockraft_core::models::stats::StatsSummary;
use mockraft_core::models::user::UserId;
use mockraft_storage::store::Versioned;

use crate::aggregator::Sourced;
use crate::error::ApiError;
use crate::state::AppState;

pub async fn mock_stats(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<StatsSummary>, ApiError> {
    let user_id = UserId::parse(&user_id)?;
    let stats = state.aggregator.mock_stats(&user_id).await?;
    Ok(Json(stats))
}

pub async fn all_interviews(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Sourced<Vec<InterviewRecord>>>, ApiError> {
    let user_id = UserId::parse(&user_id)?;
    let interviews = state.aggregator.all_interviews(&user_id).await?;
    Ok(Json(interviews))
}

/// Fallback for the read routes when the user id segment is absent.
pub async fn missing_user_id() -> ApiError {
    CoreError::MissingParameter("userId").into()
}

pub async fn get_interview(
    State(state): State<AppState>,
    Path((user_id, interview_id)): Path<(String, Uuid)>,
) -> Result<Json<InterviewRecord>, ApiError> {
    let user_id = UserId::parse(&user_id)?;
    let record = state.store.get(&user_id, interview_id).await?;
    Ok(Json(record.value))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewQuestion {
    pub question: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInterviewRequest {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub questions: Vec<NewQuestion>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInterviewResponse {
    pub status: &'static str,
    pub doc_id: Uuid,
}

/// Persist a new interview, then drop the user's cached views.
pub async fn create_mock_interview(
    State(state): State<AppState>,
    Json(req): Json<CreateInterviewRequest>,
) -> Result<Json<CreateInterviewResponse>, ApiError> {
    let user_id = UserId::parse(&req.user_id)?;

    let role = req.role.trim();
    if role.is_empty() {
        return Err(CoreError::MissingParameter("role").into());
    }
    if req.questions.is_empty() {
        return Err(CoreError::MissingParameter("questions").into());
    }

    let questions = req
        .questions
        .into_iter()
        .enumerate()
        .map(|(i, q)| {
            if q.question.trim().is_empty() {
                return Err(invalid(format!("questions[{i}].question"), "must not be empty"));
            }
            let kind = QuestionType::from_tag(q.kind.trim()).ok_or_else(|| {
                invalid(format!("questions[{i}].type"), "unknown question type")
            })?;
            Ok(InterviewQuestion {
                question: q.question,
                kind: kind.as_str().to_string(),
                answer: None,
                analysis: None,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let record = InterviewRecord {
        id: Uuid::new_v4(),
        role: role.to_string(),
        created_at: jiff::Timestamp::now(),
        questions,
        overall_score: None,
        feedback: None,
        completed: false,
        points: None,
    };

    state.store.insert(&user_id, &record).await?;
    state.aggregator.invalidate(&user_id).await;
    tracing::info!(user_id = %user_id, interview_id = %record.id, "mock interview created");

    Ok(Json(CreateInterviewResponse {
        status: "success",
        doc_id: record.id,
    }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveAnswerRequest {
    #[serde(default)]
    pub user_id: String,
    pub interview_id: Option<Uuid>,
    pub question_index: Option<usize>,
    #[serde(default)]
    pub answer: String,
}

pub async fn save_answer(
    State(state): State<AppState>,
    Json(req): Json<SaveAnswerRequest>,
) -> Result<Json<InterviewRecord>, ApiError> {
    let user_id = UserId::parse(&req.user_id)?;
    let interview_id = req
        .interview_id
        .ok_or(CoreError::MissingParameter("interviewId"))?;
    let question_index = req
        .question_index
        .ok_or(CoreError::MissingParameter("questionIndex"))?;

    let Versioned {
        value: mut record,
        version,
    } = state.store.get(&user_id, interview_id).await?;

    let question = record
        .questions
        .get_mut(question_index)
        .ok_or_else(|| invalid("questionIndex".to_string(), "out of range"))?;
    question.answer = Some(req.answer);

    state.store.replace(&user_id, &record, &version).await?;
    state.aggregator.invalidate(&user_id).await;

    Ok(Json(record))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionAnalysisInput {
    pub index: usize,
    pub score: Option<f64>,
    pub feedback: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveAnalysisRequest {
    #[serde(default)]
    pub user_id: String,
    pub interview_id: Option<Uuid>,
    pub overall_score: Option<f64>,
    pub feedback: Option<String>,
    #[serde(default)]
    pub questions: Vec<QuestionAnalysisInput>,
    pub points: Option<u32>,
}

/// Record analysis results and mark the interview completed.
pub async fn save_analysis(
    State(state): State<AppState>,
    Json(req): Json<SaveAnalysisRequest>,
) -> Result<Json<InterviewRecord>, ApiError> {
    let user_id = UserId::parse(&req.user_id)?;
    let interview_id = req
        .interview_id
        .ok_or(CoreError::MissingParameter("interviewId"))?;

    let overall_score = req
        .overall_score
        .map(|s| check_score("overallScore", s))
        .transpose()?;

    let Versioned {
        value: mut record,
        version,
    } = state.store.get(&user_id, interview_id).await?;

    for input in req.questions {
        let field = format!("questions[{}].score", input.index);
        let score = input.score.map(|s| check_score(&field, s)).transpose()?;
        let question = record
            .questions
            .get_mut(input.index)
            .ok_or_else(|| invalid(format!("questions[{}].index", input.index), "out of range"))?;
        question.analysis = Some(QuestionAnalysis {
            score,
            feedback: input.feedback,
        });
    }

    record.overall_score = overall_score;
    record.feedback = req.feedback;
    record.completed = true;
    if req.points.is_some() {
        record.points = req.points;
    }

    state.store.replace(&user_id, &record, &version).await?;
    state.aggregator.invalidate(&user_id).await;
    tracing::info!(user_id = %user_id, interview_id = %record.id, "analysis saved");

    Ok(Json(record))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwardPointsRequest {
    #[serde(default)]
    pub user_id: String,
    pub interview_id: Option<Uuid>,
    pub points: Option<u32>,
}

#[derive(Serialize)]
pub struct AwardPointsResponse {
    pub status: &'static str,
    pub points: u32,
}

pub async fn award_points(
    State(state): State<AppState>,
    Json(req): Json<AwardPointsRequest>,
) -> Result<Json<AwardPointsResponse>, ApiError> {
    let user_id = UserId::parse(&req.user_id)?;
    let interview_id = req
        .interview_id
        .ok_or(CoreError::MissingParameter("interviewId"))?;
    let delta = req.points.ok_or(CoreError::MissingParameter("points"))?;
    if delta == 0 {
        return Err(invalid("points".to_string(), "must be positive"));
    }

    let points = state
        .store
        .increment_points(&user_id, interview_id, delta)
        .await?;
    state.aggregator.invalidate(&user_id).await;

    Ok(Json(AwardPointsResponse {
        status: "success",
        points,
    }))
}

fn invalid(field: String, reason: &str) -> ApiError {
    CoreError::InvalidField {
        field,
        reason: reason.to_string(),
    }
    .into()
}
