// src/models/result.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, types::Json};
use utoipa::ToSchema;
use validator::Validate;

/// One graded answer inside a stored result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GradedAnswer {
    pub question_id: i64,
    /// -1 when the question was left unanswered.
    pub selected_option: i16,
    pub is_correct: bool,
}

/// Represents the 'results' table in the database.
/// One row per completed quiz attempt.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub id: i64,
    pub user_name: String,
    pub total_questions: i32,
    pub correct_answers: i32,
    pub wrong_answers: i32,
    pub final_score: i32,
    /// Seconds.
    pub time_taken: i32,
    pub answers: Json<Vec<GradedAnswer>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A graded attempt ready to be written by a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewResult {
    pub user_name: String,
    pub total_questions: i32,
    pub correct_answers: i32,
    pub wrong_answers: i32,
    pub final_score: i32,
    pub time_taken: i32,
    pub answers: Vec<GradedAnswer>,
}

/// Leaderboard projection of a result. Never carries the per-question answers.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub id: i64,
    pub user_name: String,
    pub final_score: i32,
    pub correct_answers: i32,
    pub time_taken: i32,
    pub created_at: DateTime<Utc>,
}

impl From<&QuizResult> for LeaderboardEntry {
    fn from(result: &QuizResult) -> Self {
        Self {
            id: result.id,
            user_name: result.user_name.clone(),
            final_score: result.final_score,
            correct_answers: result.correct_answers,
            time_taken: result.time_taken,
            created_at: result.created_at,
        }
    }
}

/// A user's past attempt as listed by the history endpoint.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: i64,
    pub final_score: i32,
    pub correct_answers: i32,
    pub wrong_answers: i32,
    pub time_taken: i32,
    pub created_at: DateTime<Utc>,
}

impl From<&QuizResult> for HistoryEntry {
    fn from(result: &QuizResult) -> Self {
        Self {
            id: result.id,
            final_score: result.final_score,
            correct_answers: result.correct_answers,
            wrong_answers: result.wrong_answers,
            time_taken: result.time_taken,
            created_at: result.created_at,
        }
    }
}

/// The columns the statistics aggregator needs from each result.
#[derive(Debug, Clone, FromRow)]
pub struct ScoreSample {
    pub user_name: String,
    pub final_score: i32,
    pub time_taken: i32,
}

impl From<&QuizResult> for ScoreSample {
    fn from(result: &QuizResult) -> Self {
        Self {
            user_name: result.user_name.clone(),
            final_score: result.final_score,
            time_taken: result.time_taken,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// Distinct user names.
    pub total_participants: i64,
    pub total_attempts: i64,
    pub average_score: i64,
    pub highest_score: i32,
    /// Seconds.
    pub average_time: i64,
}

/// DTO for a single answer in a submission.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnswerSubmission {
    pub question_id: i64,
    #[validate(range(min = -1, max = 3, message = "Selected option must be between -1 and 3 (-1 for unanswered)"))]
    pub selected_option: i16,
}

/// DTO for submitting a quiz attempt.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQuizRequest {
    #[validate(length(max = 100, message = "User name must be at most 100 characters."))]
    pub user_name: String,
    #[validate(nested)]
    pub answers: Vec<AnswerSubmission>,
    /// Seconds. Treated as 0 when absent.
    #[validate(range(min = 0, message = "Time taken must be a non-negative number"))]
    pub time_taken: Option<i32>,
}

/// Aggregate returned to the client after grading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionSummary {
    pub total_questions: i32,
    pub correct_answers: i32,
    pub wrong_answers: i32,
    pub final_score: i32,
    pub time_taken: i32,
    pub result_id: i64,
}

/// DTO for renaming the user of a stored result.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResultRequest {
    #[validate(length(min = 1, max = 100, message = "User name must be between 1 and 100 characters."))]
    pub user_name: String,
}
