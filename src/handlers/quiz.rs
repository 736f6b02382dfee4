// src/handlers/quiz.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use utoipa::IntoParams;

use crate::{
    config::QUIZ_QUESTION_COUNT,
    error::AppError,
    models::result::SubmitQuizRequest,
    services::{grader, history, leaderboard, selector, statistics},
    store::QuizStore,
};

/// Draws a fresh random quiz.
///
/// Returns 20 questions without their correct answers, numbered from 1.
/// Fails with 400 when the bank holds fewer than 20 questions.
#[utoipa::path(
    get,
    path = "/api/quiz/questions",
    tag = "Quiz",
    responses(
        (status = 200, description = "Randomised quiz questions", body = [crate::models::question::PublicQuestion]),
        (status = 400, description = "Not enough questions in the bank")
    )
)]
pub async fn get_questions(
    State(store): State<Arc<dyn QuizStore>>,
) -> Result<impl IntoResponse, AppError> {
    let questions = selector::select_questions(store.as_ref(), QUIZ_QUESTION_COUNT).await?;

    Ok(Json(json!({
        "success": true,
        "totalQuestions": questions.len(),
        "questions": questions,
    })))
}

/// Grades a quiz attempt and stores the result.
#[utoipa::path(
    post,
    path = "/api/quiz/submit",
    tag = "Quiz",
    request_body = SubmitQuizRequest,
    responses(
        (status = 200, description = "Graded result", body = crate::models::result::SubmissionSummary),
        (status = 400, description = "Malformed or inconsistent submission")
    )
)]
pub async fn submit_quiz(
    State(store): State<Arc<dyn QuizStore>>,
    payload: Result<Json<SubmitQuizRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload?;
    let summary = grader::grade_submission(store.as_ref(), req, QUIZ_QUESTION_COUNT).await?;

    Ok(Json(json!({
        "success": true,
        "result": summary,
    })))
}

/// Query parameters for the leaderboard.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LeaderboardParams {
    /// Number of entries, 1 to 100. Defaults to 10.
    pub limit: Option<i64>,
}

/// Retrieves the top results, best score first and faster time first on ties.
#[utoipa::path(
    get,
    path = "/api/quiz/leaderboard",
    tag = "Quiz",
    params(LeaderboardParams),
    responses(
        (status = 200, description = "Ranked results", body = [crate::models::result::LeaderboardEntry])
    )
)]
pub async fn get_leaderboard(
    State(store): State<Arc<dyn QuizStore>>,
    params: Result<Query<LeaderboardParams>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Query(params) = params?;
    let entries = leaderboard::top_results(store.as_ref(), params.limit).await?;

    Ok(Json(json!({
        "success": true,
        "leaderboard": entries,
    })))
}

/// Lists a user's past attempts, newest first.
#[utoipa::path(
    get,
    path = "/api/quiz/history/{userName}",
    tag = "Quiz",
    params(("userName" = String, Path, description = "Name used when submitting")),
    responses(
        (status = 200, description = "Past attempts", body = [crate::models::result::HistoryEntry])
    )
)]
pub async fn get_history(
    State(store): State<Arc<dyn QuizStore>>,
    user_name: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(user_name) = user_name?;
    let entries = history::user_history(store.as_ref(), &user_name).await?;

    Ok(Json(json!({
        "success": true,
        "history": entries,
    })))
}

/// Aggregate statistics over every stored result.
#[utoipa::path(
    get,
    path = "/api/quiz/statistics",
    tag = "Quiz",
    responses(
        (status = 200, description = "Competition statistics", body = crate::models::result::Statistics)
    )
)]
pub async fn get_statistics(
    State(store): State<Arc<dyn QuizStore>>,
) -> Result<impl IntoResponse, AppError> {
    let stats = statistics::compute(store.as_ref()).await?;

    Ok(Json(json!({
        "success": true,
        "statistics": stats,
    })))
}
