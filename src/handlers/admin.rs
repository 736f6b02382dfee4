// src/handlers/admin.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use validator::Validate;

use crate::{
    error::AppError,
    models::{
        question::{CreateQuestionRequest, NewQuestion, UpdateQuestionRequest},
        result::UpdateResultRequest,
    },
    store::QuizStore,
};

/// Lists every question, including the correct answer.
/// Admin only.
pub async fn list_questions(
    State(store): State<Arc<dyn QuizStore>>,
) -> Result<impl IntoResponse, AppError> {
    let questions = store.list_questions().await?;

    Ok(Json(json!({
        "success": true,
        "total": questions.len(),
        "questions": questions,
    })))
}

/// Retrieves a single question by ID.
/// Admin only.
pub async fn get_question(
    State(store): State<Arc<dyn QuizStore>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(id) = id?;
    let question = store
        .find_question(id)
        .await?
        .ok_or(AppError::NotFound("Question not found".to_string()))?;

    Ok(Json(json!({ "success": true, "question": question })))
}

/// Creates a new quiz question. The correct answer may be an index or the option text.
/// Admin only.
pub async fn create_question(
    State(store): State<Arc<dyn QuizStore>>,
    payload: Result<Json<CreateQuestionRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    let new_question = payload.into_new_question()?;

    let created = store
        .insert_questions(std::slice::from_ref(&new_question))
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| AppError::InternalServerError("insert returned no row".to_string()))?;

    tracing::info!("Created question {}", created.id);
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "question": created })),
    ))
}

/// Inserts many questions in one batch. Nothing is written if any entry is invalid.
/// Admin only.
pub async fn bulk_create_questions(
    State(store): State<Arc<dyn QuizStore>>,
    payload: Result<Json<Vec<CreateQuestionRequest>>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    if payload.is_empty() {
        return Err(AppError::Validation("No questions submitted".to_string()));
    }

    let new_questions = payload
        .into_iter()
        .enumerate()
        .map(|(index, request)| {
            request.into_new_question().map_err(|e| match e {
                AppError::Validation(msg) => {
                    AppError::Validation(format!("Question {}: {}", index + 1, msg))
                }
                other => other,
            })
        })
        .collect::<Result<Vec<NewQuestion>, AppError>>()?;

    let inserted = store.insert_questions(&new_questions).await?;
    let total = store.count_questions().await?;

    tracing::info!("Bulk inserted {} questions, bank now holds {}", inserted.len(), total);
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "inserted": inserted.len(),
            "totalQuestions": total,
            "questions": inserted,
        })),
    ))
}

/// Updates a question by ID. Omitted fields keep their current value.
/// Admin only.
pub async fn update_question(
    State(store): State<Arc<dyn QuizStore>>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateQuestionRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(id) = id?;
    let Json(payload) = payload?;

    let current = store
        .find_question(id)
        .await?
        .ok_or(AppError::NotFound("Question not found".to_string()))?;

    if payload.is_empty() {
        return Ok(Json(json!({ "success": true, "question": current })));
    }

    let merged = payload.merge_into(&current)?;
    let updated = store
        .replace_question(id, &merged)
        .await?
        .ok_or(AppError::NotFound("Question not found".to_string()))?;

    Ok(Json(json!({ "success": true, "question": updated })))
}

/// Deletes a quiz question by ID.
/// Admin only.
pub async fn delete_question(
    State(store): State<Arc<dyn QuizStore>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(id) = id?;
    if !store.delete_question(id).await? {
        return Err(AppError::NotFound("Question not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Retrieves a full result, including the graded answers.
/// Admin only.
pub async fn get_result(
    State(store): State<Arc<dyn QuizStore>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(id) = id?;
    let result = store
        .find_result(id)
        .await?
        .ok_or(AppError::NotFound("Result not found".to_string()))?;

    Ok(Json(json!({ "success": true, "result": result })))
}

/// Renames the user on a stored result.
/// Admin only.
pub async fn update_result(
    State(store): State<Arc<dyn QuizStore>>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateResultRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    payload.validate()?;

    let user_name = payload.user_name.trim();
    if user_name.is_empty() {
        return Err(AppError::Validation(
            "User name is required and must be a non-empty string".to_string(),
        ));
    }

    let result = store
        .rename_result(id, user_name)
        .await?
        .ok_or(AppError::NotFound("Result not found".to_string()))?;

    Ok(Json(json!({ "success": true, "result": result })))
}

/// Deletes a result by ID.
/// Admin only.
pub async fn delete_result(
    State(store): State<Arc<dyn QuizStore>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(id) = id?;
    if !store.delete_result(id).await? {
        return Err(AppError::NotFound("Result not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Current number of questions and results.
/// Admin only.
pub async fn data_counts(
    State(store): State<Arc<dyn QuizStore>>,
) -> Result<impl IntoResponse, AppError> {
    let questions = store.count_questions().await?;
    let results = store.count_results().await?;

    Ok(Json(json!({
        "success": true,
        "questions": questions,
        "results": results,
    })))
}
