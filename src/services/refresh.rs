// src/services/refresh.rs

use std::time::Instant;

use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::AppError, services::seed::fresh_questions, store::QuizStore};

/// Outcome of a refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefreshReport {
    pub cleared_results: u64,
    pub cleared_questions: u64,
    pub added_questions: usize,
    /// Wall-clock duration in milliseconds.
    pub duration_ms: u64,
}

/// Resets the competition: clears all results, clears all questions, installs the seed set.
///
/// Each step is a single batch, but the sequence is not transactional. A failing step stops
/// the refresh and leaves the store in whatever state the completed steps produced
/// (for instance no results and no questions), which the caller sees as an error.
pub async fn refresh(store: &dyn QuizStore) -> Result<RefreshReport, AppError> {
    let started = Instant::now();
    tracing::info!("Refresh started: clearing results and questions");

    let seed = fresh_questions()?;

    let cleared_results = store
        .delete_all_results()
        .await
        .inspect_err(|e| tracing::error!("Refresh failed while clearing results: {}", e))?;
    tracing::info!("Cleared {} results", cleared_results);

    let cleared_questions = store
        .delete_all_questions()
        .await
        .inspect_err(|e| tracing::error!("Refresh failed while clearing questions: {}", e))?;
    tracing::info!("Cleared {} questions", cleared_questions);

    let added = store
        .insert_questions(&seed)
        .await
        .inspect_err(|e| tracing::error!("Refresh failed while seeding questions: {}", e))?;

    let report = RefreshReport {
        cleared_results,
        cleared_questions,
        added_questions: added.len(),
        duration_ms: started.elapsed().as_millis() as u64,
    };

    tracing::info!(
        "Refresh completed: {} results cleared, {} questions cleared, {} questions added in {}ms",
        report.cleared_results,
        report.cleared_questions,
        report.added_questions,
        report.duration_ms
    );

    Ok(report)
}
