// src/services/history.rs

use crate::{error::AppError, models::result::HistoryEntry, store::QuizStore};

/// Lists a user's attempts, newest first.
/// The name is trimmed the same way as on submission so lookups match stored names.
pub async fn user_history(
    store: &dyn QuizStore,
    user_name: &str,
) -> Result<Vec<HistoryEntry>, AppError> {
    let user_name = user_name.trim();
    if user_name.is_empty() {
        return Err(AppError::Validation("Valid username is required".to_string()));
    }
    store.results_for_user(user_name).await
}
