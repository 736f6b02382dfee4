// src/services/selector.rs

use rand::seq::SliceRandom;

use crate::{error::AppError, models::question::PublicQuestion, store::QuizStore};

/// Draws `count` questions uniformly at random, without replacement, from the whole bank.
/// The correct answers are stripped and questions are numbered from 1.
pub async fn select_questions(
    store: &dyn QuizStore,
    count: usize,
) -> Result<Vec<PublicQuestion>, AppError> {
    let bank = store.list_questions().await?;

    if bank.len() < count {
        tracing::warn!(
            "Question bank holds {} questions, {} required",
            bank.len(),
            count
        );
        return Err(AppError::InsufficientData(format!(
            "Not enough questions in database. Need at least {} questions.",
            count
        )));
    }

    Ok(draw(bank, count)
        .into_iter()
        .enumerate()
        .map(|(index, question)| PublicQuestion::from_question(question, index + 1))
        .collect())
}

/// Shuffles the whole bank and keeps the first `count` entries.
fn draw<T>(mut bank: Vec<T>, count: usize) -> Vec<T> {
    bank.shuffle(&mut rand::rng());
    bank.truncate(count);
    bank
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_draw_is_without_replacement() {
        let bank: Vec<u32> = (0..50).collect();
        let picked = draw(bank, 20);
        assert_eq!(picked.len(), 20);
        let distinct: HashSet<u32> = picked.iter().copied().collect();
        assert_eq!(distinct.len(), 20);
        assert!(picked.iter().all(|n| *n < 50));
    }

    #[test]
    fn test_draw_exact_size_keeps_everything() {
        let bank: Vec<u32> = (0..20).collect();
        let mut picked = draw(bank, 20);
        picked.sort_unstable();
        assert_eq!(picked, (0..20).collect::<Vec<u32>>());
    }
}
