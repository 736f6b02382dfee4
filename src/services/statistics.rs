// src/services/statistics.rs

use std::collections::HashSet;

use crate::{
    error::AppError,
    models::result::{ScoreSample, Statistics},
    store::QuizStore,
};

/// Mean of non-negative values, rounded half-up.
fn rounded_mean(total: i64, count: i64) -> i64 {
    (2 * total + count) / (2 * count)
}

/// Aggregates participant, score and time statistics over every sample.
/// An empty slice yields all zeros.
pub fn aggregate(samples: &[ScoreSample]) -> Statistics {
    if samples.is_empty() {
        return Statistics::default();
    }

    let participants: HashSet<&str> = samples.iter().map(|s| s.user_name.as_str()).collect();
    let attempts = samples.len() as i64;
    let total_score: i64 = samples.iter().map(|s| i64::from(s.final_score)).sum();
    let total_time: i64 = samples.iter().map(|s| i64::from(s.time_taken)).sum();
    let highest_score = samples.iter().map(|s| s.final_score).max().unwrap_or(0);

    Statistics {
        total_participants: participants.len() as i64,
        total_attempts: attempts,
        average_score: rounded_mean(total_score, attempts),
        highest_score,
        average_time: rounded_mean(total_time, attempts),
    }
}

pub async fn compute(store: &dyn QuizStore) -> Result<Statistics, AppError> {
    let samples = store.score_samples().await?;
    Ok(aggregate(&samples))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(user_name: &str, final_score: i32, time_taken: i32) -> ScoreSample {
        ScoreSample {
            user_name: user_name.to_string(),
            final_score,
            time_taken,
        }
    }

    #[test]
    fn test_empty_is_all_zero() {
        assert_eq!(aggregate(&[]), Statistics::default());
        let stats = aggregate(&[]);
        assert_eq!(stats.total_participants, 0);
        assert_eq!(stats.average_score, 0);
        assert_eq!(stats.average_time, 0);
    }

    #[test]
    fn test_duplicate_names_collapse() {
        let stats = aggregate(&[
            sample("amy", 80, 100),
            sample("amy", 90, 110),
            sample("bob", 45, 61),
        ]);
        assert_eq!(stats.total_participants, 2);
        assert_eq!(stats.total_attempts, 3);
        // 215 / 3 = 71.67
        assert_eq!(stats.average_score, 72);
        assert_eq!(stats.highest_score, 90);
        // 271 / 3 = 90.33
        assert_eq!(stats.average_time, 90);
    }

    #[test]
    fn test_half_rounds_up() {
        let stats = aggregate(&[sample("a", 50, 1), sample("b", 51, 2)]);
        assert_eq!(stats.average_score, 51);
        assert_eq!(stats.average_time, 2);
    }
}
