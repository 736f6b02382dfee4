// src/services/leaderboard.rs

use std::cmp::Reverse;

use crate::{
    config::{DEFAULT_LEADERBOARD_LIMIT, MAX_LEADERBOARD_LIMIT},
    error::AppError,
    models::result::LeaderboardEntry,
    store::QuizStore,
};

/// Clamps a client-supplied limit to `1..=MAX_LEADERBOARD_LIMIT`.
pub fn clamp_limit(requested: Option<i64>) -> i64 {
    requested
        .unwrap_or(DEFAULT_LEADERBOARD_LIMIT)
        .clamp(1, MAX_LEADERBOARD_LIMIT)
}

/// Orders entries by score (desc), then time taken (asc), then creation (asc),
/// and keeps the first `limit`.
pub fn rank(mut entries: Vec<LeaderboardEntry>, limit: i64) -> Vec<LeaderboardEntry> {
    entries.sort_by_key(|e| (Reverse(e.final_score), e.time_taken, e.created_at, e.id));
    entries.truncate(usize::try_from(limit).unwrap_or(0));
    entries
}

/// Retrieves the top results for the leaderboard.
pub async fn top_results(
    store: &dyn QuizStore,
    limit: Option<i64>,
) -> Result<Vec<LeaderboardEntry>, AppError> {
    store.leaderboard(clamp_limit(limit)).await
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;

    fn entry(id: i64, final_score: i32, time_taken: i32) -> LeaderboardEntry {
        LeaderboardEntry {
            id,
            user_name: format!("user{}", id),
            final_score,
            correct_answers: final_score / 5,
            time_taken,
            created_at: Utc::now() + Duration::seconds(id),
        }
    }

    #[test]
    fn test_faster_time_breaks_score_tie() {
        let ranked = rank(vec![entry(1, 80, 120), entry(2, 80, 90)], 10);
        assert_eq!(ranked[0].id, 2);
        assert_eq!(ranked[1].id, 1);
    }

    #[test]
    fn test_ordering_property_and_limit() {
        let entries = vec![
            entry(1, 40, 30),
            entry(2, 95, 300),
            entry(3, 95, 200),
            entry(4, 70, 10),
            entry(5, 100, 500),
            entry(6, 70, 10),
        ];
        let ranked = rank(entries, 4);
        assert_eq!(ranked.len(), 4);
        for pair in ranked.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(
                a.final_score > b.final_score
                    || (a.final_score == b.final_score && a.time_taken <= b.time_taken)
            );
        }
        let ids: Vec<i64> = ranked.iter().map(|e| e.id).collect();
        // Equal score and time: earlier submission first.
        assert_eq!(ids, vec![5, 3, 2, 4]);
    }

    #[test]
    fn test_empty_is_empty() {
        assert!(rank(Vec::new(), 10).is_empty());
    }

    #[test]
    fn test_clamp_limit() {
        assert_eq!(clamp_limit(None), 10);
        assert_eq!(clamp_limit(Some(0)), 1);
        assert_eq!(clamp_limit(Some(-5)), 1);
        assert_eq!(clamp_limit(Some(25)), 25);
        assert_eq!(clamp_limit(Some(10_000)), 100);
    }
}
