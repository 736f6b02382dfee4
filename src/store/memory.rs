// src/store/memory.rs

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;
use tokio::sync::RwLock;

use super::QuizStore;
use crate::{
    error::AppError,
    models::{
        question::{NewQuestion, Question},
        result::{HistoryEntry, LeaderboardEntry, NewResult, QuizResult, ScoreSample},
    },
    services::leaderboard::rank,
};

#[derive(Default)]
struct Collections {
    questions: BTreeMap<i64, Question>,
    results: BTreeMap<i64, QuizResult>,
    next_question_id: i64,
    next_result_id: i64,
}

impl Collections {
    fn allocate_question_id(&mut self) -> i64 {
        self.next_question_id += 1;
        self.next_question_id
    }

    fn allocate_result_id(&mut self) -> i64 {
        self.next_result_id += 1;
        self.next_result_id
    }
}

/// Process-local store. Each method takes the lock once, so every call is atomic.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first<T>(items: &mut [T], key: impl Fn(&T) -> (chrono::DateTime<Utc>, i64)) {
    items.sort_by(|a, b| key(b).cmp(&key(a)));
}

#[async_trait]
impl QuizStore for MemoryStore {
    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn list_questions(&self) -> Result<Vec<Question>, AppError> {
        let inner = self.inner.read().await;
        let mut questions: Vec<Question> = inner.questions.values().cloned().collect();
        newest_first(&mut questions, |q| (q.created_at, q.id));
        Ok(questions)
    }

    async fn find_questions_by_ids(&self, ids: &[i64]) -> Result<Vec<Question>, AppError> {
        let inner = self.inner.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| inner.questions.get(id).cloned())
            .collect())
    }

    async fn find_question(&self, id: i64) -> Result<Option<Question>, AppError> {
        Ok(self.inner.read().await.questions.get(&id).cloned())
    }

    async fn count_questions(&self) -> Result<i64, AppError> {
        Ok(self.inner.read().await.questions.len() as i64)
    }

    async fn insert_questions(&self, questions: &[NewQuestion]) -> Result<Vec<Question>, AppError> {
        let mut inner = self.inner.write().await;
        let now = Utc::now();
        let mut inserted = Vec::with_capacity(questions.len());
        for new in questions {
            let question = Question {
                id: inner.allocate_question_id(),
                question_text: new.question_text.clone(),
                options: Json(new.options.clone()),
                correct_answer: new.correct_answer,
                category: new.category.clone(),
                difficulty: new.difficulty,
                created_at: now,
                updated_at: now,
            };
            inner.questions.insert(question.id, question.clone());
            inserted.push(question);
        }
        Ok(inserted)
    }

    async fn replace_question(
        &self,
        id: i64,
        question: &NewQuestion,
    ) -> Result<Option<Question>, AppError> {
        let mut inner = self.inner.write().await;
        let Some(existing) = inner.questions.get_mut(&id) else {
            return Ok(None);
        };
        existing.question_text = question.question_text.clone();
        existing.options = Json(question.options.clone());
        existing.correct_answer = question.correct_answer;
        existing.category = question.category.clone();
        existing.difficulty = question.difficulty;
        existing.updated_at = Utc::now();
        Ok(Some(existing.clone()))
    }

    async fn delete_question(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.inner.write().await.questions.remove(&id).is_some())
    }

    async fn delete_all_questions(&self) -> Result<u64, AppError> {
        let mut inner = self.inner.write().await;
        let removed = inner.questions.len() as u64;
        inner.questions.clear();
        Ok(removed)
    }

    async fn insert_result(&self, result: &NewResult) -> Result<QuizResult, AppError> {
        let mut inner = self.inner.write().await;
        let now = Utc::now();
        let stored = QuizResult {
            id: inner.allocate_result_id(),
            user_name: result.user_name.clone(),
            total_questions: result.total_questions,
            correct_answers: result.correct_answers,
            wrong_answers: result.wrong_answers,
            final_score: result.final_score,
            time_taken: result.time_taken,
            answers: Json(result.answers.clone()),
            created_at: now,
            updated_at: now,
        };
        inner.results.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn find_result(&self, id: i64) -> Result<Option<QuizResult>, AppError> {
        Ok(self.inner.read().await.results.get(&id).cloned())
    }

    async fn leaderboard(&self, limit: i64) -> Result<Vec<LeaderboardEntry>, AppError> {
        let inner = self.inner.read().await;
        let entries = inner.results.values().map(LeaderboardEntry::from).collect();
        Ok(rank(entries, limit))
    }

    async fn results_for_user(&self, user_name: &str) -> Result<Vec<HistoryEntry>, AppError> {
        let inner = self.inner.read().await;
        let mut history: Vec<HistoryEntry> = inner
            .results
            .values()
            .filter(|r| r.user_name == user_name)
            .map(HistoryEntry::from)
            .collect();
        newest_first(&mut history, |h| (h.created_at, h.id));
        Ok(history)
    }

    async fn score_samples(&self) -> Result<Vec<ScoreSample>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.results.values().map(ScoreSample::from).collect())
    }

    async fn rename_result(
        &self,
        id: i64,
        user_name: &str,
    ) -> Result<Option<QuizResult>, AppError> {
        let mut inner = self.inner.write().await;
        let Some(existing) = inner.results.get_mut(&id) else {
            return Ok(None);
        };
        existing.user_name = user_name.to_string();
        existing.updated_at = Utc::now();
        Ok(Some(existing.clone()))
    }

    async fn delete_result(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.inner.write().await.results.remove(&id).is_some())
    }

    async fn delete_all_results(&self) -> Result<u64, AppError> {
        let mut inner = self.inner.write().await;
        let removed = inner.results.len() as u64;
        inner.results.clear();
        Ok(removed)
    }

    async fn count_results(&self) -> Result<i64, AppError> {
        Ok(self.inner.read().await.results.len() as i64)
    }
}
