// src/store/mod.rs

//! Persistence seam for questions and results.
//!
//! Every method is one round trip to the backing store. Bulk writes
//! (`insert_questions`, `delete_all_*`) are atomic per call, but nothing
//! spans calls: a multi-step operation such as a refresh can be observed
//! half-way by concurrent readers.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::{
    error::AppError,
    models::{
        question::{NewQuestion, Question},
        result::{HistoryEntry, LeaderboardEntry, NewResult, QuizResult, ScoreSample},
    },
};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait QuizStore: Send + Sync {
    /// Cheap round trip used by the health probe and at startup.
    async fn ping(&self) -> Result<(), AppError>;

    /// All questions, newest first.
    async fn list_questions(&self) -> Result<Vec<Question>, AppError>;

    /// Questions matching `ids`. Unknown ids are skipped; order is unspecified.
    async fn find_questions_by_ids(&self, ids: &[i64]) -> Result<Vec<Question>, AppError>;

    async fn find_question(&self, id: i64) -> Result<Option<Question>, AppError>;

    async fn count_questions(&self) -> Result<i64, AppError>;

    /// Inserts all questions in one batch, returning them in input order.
    async fn insert_questions(&self, questions: &[NewQuestion]) -> Result<Vec<Question>, AppError>;

    /// Replaces the editable fields of a question. `None` when the id is unknown.
    async fn replace_question(
        &self,
        id: i64,
        question: &NewQuestion,
    ) -> Result<Option<Question>, AppError>;

    /// `false` when the id is unknown.
    async fn delete_question(&self, id: i64) -> Result<bool, AppError>;

    /// Deletes every question in one batch and returns how many were removed.
    async fn delete_all_questions(&self) -> Result<u64, AppError>;

    async fn insert_result(&self, result: &NewResult) -> Result<QuizResult, AppError>;

    async fn find_result(&self, id: i64) -> Result<Option<QuizResult>, AppError>;

    /// Top `limit` results by score desc, time asc, creation asc.
    async fn leaderboard(&self, limit: i64) -> Result<Vec<LeaderboardEntry>, AppError>;

    /// Results stored under exactly `user_name`, newest first.
    async fn results_for_user(&self, user_name: &str) -> Result<Vec<HistoryEntry>, AppError>;

    /// Score, time and name of every stored result.
    async fn score_samples(&self) -> Result<Vec<ScoreSample>, AppError>;

    async fn rename_result(&self, id: i64, user_name: &str)
    -> Result<Option<QuizResult>, AppError>;

    async fn delete_result(&self, id: i64) -> Result<bool, AppError>;

    /// Deletes every result in one batch and returns how many were removed.
    async fn delete_all_results(&self) -> Result<u64, AppError>;

    async fn count_results(&self) -> Result<i64, AppError>;
}
