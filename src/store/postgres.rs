// src/store/postgres.rs

use std::time::Duration;

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder, postgres::PgPoolOptions, types::Json};

use super::QuizStore;
use crate::{
    error::AppError,
    models::{
        question::{NewQuestion, Question},
        result::{HistoryEntry, LeaderboardEntry, NewResult, QuizResult, ScoreSample},
    },
};

const QUESTION_COLUMNS: &str =
    "id, question_text, options, correct_answer, category, difficulty, created_at, updated_at";

const RESULT_COLUMNS: &str = "id, user_name, total_questions, correct_answers, wrong_answers, \
     final_score, time_taken, answers, created_at, updated_at";

const CONNECT_RETRIES: u32 = 5;

/// Postgres-backed store. Cloning shares the underlying pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects with retry and applies pending migrations.
    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        let mut retry_count = 0;
        let pool = loop {
            match PgPoolOptions::new()
                .max_connections(5)
                .acquire_timeout(Duration::from_secs(3))
                .connect(database_url)
                .await
            {
                Ok(pool) => break pool,
                Err(e) => {
                    retry_count += 1;
                    if retry_count > CONNECT_RETRIES {
                        return Err(AppError::Connectivity(format!(
                            "failed to connect to database after {} retries: {}",
                            CONNECT_RETRIES, e
                        )));
                    }
                    tracing::warn!(
                        "Database not ready, retrying in 2s... (Attempt {})",
                        retry_count
                    );
                    tokio::time::sleep(Duration::from_secs(2)).await;
                }
            }
        };

        tracing::info!("Database connected, running migrations...");
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| AppError::InternalServerError(format!("migration failed: {}", e)))?;
        tracing::info!("Migrations applied successfully.");

        Ok(Self::new(pool))
    }
}

#[async_trait]
impl QuizStore for PgStore {
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_questions(&self) -> Result<Vec<Question>, AppError> {
        let sql = format!(
            "SELECT {} FROM questions ORDER BY created_at DESC, id DESC",
            QUESTION_COLUMNS
        );
        let questions = sqlx::query_as::<_, Question>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(questions)
    }

    async fn find_questions_by_ids(&self, ids: &[i64]) -> Result<Vec<Question>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!("SELECT {} FROM questions WHERE id = ANY($1)", QUESTION_COLUMNS);
        let questions = sqlx::query_as::<_, Question>(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(questions)
    }

    async fn find_question(&self, id: i64) -> Result<Option<Question>, AppError> {
        let sql = format!("SELECT {} FROM questions WHERE id = $1", QUESTION_COLUMNS);
        let question = sqlx::query_as::<_, Question>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(question)
    }

    async fn count_questions(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM questions")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn insert_questions(&self, questions: &[NewQuestion]) -> Result<Vec<Question>, AppError> {
        if questions.is_empty() {
            return Ok(Vec::new());
        }

        // A single multi-row INSERT is atomic on its own.
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
            "INSERT INTO questions (question_text, options, correct_answer, category, difficulty) ",
        );
        builder.push_values(questions, |mut row, q| {
            row.push_bind(&q.question_text)
                .push_bind(Json(&q.options))
                .push_bind(q.correct_answer)
                .push_bind(&q.category)
                .push_bind(q.difficulty);
        });
        builder.push(" RETURNING ");
        builder.push(QUESTION_COLUMNS);

        let inserted: Vec<Question> = builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert questions: {:?}", e);
                AppError::from(e)
            })?;

        Ok(inserted)
    }

    async fn replace_question(
        &self,
        id: i64,
        question: &NewQuestion,
    ) -> Result<Option<Question>, AppError> {
        let sql = format!(
            r#"
            UPDATE questions SET
                question_text = $1,
                options = $2,
                correct_answer = $3,
                category = $4,
                difficulty = $5,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = $6
            RETURNING {}
            "#,
            QUESTION_COLUMNS
        );
        let updated = sqlx::query_as::<_, Question>(&sql)
            .bind(&question.question_text)
            .bind(Json(&question.options))
            .bind(question.correct_answer)
            .bind(&question.category)
            .bind(question.difficulty)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(updated)
    }

    async fn delete_question(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_all_questions(&self) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM questions")
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn insert_result(&self, result: &NewResult) -> Result<QuizResult, AppError> {
        let sql = format!(
            r#"
            INSERT INTO results
            (user_name, total_questions, correct_answers, wrong_answers, final_score, time_taken, answers)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            RESULT_COLUMNS
        );
        let stored = sqlx::query_as::<_, QuizResult>(&sql)
            .bind(&result.user_name)
            .bind(result.total_questions)
            .bind(result.correct_answers)
            .bind(result.wrong_answers)
            .bind(result.final_score)
            .bind(result.time_taken)
            .bind(Json(&result.answers))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert result: {:?}", e);
                AppError::from(e)
            })?;
        Ok(stored)
    }

    async fn find_result(&self, id: i64) -> Result<Option<QuizResult>, AppError> {
        let sql = format!("SELECT {} FROM results WHERE id = $1", RESULT_COLUMNS);
        let result = sqlx::query_as::<_, QuizResult>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(result)
    }

    async fn leaderboard(&self, limit: i64) -> Result<Vec<LeaderboardEntry>, AppError> {
        let entries = sqlx::query_as::<_, LeaderboardEntry>(
            r#"
            SELECT id, user_name, final_score, correct_answers, time_taken, created_at
            FROM results
            ORDER BY final_score DESC, time_taken ASC, created_at ASC, id ASC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }

    async fn results_for_user(&self, user_name: &str) -> Result<Vec<HistoryEntry>, AppError> {
        let entries = sqlx::query_as::<_, HistoryEntry>(
            r#"
            SELECT id, final_score, correct_answers, wrong_answers, time_taken, created_at
            FROM results
            WHERE user_name = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user_name)
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }

    async fn score_samples(&self) -> Result<Vec<ScoreSample>, AppError> {
        let samples = sqlx::query_as::<_, ScoreSample>(
            "SELECT user_name, final_score, time_taken FROM results",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(samples)
    }

    async fn rename_result(
        &self,
        id: i64,
        user_name: &str,
    ) -> Result<Option<QuizResult>, AppError> {
        let sql = format!(
            "UPDATE results SET user_name = $1, updated_at = CURRENT_TIMESTAMP WHERE id = $2 RETURNING {}",
            RESULT_COLUMNS
        );
        let result = sqlx::query_as::<_, QuizResult>(&sql)
            .bind(user_name)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(result)
    }

    async fn delete_result(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM results WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_all_results(&self) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM results")
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn count_results(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM results")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
