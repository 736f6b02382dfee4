// src/models/question.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{prelude::FromRow, types::Json};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::AppError;

/// Number of options every question carries.
pub const OPTION_COUNT: usize = 4;

pub const DEFAULT_CATEGORY: &str = "General Knowledge";

/// Mapped to the Postgres enum type `difficulty`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "difficulty")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// Represents the 'questions' table in the database.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: i64,

    pub question_text: String,

    /// Always four entries. Stored as a JSON array in the database.
    pub options: Json<Vec<String>>,

    /// Index (0-3) of the correct option.
    pub correct_answer: i16,

    pub category: String,

    pub difficulty: Difficulty,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

/// DTO for sending a question to the client (no correct answer).
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicQuestion {
    pub id: i64,
    /// 1-based position in the quiz.
    pub question_number: usize,
    pub question_text: String,
    pub options: Vec<String>,
    pub category: String,
    pub difficulty: Difficulty,
}

impl PublicQuestion {
    pub fn from_question(question: Question, question_number: usize) -> Self {
        Self {
            id: question.id,
            question_number,
            question_text: question.question_text,
            options: question.options.0,
            category: question.category,
            difficulty: question.difficulty,
        }
    }
}

/// A correct answer as it arrives from seed data or the admin API:
/// either the option index or the literal option text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum AnswerKey {
    Index(i64),
    Text(String),
}

impl AnswerKey {
    /// Canonicalises the key to an option index.
    pub fn resolve(&self, options: &[String]) -> Result<i16, AppError> {
        match self {
            AnswerKey::Index(index) => {
                if (0..options.len() as i64).contains(index) {
                    Ok(*index as i16)
                } else {
                    Err(AppError::Validation(format!(
                        "Correct answer must be a number between 0 and {}",
                        options.len().saturating_sub(1)
                    )))
                }
            }
            AnswerKey::Text(text) => options
                .iter()
                .position(|option| option == text.trim())
                .map(|index| index as i16)
                .ok_or_else(|| {
                    AppError::Validation(format!(
                        "Correct answer '{}' does not match any option",
                        text
                    ))
                }),
        }
    }
}

/// A validated question ready to be written by a store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewQuestion {
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_answer: i16,
    pub category: String,
    pub difficulty: Difficulty,
}

/// DTO for creating a new question.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuestionRequest {
    #[validate(length(min = 1, max = 1000))]
    pub question_text: String,
    #[validate(custom(function = validate_options))]
    pub options: Vec<String>,
    pub correct_answer: AnswerKey,
    #[validate(length(max = 100))]
    pub category: Option<String>,
    pub difficulty: Option<Difficulty>,
}

impl CreateQuestionRequest {
    /// Validates and trims the payload and resolves the answer key.
    /// Text is stored as given; escaping belongs to whoever renders it.
    pub fn into_new_question(self) -> Result<NewQuestion, AppError> {
        self.validate()?;

        let question_text = self.question_text.trim().to_string();
        if question_text.is_empty() {
            return Err(AppError::Validation(
                "Question text is required and must be a non-empty string".to_string(),
            ));
        }

        let options: Vec<String> = self
            .options
            .iter()
            .map(|option| option.trim().to_string())
            .collect();
        if let Some(position) = options.iter().position(|option| option.is_empty()) {
            return Err(AppError::Validation(format!(
                "Option {} must be a non-empty string",
                position + 1
            )));
        }
        // A text answer key must point at exactly one option.
        if let Some(position) = (1..options.len()).find(|&i| options[..i].contains(&options[i])) {
            return Err(AppError::Validation(format!(
                "Option {} duplicates an earlier option",
                position + 1
            )));
        }

        let correct_answer = self.correct_answer.resolve(&options)?;

        let category = self
            .category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

        Ok(NewQuestion {
            question_text,
            options,
            correct_answer,
            category,
            difficulty: self.difficulty.unwrap_or_default(),
        })
    }
}

/// DTO for updating a question. Fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuestionRequest {
    pub question_text: Option<String>,
    pub options: Option<Vec<String>>,
    pub correct_answer: Option<AnswerKey>,
    pub category: Option<String>,
    pub difficulty: Option<Difficulty>,
}

impl UpdateQuestionRequest {
    pub fn is_empty(&self) -> bool {
        self.question_text.is_none()
            && self.options.is_none()
            && self.correct_answer.is_none()
            && self.category.is_none()
            && self.difficulty.is_none()
    }

    /// Applies the changes on top of an existing question and re-validates the whole record,
    /// so a new answer key is always resolved against the options it will be stored with.
    pub fn merge_into(self, current: &Question) -> Result<NewQuestion, AppError> {
        let correct_answer = self
            .correct_answer
            .unwrap_or(AnswerKey::Index(i64::from(current.correct_answer)));

        CreateQuestionRequest {
            question_text: self
                .question_text
                .unwrap_or_else(|| current.question_text.clone()),
            options: self.options.unwrap_or_else(|| current.options.0.clone()),
            correct_answer,
            category: Some(self.category.unwrap_or_else(|| current.category.clone())),
            difficulty: Some(self.difficulty.unwrap_or(current.difficulty)),
        }
        .into_new_question()
    }
}

fn validate_options(options: &[String]) -> Result<(), validator::ValidationError> {
    if options.len() != OPTION_COUNT {
        return Err(validator::ValidationError::new("options_must_have_four_entries"));
    }
    for opt in options {
        if opt.len() > 500 {
            return Err(validator::ValidationError::new("option_too_long"));
        }
    }
    Ok(())
}
