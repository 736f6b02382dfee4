// src/openapi.rs

use utoipa::OpenApi;

use crate::{
    handlers::{quiz, system},
    models::{
        question::{Difficulty, PublicQuestion},
        result::{
            AnswerSubmission, HistoryEntry, LeaderboardEntry, Statistics, SubmissionSummary,
            SubmitQuizRequest,
        },
    },
    services::refresh::RefreshReport,
};

/// OpenAPI description of the public quiz and system endpoints.
#[derive(OpenApi)]
#[openapi(
    info(title = "Quiz Competition API"),
    paths(
        quiz::get_questions,
        quiz::submit_quiz,
        quiz::get_leaderboard,
        quiz::get_history,
        quiz::get_statistics,
        system::health,
        system::trigger_refresh,
    ),
    components(schemas(
        Difficulty,
        PublicQuestion,
        AnswerSubmission,
        SubmitQuizRequest,
        SubmissionSummary,
        LeaderboardEntry,
        HistoryEntry,
        Statistics,
        RefreshReport,
    )),
    tags(
        (name = "Quiz", description = "Taking quizzes and reading results"),
        (name = "System", description = "Health and competition reset")
    )
)]
pub struct ApiDoc;
