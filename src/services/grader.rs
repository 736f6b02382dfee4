// src/services/grader.rs

use std::collections::{HashMap, HashSet};

use validator::Validate;

use crate::{
    error::AppError,
    models::result::{
        AnswerSubmission, GradedAnswer, NewResult, SubmissionSummary, SubmitQuizRequest,
    },
    store::QuizStore,
};

/// Marker for an unanswered question.
pub const UNANSWERED: i16 = -1;

/// Percentage score rounded half-up, in integer arithmetic.
/// Returns (correct * 100 / total) rounded, or 0 for an empty quiz.
pub fn calculate_score(correct: usize, total: usize) -> i32 {
    if total == 0 {
        return 0;
    }
    ((correct * 100 * 2 + total) / (total * 2)) as i32
}

/// Marks each answer against the answer key (question id -> correct option index).
/// Answers whose question is missing from the key are marked incorrect.
pub fn grade_answers(answers: &[AnswerSubmission], key: &HashMap<i64, i16>) -> Vec<GradedAnswer> {
    answers
        .iter()
        .map(|answer| {
            let is_correct = answer.selected_option != UNANSWERED
                && key.get(&answer.question_id) == Some(&answer.selected_option);
            GradedAnswer {
                question_id: answer.question_id,
                selected_option: answer.selected_option,
                is_correct,
            }
        })
        .collect()
}

/// Grades a submission against the stored questions and persists the result.
///
/// * Rejects blank user names, a wrong answer count, duplicate or unknown question ids.
/// * Correctness always comes from the store, never from the client.
/// * Returns the aggregate only, the answer key stays on the server.
pub async fn grade_submission(
    store: &dyn QuizStore,
    request: SubmitQuizRequest,
    question_count: usize,
) -> Result<SubmissionSummary, AppError> {
    request.validate()?;

    let user_name = request.user_name.trim().to_string();
    if user_name.is_empty() {
        return Err(AppError::InvalidSubmission(
            "User name is required and must be a non-empty string".to_string(),
        ));
    }

    if request.answers.len() != question_count {
        return Err(AppError::InvalidSubmission(format!(
            "Quiz must have exactly {} answers",
            question_count
        )));
    }

    let question_ids: Vec<i64> = request.answers.iter().map(|a| a.question_id).collect();
    let distinct: HashSet<i64> = question_ids.iter().copied().collect();
    if distinct.len() != question_ids.len() {
        return Err(AppError::InvalidSubmission(
            "Each question may only be answered once".to_string(),
        ));
    }

    let questions = store.find_questions_by_ids(&question_ids).await?;
    if questions.len() != question_count {
        return Err(AppError::InvalidSubmission(
            "Invalid question IDs provided".to_string(),
        ));
    }

    let key: HashMap<i64, i16> = questions
        .into_iter()
        .map(|q| (q.id, q.correct_answer))
        .collect();

    let graded = grade_answers(&request.answers, &key);
    let correct_count = graded.iter().filter(|a| a.is_correct).count();
    let total = question_count as i32;
    let correct = correct_count as i32;
    let time_taken = request.time_taken.unwrap_or(0);

    let stored = store
        .insert_result(&NewResult {
            user_name,
            total_questions: total,
            correct_answers: correct,
            wrong_answers: total - correct,
            final_score: calculate_score(correct_count, question_count),
            time_taken,
            answers: graded,
        })
        .await?;

    tracing::info!(
        "Graded submission {} for '{}': {}/{} correct, score {}",
        stored.id,
        stored.user_name,
        stored.correct_answers,
        stored.total_questions,
        stored.final_score
    );

    Ok(SubmissionSummary {
        total_questions: stored.total_questions,
        correct_answers: stored.correct_answers,
        wrong_answers: stored.wrong_answers,
        final_score: stored.final_score,
        time_taken: stored.time_taken,
        result_id: stored.id,
    })
}
