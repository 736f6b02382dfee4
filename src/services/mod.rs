// src/services/mod.rs

//! Quiz logic on top of a [`QuizStore`](crate::store::QuizStore).
//! Handlers stay thin: they parse the request, call one function here and wrap the answer.

pub mod grader;
pub mod history;
pub mod leaderboard;
pub mod refresh;
pub mod seed;
pub mod selector;
pub mod statistics;
