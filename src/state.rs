// src/state.rs

use std::sync::Arc;

use axum::extract::FromRef;

use crate::{config::Config, store::QuizStore};

/// Shared by every handler. The store handle is built once in `main`.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn QuizStore>,
    pub config: Config,
}

impl AppState {
    pub fn new(store: Arc<dyn QuizStore>, config: Config) -> Self {
        Self { store, config }
    }
}

impl FromRef<AppState> for Arc<dyn QuizStore> {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
