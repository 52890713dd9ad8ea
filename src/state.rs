use std::sync::Arc;

use axum::extract::FromRef;

use crate::{
    config::Config,
    quiz::{attempt::AttemptRegistry, bank::QuestionBank},
    store::ResultRecorder,
    utils::auth::AdminSecret,
};

#[derive(Clone)]
pub struct AppState {
    pub recorder: Arc<dyn ResultRecorder>,
    pub bank: Arc<QuestionBank>,
    pub attempts: AttemptRegistry,
    pub admin_secret: AdminSecret,
    pub config: Config,
}

impl FromRef<AppState> for Arc<dyn ResultRecorder> {
    fn from_ref(state: &AppState) -> Self {
        state.recorder.clone()
    }
}

impl FromRef<AppState> for AdminSecret {
    fn from_ref(state: &AppState) -> Self {
        state.admin_secret.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
