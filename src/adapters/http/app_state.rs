use std::sync::Arc;

use crate::{
    infra::config::AppConfig,
    use_cases::{session::SessionUseCases, user::UserUseCases},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub user_use_cases: Arc<UserUseCases>,
    pub session_use_cases: Arc<SessionUseCases>,
}
