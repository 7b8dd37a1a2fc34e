use crate::infrastructure::database::Database;
use crate::modules::user::{self, UserNotFound, UserRepositoryImpl, UserService};
use axum::Router;
use restfault::{ExceptionLayer, ExceptionTranslator, TranslatorConfig};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserService>,
}

impl AppState {
    /// State backed by a fresh in-memory database holding the sample users
    pub async fn seeded() -> anyhow::Result<Self> {
        let repository = Arc::new(UserRepositoryImpl::new(Database::new()));
        let users = UserService::seeded(repository).await?;
        Ok(Self {
            users: Arc::new(users),
        })
    }
}

pub fn translator(config: TranslatorConfig) -> ExceptionTranslator {
    ExceptionTranslator::builder()
        .not_found::<UserNotFound>()
        .config(config)
        .build()
}

pub fn router(state: AppState, translator: ExceptionTranslator) -> Router {
    user::controller::routes()
        .with_state(state)
        .layer(ExceptionLayer::new(translator))
        .layer(TraceLayer::new_for_http())
}
