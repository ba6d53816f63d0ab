use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::AppConfig;
use crate::profiles::repo::PgProfileRepository;
use crate::profiles::services::ProfileService;
use crate::users::repo::PgUserRepository;
use crate::users::services::UserService;

/// Composition root: the shared pool plus loaded configuration.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = Arc::new(AppConfig::from_env()?);

        let db = PgPoolOptions::new()
            .max_connections(config.db.max_connections)
            .acquire_timeout(Duration::from_secs(config.db.acquire_timeout_secs))
            .connect(&config.db.url)
            .await
            .context("connect to database")?;

        // Run migrations if present
        if let Err(e) = sqlx::migrate!("./migrations").run(&db).await {
            tracing::warn!(error = %e, "migration failed; continuing");
        }

        Ok(Self { db, config })
    }

    pub fn from_parts(db: PgPool, config: Arc<AppConfig>) -> Self {
        Self { db, config }
    }

    /// User service wired to the Postgres repository.
    pub fn user_service(&self) -> UserService {
        UserService::new(Arc::new(PgUserRepository::new(self.db.clone())))
    }

    /// Profile service wired to the Postgres repository.
    pub fn profile_service(&self) -> ProfileService {
        ProfileService::new(Arc::new(PgProfileRepository::new(self.db.clone())))
    }
}
