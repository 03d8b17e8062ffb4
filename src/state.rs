use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    auth::{
        jwt::JwtKeys,
        password::CredentialHasher,
        repo::{PgRefreshTokenRepo, RefreshTokenRepo},
    },
    chirps::repo::{ChirpRepo, PgChirpRepo},
    clock::{Clock, SystemClock},
    config::AppConfig,
    db,
    metrics::HitCounter,
    users::repo::{PgUserRepo, UserRepo},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub keys: JwtKeys,
    pub hasher: CredentialHasher,
    pub users: Arc<dyn UserRepo>,
    pub refresh_tokens: Arc<dyn RefreshTokenRepo>,
    pub chirps: Arc<dyn ChirpRepo>,
    pub clock: Arc<dyn Clock>,
    pub hits: Arc<HitCounter>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = AppConfig::from_env()?;
        let db = db::connect(&config.database_url).await?;
        db::run_migrations(&db).await;
        Self::from_parts(config, db)
    }

    /// Wires the PostgreSQL repositories and the system clock.
    pub fn from_parts(config: AppConfig, db: PgPool) -> anyhow::Result<Self> {
        Self::with_repos(
            config,
            Arc::new(PgUserRepo::new(db.clone())),
            Arc::new(PgRefreshTokenRepo::new(db.clone())),
            Arc::new(PgChirpRepo::new(db)),
            Arc::new(SystemClock),
        )
    }

    pub fn with_repos(
        config: AppConfig,
        users: Arc<dyn UserRepo>,
        refresh_tokens: Arc<dyn RefreshTokenRepo>,
        chirps: Arc<dyn ChirpRepo>,
        clock: Arc<dyn Clock>,
    ) -> anyhow::Result<Self> {
        let keys = JwtKeys::new(&config.jwt);
        let hasher = CredentialHasher::new(config.hashing)?;
        Ok(Self {
            config: Arc::new(config),
            keys,
            hasher,
            users,
            refresh_tokens,
            chirps,
            clock,
            hits: Arc::new(HitCounter::new()),
        })
    }

    pub fn now(&self) -> time::OffsetDateTime {
        self.clock.now()
    }
}
