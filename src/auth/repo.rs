use async_trait::async_trait;
use rand::{rngs::OsRng, RngCore};
use sqlx::PgPool;
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use crate::auth::repo_types::RefreshToken;

/// Random bytes per refresh token (hex-encoded to twice as many chars).
pub const REFRESH_TOKEN_BYTES: usize = 32;

pub fn generate_refresh_token() -> String {
    let mut buf = [0u8; REFRESH_TOKEN_BYTES];
    OsRng.fill_bytes(&mut buf);
    hex::encode(buf)
}

#[async_trait]
pub trait RefreshTokenRepo: Send + Sync {
    async fn insert(&self, token: &RefreshToken) -> anyhow::Result<()>;

    async fn lookup(&self, token: &str) -> anyhow::Result<Option<RefreshToken>>;

    /// Marks the token revoked at `at`. Returns `false` when no active row
    /// matched (unknown or already revoked).
    async fn revoke(&self, token: &str, at: OffsetDateTime) -> anyhow::Result<bool>;
}

/// Generates and persists a new refresh token for `user_id`.
pub async fn create_refresh_token(
    repo: &dyn RefreshTokenRepo,
    user_id: Uuid,
    now: OffsetDateTime,
    ttl: Duration,
) -> anyhow::Result<String> {
    let record = RefreshToken {
        token: generate_refresh_token(),
        user_id,
        created_at: now,
        updated_at: now,
        expires_at: now + ttl,
        revoked_at: None,
    };
    repo.insert(&record).await?;
    Ok(record.token)
}

pub struct PgRefreshTokenRepo {
    db: PgPool,
}

impl PgRefreshTokenRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RefreshTokenRepo for PgRefreshTokenRepo {
    async fn insert(&self, token: &RefreshToken) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO refresh_tokens (token, user_id, created_at, updated_at, expires_at, revoked_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(&token.token)
        .bind(token.user_id)
        .bind(token.created_at)
        .bind(token.updated_at)
        .bind(token.expires_at)
        .bind(token.revoked_at)
        .execute(&self.db)
        .await?;
        Ok(())
    }

    async fn lookup(&self, token: &str) -> anyhow::Result<Option<RefreshToken>> {
        let row = sqlx::query_as::<_, RefreshToken>(
            r#"
            SELECT token, user_id, created_at, updated_at, expires_at, revoked_at
            FROM refresh_tokens
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.db)
        .await?;
        Ok(row)
    }

    async fn revoke(&self, token: &str, at: OffsetDateTime) -> anyhow::Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE refresh_tokens
            SET revoked_at = $2, updated_at = $2
            WHERE token = $1 AND revoked_at IS NULL
            "#,
        )
        .bind(token)
        .bind(at)
        .execute(&self.db)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
