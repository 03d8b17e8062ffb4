use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::chirps::repo_types::Chirp;

#[async_trait]
pub trait ChirpRepo: Send + Sync {
    async fn create(&self, user_id: Uuid, body: &str) -> anyhow::Result<Chirp>;

    /// All chirps, oldest first.
    async fn list(&self) -> anyhow::Result<Vec<Chirp>>;

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Chirp>>;
}

pub struct PgChirpRepo {
    db: PgPool,
}

impl PgChirpRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ChirpRepo for PgChirpRepo {
    async fn create(&self, user_id: Uuid, body: &str) -> anyhow::Result<Chirp> {
        let chirp = sqlx::query_as::<_, Chirp>(
            r#"
            INSERT INTO chirps (body, user_id)
            VALUES ($1, $2)
            RETURNING id, created_at, updated_at, body, user_id
            "#,
        )
        .bind(body)
        .bind(user_id)
        .fetch_one(&self.db)
        .await?;
        Ok(chirp)
    }

    async fn list(&self) -> anyhow::Result<Vec<Chirp>> {
        let rows = sqlx::query_as::<_, Chirp>(
            r#"
            SELECT id, created_at, updated_at, body, user_id
            FROM chirps
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Chirp>> {
        let chirp = sqlx::query_as::<_, Chirp>(
            r#"
            SELECT id, created_at, updated_at, body, user_id
            FROM chirps
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(chirp)
    }
}
