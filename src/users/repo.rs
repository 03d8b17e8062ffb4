use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::users::repo_types::User;

/// Result of a write that may collide with another user's email.
#[derive(Debug)]
pub enum UserWrite {
    Saved(User),
    EmailTaken,
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(e) if e.is_unique_violation())
}

#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn get_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;

    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>>;

    async fn create(&self, email: &str, hashed_password: &str) -> anyhow::Result<UserWrite>;

    /// `None` when no user has this id.
    async fn update(
        &self,
        id: Uuid,
        email: &str,
        hashed_password: &str,
    ) -> anyhow::Result<Option<UserWrite>>;

    /// Returns whether the user exists.
    async fn set_chirpy_red(&self, id: Uuid, is_chirpy_red: bool) -> anyhow::Result<bool>;

    async fn delete_all(&self) -> anyhow::Result<u64>;
}

pub struct PgUserRepo {
    db: PgPool,
}

impl PgUserRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepo for PgUserRepo {
    async fn get_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, created_at, updated_at, email, hashed_password, is_chirpy_red
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, created_at, updated_at, email, hashed_password, is_chirpy_red
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn create(&self, email: &str, hashed_password: &str) -> anyhow::Result<UserWrite> {
        let result = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, hashed_password)
            VALUES ($1, $2)
            RETURNING id, created_at, updated_at, email, hashed_password, is_chirpy_red
            "#,
        )
        .bind(email)
        .bind(hashed_password)
        .fetch_one(&self.db)
        .await;
        match result {
            Ok(user) => Ok(UserWrite::Saved(user)),
            Err(e) if is_unique_violation(&e) => Ok(UserWrite::EmailTaken),
            Err(e) => Err(e.into()),
        }
    }

    async fn update(
        &self,
        id: Uuid,
        email: &str,
        hashed_password: &str,
    ) -> anyhow::Result<Option<UserWrite>> {
        let result = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET email = $2, hashed_password = $3, updated_at = now()
            WHERE id = $1
            RETURNING id, created_at, updated_at, email, hashed_password, is_chirpy_red
            "#,
        )
        .bind(id)
        .bind(email)
        .bind(hashed_password)
        .fetch_optional(&self.db)
        .await;
        match result {
            Ok(user) => Ok(user.map(UserWrite::Saved)),
            Err(e) if is_unique_violation(&e) => Ok(Some(UserWrite::EmailTaken)),
            Err(e) => Err(e.into()),
        }
    }

    async fn set_chirpy_red(&self, id: Uuid, is_chirpy_red: bool) -> anyhow::Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET is_chirpy_red = $2, updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(is_chirpy_red)
        .execute(&self.db)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_all(&self) -> anyhow::Result<u64> {
        let result = sqlx::query("DELETE FROM users").execute(&self.db).await?;
        Ok(result.rows_affected())
    }
}
