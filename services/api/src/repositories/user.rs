//! User repository for database operations

use async_trait::async_trait;
use common::error::DatabaseResult;
use sqlx::{PgPool, Row};

use super::UserStore;
use crate::models::{ExternalIdentity, User};

/// User repository backed by PostgreSQL
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn ensure_user(&self, identity: &ExternalIdentity) -> DatabaseResult<User> {
        let id = identity.user_id();

        // Concurrent first requests for the same subject race here; the
        // conflict clause makes the loser a no-op.
        sqlx::query(
            r#"
            INSERT INTO users (id, external_id, name, email)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(id)
        .bind(&identity.subject)
        .bind(&identity.name)
        .bind(&identity.email)
        .execute(&self.pool)
        .await?;

        let row = sqlx::query(
            r#"
            SELECT id, external_id, name, email, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(User {
            id: row.try_get("id")?,
            external_id: row.try_get("external_id")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}
