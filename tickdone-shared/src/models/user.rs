/// Active-user model and database operations
///
/// An active user is an email-verified account. Rows are created exactly once
/// by the verification workflow, which promotes a pending registration inside
/// a transaction; within this service they are immutable afterwards.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     user_id UUID PRIMARY KEY,
///     email TEXT NOT NULL,
///     username TEXT NOT NULL,
///     password_hash TEXT NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     UNIQUE (email, username)
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use tickdone_shared::models::user::User;
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// // Login accepts either identifier
/// let user = User::find_by_identifier(&pool, None, Some("alice")).await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

/// A verified user account
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID v7)
    pub user_id: Uuid,

    /// Email address
    pub email: String,

    /// Username
    pub username: String,

    /// Peppered bcrypt hash, carried over from the pending registration
    ///
    /// Never store plaintext passwords!
    pub password_hash: String,

    /// When the account was activated (promotion time, not signup time)
    pub created_at: DateTime<Utc>,
}

/// Input for promoting a pending registration into an active user
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub email: String,
    pub username: String,
    pub password_hash: String,
}

impl User {
    /// Finds a user where the email OR the username matches
    ///
    /// Either argument may be absent (login supplies one identifier); an
    /// absent side never matches. Registration passes both to enforce the
    /// deliberately loose OR-match uniqueness across the two fields.
    pub async fn find_by_identifier(
        pool: &PgPool,
        email: Option<&str>,
        username: Option<&str>,
    ) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, email, username, password_hash, created_at
            FROM users
            WHERE email = $1 OR username = $2
            "#,
        )
        .bind(email)
        .bind(username)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Inserts an active user unless the (email, username) pair already exists
    ///
    /// `ON CONFLICT DO NOTHING` makes the insert a no-op when a matching
    /// account is already active, which lets the promotion transaction commit
    /// the pending-row delete while reporting "already verified" instead of
    /// failing. Runs on any executor; the verification workflow passes its
    /// transaction.
    ///
    /// # Returns
    ///
    /// The new user ID, or `None` if the insert affected zero rows.
    pub async fn insert_if_absent<'e>(
        executor: impl PgExecutor<'e>,
        data: CreateUser,
    ) -> Result<Option<Uuid>, sqlx::Error> {
        let user_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO users (user_id, email, username, password_hash, created_at)
            VALUES ($1, $2, $3, $4, NOW())
            ON CONFLICT (email, username) DO NOTHING
            RETURNING user_id
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(data.email)
        .bind(data.username)
        .bind(data.password_hash)
        .fetch_optional(executor)
        .await?;

        Ok(user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_struct() {
        let create_user = CreateUser {
            email: "test@example.com".to_string(),
            username: "test".to_string(),
            password_hash: "hash".to_string(),
        };

        assert_eq!(create_user.email, "test@example.com");
        assert_eq!(create_user.username, "test");
    }

    // Store operations require a running database; they are exercised by the
    // API integration tests in tickdone-api/tests/auth_flow_tests.rs
}
