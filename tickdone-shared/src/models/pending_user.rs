/// Pending-registration model and database operations
///
/// A pending user is an unverified signup awaiting email confirmation. Rows
/// are created by registration, deleted by verification (on success) or by a
/// later registration attempt (on expiry), and never mutated in place.
///
/// Expiry is enforced at read time by timestamp comparison; there is no
/// background eviction. An expired row simply stops matching and sits in the
/// table until a re-registration overwrites it or a verification attempt
/// rejects it.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE pending_users (
///     pending_id UUID PRIMARY KEY,
///     username TEXT NOT NULL UNIQUE,
///     email TEXT NOT NULL UNIQUE,
///     password_hash TEXT NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     verification_code TEXT NOT NULL
/// );
/// ```
///
/// The per-column UNIQUE constraints serialize two concurrent registrations
/// for the same identifiers: both may pass the existence pre-checks, but only
/// one insert lands; the loser surfaces as a conflict.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

/// Minutes a pending registration (and its token) stays valid
pub const VERIFICATION_TTL_MINUTES: i32 = 15;

/// A not-yet-verified signup awaiting email confirmation
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PendingUser {
    /// Unique pending-registration ID (UUID v7, sortable by creation time)
    pub pending_id: Uuid,

    /// Requested username (unique across pending and active stores)
    pub username: String,

    /// Requested email address (unique across pending and active stores)
    pub email: String,

    /// Peppered bcrypt hash of the requested password
    pub password_hash: String,

    /// When the registration was received; start of the 15-minute window
    pub created_at: DateTime<Utc>,

    /// Single-use verification token mailed to the user
    pub verification_code: String,
}

/// Input for creating a pending registration
#[derive(Debug, Clone)]
pub struct CreatePendingUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub verification_code: String,
}

impl PendingUser {
    /// Whether the 15-minute verification window has elapsed
    ///
    /// Past the window the row is treated as nonexistent: registration is
    /// free to delete and replace it, and verification rejects its token.
    pub fn is_expired(&self) -> bool {
        Utc::now().signed_duration_since(self.created_at)
            >= Duration::minutes(VERIFICATION_TTL_MINUTES as i64)
    }

    /// Inserts a fresh pending registration
    ///
    /// The ID is generated here (UUID v7) and `created_at` is set by the
    /// database. Must only be called after the verification email has been
    /// dispatched; a row without a delivered token is unrecoverable until it
    /// expires.
    ///
    /// # Errors
    ///
    /// A unique-constraint violation means a concurrent registration won the
    /// race for this email or username.
    pub async fn create(pool: &PgPool, data: CreatePendingUser) -> Result<Self, sqlx::Error> {
        let pending = sqlx::query_as::<_, PendingUser>(
            r#"
            INSERT INTO pending_users (pending_id, username, email, password_hash, created_at, verification_code)
            VALUES ($1, $2, $3, $4, NOW(), $5)
            RETURNING pending_id, username, email, password_hash, created_at, verification_code
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(data.username)
        .bind(data.email)
        .bind(data.password_hash)
        .bind(data.verification_code)
        .fetch_one(pool)
        .await?;

        Ok(pending)
    }

    /// Finds a pending registration matching the email OR the username
    ///
    /// Returns the row regardless of expiry; the caller decides whether it is
    /// still fresh via [`PendingUser::is_expired`].
    pub async fn find_by_identifier(
        pool: &PgPool,
        email: &str,
        username: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let pending = sqlx::query_as::<_, PendingUser>(
            r#"
            SELECT pending_id, username, email, password_hash, created_at, verification_code
            FROM pending_users
            WHERE email = $1 OR username = $2
            "#,
        )
        .bind(email)
        .bind(username)
        .fetch_optional(pool)
        .await?;

        Ok(pending)
    }

    /// Deletes stale pending rows matching the email OR the username
    ///
    /// Used by registration when the existing pending record has expired, so
    /// the signup can proceed as fresh.
    ///
    /// # Returns
    ///
    /// Number of rows deleted
    pub async fn delete_by_identifier(
        pool: &PgPool,
        email: &str,
        username: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM pending_users WHERE email = $1 OR username = $2")
            .bind(email)
            .bind(username)
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Atomically consumes the pending row matching an unexpired token
    ///
    /// Deletes and returns the row whose `verification_code` matches and
    /// whose `created_at` is within the validity window. The delete is the
    /// single point of exclusivity for token consumption: a token can be
    /// consumed at most once, even under concurrent verification attempts.
    ///
    /// Runs on any executor; the promotion workflow passes a transaction so
    /// the delete rolls back if the follow-up insert fails.
    ///
    /// # Returns
    ///
    /// `None` if the token is unknown or belongs to an expired row (the
    /// expired row is left in place for lazy cleanup).
    pub async fn take_by_token<'e>(
        executor: impl PgExecutor<'e>,
        token: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let pending = sqlx::query_as::<_, PendingUser>(
            r#"
            DELETE FROM pending_users
            WHERE verification_code = $1
              AND created_at >= NOW() - make_interval(mins => $2)
            RETURNING pending_id, username, email, password_hash, created_at, verification_code
            "#,
        )
        .bind(token)
        .bind(VERIFICATION_TTL_MINUTES)
        .fetch_optional(executor)
        .await?;

        Ok(pending)
    }
}
