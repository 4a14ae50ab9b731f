/// Database models for tickdone
///
/// This module contains the two account stores and their operations.
///
/// # Models
///
/// - `user`: verified, active user accounts (`users` table)
/// - `pending_user`: not-yet-verified signups awaiting email confirmation
///   (`pending_users` table), subject to a 15-minute expiry
///
/// Both stores treat (email, username) as interchangeable identity keys:
/// a lookup matches when *either* field collides (the OR-match convention),
/// which prevents reuse of an email as someone else's username and vice
/// versa.
///
/// # Example
///
/// ```no_run
/// use tickdone_shared::models::user::User;
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// let user = User::find_by_identifier(&pool, Some("user@example.com"), None).await?;
/// if let Some(u) = user {
///     println!("Found user: {}", u.user_id);
/// }
/// # Ok(())
/// # }
/// ```

pub mod pending_user;
pub mod user;
