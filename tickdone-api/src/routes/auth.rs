/// Registration and login endpoints
///
/// # Endpoints
///
/// - `POST /v1/auth/register` - Start a registration; the account stays
///   pending until the mailed token is presented at `/verify`
/// - `POST /v1/auth/login` - Authenticate an active user by email or username
///
/// Registration is deliberately *not* wrapped in one transaction: the
/// existence checks, email dispatch, and pending insert run as separate
/// statements, and the pending-table unique constraints serialize the race
/// between two concurrent signups for the same identifiers (the loser gets a
/// 409 from the constraint violation).

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tickdone_shared::{
    auth::{password, token},
    email::verification_link,
    models::{
        pending_user::{CreatePendingUser, PendingUser},
        user::User,
    },
};
use tracing::{debug, info, warn};
use uuid::Uuid;
use validator::ValidateEmail;

/// Register request
///
/// Fields are optional so a missing field produces our 400 message instead
/// of a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Register response
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub message: String,
}

/// Login request
///
/// Either `email` or `username` may be supplied; the lookup treats the two
/// as interchangeable identity keys.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,

    /// Authenticated user's ID
    pub user_id: Uuid,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Register a new user
///
/// Creates a *pending* registration and mails a single-use verification
/// token. The account becomes active only after the token is presented at
/// `/verify` within 15 minutes.
///
/// # Policy
///
/// 1. 400 if email, username, or password is missing, or the email is
///    malformed.
/// 2. 409 if the email OR the username is already taken by an active user.
/// 3. 409 if a pending registration for either identifier is still within
///    its 15-minute window; an expired one is deleted and the signup
///    proceeds as fresh.
/// 4. The verification email is dispatched *before* the pending row is
///    inserted, so a dispatch failure leaves no orphaned row. The inverse
///    risk (delivered but unrecorded on a late insert failure) is accepted;
///    the user can re-register once the window lapses.
///
/// # Errors
///
/// - `400 Bad Request`: missing fields or malformed email
/// - `409 Conflict`: duplicate active account or fresh pending registration
/// - `500 Internal Server Error`: store or email provider failure
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    let (email, username, password) = match (
        non_empty(req.email),
        non_empty(req.username),
        non_empty(req.password),
    ) {
        (Some(email), Some(username), Some(password)) => (email, username, password),
        _ => {
            warn!("Registration rejected: missing required fields");
            return Err(ApiError::BadRequest(
                "Email, password, and username are required".to_string(),
            ));
        }
    };

    if !email.validate_email() {
        return Err(ApiError::BadRequest("Invalid email format".to_string()));
    }

    // Active accounts claim both identity keys
    if User::find_by_identifier(&state.db, Some(&email), Some(&username))
        .await?
        .is_some()
    {
        warn!(%email, %username, "Registration conflicts with an active user");
        return Err(ApiError::Conflict(
            "Email or username already exists. Try logging in.".to_string(),
        ));
    }

    // A fresh pending registration blocks re-registration; a stale one is
    // swept here (lazy cleanup, no background eviction)
    if let Some(pending) = PendingUser::find_by_identifier(&state.db, &email, &username).await? {
        if !pending.is_expired() {
            warn!(%email, %username, "Registration already pending verification");
            return Err(ApiError::Conflict(
                "Account is already pending verification. Check your email.".to_string(),
            ));
        }

        let removed = PendingUser::delete_by_identifier(&state.db, &email, &username).await?;
        debug!(removed, %email, %username, "Deleted expired pending registration");
    }

    let password_hash = password::hash_password(&password, state.pepper())?;
    let verification_code = token::issue_token();

    // Mail first: a pending row must never exist without a delivered token
    state
        .mailer
        .send_verification(&email, &verification_code)
        .await?;
    debug!(
        link = %verification_link(&state.config.email.public_api_url, &verification_code),
        "Verification email dispatched"
    );

    let pending = PendingUser::create(
        &state.db,
        CreatePendingUser {
            username,
            email,
            password_hash,
            verification_code,
        },
    )
    .await?;

    info!(pending_id = %pending.pending_id, "Registration accepted, awaiting verification");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            success: true,
            message: "Registration received. Verification email will be sent shortly.".to_string(),
        }),
    ))
}

/// Login endpoint
///
/// Authenticates an active user by email OR username. A missing account and
/// a wrong password return the identical 401 payload so the response leaks
/// nothing about account existence.
///
/// # Errors
///
/// - `400 Bad Request`: no identifier or no password supplied
/// - `401 Unauthorized`: invalid credentials
/// - `500 Internal Server Error`: store failure
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let email = non_empty(req.email);
    let username = non_empty(req.username);

    let Some(password) = non_empty(req.password) else {
        return Err(ApiError::BadRequest(
            "Email or username and password are required".to_string(),
        ));
    };
    if email.is_none() && username.is_none() {
        return Err(ApiError::BadRequest(
            "Email or username and password are required".to_string(),
        ));
    }

    let user = User::find_by_identifier(&state.db, email.as_deref(), username.as_deref())
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid credentials".to_string()))?;

    let valid = password::verify_password(&password, state.pepper(), &user.password_hash)?;
    if !valid {
        return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
    }

    info!(user_id = %user.user_id, "Login successful");

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        user_id: user.user_id,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty_filters_blank_strings() {
        assert_eq!(non_empty(Some("alice".to_string())).as_deref(), Some("alice"));
        assert_eq!(non_empty(Some(String::new())), None);
        assert_eq!(non_empty(None), None);
    }

    #[test]
    fn test_register_request_tolerates_missing_fields() {
        let req: RegisterRequest = serde_json::from_str(r#"{"email": "a@x.com"}"#).unwrap();
        assert_eq!(req.email.as_deref(), Some("a@x.com"));
        assert!(req.username.is_none());
        assert!(req.password.is_none());
    }

    #[test]
    fn test_login_request_accepts_either_identifier() {
        let by_email: LoginRequest =
            serde_json::from_str(r#"{"email": "a@x.com", "password": "pw"}"#).unwrap();
        assert!(by_email.email.is_some());
        assert!(by_email.username.is_none());

        let by_username: LoginRequest =
            serde_json::from_str(r#"{"username": "alice", "password": "pw"}"#).unwrap();
        assert!(by_username.email.is_none());
        assert!(by_username.username.is_some());
    }
}
