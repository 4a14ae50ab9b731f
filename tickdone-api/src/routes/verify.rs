/// Email verification endpoint
///
/// # Endpoint
///
/// ```text
/// GET /verify?token={token}
/// ```
///
/// Target of the link mailed at registration. Promotes the pending
/// registration matching the token into an active user.
///
/// # Atomicity
///
/// The whole promotion runs in one transaction, and the delete of the
/// pending row is the single point of exclusivity: whichever request deletes
/// the row owns the token, so a token is consumable at most once even under
/// concurrent attempts. If anything fails after the delete, the transaction
/// rolls back (dropped without commit) and the pending row plus token remain
/// usable for a retry.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tickdone_shared::models::{
    pending_user::PendingUser,
    user::{CreateUser, User},
};
use tracing::{info, warn};

/// Query parameters for the verification link
#[derive(Debug, Deserialize)]
pub struct VerifyParams {
    pub token: Option<String>,
}

/// Verification response
#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub message: String,
}

/// Verification handler
///
/// # Errors
///
/// - `400 Bad Request`: token missing, unknown, or expired (an expired row
///   stays in the store; cleanup is lazy)
/// - `409 Conflict`: an active user with this identity already exists; the
///   pending row is still consumed and the transaction commits
/// - `500 Internal Server Error`: store failure; nothing is consumed
pub async fn verify(
    State(state): State<AppState>,
    Query(params): Query<VerifyParams>,
) -> ApiResult<Json<VerifyResponse>> {
    let token = params
        .token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Verification token is required.".to_string()))?;

    let mut tx = state.db.begin().await?;

    // Delete-and-return is the exclusivity point: no row means the token is
    // wrong, already consumed, or past its 15-minute window
    let Some(pending) = PendingUser::take_by_token(&mut *tx, &token).await? else {
        warn!("Invalid or expired verification token presented");
        return Err(ApiError::BadRequest(
            "Invalid or expired verification token.".to_string(),
        ));
    };

    let inserted = User::insert_if_absent(
        &mut *tx,
        CreateUser {
            email: pending.email,
            username: pending.username,
            password_hash: pending.password_hash,
        },
    )
    .await?;

    match inserted {
        Some(user_id) => {
            tx.commit().await?;
            info!(%user_id, pending_id = %pending.pending_id, "User verified successfully");
            Ok(Json(VerifyResponse {
                message: "User verified successfully.".to_string(),
            }))
        }
        None => {
            // The insert was a no-op against an existing active account.
            // Commit anyway so the consumed pending row stays deleted.
            tx.commit().await?;
            warn!(pending_id = %pending.pending_id, "Pending registration raced an existing active user");
            Err(ApiError::Conflict("User is already verified.".to_string()))
        }
    }
}
