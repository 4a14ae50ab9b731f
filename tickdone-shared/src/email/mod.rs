/// Verification email dispatch
///
/// This module defines the contract for sending verification emails and two
/// implementations:
///
/// - [`resend::ResendMailer`]: production dispatch through the Resend HTTP API
/// - [`mock::MockMailer`]: in-memory capture for tests
///
/// Dispatch happens *before* the pending registration is persisted; a
/// delivery failure must abort the registration so no row exists without a
/// mailed token.
///
/// # Example
///
/// ```
/// use tickdone_shared::email::verification_link;
///
/// let link = verification_link("https://api.tickdone.app", "abc123");
/// assert_eq!(link, "https://api.tickdone.app/verify?token=abc123");
/// ```

pub mod mock;
pub mod resend;

pub use mock::MockMailer;
pub use resend::ResendMailer;

use async_trait::async_trait;

/// Error type for email dispatch
#[derive(Debug, thiserror::Error)]
pub enum MailerError {
    /// The provider rejected the message
    #[error("Email provider rejected the message: {0}")]
    Delivery(String),

    /// Could not reach the provider
    #[error("Failed to reach email provider: {0}")]
    Transport(String),
}

/// Contract for sending a verification email
///
/// Implementations must be cheap to share across request handlers; the API
/// server holds one behind an `Arc<dyn VerificationMailer>`.
#[async_trait]
pub trait VerificationMailer: Send + Sync {
    /// Sends the verification message for `token` to `recipient`
    ///
    /// The message must contain the verification link (and the raw token as a
    /// fallback) and mention the 15-minute expiry.
    async fn send_verification(&self, recipient: &str, token: &str) -> Result<(), MailerError>;
}

/// Builds the verification link embedded in the email
///
/// Format: `{base_url}/verify?token={token}`
pub fn verification_link(base_url: &str, token: &str) -> String {
    format!("{}/verify?token={}", base_url.trim_end_matches('/'), token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verification_link_format() {
        let link = verification_link("https://api.example.com", "0a1b2c3d4e5f60718293");
        assert_eq!(
            link,
            "https://api.example.com/verify?token=0a1b2c3d4e5f60718293"
        );
    }

    #[test]
    fn test_verification_link_strips_trailing_slash() {
        let link = verification_link("https://api.example.com/", "tok");
        assert_eq!(link, "https://api.example.com/verify?token=tok");
    }
}
