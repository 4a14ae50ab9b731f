/// Resend-backed verification mailer
///
/// Sends verification emails through the Resend HTTP API
/// (`POST https://api.resend.com/emails`) with a bearer API key.
///
/// # Example
///
/// ```no_run
/// use tickdone_shared::email::{ResendMailer, VerificationMailer};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mailer = ResendMailer::new(
///     "re_123".to_string(),
///     "https://api.tickdone.app".to_string(),
///     "onboarding@resend.dev".to_string(),
/// );
///
/// mailer.send_verification("user@example.com", "0a1b2c3d4e5f60718293").await?;
/// # Ok(())
/// # }
/// ```

use super::{verification_link, MailerError, VerificationMailer};
use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, warn};

const RESEND_ENDPOINT: &str = "https://api.resend.com/emails";

/// Verification mailer backed by the Resend API
#[derive(Debug, Clone)]
pub struct ResendMailer {
    http: reqwest::Client,
    api_key: String,

    /// Base URL of this deployment, used to build verification links
    base_url: String,

    /// Sender address (must be a verified Resend sender)
    from: String,
}

/// Resend `POST /emails` request body
#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: String,
}

impl ResendMailer {
    /// Creates a mailer with a fresh HTTP client
    pub fn new(api_key: String, base_url: String, from: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            base_url,
            from,
        }
    }

    fn render_html(&self, token: &str) -> String {
        let link = verification_link(&self.base_url, token);
        format!(
            r#"<div style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
  <h1>Welcome to Tickdone!</h1>
  <p>Thank you for signing up! Please click the button below to verify your email address:</p>
  <a href="{link}"><button style="background-color: #4CAF50; color: white; padding: 10px 20px; border: none; border-radius: 5px;">Verify Email</button></a>
  <p>If the button does not work, you can paste this token into the verification page:</p>
  <p style="font-weight: bold; background-color: #f4f4f4; padding: 10px;">{token}</p>
  <p>This link expires in 15 minutes. If you did not sign up for Tickdone, please ignore this email.</p>
</div>"#
        )
    }
}

#[async_trait]
impl VerificationMailer for ResendMailer {
    async fn send_verification(&self, recipient: &str, token: &str) -> Result<(), MailerError> {
        debug!(recipient, "Sending verification email via Resend");

        let body = SendEmailRequest {
            from: &self.from,
            to: [recipient],
            subject: "Verify Your Email Address",
            html: self.render_html(token),
        };

        let response = self
            .http
            .post(RESEND_ENDPOINT)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| MailerError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            warn!(%status, %detail, "Resend rejected verification email");
            return Err(MailerError::Delivery(format!(
                "Resend returned {}: {}",
                status, detail
            )));
        }

        debug!(recipient, "Verification email accepted by Resend");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_contains_link_and_token() {
        let mailer = ResendMailer::new(
            "re_test".to_string(),
            "https://api.example.com".to_string(),
            "onboarding@resend.dev".to_string(),
        );

        let html = mailer.render_html("0a1b2c3d4e5f60718293");
        assert!(html.contains("https://api.example.com/verify?token=0a1b2c3d4e5f60718293"));
        assert!(html.contains("expires in 15 minutes"));
    }
}
