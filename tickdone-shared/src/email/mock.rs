/// Mock verification mailer for tests
///
/// Records every send in memory so tests can pull the token out of the
/// "mailbox", and can be flipped into a failing mode to exercise the
/// dispatch-failure path of registration.

use super::{MailerError, VerificationMailer};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// A captured verification email
#[derive(Debug, Clone)]
pub struct SentEmail {
    pub recipient: String,
    pub token: String,
}

/// In-memory mailer that records sends instead of dispatching them
#[derive(Debug, Default)]
pub struct MockMailer {
    sent: Mutex<Vec<SentEmail>>,
    failing: AtomicBool,
}

impl MockMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// When set, every send fails with a delivery error
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// All emails captured so far
    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().expect("mailer mutex poisoned").clone()
    }

    /// Token from the most recent email sent to `recipient`, if any
    pub fn last_token_for(&self, recipient: &str) -> Option<String> {
        self.sent
            .lock()
            .expect("mailer mutex poisoned")
            .iter()
            .rev()
            .find(|e| e.recipient == recipient)
            .map(|e| e.token.clone())
    }
}

#[async_trait]
impl VerificationMailer for MockMailer {
    async fn send_verification(&self, recipient: &str, token: &str) -> Result<(), MailerError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(MailerError::Delivery("mock mailer set to fail".to_string()));
        }

        self.sent.lock().expect("mailer mutex poisoned").push(SentEmail {
            recipient: recipient.to_string(),
            token: token.to_string(),
        });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_records_sends() {
        let mailer = MockMailer::new();

        mailer.send_verification("a@x.com", "token-1").await.unwrap();
        mailer.send_verification("b@x.com", "token-2").await.unwrap();
        mailer.send_verification("a@x.com", "token-3").await.unwrap();

        assert_eq!(mailer.sent().len(), 3);
        assert_eq!(mailer.last_token_for("a@x.com").as_deref(), Some("token-3"));
        assert_eq!(mailer.last_token_for("b@x.com").as_deref(), Some("token-2"));
        assert!(mailer.last_token_for("c@x.com").is_none());
    }

    #[tokio::test]
    async fn test_mock_failure_mode() {
        let mailer = MockMailer::new();
        mailer.set_failing(true);

        let result = mailer.send_verification("a@x.com", "token").await;
        assert!(matches!(result, Err(MailerError::Delivery(_))));
        assert!(mailer.sent().is_empty(), "Failed sends must not be recorded");
    }
}
