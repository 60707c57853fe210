use std::future::Future;

use quill_models::email::Email;
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait EmailRetryService: Send + Sync + 'static {
    /// Resend a failed email and poll its status until the backend reports
    /// a final outcome or the poll timeout is reached.
    ///
    /// `email` is replaced with the latest state reported by the backend.
    /// Emails which have not failed are left untouched.
    fn retry_and_poll(
        &self,
        email: &mut Email,
    ) -> impl Future<Output = Result<EmailRetryOutcome, EmailRetryError>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailRetryOutcome {
    /// The backend accepted the email for delivery.
    Submitted,
    /// The poll timeout was reached before the backend reported an outcome.
    ///
    /// This still counts as success: the email may be delivered later.
    TimedOut,
    /// There was nothing to retry because the email had not failed.
    Skipped,
}

#[derive(Debug, Error)]
pub enum EmailRetryError {
    /// The backend reported that sending failed again.
    #[error("Email failed to send: {}", .error.as_deref().unwrap_or("unknown error"))]
    Failed { error: Option<String> },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockEmailRetryService {
    /// Expect one retry of `email`, which is then replaced with `result_email`.
    pub fn with_retry_and_poll(
        mut self,
        email: Email,
        result_email: Email,
        result: Result<EmailRetryOutcome, EmailRetryError>,
    ) -> Self {
        self.expect_retry_and_poll()
            .once()
            .with(mockall::predicate::eq(email))
            .return_once(move |email| {
                *email = result_email;
                Box::pin(std::future::ready(result))
            });
        self
    }
}
