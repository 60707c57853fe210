use std::future::Future;

use quill_models::{email_address::EmailAddress, post::PostId};
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait EmailPreviewApiService: Send + Sync + 'static {
    /// Send a test version of the post's newsletter to `emails`.
    ///
    /// Returns the JSON payload of the backend's response.
    fn send_test_email(
        &self,
        post_id: &PostId,
        emails: Vec<EmailAddress>,
    ) -> impl Future<Output = Result<serde_json::Value, EmailPreviewSendError>> + Send;
}

#[derive(Debug, Error)]
pub enum EmailPreviewSendError {
    /// The backend answered with an error status. `message` is the first
    /// entry of the `errors` list of the response, if the response had one.
    #[error("The backend rejected the test email ({status}).")]
    Rejected {
        status: u16,
        message: Option<String>,
    },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockEmailPreviewApiService {
    pub fn with_send_test_email(
        mut self,
        post_id: PostId,
        emails: Vec<EmailAddress>,
        result: Result<serde_json::Value, EmailPreviewSendError>,
    ) -> Self {
        self.expect_send_test_email()
            .once()
            .with(
                mockall::predicate::eq(post_id),
                mockall::predicate::eq(emails),
            )
            .return_once(|_, _| Box::pin(std::future::ready(result)));
        self
    }
}
