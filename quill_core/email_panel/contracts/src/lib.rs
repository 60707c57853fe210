use std::future::Future;

use quill_models::post::Post;
use retry::{EmailRetryError, EmailRetryOutcome};
use thiserror::Error;

pub mod retry;

/// Message shown when the backend could not send a test email and did not
/// say why.
pub const SEND_TEST_EMAIL_FAILED_MESSAGE: &str = "Email could not be sent, verify mail settings";

/// The email settings panel of the post editor.
///
/// The panel keeps a little state of its own (the test email recipient and
/// the last test email error); everything else is derived from the post and
/// the mail settings whenever it is read.
pub trait EmailPanelFeatureService: Send + Sync + 'static {
    /// Return the address test emails are sent to.
    ///
    /// Follows the signed in user's email address until it is overridden
    /// using [`set_test_email_address`](Self::set_test_email_address).
    fn test_email_address(&self) -> impl Future<Output = String> + Send;

    fn set_test_email_address(&self, address: String) -> impl Future<Output = ()> + Send;

    /// Whether outbound mail is configured.
    fn mailgun_is_enabled(&self) -> bool;

    fn mailgun_error(&self) -> bool {
        !self.mailgun_is_enabled()
    }

    /// Return the message describing why the last test email could not be
    /// sent, or an empty string.
    fn send_test_email_error(&self) -> impl Future<Output = String> + Send;

    /// Update the email subject of a post.
    ///
    /// - Nothing happens if `email_subject` equals the stored subject.
    /// - Otherwise the subject is written into `post` and validated.
    /// - Valid subjects of posts which already exist on the backend are
    ///   saved immediately; new posts are saved together with the rest of
    ///   the editor.
    fn set_email_subject(
        &self,
        post: &mut Post,
        email_subject: String,
    ) -> impl Future<Output = Result<(), EmailPanelSetEmailSubjectError>> + Send;

    /// Send a test version of the post's newsletter to the test email
    /// address.
    ///
    /// Calls made while a test email is already being sent are dropped.
    /// Failures are not returned as errors but recorded in
    /// [`send_test_email_error`](Self::send_test_email_error).
    fn send_test_email(&self, post: &Post) -> impl Future<Output = SendTestEmailResult> + Send;

    /// Resend the post's newsletter if it failed and wait for the outcome.
    fn retry_email(
        &self,
        post: &mut Post,
    ) -> impl Future<Output = Result<EmailRetryOutcome, EmailRetryError>> + Send;

    /// Called when the panel is closed.
    fn close(&self) {}
}

#[derive(Debug, Error)]
pub enum EmailPanelSetEmailSubjectError {
    #[error("Email subject cannot be longer than 300 characters.")]
    InvalidEmailSubject,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SendTestEmailResult {
    /// The backend accepted the test email and responded with this payload.
    Sent(serde_json::Value),
    Failed(SendTestEmailError),
    /// Another test email was still being sent.
    Dropped,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendTestEmailError {
    #[error("Please enter a valid email")]
    InvalidEmail,
    #[error("Please verify your email settings")]
    MailNotConfigured,
    /// `message` is the reason given by the backend, if any.
    #[error("{}", .message.as_deref().unwrap_or(SEND_TEST_EMAIL_FAILED_MESSAGE))]
    Send { message: Option<String> },
}
