use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use quill_core_email_panel_contracts::{
    retry::{EmailRetryError, EmailRetryOutcome, EmailRetryService},
    EmailPanelFeatureService, EmailPanelSetEmailSubjectError, SendTestEmailError,
    SendTestEmailResult,
};
use quill_di::Build;
use quill_extern_contracts::{
    email_preview::{EmailPreviewApiService, EmailPreviewSendError},
    post::PostApiService,
};
use quill_models::{
    email_address::EmailAddress,
    post::{Post, PostEmailSubject},
    settings::MailSettings,
};
use quill_utils::trace_instrument;
use tokio::sync::{watch, RwLock};
use tracing::{debug, warn};

pub mod retry;

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, Build)]
pub struct EmailPanelFeatureServiceImpl<PostApi, EmailPreviewApi, EmailRetry> {
    post_api: PostApi,
    email_preview_api: EmailPreviewApi,
    email_retry: EmailRetry,
    config: EmailPanelFeatureConfig,
    #[state]
    state: Arc<State>,
}

#[derive(Debug, Clone)]
pub struct EmailPanelFeatureConfig {
    /// Email address of the signed in user.
    pub session_user_email: Arc<str>,
    /// Current mail settings of the site.
    pub mail_settings: watch::Receiver<MailSettings>,
}

#[derive(Debug, Default)]
struct State {
    test_email_address: RwLock<Option<String>>,
    send_test_email_error: RwLock<String>,
    sending_test_email: AtomicBool,
}

impl<PostApi, EmailPreviewApi, EmailRetry> EmailPanelFeatureService
    for EmailPanelFeatureServiceImpl<PostApi, EmailPreviewApi, EmailRetry>
where
    PostApi: PostApiService,
    EmailPreviewApi: EmailPreviewApiService,
    EmailRetry: EmailRetryService,
{
    async fn test_email_address(&self) -> String {
        match &*self.state.test_email_address.read().await {
            Some(address) => address.clone(),
            None => self.config.session_user_email.to_string(),
        }
    }

    async fn set_test_email_address(&self, address: String) {
        *self.state.test_email_address.write().await = Some(address);
    }

    fn mailgun_is_enabled(&self) -> bool {
        self.config.mail_settings.borrow().mailgun_is_enabled()
    }

    async fn send_test_email_error(&self) -> String {
        self.state.send_test_email_error.read().await.clone()
    }

    #[trace_instrument(skip(self))]
    async fn set_email_subject(
        &self,
        post: &mut Post,
        email_subject: String,
    ) -> Result<(), EmailPanelSetEmailSubjectError> {
        if post.email_subject.as_deref() == Some(email_subject.as_str()) {
            return Ok(());
        }

        let email_subject = post.email_subject.insert(email_subject);
        PostEmailSubject::try_new(email_subject.as_str())
            .map_err(|_| EmailPanelSetEmailSubjectError::InvalidEmailSubject)?;

        if post.is_new() {
            return Ok(());
        }

        let saved = self.post_api.save(post).await?;
        post.updated_at = saved.updated_at;

        Ok(())
    }

    #[trace_instrument(skip(self))]
    async fn send_test_email(&self, post: &Post) -> SendTestEmailResult {
        let Some(_guard) = SendingGuard::acquire(&self.state.sending_test_email) else {
            debug!("A test email is already being sent");
            return SendTestEmailResult::Dropped;
        };

        match self.try_send_test_email(post).await {
            Ok(payload) => SendTestEmailResult::Sent(payload),
            Err(err) => {
                *self.state.send_test_email_error.write().await = err.to_string();
                SendTestEmailResult::Failed(err)
            }
        }
    }

    #[trace_instrument(skip(self))]
    async fn retry_email(
        &self,
        post: &mut Post,
    ) -> Result<EmailRetryOutcome, EmailRetryError> {
        let Some(email) = post.email.as_mut() else {
            return Ok(EmailRetryOutcome::Skipped);
        };

        self.email_retry.retry_and_poll(email).await
    }
}

impl<PostApi, EmailPreviewApi, EmailRetry>
    EmailPanelFeatureServiceImpl<PostApi, EmailPreviewApi, EmailRetry>
where
    PostApi: PostApiService,
    EmailPreviewApi: EmailPreviewApiService,
    EmailRetry: EmailRetryService,
{
    async fn try_send_test_email(
        &self,
        post: &Post,
    ) -> Result<serde_json::Value, SendTestEmailError> {
        let recipient = self
            .test_email_address()
            .await
            .trim()
            .parse::<EmailAddress>()
            .map_err(|_| SendTestEmailError::InvalidEmail)?;

        if !self.mailgun_is_enabled() {
            return Err(SendTestEmailError::MailNotConfigured);
        }

        // there is no preview of posts the backend does not know yet
        let post_id = post
            .id
            .as_ref()
            .ok_or(SendTestEmailError::Send { message: None })?;

        self.state.send_test_email_error.write().await.clear();

        self.email_preview_api
            .send_test_email(post_id, vec![recipient])
            .await
            .map_err(|err| {
                warn!("Failed to send test email: {err:#}");
                match err {
                    EmailPreviewSendError::Rejected { message, .. } => {
                        SendTestEmailError::Send { message }
                    }
                    EmailPreviewSendError::Other(_) => SendTestEmailError::Send { message: None },
                }
            })
    }
}

/// Marks a test email as in flight until dropped.
struct SendingGuard<'a>(&'a AtomicBool);

impl<'a> SendingGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        (!flag.swap(true, Ordering::AcqRel)).then_some(Self(flag))
    }
}

impl Drop for SendingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
