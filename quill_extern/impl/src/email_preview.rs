use anyhow::Context;
use quill_di::Build;
use quill_extern_contracts::email_preview::{EmailPreviewApiService, EmailPreviewSendError};
use quill_models::{email_address::EmailAddress, post::PostId};
use quill_utils::trace_instrument;
use reqwest::Method;
use serde::Serialize;
use tracing::warn;

use crate::{
    http::{AdminApiConfig, HttpClient},
    resources::ErrorsEnvelope,
};

#[derive(Debug, Clone, Build)]
pub struct EmailPreviewApiServiceImpl {
    config: AdminApiConfig,
    http: HttpClient,
}

impl EmailPreviewApiService for EmailPreviewApiServiceImpl {
    #[trace_instrument(skip(self))]
    async fn send_test_email(
        &self,
        post_id: &PostId,
        emails: Vec<EmailAddress>,
    ) -> Result<serde_json::Value, EmailPreviewSendError> {
        let response = self
            .http
            .admin(
                &self.config,
                Method::POST,
                &format!("email_preview/posts/{post_id}/"),
            )?
            .json(&SendTestEmailRequest { emails: &emails })
            .send()
            .await
            .context("Failed to send test email request")?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .bytes()
                .await
                .context("Failed to read test email error response")?;
            let message = ErrorsEnvelope::first_message(&body);
            warn!(%status, ?message, "Backend rejected test email");
            return Err(EmailPreviewSendError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .context("Failed to deserialize test email response")
            .map_err(Into::into)
    }
}

#[derive(Serialize)]
struct SendTestEmailRequest<'a> {
    emails: &'a [EmailAddress],
}
