use anyhow::Context;
use quill_di::Build;
use quill_extern_contracts::email::EmailApiService;
use quill_models::email::{Email, EmailId};
use quill_utils::trace_instrument;
use reqwest::Method;

use crate::{
    http::{AdminApiConfig, HttpClient},
    resources::EmailsEnvelope,
};

#[derive(Debug, Clone, Build)]
pub struct EmailApiServiceImpl {
    config: AdminApiConfig,
    http: HttpClient,
}

impl EmailApiService for EmailApiServiceImpl {
    #[trace_instrument(skip(self))]
    async fn get(&self, email_id: &EmailId) -> anyhow::Result<Email> {
        let response = self
            .http
            .admin(&self.config, Method::GET, &format!("emails/{email_id}/"))?
            .send()
            .await
            .context("Failed to send get email request")?;

        first_email(response).await
    }

    #[trace_instrument(skip(self))]
    async fn retry(&self, email_id: &EmailId) -> anyhow::Result<Email> {
        let response = self
            .http
            .admin(&self.config, Method::PUT, &format!("emails/{email_id}/retry/"))?
            .send()
            .await
            .context("Failed to send retry email request")?;

        first_email(response).await
    }
}

async fn first_email(response: reqwest::Response) -> anyhow::Result<Email> {
    response
        .error_for_status()
        .context("Email request returned an error")?
        .json::<EmailsEnvelope>()
        .await
        .context("Failed to deserialize email response")?
        .emails
        .into_iter()
        .next()
        .map(Into::into)
        .context("Email response did not contain an email")
}
