//! Wire representations of admin api resources.

use chrono::{DateTime, Utc};
use quill_models::{
    email::{Email, EmailId, EmailStatus},
    post::{Post, PostId},
};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub(crate) struct PostsEnvelope {
    pub posts: Vec<PostResource>,
}

#[derive(Deserialize)]
pub(crate) struct PostResource {
    id: PostId,
    title: Option<String>,
    email_subject: Option<String>,
    updated_at: Option<DateTime<Utc>>,
    email: Option<EmailResource>,
}

impl From<PostResource> for Post {
    fn from(value: PostResource) -> Self {
        Self {
            id: Some(value.id),
            title: value.title.unwrap_or_default(),
            email_subject: value.email_subject,
            updated_at: value.updated_at,
            email: value.email.map(Into::into),
        }
    }
}

#[derive(Serialize)]
pub(crate) struct PostUpdateEnvelope<'a> {
    pub posts: [PostUpdate<'a>; 1],
}

#[derive(Serialize)]
pub(crate) struct PostUpdate<'a> {
    pub email_subject: Option<&'a str>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
pub(crate) struct EmailsEnvelope {
    pub emails: Vec<EmailResource>,
}

#[derive(Deserialize)]
pub(crate) struct EmailResource {
    id: EmailId,
    status: EmailStatus,
    error: Option<String>,
}

impl From<EmailResource> for Email {
    fn from(value: EmailResource) -> Self {
        Self {
            id: value.id,
            status: value.status,
            error: value.error,
        }
    }
}

#[derive(Deserialize)]
pub(crate) struct ErrorsEnvelope {
    pub errors: Vec<ErrorResource>,
}

#[derive(Deserialize)]
pub(crate) struct ErrorResource {
    pub message: Option<String>,
}

impl ErrorsEnvelope {
    /// Extracts the message of the first error from a response body.
    pub fn first_message(body: &[u8]) -> Option<String> {
        serde_json::from_slice::<Self>(body)
            .ok()?
            .errors
            .into_iter()
            .next()?
            .message
            .filter(|message| !message.is_empty())
    }
}
