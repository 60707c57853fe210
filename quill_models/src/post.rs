use chrono::{DateTime, Utc};
use nutype::nutype;

use crate::{email::Email, macros::object_id, OBJECT_ID_REGEX};

object_id!(
    /// Id of a post.
    PostId
);

/// The subset of a post the email panel works with.
///
/// The post itself is owned by the editor; the panel only reads and writes
/// `email_subject` and reads the attached `email`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    /// `None` until the post has been created on the backend.
    pub id: Option<PostId>,
    pub title: String,
    /// Explicit email subject, overriding the title when not empty.
    pub email_subject: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
    pub email: Option<Email>,
}

impl Post {
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// Returns the subject the newsletter will be sent with.
    pub fn effective_email_subject(&self) -> &str {
        self.email_subject
            .as_deref()
            .filter(|subject| !subject.is_empty())
            .unwrap_or(&self.title)
    }
}

#[nutype(
    validate(len_char_max = 300),
    derive(Debug, Clone, PartialEq, Eq, Deref, TryFrom, Serialize, Deserialize)
)]
pub struct PostEmailSubject(String);
