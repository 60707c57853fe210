use std::sync::LazyLock;

use quill_models::email::{Email, EmailStatus};

pub const MAILGUN_ERROR: &str = "Mailgun: request timed out";

pub static FAILED: LazyLock<Email> = LazyLock::new(|| Email {
    id: "6650d8c2a4e0f10001a1b2c4".try_into().unwrap(),
    status: EmailStatus::Failed,
    error: Some(MAILGUN_ERROR.into()),
});

pub static SUBMITTED: LazyLock<Email> = LazyLock::new(|| Email {
    status: EmailStatus::Submitted,
    error: None,
    ..FAILED.clone()
});

/// Returns [`FAILED`] with the given status and no error.
pub fn with_status(status: EmailStatus) -> Email {
    Email {
        status,
        error: None,
        ..FAILED.clone()
    }
}
