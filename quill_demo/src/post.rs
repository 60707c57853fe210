use std::sync::LazyLock;

use chrono::{TimeZone, Utc};
use quill_models::post::Post;

use crate::email;

/// A published post whose newsletter failed.
pub static PUBLISHED: LazyLock<Post> = LazyLock::new(|| Post {
    id: Some("6650d8c2a4e0f10001a1b2c3".try_into().unwrap()),
    title: "Spring product update".into(),
    email_subject: Some("What's new this spring".into()),
    updated_at: Some(Utc.with_ymd_and_hms(2024, 5, 24, 10, 0, 0).unwrap()),
    email: Some(email::FAILED.clone()),
});

/// A post which has not been created on the backend yet.
pub static NEW: LazyLock<Post> = LazyLock::new(|| Post {
    id: None,
    title: "Untitled".into(),
    email_subject: None,
    updated_at: None,
    email: None,
});
