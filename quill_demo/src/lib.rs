use std::sync::LazyLock;

use quill_models::settings::{MailSettings, MailgunSettings};

pub mod email;
pub mod post;

pub const SESSION_USER_EMAIL: &str = "owner@example.com";

pub static MAIL_SETTINGS_MAILGUN: LazyLock<MailSettings> = LazyLock::new(|| MailSettings {
    mailgun: MailgunSettings {
        api_key: Some("key-3ax6xnjp29jd6fds4gc373sgvjxteol0".to_owned().into()),
        domain: Some("mg.example.com".into()),
        base_url: Some("https://api.mailgun.net/v3".parse().unwrap()),
    },
    mailgun_is_configured: false,
});

pub static MAIL_SETTINGS_UNCONFIGURED: LazyLock<MailSettings> =
    LazyLock::new(MailSettings::default);
