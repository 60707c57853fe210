use serde::Deserialize;
use url::Url;

use crate::Sensitive;

/// Snapshot of the site settings that decide whether newsletters can be
/// sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MailSettings {
    #[serde(default)]
    pub mailgun: MailgunSettings,
    /// Set when the server environment already provides a mail setup.
    #[serde(default)]
    pub mailgun_is_configured: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MailgunSettings {
    pub api_key: Option<Sensitive<String>>,
    pub domain: Option<String>,
    pub base_url: Option<Url>,
}

impl MailSettings {
    /// Whether outbound mail is configured, either through explicit mailgun
    /// credentials or by the environment.
    pub fn mailgun_is_enabled(&self) -> bool {
        self.mailgun.is_complete() || self.mailgun_is_configured
    }
}

impl MailgunSettings {
    pub fn is_complete(&self) -> bool {
        self.api_key.as_ref().is_some_and(|key| !key.is_empty())
            && self.domain.as_ref().is_some_and(|domain| !domain.is_empty())
            && self.base_url.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mailgun() -> MailgunSettings {
        MailgunSettings {
            api_key: Some("key-123".to_owned().into()),
            domain: Some("mg.example.com".into()),
            base_url: Some("https://api.mailgun.net/v3".parse().unwrap()),
        }
    }

    #[test]
    fn enabled_with_complete_credentials() {
        let settings = MailSettings {
            mailgun: mailgun(),
            mailgun_is_configured: false,
        };
        assert!(settings.mailgun_is_enabled());
    }

    #[test]
    fn enabled_by_environment() {
        let settings = MailSettings {
            mailgun: MailgunSettings::default(),
            mailgun_is_configured: true,
        };
        assert!(settings.mailgun_is_enabled());
    }

    #[test]
    fn disabled_with_partial_credentials() {
        for settings in [
            MailgunSettings {
                api_key: None,
                ..mailgun()
            },
            MailgunSettings {
                domain: Some(String::new()),
                ..mailgun()
            },
            MailgunSettings {
                base_url: None,
                ..mailgun()
            },
        ] {
            let settings = MailSettings {
                mailgun: settings,
                mailgun_is_configured: false,
            };
            assert!(!settings.mailgun_is_enabled());
        }
    }
}
