use std::sync::Arc;

use anyhow::ensure;
use quill_config::Config;
use quill_core_email_panel_impl::{retry::EmailRetryServiceConfig, EmailPanelFeatureConfig};
use quill_di::provider;
use quill_extern_impl::http::{AdminApiConfig, HttpClient};
use tokio::sync::watch;

pub mod types;

provider! {
    /// The default provider, capable of providing all the dependencies
    pub Provider {
        http: HttpClient,
        ..config: ConfigProvider {
            // Extern
            AdminApiConfig,

            // Core
            EmailRetryServiceConfig,
            EmailPanelFeatureConfig,
        }
    }
}

impl Provider {
    pub fn new(config: ConfigProvider) -> anyhow::Result<Self> {
        Ok(Self {
            _cache: Default::default(),
            http: HttpClient::new()?,
            config,
        })
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Self::new(ConfigProvider::new(config)?)
    }
}

provider! {
    /// Reduced provider, capable of providing services that only depend on the configuration
    pub ConfigProvider {
        // Extern
        admin_api_config: AdminApiConfig,

        // Core
        email_retry_service_config: EmailRetryServiceConfig,
        email_panel_feature_config: EmailPanelFeatureConfig,
    }
}

impl ConfigProvider {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        // Extern
        let admin_api_config =
            AdminApiConfig::new(config.admin.url.clone(), config.admin.token.clone());

        // Core
        ensure!(
            !config.email_panel.retry_poll_interval.is_zero(),
            "email_panel.retry_poll_interval must be greater than zero"
        );
        let email_retry_service_config = EmailRetryServiceConfig {
            poll_interval: config.email_panel.retry_poll_interval.into(),
            poll_timeout: config.email_panel.retry_poll_timeout.into(),
        };

        // the settings cannot change during a single invocation
        let (_, mail_settings) = watch::channel(config.mail.clone());
        let email_panel_feature_config = EmailPanelFeatureConfig {
            session_user_email: Arc::from(config.session.email.as_str()),
            mail_settings,
        };

        Ok(Self {
            _cache: Default::default(),
            admin_api_config,
            email_retry_service_config,
            email_panel_feature_config,
        })
    }
}
