use std::sync::Arc;

use quill_core_email_panel_contracts::retry::MockEmailRetryService;
use quill_demo::{MAIL_SETTINGS_MAILGUN, SESSION_USER_EMAIL};
use quill_extern_contracts::{
    email_preview::MockEmailPreviewApiService, post::MockPostApiService,
};
use quill_models::settings::MailSettings;
use tokio::sync::watch;

use crate::{EmailPanelFeatureConfig, EmailPanelFeatureServiceImpl};

mod send_test_email;

type Sut = EmailPanelFeatureServiceImpl<
    MockPostApiService,
    MockEmailPreviewApiService,
    MockEmailRetryService,
>;

struct SutBuilder {
    post_api: MockPostApiService,
    email_preview_api: MockEmailPreviewApiService,
    email_retry: MockEmailRetryService,
    mail_settings: MailSettings,
}

impl Default for SutBuilder {
    fn default() -> Self {
        Self {
            post_api: MockPostApiService::new(),
            email_preview_api: MockEmailPreviewApiService::new(),
            email_retry: MockEmailRetryService::new(),
            mail_settings: MAIL_SETTINGS_MAILGUN.clone(),
        }
    }
}

impl SutBuilder {
    /// Builds the panel and returns the sender used to change the mail
    /// settings afterwards.
    fn build(self) -> (Sut, watch::Sender<MailSettings>) {
        let (settings_tx, settings_rx) = watch::channel(self.mail_settings);

        let sut = EmailPanelFeatureServiceImpl {
            post_api: self.post_api,
            email_preview_api: self.email_preview_api,
            email_retry: self.email_retry,
            config: EmailPanelFeatureConfig {
                session_user_email: Arc::from(SESSION_USER_EMAIL),
                mail_settings: settings_rx,
            },
            state: Default::default(),
        };

        (sut, settings_tx)
    }
}
