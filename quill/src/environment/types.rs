use quill_core_email_panel_impl::{retry::EmailRetryServiceImpl, EmailPanelFeatureServiceImpl};
use quill_extern_impl::{
    email::EmailApiServiceImpl, email_preview::EmailPreviewApiServiceImpl,
    post::PostApiServiceImpl,
};
use quill_shared_impl::time::TimeServiceImpl;

// Extern
pub type PostApi = PostApiServiceImpl;
pub type EmailApi = EmailApiServiceImpl;
pub type EmailPreviewApi = EmailPreviewApiServiceImpl;

// Shared
pub type Time = TimeServiceImpl;

// Core
pub type EmailRetry = EmailRetryServiceImpl<Time, EmailApi>;
pub type EmailPanelFeature = EmailPanelFeatureServiceImpl<PostApi, EmailPreviewApi, EmailRetry>;
