use anyhow::anyhow;
use quill_core_email_panel_contracts::{
    EmailPanelFeatureService, SendTestEmailError, SendTestEmailResult,
    SEND_TEST_EMAIL_FAILED_MESSAGE,
};
use quill_demo::{MAIL_SETTINGS_UNCONFIGURED, SESSION_USER_EMAIL};
use quill_extern_contracts::email_preview::{EmailPreviewSendError, MockEmailPreviewApiService};
use quill_models::email_address::EmailAddress;
use serde_json::json;

use crate::tests::SutBuilder;

fn post_id() -> quill_models::post::PostId {
    quill_demo::post::PUBLISHED.id.clone().unwrap()
}

fn recipient(address: &str) -> Vec<EmailAddress> {
    vec![address.parse().unwrap()]
}

#[tokio::test]
async fn ok() {
    // Arrange
    let payload = json!({ "email_previews": [{ "emails": [SESSION_USER_EMAIL] }] });

    let (sut, _settings) = SutBuilder {
        email_preview_api: MockEmailPreviewApiService::new().with_send_test_email(
            post_id(),
            recipient(SESSION_USER_EMAIL),
            Ok(payload.clone()),
        ),
        ..Default::default()
    }
    .build();
    *sut.state.send_test_email_error.write().await = "Please enter a valid email".into();

    // Act
    let result = sut.send_test_email(&quill_demo::post::PUBLISHED).await;

    // Assert
    assert_eq!(result, SendTestEmailResult::Sent(payload));
    assert_eq!(sut.send_test_email_error().await, "");
}

#[tokio::test]
async fn recipient_is_trimmed() {
    // Arrange
    let (sut, _settings) = SutBuilder {
        email_preview_api: MockEmailPreviewApiService::new().with_send_test_email(
            post_id(),
            recipient("editor@example.com"),
            Ok(json!({})),
        ),
        ..Default::default()
    }
    .build();
    sut.set_test_email_address("  editor@example.com \n".into())
        .await;

    // Act
    let result = sut.send_test_email(&quill_demo::post::PUBLISHED).await;

    // Assert
    assert_eq!(result, SendTestEmailResult::Sent(json!({})));
}

#[tokio::test]
async fn invalid_email() {
    for address in [
        "",
        "   ",
        "owner",
        "owner@",
        "@example.com",
        "owner @example.com",
        "owner@localhost",
        "owner@[127.0.0.1]",
        "owner@example",
    ] {
        // Arrange
        let (sut, _settings) = SutBuilder::default().build();
        sut.set_test_email_address(address.into()).await;

        // Act
        let result = sut.send_test_email(&quill_demo::post::PUBLISHED).await;

        // Assert
        assert_eq!(
            result,
            SendTestEmailResult::Failed(SendTestEmailError::InvalidEmail),
            "{address:?}"
        );
        assert_eq!(
            sut.send_test_email_error().await,
            "Please enter a valid email"
        );
    }
}

#[tokio::test]
async fn mail_not_configured() {
    // Arrange
    let (sut, _settings) = SutBuilder {
        mail_settings: MAIL_SETTINGS_UNCONFIGURED.clone(),
        ..Default::default()
    }
    .build();

    // Act
    let result = sut.send_test_email(&quill_demo::post::PUBLISHED).await;

    // Assert
    assert_eq!(
        result,
        SendTestEmailResult::Failed(SendTestEmailError::MailNotConfigured)
    );
    assert_eq!(
        sut.send_test_email_error().await,
        "Please verify your email settings"
    );
}

#[tokio::test]
async fn unsaved_post() {
    // Arrange
    let (sut, _settings) = SutBuilder::default().build();
    *sut.state.send_test_email_error.write().await = "Please enter a valid email".into();

    // Act
    let result = sut.send_test_email(&quill_demo::post::NEW).await;

    // Assert
    assert_eq!(
        result,
        SendTestEmailResult::Failed(SendTestEmailError::Send { message: None })
    );
    assert_eq!(
        sut.send_test_email_error().await,
        SEND_TEST_EMAIL_FAILED_MESSAGE
    );
}

#[tokio::test]
async fn rejected_with_message() {
    // Arrange
    let message = "Failed to send test email: recipient address rejected";
    let (sut, _settings) = SutBuilder {
        email_preview_api: MockEmailPreviewApiService::new().with_send_test_email(
            post_id(),
            recipient(SESSION_USER_EMAIL),
            Err(EmailPreviewSendError::Rejected {
                status: 400,
                message: Some(message.into()),
            }),
        ),
        ..Default::default()
    }
    .build();

    // Act
    let result = sut.send_test_email(&quill_demo::post::PUBLISHED).await;

    // Assert
    assert_eq!(
        result,
        SendTestEmailResult::Failed(SendTestEmailError::Send {
            message: Some(message.into())
        })
    );
    assert_eq!(sut.send_test_email_error().await, message);
}

#[tokio::test]
async fn rejected_without_message() {
    for error in [
        EmailPreviewSendError::Rejected {
            status: 500,
            message: None,
        },
        EmailPreviewSendError::Other(anyhow!("connection reset by peer")),
    ] {
        // Arrange
        let (sut, _settings) = SutBuilder {
            email_preview_api: MockEmailPreviewApiService::new().with_send_test_email(
                post_id(),
                recipient(SESSION_USER_EMAIL),
                Err(error),
            ),
            ..Default::default()
        }
        .build();

        // Act
        let result = sut.send_test_email(&quill_demo::post::PUBLISHED).await;

        // Assert
        assert_eq!(
            result,
            SendTestEmailResult::Failed(SendTestEmailError::Send { message: None })
        );
        assert_eq!(
            sut.send_test_email_error().await,
            SEND_TEST_EMAIL_FAILED_MESSAGE
        );
    }
}

#[tokio::test]
async fn overlapping_call_is_dropped() {
    // Arrange
    let (tx, rx) = tokio::sync::oneshot::channel();

    let mut email_preview_api = MockEmailPreviewApiService::new();
    email_preview_api
        .expect_send_test_email()
        .once()
        .return_once(|_, _| {
            Box::pin(async move { rx.await.map_err(|err| EmailPreviewSendError::Other(anyhow!(err))) })
        });

    let (sut, _settings) = SutBuilder {
        email_preview_api,
        ..Default::default()
    }
    .build();
    let post = quill_demo::post::PUBLISHED.clone();

    // Act
    let mut first = std::pin::pin!(sut.send_test_email(&post));
    assert!(futures::poll!(first.as_mut()).is_pending());

    let second = sut.send_test_email(&post).await;

    tx.send(json!({ "sent": true })).unwrap();
    let first = first.await;

    // Assert
    assert_eq!(second, SendTestEmailResult::Dropped);
    assert_eq!(first, SendTestEmailResult::Sent(json!({ "sent": true })));

    // the busy flag is released again
    let third = sut.send_test_email(&quill_demo::post::NEW).await;
    assert_eq!(
        third,
        SendTestEmailResult::Failed(SendTestEmailError::Send { message: None })
    );
}

#[tokio::test]
async fn cancelled_call_releases_busy_flag() {
    // Arrange
    let (_tx, rx) = tokio::sync::oneshot::channel::<serde_json::Value>();

    let mut email_preview_api = MockEmailPreviewApiService::new();
    email_preview_api
        .expect_send_test_email()
        .once()
        .return_once(|_, _| {
            Box::pin(async move { rx.await.map_err(|err| EmailPreviewSendError::Other(anyhow!(err))) })
        });

    let (sut, _settings) = SutBuilder {
        email_preview_api,
        ..Default::default()
    }
    .build();

    // Act
    {
        let mut first = Box::pin(sut.send_test_email(&quill_demo::post::PUBLISHED));
        assert!(futures::poll!(first.as_mut()).is_pending());
    }
    let result = sut.send_test_email(&quill_demo::post::NEW).await;

    // Assert
    assert_eq!(
        result,
        SendTestEmailResult::Failed(SendTestEmailError::Send { message: None })
    );
}
