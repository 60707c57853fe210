use std::time::Duration;

use quill_core_email_panel_contracts::retry::{
    EmailRetryError, EmailRetryOutcome, EmailRetryService,
};
use quill_di::Build;
use quill_extern_contracts::email::EmailApiService;
use quill_models::email::{Email, EmailStatus};
use quill_shared_contracts::time::TimeService;
use quill_utils::trace_instrument;
use tracing::{debug, warn};

#[derive(Debug, Clone, Build)]
pub struct EmailRetryServiceImpl<Time, EmailApi> {
    time: Time,
    email_api: EmailApi,
    config: EmailRetryServiceConfig,
}

#[derive(Debug, Clone)]
pub struct EmailRetryServiceConfig {
    pub poll_interval: Duration,
    /// Total time spent waiting between polls before giving up.
    pub poll_timeout: Duration,
}

impl Default for EmailRetryServiceConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(1),
            poll_timeout: Duration::from_secs(15),
        }
    }
}

impl<Time, EmailApi> EmailRetryService for EmailRetryServiceImpl<Time, EmailApi>
where
    Time: TimeService,
    EmailApi: EmailApiService,
{
    #[trace_instrument(skip(self))]
    async fn retry_and_poll(&self, email: &mut Email) -> Result<EmailRetryOutcome, EmailRetryError> {
        if email.status != EmailStatus::Failed {
            return Ok(EmailRetryOutcome::Skipped);
        }

        *email = self.email_api.retry(&email.id).await?;

        let mut waited = Duration::ZERO;
        while waited < self.config.poll_timeout {
            self.time.sleep(self.config.poll_interval).await;
            *email = self.email_api.get(&email.id).await?;
            debug!(status = %email.status, "Polled email status");

            match email.status {
                EmailStatus::Submitted => return Ok(EmailRetryOutcome::Submitted),
                EmailStatus::Failed => {
                    return Err(EmailRetryError::Failed {
                        error: email.error.clone(),
                    })
                }
                _ => {}
            }

            waited += self.config.poll_interval;
        }

        warn!(
            status = %email.status,
            "Email did not reach a final status within {:?}",
            self.config.poll_timeout
        );

        Ok(EmailRetryOutcome::TimedOut)
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;
    use quill_demo::email::{self, FAILED, MAILGUN_ERROR, SUBMITTED};
    use quill_extern_contracts::email::MockEmailApiService;
    use quill_shared_contracts::time::MockTimeService;
    use quill_utils::assert_matches;

    use super::*;

    type Sut = EmailRetryServiceImpl<MockTimeService, MockEmailApiService>;

    fn make_sut(time: MockTimeService, email_api: MockEmailApiService) -> Sut {
        EmailRetryServiceImpl {
            time,
            email_api,
            config: EmailRetryServiceConfig::default(),
        }
    }

    #[tokio::test]
    async fn submitted() {
        // Arrange
        let time = MockTimeService::new().with_sleep(Duration::from_secs(1), 3);

        let email_api = MockEmailApiService::new()
            .with_retry(FAILED.id.clone(), email::with_status(EmailStatus::Pending))
            .with_get_sequence(
                FAILED.id.clone(),
                vec![
                    email::with_status(EmailStatus::Pending),
                    email::with_status(EmailStatus::Submitting),
                    SUBMITTED.clone(),
                ],
            );

        let sut = make_sut(time, email_api);
        let mut email = FAILED.clone();

        // Act
        let result = sut.retry_and_poll(&mut email).await;

        // Assert
        assert_matches!(result, Ok(EmailRetryOutcome::Submitted));
        assert_eq!(email, *SUBMITTED);
    }

    #[tokio::test]
    async fn submitted_on_first_poll() {
        // Arrange
        let time = MockTimeService::new().with_sleep(Duration::from_secs(1), 1);

        let email_api = MockEmailApiService::new()
            .with_retry(FAILED.id.clone(), email::with_status(EmailStatus::Pending))
            .with_get_sequence(FAILED.id.clone(), vec![SUBMITTED.clone()]);

        let sut = make_sut(time, email_api);
        let mut email = FAILED.clone();

        // Act
        let result = sut.retry_and_poll(&mut email).await;

        // Assert
        assert_matches!(result, Ok(EmailRetryOutcome::Submitted));
    }

    #[tokio::test]
    async fn failed_again() {
        // Arrange
        let time = MockTimeService::new().with_sleep(Duration::from_secs(1), 2);

        let failed_again = Email {
            error: Some("Mailgun: domain is not verified".into()),
            ..FAILED.clone()
        };
        let email_api = MockEmailApiService::new()
            .with_retry(FAILED.id.clone(), email::with_status(EmailStatus::Pending))
            .with_get_sequence(
                FAILED.id.clone(),
                vec![
                    email::with_status(EmailStatus::Submitting),
                    failed_again.clone(),
                ],
            );

        let sut = make_sut(time, email_api);
        let mut email = FAILED.clone();

        // Act
        let result = sut.retry_and_poll(&mut email).await;

        // Assert
        assert_matches!(
            result,
            Err(EmailRetryError::Failed { error: Some(error) }) if error == "Mailgun: domain is not verified"
        );
        assert_eq!(email, failed_again);
    }

    #[tokio::test]
    async fn timeout_counts_as_success() {
        // Arrange
        let time = MockTimeService::new().with_sleep(Duration::from_secs(1), 15);

        let email_api = MockEmailApiService::new()
            .with_retry(FAILED.id.clone(), email::with_status(EmailStatus::Pending))
            .with_get_sequence(
                FAILED.id.clone(),
                vec![email::with_status(EmailStatus::Submitting); 15],
            );

        let sut = make_sut(time, email_api);
        let mut email = FAILED.clone();

        // Act
        let result = sut.retry_and_poll(&mut email).await;

        // Assert
        assert_matches!(result, Ok(EmailRetryOutcome::TimedOut));
        assert_eq!(email.status, EmailStatus::Submitting);
    }

    #[tokio::test]
    async fn custom_poll_config() {
        // Arrange
        let time = MockTimeService::new().with_sleep(Duration::from_millis(250), 4);

        let email_api = MockEmailApiService::new()
            .with_retry(FAILED.id.clone(), email::with_status(EmailStatus::Pending))
            .with_get_sequence(
                FAILED.id.clone(),
                vec![email::with_status(EmailStatus::Pending); 4],
            );

        let sut = EmailRetryServiceImpl {
            time,
            email_api,
            config: EmailRetryServiceConfig {
                poll_interval: Duration::from_millis(250),
                poll_timeout: Duration::from_secs(1),
            },
        };
        let mut email = FAILED.clone();

        // Act
        let result = sut.retry_and_poll(&mut email).await;

        // Assert
        assert_matches!(result, Ok(EmailRetryOutcome::TimedOut));
    }

    #[tokio::test]
    async fn not_failed() {
        for status in [
            EmailStatus::Draft,
            EmailStatus::Pending,
            EmailStatus::Submitting,
            EmailStatus::Submitted,
        ] {
            // Arrange
            let sut = make_sut(MockTimeService::new(), MockEmailApiService::new());
            let mut email = email::with_status(status);

            // Act
            let result = sut.retry_and_poll(&mut email).await;

            // Assert
            assert_matches!(result, Ok(EmailRetryOutcome::Skipped));
            assert_eq!(email.status, status);
        }
    }

    #[tokio::test]
    async fn retry_request_fails() {
        // Arrange
        let mut email_api = MockEmailApiService::new();
        email_api
            .expect_retry()
            .once()
            .return_once(|_| Box::pin(std::future::ready(Err(anyhow!("connection refused")))));

        let sut = make_sut(MockTimeService::new(), email_api);
        let mut email = FAILED.clone();

        // Act
        let result = sut.retry_and_poll(&mut email).await;

        // Assert
        assert_matches!(result, Err(EmailRetryError::Other(_)));
        assert_eq!(email.error.as_deref(), Some(MAILGUN_ERROR));
    }

    #[tokio::test]
    async fn poll_request_fails() {
        // Arrange
        let time = MockTimeService::new().with_sleep(Duration::from_secs(1), 1);

        let mut email_api = MockEmailApiService::new()
            .with_retry(FAILED.id.clone(), email::with_status(EmailStatus::Pending));
        email_api
            .expect_get()
            .once()
            .return_once(|_| Box::pin(std::future::ready(Err(anyhow!("connection reset")))));

        let sut = make_sut(time, email_api);
        let mut email = FAILED.clone();

        // Act
        let result = sut.retry_and_poll(&mut email).await;

        // Assert
        assert_matches!(result, Err(EmailRetryError::Other(_)));
        assert_eq!(email.status, EmailStatus::Pending);
    }
}
