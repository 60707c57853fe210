use std::future::Future;

use quill_models::email::{Email, EmailId};

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait EmailApiService: Send + Sync + 'static {
    /// Fetch the current state of an email.
    fn get(&self, email_id: &EmailId) -> impl Future<Output = anyhow::Result<Email>> + Send;

    /// Ask the backend to resend a failed email.
    fn retry(&self, email_id: &EmailId) -> impl Future<Output = anyhow::Result<Email>> + Send;
}

#[cfg(feature = "mock")]
impl MockEmailApiService {
    pub fn with_retry(mut self, email_id: EmailId, result: Email) -> Self {
        self.expect_retry()
            .once()
            .with(mockall::predicate::eq(email_id))
            .return_once(|_| Box::pin(std::future::ready(Ok(result))));
        self
    }

    /// Expect one `get` call per element of `results`, answered in order.
    pub fn with_get_sequence(mut self, email_id: EmailId, results: Vec<Email>) -> Self {
        let mut results = results.into_iter();
        self.expect_get()
            .times(results.len())
            .with(mockall::predicate::eq(email_id))
            .returning(move |_| {
                let email = results.next().expect("more get calls than expected");
                Box::pin(std::future::ready(Ok(email)))
            });
        self
    }
}
