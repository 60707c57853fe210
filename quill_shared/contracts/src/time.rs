use std::{future::Future, time::Duration};

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait TimeService: Send + Sync + 'static {
    /// Waits until `duration` has elapsed.
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

#[cfg(feature = "mock")]
impl MockTimeService {
    pub fn with_sleep(mut self, duration: Duration, times: usize) -> Self {
        self.expect_sleep()
            .times(times)
            .with(mockall::predicate::eq(duration))
            .returning(|_| Box::pin(std::future::ready(())));
        self
    }
}
