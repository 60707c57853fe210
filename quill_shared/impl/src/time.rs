use std::time::Duration;

use quill_di::Build;
use quill_shared_contracts::time::TimeService;
use quill_utils::trace_instrument;

#[derive(Debug, Clone, Copy, Build)]
pub struct TimeServiceImpl;

impl TimeService for TimeServiceImpl {
    #[trace_instrument(skip(self))]
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
