use std::future::Future;

use quill_models::post::{Post, PostId};

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait PostApiService: Send + Sync + 'static {
    /// Fetch a post including its newsletter email, if any.
    ///
    /// Returns `None` if the post does not exist.
    fn get(&self, post_id: &PostId) -> impl Future<Output = anyhow::Result<Option<Post>>> + Send;

    /// Save the editable fields of an existing post and return the stored
    /// post.
    fn save(&self, post: &Post) -> impl Future<Output = anyhow::Result<Post>> + Send;
}

#[cfg(feature = "mock")]
impl MockPostApiService {
    pub fn with_get(mut self, post_id: PostId, result: Option<Post>) -> Self {
        self.expect_get()
            .once()
            .with(mockall::predicate::eq(post_id))
            .return_once(|_| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_save(mut self, post: Post, result: Post) -> Self {
        self.expect_save()
            .once()
            .with(mockall::predicate::eq(post))
            .return_once(|_| Box::pin(std::future::ready(Ok(result))));
        self
    }
}
