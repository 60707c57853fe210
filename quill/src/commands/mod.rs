use anyhow::Context;
use quill_extern_contracts::post::PostApiService;
use quill_models::post::{Post, PostId};

pub mod email;
pub mod post;

async fn get_post(post_api: &impl PostApiService, post_id: &PostId) -> anyhow::Result<Post> {
    post_api
        .get(post_id)
        .await?
        .with_context(|| format!("Post {post_id} does not exist"))
}
