use anyhow::{anyhow, Context};
use quill_di::Build;
use quill_extern_contracts::post::PostApiService;
use quill_models::post::{Post, PostId};
use quill_utils::trace_instrument;
use reqwest::{Method, StatusCode};

use crate::{
    http::{AdminApiConfig, HttpClient},
    resources::{PostUpdate, PostUpdateEnvelope, PostsEnvelope},
};

#[derive(Debug, Clone, Build)]
pub struct PostApiServiceImpl {
    config: AdminApiConfig,
    http: HttpClient,
}

impl PostApiService for PostApiServiceImpl {
    #[trace_instrument(skip(self))]
    async fn get(&self, post_id: &PostId) -> anyhow::Result<Option<Post>> {
        let response = self
            .http
            .admin(&self.config, Method::GET, &format!("posts/{post_id}/"))?
            .query(&[("include", "email")])
            .send()
            .await
            .context("Failed to send get post request")?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        first_post(response).await.map(Some)
    }

    #[trace_instrument(skip(self))]
    async fn save(&self, post: &Post) -> anyhow::Result<Post> {
        let post_id = post
            .id
            .as_ref()
            .ok_or_else(|| anyhow!("Cannot save a post which has not been created"))?;

        let body = PostUpdateEnvelope {
            posts: [PostUpdate {
                email_subject: post.email_subject.as_deref(),
                updated_at: post.updated_at,
            }],
        };

        let response = self
            .http
            .admin(&self.config, Method::PUT, &format!("posts/{post_id}/"))?
            .query(&[("include", "email")])
            .json(&body)
            .send()
            .await
            .context("Failed to send save post request")?;

        first_post(response).await
    }
}

async fn first_post(response: reqwest::Response) -> anyhow::Result<Post> {
    response
        .error_for_status()
        .context("Post request returned an error")?
        .json::<PostsEnvelope>()
        .await
        .context("Failed to deserialize post response")?
        .posts
        .into_iter()
        .next()
        .map(Into::into)
        .context("Post response did not contain a post")
}
