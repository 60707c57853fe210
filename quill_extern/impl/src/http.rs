use std::{ops::Deref, sync::Arc};

use anyhow::Context;
use quill_models::Sensitive;
use quill_utils::{quill_version, Apply};
use reqwest::{header::AUTHORIZATION, Method, RequestBuilder};
use url::Url;

/// Admin API version requested from the backend.
pub const ADMIN_API_VERSION: &str = "v5.0";

mod header {
    pub const ACCEPT_VERSION: &str = "accept-version";
}

#[derive(Debug, Clone)]
pub struct HttpClient(reqwest::Client);

impl HttpClient {
    pub fn new() -> anyhow::Result<Self> {
        let user_agent = format!(
            "quill ({}, {}, Version {})",
            env!("CARGO_PKG_HOMEPAGE"),
            env!("CARGO_PKG_REPOSITORY"),
            quill_version()
        );

        reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .map(Self)
            .context("Failed to build http client")
    }

    /// Start a request against the admin api. `path` is relative to the
    /// configured admin api url.
    pub(crate) fn admin(
        &self,
        config: &AdminApiConfig,
        method: Method,
        path: &str,
    ) -> anyhow::Result<RequestBuilder> {
        let url = config
            .url
            .join(path)
            .with_context(|| format!("Failed to build admin api url for {path:?}"))?;

        Ok(self
            .request(method, url)
            .header(header::ACCEPT_VERSION, ADMIN_API_VERSION)
            .apply_map(config.token.as_deref(), |request, token| {
                request.header(AUTHORIZATION, format!("Ghost {}", **token))
            }))
    }
}

impl Deref for HttpClient {
    type Target = reqwest::Client;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[derive(Debug, Clone)]
pub struct AdminApiConfig {
    /// Base url of the admin api, e.g. `https://example.com/ghost/api/admin/`.
    pub url: Arc<Url>,
    /// Pre-issued admin token, sent as `Authorization: Ghost <token>`.
    pub token: Option<Arc<Sensitive<String>>>,
}

impl AdminApiConfig {
    pub fn new(mut url: Url, token: Option<String>) -> Self {
        // without the trailing slash `join` would replace the last segment
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        Self {
            url: url.into(),
            token: token.map(|token| Arc::new(token.into())),
        }
    }
}
