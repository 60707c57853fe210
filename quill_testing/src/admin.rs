use std::{
    collections::HashMap,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    sync::Arc,
};

use anyhow::Context;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::Deserialize;
use serde_json::json;
use tokio::{net::TcpListener, sync::Mutex};
use tracing::info;
use url::Url;

pub const ADMIN_API_PATH: &str = "/ghost/api/admin/";

/// Published post whose newsletter failed and is delivered on retry.
pub const POST_RECOVERING: &str = "6650d8c2a4e0f10001a1b2c3";
pub const EMAIL_RECOVERING: &str = "6650d8c2a4e0f10001a1b2c4";

/// Published post whose newsletter fails again on retry.
pub const POST_BROKEN: &str = "6650d8c2a4e0f10001a1b2d3";
pub const EMAIL_BROKEN: &str = "6650d8c2a4e0f10001a1b2d4";
pub const EMAIL_BROKEN_ERROR: &str = "Mailgun: domain mg.example.com is not verified";

/// Draft post without a newsletter email.
pub const POST_DRAFT: &str = "6650d8c2a4e0f10001a1b2e3";

/// Test emails to this domain are rejected with an error message.
pub const REJECTED_DOMAIN: &str = "bounce.test";
pub const REJECTED_MESSAGE: &str = "Failed to send test email: recipient address rejected";
/// Test emails to this domain fail with an unstructured server error.
pub const BROKEN_DOMAIN: &str = "broken.test";

/// Number of status requests a retried email stays in flight for.
pub const POLLS_UNTIL_SETTLED: u32 = 2;

pub async fn start_server(host: IpAddr, port: u16) -> anyhow::Result<()> {
    let listener = TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind to {host}:{port}"))?;

    info!("Starting fake admin api server on {host}:{port}");
    info!("Admin api url: http://{host}:{port}{ADMIN_API_PATH}");
    info!("Post {POST_RECOVERING} has a failed email which is delivered on retry.");
    info!("Post {POST_BROKEN} has a failed email which fails again on retry.");
    info!("Post {POST_DRAFT} is a draft without an email.");
    info!("Test emails to @{REJECTED_DOMAIN} and @{BROKEN_DOMAIN} fail.");

    axum::serve(listener, router())
        .await
        .context("Failed to start HTTP server")
}

/// Start a server with fresh state on a random local port in the background
/// and return its admin api url.
pub async fn spawn_server() -> anyhow::Result<Url> {
    let listener = TcpListener::bind(SocketAddr::from((Ipv4Addr::LOCALHOST, 0)))
        .await
        .context("Failed to bind to a local port")?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move { axum::serve(listener, router()).await });

    format!("http://{addr}{ADMIN_API_PATH}")
        .parse()
        .context("Failed to build admin api url")
}

fn router() -> Router {
    Router::new()
        .route(
            "/ghost/api/admin/posts/:id/",
            routing::get(get_post).put(update_post),
        )
        .route(
            "/ghost/api/admin/email_preview/posts/:id/",
            routing::post(send_test_email),
        )
        .route("/ghost/api/admin/emails/:id/", routing::get(get_email))
        .route("/ghost/api/admin/emails/:id/retry/", routing::put(retry_email))
        .with_state(Arc::new(Mutex::new(Store::seeded())))
}

type AppState = State<Arc<Mutex<Store>>>;

#[derive(Debug)]
struct Store {
    posts: HashMap<String, FakePost>,
    emails: HashMap<String, FakeEmail>,
}

#[derive(Debug)]
struct FakePost {
    title: String,
    email_subject: Option<String>,
    updated_at: DateTime<Utc>,
    email_id: Option<String>,
}

#[derive(Debug)]
struct FakeEmail {
    status: &'static str,
    error: Option<String>,
    remaining_polls: u32,
    fails_on_retry: bool,
}

impl Store {
    fn seeded() -> Self {
        let updated_at = Utc.with_ymd_and_hms(2024, 5, 24, 10, 0, 0).unwrap();
        let failed = |fails_on_retry| FakeEmail {
            status: "failed",
            error: Some("Mailgun: request timed out".into()),
            remaining_polls: 0,
            fails_on_retry,
        };

        Self {
            posts: HashMap::from([
                (
                    POST_RECOVERING.into(),
                    FakePost {
                        title: "Spring product update".into(),
                        email_subject: None,
                        updated_at,
                        email_id: Some(EMAIL_RECOVERING.into()),
                    },
                ),
                (
                    POST_BROKEN.into(),
                    FakePost {
                        title: "Member survey results".into(),
                        email_subject: Some("What you told us".into()),
                        updated_at,
                        email_id: Some(EMAIL_BROKEN.into()),
                    },
                ),
                (
                    POST_DRAFT.into(),
                    FakePost {
                        title: "Upcoming events".into(),
                        email_subject: None,
                        updated_at,
                        email_id: None,
                    },
                ),
            ]),
            emails: HashMap::from([
                (EMAIL_RECOVERING.into(), failed(false)),
                (EMAIL_BROKEN.into(), failed(true)),
            ]),
        }
    }

    fn post_json(&self, id: &str, post: &FakePost) -> serde_json::Value {
        let email = post
            .email_id
            .as_ref()
            .and_then(|email_id| Some((email_id, self.emails.get(email_id)?)))
            .map(|(email_id, email)| email_json(email_id, email));

        json!({
            "id": id,
            "title": post.title,
            "email_subject": post.email_subject,
            "updated_at": post.updated_at,
            "email": email,
        })
    }
}

fn email_json(id: &str, email: &FakeEmail) -> serde_json::Value {
    json!({
        "id": id,
        "status": email.status,
        "error": email.error,
    })
}

fn error(status: StatusCode, kind: &str, message: &str) -> Response {
    (
        status,
        Json(json!({ "errors": [{ "message": message, "type": kind }] })),
    )
        .into_response()
}

fn not_found(resource: &str) -> Response {
    error(
        StatusCode::NOT_FOUND,
        "NotFoundError",
        &format!("{resource} not found."),
    )
}

async fn get_post(state: AppState, Path(id): Path<String>) -> Response {
    let store = state.lock().await;
    match store.posts.get(&id) {
        Some(post) => Json(json!({ "posts": [store.post_json(&id, post)] })).into_response(),
        None => not_found("Post"),
    }
}

#[derive(Deserialize)]
struct PostUpdateRequest {
    posts: Vec<PostUpdate>,
}

#[derive(Deserialize)]
struct PostUpdate {
    email_subject: Option<String>,
    updated_at: Option<DateTime<Utc>>,
}

async fn update_post(
    state: AppState,
    Path(id): Path<String>,
    Json(request): Json<PostUpdateRequest>,
) -> Response {
    let Some(update) = request.posts.into_iter().next() else {
        return error(
            StatusCode::BAD_REQUEST,
            "ValidationError",
            "No post in request body.",
        );
    };

    let mut store = state.lock().await;
    let Some(post) = store.posts.get_mut(&id) else {
        return not_found("Post");
    };

    if update.updated_at != Some(post.updated_at) {
        return error(
            StatusCode::CONFLICT,
            "UpdateCollisionError",
            "Saving failed! Someone else is editing this post.",
        );
    }

    post.email_subject = update.email_subject;
    post.updated_at += Duration::seconds(1);

    let store = &*store;
    let post = &store.posts[&id];
    Json(json!({ "posts": [store.post_json(&id, post)] })).into_response()
}

#[derive(Deserialize)]
struct SendTestEmailRequest {
    emails: Vec<String>,
}

async fn send_test_email(
    state: AppState,
    Path(id): Path<String>,
    Json(request): Json<SendTestEmailRequest>,
) -> Response {
    if !state.lock().await.posts.contains_key(&id) {
        return not_found("Post");
    }

    let domain_of = |email: &String| email.rsplit('@').next().unwrap_or_default().to_owned();
    if request
        .emails
        .iter()
        .any(|email| domain_of(email) == BROKEN_DOMAIN)
    {
        return (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response();
    }
    if request
        .emails
        .iter()
        .any(|email| domain_of(email) == REJECTED_DOMAIN)
    {
        return error(StatusCode::BAD_REQUEST, "EmailError", REJECTED_MESSAGE);
    }

    Json(json!({ "email_previews": [{ "post_id": id, "emails": request.emails }] }))
        .into_response()
}

async fn get_email(state: AppState, Path(id): Path<String>) -> Response {
    let mut store = state.lock().await;
    let Some(email) = store.emails.get_mut(&id) else {
        return not_found("Email");
    };

    if matches!(email.status, "pending" | "submitting") {
        email.remaining_polls = email.remaining_polls.saturating_sub(1);
        if email.remaining_polls > 0 {
            email.status = "submitting";
        } else if email.fails_on_retry {
            email.status = "failed";
            email.error = Some(EMAIL_BROKEN_ERROR.into());
        } else {
            email.status = "submitted";
            email.error = None;
        }
    }

    Json(json!({ "emails": [email_json(&id, email)] })).into_response()
}

async fn retry_email(state: AppState, Path(id): Path<String>) -> Response {
    let mut store = state.lock().await;
    let Some(email) = store.emails.get_mut(&id) else {
        return not_found("Email");
    };

    if email.status != "failed" {
        return error(
            StatusCode::BAD_REQUEST,
            "IncorrectUsageError",
            "Only failed emails can be retried.",
        );
    }

    email.status = "pending";
    email.remaining_polls = POLLS_UNTIL_SETTLED;

    Json(json!({ "emails": [email_json(&id, email)] })).into_response()
}
