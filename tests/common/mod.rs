// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared test harness: an in-process stub of the attendance API.
//!
//! The stub tracks which access tokens it considers valid and counts calls,
//! so tests can script 401s, refresh outcomes, and assert the single-flight
//! invariant.

// Each test binary uses a different slice of this harness.
#![allow(dead_code)]

use attendance_client::config::Config;
use attendance_client::ApiClient;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Once, RwLock};
use std::time::Duration;

static TRACING: Once = Once::new();

/// Opt-in log output for debugging test failures (`RUST_LOG=debug`).
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// What the stub's refresh endpoint grants.
#[derive(Debug, Clone)]
pub struct RefreshGrant {
    /// Access token to hand out
    pub access: String,
    /// Whether that token is then accepted by the domain endpoints
    pub valid: bool,
    /// Rotated refresh token, if the "backend" rotates
    pub rotate_refresh: Option<String>,
}

/// What the stub's login endpoint grants.
#[derive(Debug, Clone)]
pub struct LoginGrant {
    pub access: String,
    pub refresh: String,
    pub role: String,
    /// Whether the granted access token is accepted by domain endpoints
    pub valid: bool,
}

/// Scriptable stub API state.
#[derive(Default)]
pub struct StubApi {
    pub valid_tokens: RwLock<HashSet<String>>,
    pub login_grant: RwLock<Option<LoginGrant>>,
    pub refresh_grant: RwLock<Option<RefreshGrant>>,
    pub refresh_delay_ms: AtomicU64,
    pub refresh_calls: AtomicUsize,
    pub absence_calls: AtomicUsize,
    pub seen_refresh_tokens: RwLock<Vec<String>>,
    pub last_bearer: RwLock<Option<String>>,
    pub last_query: RwLock<HashMap<String, String>>,
    pub last_multipart_fields: RwLock<Vec<String>>,
}

impl StubApi {
    pub fn mark_valid(&self, token: &str) {
        self.valid_tokens.write().unwrap().insert(token.to_string());
    }
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}

/// Check the bearer token against the valid set, recording it either way.
fn authorize(api: &StubApi, headers: &HeaderMap) -> Result<(), StatusCode> {
    let Some(token) = bearer(headers) else {
        return Err(StatusCode::UNAUTHORIZED);
    };
    *api.last_bearer.write().unwrap() = Some(token.clone());
    if api.valid_tokens.read().unwrap().contains(&token) {
        Ok(())
    } else {
        Err(StatusCode::UNAUTHORIZED)
    }
}

pub fn sample_absence() -> Value {
    json!({
        "id": 1,
        "student": 7,
        "discipline": "Mathematics",
        "date": "2026-03-10",
        "reason": null,
        "is_absent": true,
        "created_at": null
    })
}

pub fn sample_request(status: &str) -> Value {
    json!({
        "id": 3,
        "absence": 1,
        "justification_file": "/media/justifications/note.pdf",
        "status": status,
        "comments": null,
        "created_at": null,
        "updated_at": null
    })
}

async fn login(State(api): State<Arc<StubApi>>, Json(_body): Json<Value>) -> Response {
    let grant = api.login_grant.read().unwrap().clone();
    match grant {
        Some(grant) => {
            if grant.valid {
                api.mark_valid(&grant.access);
            }
            Json(json!({
                "access": grant.access,
                "refresh": grant.refresh,
                "role": grant.role
            }))
            .into_response()
        }
        None => StatusCode::UNAUTHORIZED.into_response(),
    }
}

async fn register(Json(body): Json<Value>) -> Response {
    // Minimal shape check; the client only needs a 2xx back
    if body.get("username").is_some() && body.get("role").is_some() {
        StatusCode::CREATED.into_response()
    } else {
        StatusCode::BAD_REQUEST.into_response()
    }
}

async fn refresh(State(api): State<Arc<StubApi>>, Json(body): Json<Value>) -> Response {
    api.refresh_calls.fetch_add(1, Ordering::SeqCst);
    if let Some(token) = body.get("refresh").and_then(Value::as_str) {
        api.seen_refresh_tokens
            .write()
            .unwrap()
            .push(token.to_string());
    }

    let delay = api.refresh_delay_ms.load(Ordering::SeqCst);
    if delay > 0 {
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }

    let grant = api.refresh_grant.read().unwrap().clone();
    match grant {
        Some(grant) => {
            if grant.valid {
                api.mark_valid(&grant.access);
            }
            let mut body = json!({ "access": grant.access });
            if let Some(rotated) = grant.rotate_refresh {
                body["refresh"] = json!(rotated);
            }
            Json(body).into_response()
        }
        None => StatusCode::UNAUTHORIZED.into_response(),
    }
}

async fn list_absences(
    State(api): State<Arc<StubApi>>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    api.absence_calls.fetch_add(1, Ordering::SeqCst);
    if let Err(status) = authorize(&api, &headers) {
        return status.into_response();
    }
    *api.last_query.write().unwrap() = query;
    Json(json!([sample_absence()])).into_response()
}

async fn update_absence(
    State(api): State<Arc<StubApi>>,
    Path(id): Path<u64>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(status) = authorize(&api, &headers) {
        return status.into_response();
    }
    Json(json!({
        "id": id,
        "student": body["user_id"],
        "discipline": body["discipline"],
        "date": "2026-03-10",
        "reason": body["reason"],
        "is_absent": body["is_absent"],
        "created_at": null
    }))
    .into_response()
}

async fn list_requests(
    State(api): State<Arc<StubApi>>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    if let Err(status) = authorize(&api, &headers) {
        return status.into_response();
    }
    let status_filter = query.get("status").cloned();
    *api.last_query.write().unwrap() = query;
    Json(json!([
        sample_request(status_filter.as_deref().unwrap_or("PENDING"))
    ]))
    .into_response()
}

async fn record_multipart(api: &StubApi, multipart: &mut Multipart) -> (Vec<String>, Option<String>) {
    let mut fields = Vec::new();
    let mut status = None;
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        if name == "status" {
            status = field.text().await.ok();
        } else {
            let _ = field.bytes().await;
        }
        fields.push(name);
    }
    *api.last_multipart_fields.write().unwrap() = fields.clone();
    (fields, status)
}

async fn create_request(
    State(api): State<Arc<StubApi>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    if let Err(status) = authorize(&api, &headers) {
        return status.into_response();
    }
    record_multipart(&api, &mut multipart).await;
    (StatusCode::CREATED, Json(sample_request("PENDING"))).into_response()
}

async fn update_request(
    State(api): State<Arc<StubApi>>,
    Path(id): Path<u64>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    if let Err(status) = authorize(&api, &headers) {
        return status.into_response();
    }
    let (_, status) = record_multipart(&api, &mut multipart).await;
    let mut body = sample_request(status.as_deref().unwrap_or("PENDING"));
    body["id"] = json!(id);
    Json(body).into_response()
}

fn router(api: Arc<StubApi>) -> Router {
    Router::new()
        .route("/api/auth/login/", post(login))
        .route("/api/auth/register/", post(register))
        .route("/api/auth/token/refresh/", post(refresh))
        .route("/api/absences/", get(list_absences))
        .route("/api/absences/update/{id}/", put(update_absence))
        .route("/api/forgiveness-requests/", get(list_requests))
        .route("/api/forgiveness-requests/create/", post(create_request))
        .route("/api/forgiveness-requests/{id}/update/", put(update_request))
        .with_state(api)
}

/// Spawn the stub on an ephemeral port; returns its base URL.
pub async fn spawn_stub(api: Arc<StubApi>) -> String {
    init_tracing();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().expect("stub local addr");
    tokio::spawn(async move {
        axum::serve(listener, router(api)).await.expect("stub serve");
    });
    format!("http://{}", addr)
}

/// Unique on-disk session file for one test, cleaned before use.
pub fn temp_session_file(tag: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "attendance-client-test-{}-{}.json",
        tag,
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);
    path
}

/// Build a client against the stub with its own session file.
pub fn test_client(base_url: &str, tag: &str) -> ApiClient {
    let config = Config {
        api_base_url: base_url.to_string(),
        session_file: temp_session_file(tag),
        ..Config::default()
    };
    ApiClient::new(&config)
}
