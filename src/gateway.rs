// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Authenticated request gateway.
//!
//! Every authenticated call goes through here: the gateway attaches the
//! bearer token, and on a 401 runs the refresh-and-retry protocol. Callers
//! hand over a request-builder closure rather than a finished request so the
//! gateway can rebuild the request for the single retry (multipart bodies
//! cannot be cloned).
//!
//! The refresh is single-flight: one `tokio::sync::Mutex` serializes refresh
//! attempts, and waiters re-check the stored token after acquiring the lock.
//! However many concurrent requests hit 401 at once, exactly one refresh call
//! reaches the network and every waiter retries with the same new token.

use crate::auth::session::SessionManager;
use crate::config::Config;
use crate::error::{ApiError, Result};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Refresh endpoint response. The backend may rotate the refresh token.
#[derive(Debug, Clone, Deserialize)]
struct RefreshResponse {
    access: String,
    #[serde(default)]
    refresh: Option<String>,
}

/// Gateway over a shared `reqwest::Client`, bound to one session.
#[derive(Clone)]
pub struct ApiGateway {
    http: reqwest::Client,
    base_url: String,
    refresh_path: String,
    session: SessionManager,
    /// Serializes token refreshes across concurrent requests.
    refresh_lock: Arc<Mutex<()>>,
}

impl ApiGateway {
    pub fn new(http: reqwest::Client, config: &Config, session: SessionManager) -> Self {
        Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            refresh_path: config.refresh_path.clone(),
            session,
            refresh_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Join an API path onto the configured base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Authenticated request returning a decoded JSON body.
    pub async fn json<T, F>(&self, make: F) -> Result<T>
    where
        T: DeserializeOwned,
        F: Fn(&reqwest::Client) -> RequestBuilder,
    {
        let response = self.send(make).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    /// Authenticated request returning the raw successful response.
    ///
    /// Fails fast with `Unauthenticated` when no session exists; the call
    /// never reaches the network. A 401 triggers the refresh protocol and at
    /// most one retry; any other error status is surfaced as `RequestFailed`
    /// with the session untouched.
    pub async fn send<F>(&self, make: F) -> Result<Response>
    where
        F: Fn(&reqwest::Client) -> RequestBuilder,
    {
        let token = self
            .session
            .access_token()
            .ok_or(ApiError::Unauthenticated)?;

        let response = self.dispatch(&make, &token).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Self::check_response(response).await;
        }

        let retry_token = self.refresh_after_rejection(&token).await?;

        let response = self.dispatch(&make, &retry_token).await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            // The freshly refreshed token was rejected too; give up.
            self.session.expire();
            return Err(ApiError::SessionExpired);
        }
        Self::check_response(response).await
    }

    async fn dispatch<F>(&self, make: &F, token: &str) -> Result<Response>
    where
        F: Fn(&reqwest::Client) -> RequestBuilder,
    {
        // bearer_auth is applied after the caller's builder ran, so caller
        // headers cannot unset Authorization
        make(&self.http)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))
    }

    /// Resolve a 401: join the in-flight refresh or start one, and return the
    /// token to retry with.
    async fn refresh_after_rejection(&self, rejected_token: &str) -> Result<String> {
        let _guard = self.refresh_lock.lock().await;

        // Re-check after acquiring the lock: a waiter that queued behind the
        // winning refresh sees the rotated token and skips straight to its
        // retry. A cleared session means the refresh we waited on failed.
        match self.session.access_token() {
            Some(current) if current != rejected_token => return Ok(current),
            Some(_) => {}
            None => return Err(ApiError::SessionExpired),
        }

        let refresh_token = match self.session.refresh_token() {
            Some(token) => token,
            None => return Err(ApiError::SessionExpired),
        };

        match self.call_refresh_endpoint(&refresh_token).await {
            Ok(tokens) => {
                self.session
                    .apply_refresh(&tokens.access, tokens.refresh.as_deref())?;
                Ok(tokens.access)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Token refresh failed, clearing session");
                self.session.expire();
                Err(ApiError::SessionExpired)
            }
        }
    }

    /// The refresh call itself is unauthenticated; it carries only the
    /// refresh token.
    async fn call_refresh_endpoint(&self, refresh_token: &str) -> Result<RefreshResponse> {
        let response = self
            .http
            .post(self.url(&self.refresh_path))
            .json(&serde_json::json!({ "refresh": refresh_token }))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::RequestFailed { status, body });
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    /// Map non-2xx statuses to `RequestFailed`.
    async fn check_response(response: Response) -> Result<Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::RequestFailed { status, body })
    }
}
