// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Account service: login, registration, logout.
//!
//! Login and registration are the two calls that run without a session, so
//! this service talks to the HTTP client directly instead of going through
//! the gateway. On a successful login it hands the returned tokens to the
//! session manager; it never touches the credential store itself.

use crate::auth::role::Role;
use crate::auth::session::SessionManager;
use crate::config::Config;
use crate::error::{ApiError, Result};
use serde::{Deserialize, Serialize};

/// Login response from `POST /api/auth/login/`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access: String,
    pub refresh: String,
    pub role: Role,
}

/// Body for `POST /api/auth/register/`. Registration is open: the backend
/// accepts it without a session.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterPayload {
    pub username: String,
    pub name: String,
    pub password: String,
    pub email: String,
    pub role: Role,
}

#[derive(Clone)]
pub struct AccountService {
    http: reqwest::Client,
    base_url: String,
    session: SessionManager,
}

impl AccountService {
    pub fn new(http: reqwest::Client, config: &Config, session: SessionManager) -> Self {
        Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    /// Exchange credentials for tokens and open a session.
    pub async fn login(&self, username: &str, password: &str) -> Result<Role> {
        let response = self
            .http
            .post(format!("{}/api/auth/login/", self.base_url))
            .json(&serde_json::json!({
                "username": username,
                "password": password,
            }))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::RequestFailed { status, body });
        }

        let tokens: LoginResponse = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;

        self.session
            .login(username, &tokens.access, &tokens.refresh, tokens.role)?;
        Ok(tokens.role)
    }

    /// Create an account. Does not open a session.
    pub async fn register(&self, payload: &RegisterPayload) -> Result<()> {
        let response = self
            .http
            .post(format!("{}/api/auth/register/", self.base_url))
            .json(payload)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::RequestFailed { status, body });
        }
        Ok(())
    }

    /// Drop the session. Purely local; no network call.
    pub fn logout(&self) {
        self.session.logout();
    }
}
