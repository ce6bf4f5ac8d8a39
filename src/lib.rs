// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Typed async client for the school attendance-tracking API.
//!
//! The crate owns the session lifecycle (credential persistence, login and
//! logout, single-flight token refresh with one retry on 401) and exposes
//! typed services for the absence and forgiveness-request endpoints. View
//! code consumes the [`ApiClient`] facade and a read-only session snapshot;
//! it never reads durable storage or issues raw HTTP itself.

pub mod auth;
pub mod config;
pub mod error;
pub mod gateway;
pub mod models;
pub mod services;

use auth::session::SessionManager;
use auth::store::CredentialStore;
use config::Config;
use gateway::ApiGateway;
use services::{AbsenceService, AccountService, ForgivenessService};

/// One wired-up client: shared HTTP connection pool, one session, and the
/// domain services bound to it.
#[derive(Clone)]
pub struct ApiClient {
    pub session: SessionManager,
    pub account: AccountService,
    pub absences: AbsenceService,
    pub forgiveness: ForgivenessService,
}

impl ApiClient {
    pub fn new(config: &Config) -> Self {
        let http = reqwest::Client::new();
        let store = CredentialStore::new(config.session_file.clone());
        let session = SessionManager::new(store);
        let gateway = ApiGateway::new(http.clone(), config, session.clone());

        Self {
            account: AccountService::new(http, config, session.clone()),
            absences: AbsenceService::new(gateway.clone()),
            forgiveness: ForgivenessService::new(gateway),
            session,
        }
    }
}
