// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session state derived from the credential store.
//!
//! The session manager is the only writer of credential state: `login`,
//! `logout`, and the gateway-internal refresh paths all funnel through here.
//! That single-writer discipline is what makes the single-flight refresh safe
//! without extra locking around the store.

use crate::auth::role::Role;
use crate::auth::store::{Credential, CredentialStore};
use crate::error::{ApiError, Result};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Two-state session: `Anonymous` or `Authenticated(role)`.
///
/// The in-memory snapshot is hydrated from the store at construction and kept
/// in sync with it on every transition. Reads (`is_authenticated`,
/// `current_role`, token accessors) never touch disk.
#[derive(Clone)]
pub struct SessionManager {
    store: CredentialStore,
    current: Arc<RwLock<Option<Credential>>>,
}

impl SessionManager {
    /// Hydrate from the store. An unreadable store reads as "no session."
    pub fn new(store: CredentialStore) -> Self {
        let current = store.load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Session storage unreadable, starting anonymous");
            None
        });

        Self {
            store,
            current: Arc::new(RwLock::new(current)),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Option<Credential>> {
        self.current.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<Credential>> {
        self.current.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record a successful login. No network call happens here; this runs
    /// only after the API has already returned tokens.
    pub fn login(
        &self,
        username: &str,
        access_token: &str,
        refresh_token: &str,
        role: Role,
    ) -> Result<()> {
        let credential = Credential {
            username: username.to_string(),
            access_token: access_token.to_string(),
            refresh_token: refresh_token.to_string(),
            role,
        };

        self.store.save(&credential)?;
        *self.write() = Some(credential);
        tracing::info!(username, role = %role, "Logged in");
        Ok(())
    }

    /// Return to `Anonymous`, clearing the store unconditionally.
    ///
    /// Any in-flight refresh is abandoned: when it settles, `apply_refresh`
    /// re-checks authentication state and refuses to resurrect the session.
    pub fn logout(&self) {
        if let Err(e) = self.store.clear() {
            tracing::warn!(error = %e, "Failed to clear session storage on logout");
        }
        *self.write() = None;
        tracing::info!("Logged out");
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_some()
    }

    pub fn current_role(&self) -> Option<Role> {
        self.read().as_ref().map(|c| c.role)
    }

    pub fn username(&self) -> Option<String> {
        self.read().as_ref().map(|c| c.username.clone())
    }

    pub fn access_token(&self) -> Option<String> {
        self.read().as_ref().map(|c| c.access_token.clone())
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.read().as_ref().map(|c| c.refresh_token.clone())
    }

    /// Read-only snapshot of the whole credential, for display code.
    pub fn snapshot(&self) -> Option<Credential> {
        self.read().clone()
    }

    /// Refresh-success transition: swap in the new access token, keep the
    /// role, rotate the refresh token only if the backend sent one.
    ///
    /// Fails with `SessionExpired` when the session was logged out while the
    /// refresh was in flight.
    pub(crate) fn apply_refresh(
        &self,
        new_access: &str,
        rotated_refresh: Option<&str>,
    ) -> Result<()> {
        let mut guard = self.write();
        let credential = guard.as_mut().ok_or(ApiError::SessionExpired)?;

        credential.access_token = new_access.to_string();
        if let Some(refresh) = rotated_refresh {
            credential.refresh_token = refresh.to_string();
        }

        self.store.save(credential)?;
        tracing::info!(username = %credential.username, "Access token refreshed");
        Ok(())
    }

    /// Refresh-failure transition: same end state as logout.
    pub(crate) fn expire(&self) {
        if let Err(e) = self.store.clear() {
            tracing::warn!(error = %e, "Failed to clear session storage on expiry");
        }
        *self.write() = None;
        tracing::warn!("Session expired, credential cleared");
    }
}
