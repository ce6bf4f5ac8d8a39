// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Durable credential storage.
//!
//! The store is a single JSON file on disk, the client-side analog of the
//! browser storage the web frontend used. A credential is saved and cleared
//! wholesale; there is no partial state where a token exists without a role.

use crate::auth::role::Role;
use crate::error::{ApiError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// A complete saved session: all four fields are present together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub username: String,
    pub access_token: String,
    pub refresh_token: String,
    pub role: Role,
}

/// File-backed credential store.
///
/// Tokens are opaque strings; the store does not validate their contents.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Persist a credential, replacing any prior value.
    ///
    /// Writes to a sibling temp file and renames over the target so a crash
    /// mid-write never leaves a half-written credential behind.
    pub fn save(&self, credential: &Credential) -> Result<()> {
        let json = serde_json::to_vec_pretty(credential)
            .map_err(|e| ApiError::Storage(e.to_string()))?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, &json).map_err(|e| ApiError::Storage(e.to_string()))?;
        fs::rename(&tmp, &self.path).map_err(|e| ApiError::Storage(e.to_string()))
    }

    /// Return the last-saved credential, or `None` if never saved or cleared.
    pub fn load(&self) -> Result<Option<Credential>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ApiError::Storage(e.to_string())),
        };

        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| ApiError::Storage(e.to_string()))
    }

    /// Erase the persisted credential; subsequent loads return `None`.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ApiError::Storage(e.to_string())),
        }
    }
}
