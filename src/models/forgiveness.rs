// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Forgiveness request model: a student-submitted justification for a
//! recorded absence, reviewed by staff.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Review status of a forgiveness request. Wire form is UPPERCASE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "PENDING",
            RequestStatus::Approved => "APPROVED",
            RequestStatus::Rejected => "REJECTED",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A forgiveness request tied to one absence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForgivenessRequest {
    pub id: u64,
    /// Absence ID this request justifies
    pub absence: u64,
    /// Server-side URL of the uploaded justification document
    pub justification_file: Option<String>,
    pub status: RequestStatus,
    /// Reviewer comments, filled in on approval or rejection
    pub comments: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}
