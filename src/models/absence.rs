// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Absence model and request payloads.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A recorded absence for one student in one discipline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Absence {
    pub id: u64,
    /// Student user ID the absence belongs to
    pub student: u64,
    pub discipline: String,
    pub date: NaiveDate,
    /// Free-text reason, if the professor recorded one
    pub reason: Option<String>,
    pub is_absent: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body for `PUT /api/absences/update/`.
#[derive(Debug, Clone, Serialize)]
pub struct AbsenceUpdate {
    pub user_id: u64,
    pub discipline: String,
    pub is_absent: bool,
    pub reason: Option<String>,
}

/// Query filter for `GET /api/absences/`.
///
/// Students list their own absences (no filter, the backend scopes by the
/// token); staff filter by student or by date.
#[derive(Debug, Clone, Default)]
pub struct AbsenceFilter {
    pub student: Option<u64>,
    pub date: Option<NaiveDate>,
}
