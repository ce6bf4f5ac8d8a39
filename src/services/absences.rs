// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Absence listing and marking.

use crate::error::Result;
use crate::gateway::ApiGateway;
use crate::models::absence::{Absence, AbsenceFilter, AbsenceUpdate};

#[derive(Clone)]
pub struct AbsenceService {
    gateway: ApiGateway,
}

impl AbsenceService {
    pub fn new(gateway: ApiGateway) -> Self {
        Self { gateway }
    }

    /// List absences, optionally filtered by student or date.
    pub async fn list(&self, filter: &AbsenceFilter) -> Result<Vec<Absence>> {
        let url = self.gateway.url("/api/absences/");

        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(student) = filter.student {
            query.push(("student", student.to_string()));
        }
        if let Some(date) = filter.date {
            query.push(("date", date.to_string()));
        }

        self.gateway.json(|http| http.get(&url).query(&query)).await
    }

    /// Mark or unmark an absence.
    ///
    /// The backend accepts the update both with and without an explicit
    /// absence ID in the path; without one it resolves the row from
    /// `user_id` and `discipline` in the body.
    pub async fn update(&self, absence_id: Option<u64>, update: &AbsenceUpdate) -> Result<Absence> {
        let path = match absence_id {
            Some(id) => format!("/api/absences/update/{}/", id),
            None => "/api/absences/update/".to_string(),
        };
        let url = self.gateway.url(&path);

        self.gateway.json(|http| http.put(&url).json(update)).await
    }
}
