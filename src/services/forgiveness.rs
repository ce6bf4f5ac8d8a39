// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Forgiveness request submission and review.
//!
//! Creation and review updates are multipart uploads because they can carry
//! a justification document. The file bytes live in the payload structs so
//! the gateway can rebuild the form if the request is retried after a token
//! refresh.

use crate::error::Result;
use crate::gateway::ApiGateway;
use crate::models::forgiveness::{ForgivenessRequest, RequestStatus};
use reqwest::multipart::{Form, Part};

/// A justification document to upload alongside a request.
#[derive(Debug, Clone)]
pub struct JustificationFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl JustificationFile {
    fn to_part(&self) -> Part {
        Part::bytes(self.bytes.clone()).file_name(self.file_name.clone())
    }
}

/// Body for `PUT /api/forgiveness-requests/:id/update/`.
#[derive(Debug, Clone)]
pub struct ForgivenessUpdate {
    pub absence: u64,
    pub status: RequestStatus,
    pub comments: Option<String>,
    /// Replacement document; omitted to keep the original upload
    pub justification_file: Option<JustificationFile>,
}

#[derive(Clone)]
pub struct ForgivenessService {
    gateway: ApiGateway,
}

impl ForgivenessService {
    pub fn new(gateway: ApiGateway) -> Self {
        Self { gateway }
    }

    /// List forgiveness requests, optionally filtered by status.
    ///
    /// Professors review the pending queue (`Some(Pending)`); admins pass
    /// `None` to see everything. The backend additionally scopes results by
    /// the caller's role.
    pub async fn list(&self, status: Option<RequestStatus>) -> Result<Vec<ForgivenessRequest>> {
        let url = self.gateway.url("/api/forgiveness-requests/");

        let query: Vec<(&str, String)> = match status {
            Some(status) => vec![("status", status.to_string())],
            None => Vec::new(),
        };

        self.gateway.json(|http| http.get(&url).query(&query)).await
    }

    /// Submit a new request for an absence, with its justification document.
    pub async fn create(
        &self,
        absence: u64,
        file: &JustificationFile,
    ) -> Result<ForgivenessRequest> {
        let url = self.gateway.url("/api/forgiveness-requests/create/");

        self.gateway
            .json(|http| {
                let form = Form::new()
                    .text("absence", absence.to_string())
                    .part("justification_file", file.to_part());
                http.post(&url).multipart(form)
            })
            .await
    }

    /// Review a request: set its status and comments, optionally replacing
    /// the document.
    pub async fn update(
        &self,
        request_id: u64,
        update: &ForgivenessUpdate,
    ) -> Result<ForgivenessRequest> {
        let url = self
            .gateway
            .url(&format!("/api/forgiveness-requests/{}/update/", request_id));

        self.gateway
            .json(|http| {
                let mut form = Form::new()
                    .text("absence", update.absence.to_string())
                    .text("status", update.status.to_string());
                if let Some(comments) = &update.comments {
                    form = form.text("comments", comments.clone());
                }
                if let Some(file) = &update.justification_file {
                    form = form.part("justification_file", file.to_part());
                }
                http.put(&url).multipart(form)
            })
            .await
    }
}
