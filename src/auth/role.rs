// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Role enumeration and the access-decision function used by view gating.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of roles the backend issues with a login response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Professor,
    Admin,
}

/// Roles allowed to manage absences and review forgiveness requests.
pub const STAFF: &[Role] = &[Role::Professor, Role::Admin];

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Professor => "professor",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for role strings outside the closed set.
#[derive(Debug, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Role::Student),
            "professor" => Ok(Role::Professor),
            "admin" => Ok(Role::Admin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// Single authorization decision point for routing and in-page gating.
///
/// An absent role is always denied. An empty `required` set means "any
/// authenticated role"; every gated view requires at least a valid session.
/// This function never touches the credential store; a wrong-role visit is
/// not a logout.
pub fn can_access(required: &[Role], current: Option<Role>) -> bool {
    match current {
        None => false,
        Some(role) => required.is_empty() || required.contains(&role),
    }
}
