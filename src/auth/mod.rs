// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session and authorization modules (credential storage, session state, roles).

pub mod role;
pub mod session;
pub mod store;

pub use role::{can_access, Role, UnknownRole, STAFF};
pub use session::SessionManager;
pub use store::{Credential, CredentialStore};
