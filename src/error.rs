// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client error types shared across the session layer and domain services.

/// Error taxonomy for authenticated API calls.
///
/// The gateway resolves 401 handling internally: callers never observe a raw
/// 401, only `SessionExpired` (after a failed refresh or a rejected retry) or
/// a successful payload. `RequestFailed` and `Network` leave the session
/// untouched.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No local session; the request was never sent.
    #[error("no active session")]
    Unauthenticated,

    /// The refresh protocol ran and failed; the session has been cleared.
    #[error("session expired")]
    SessionExpired,

    /// The server rejected the request for a non-auth reason.
    #[error("request failed with status {status}: {body}")]
    RequestFailed { status: u16, body: String },

    /// Transport-level failure before a response arrived.
    #[error("network error: {0}")]
    Network(String),

    /// Durable session storage is inaccessible; treated as "no session."
    #[error("session storage unavailable: {0}")]
    Storage(String),

    /// The server answered 2xx but the body did not decode.
    #[error("invalid response body: {0}")]
    InvalidResponse(String),
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ApiError>;
