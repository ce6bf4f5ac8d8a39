// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the attendance API.

pub mod absence;
pub mod forgiveness;

pub use absence::{Absence, AbsenceFilter, AbsenceUpdate};
pub use forgiveness::{ForgivenessRequest, RequestStatus};
