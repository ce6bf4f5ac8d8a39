// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Domain services over the attendance API.

pub mod absences;
pub mod account;
pub mod forgiveness;

pub use absences::AbsenceService;
pub use account::{AccountService, LoginResponse, RegisterPayload};
pub use forgiveness::{ForgivenessService, ForgivenessUpdate, JustificationFile};
