// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API operations for the Rollcall check-in system.
//!
//! This crate sits between the HTTP surface and the domain: it validates
//! raw request input, parses roster uploads, renders exports, and guards
//! mutating operations behind the optional admin credential. It performs
//! no I/O of its own — durable writes and broadcasts belong to the server.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod clock;
mod error;
mod export;
mod import;
mod ops;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::AdminCredential;
pub use clock::now_iso8601;
pub use error::{ApiError, AuthError};
pub use export::export_csv;
pub use import::{ImportError, parse_roster};
pub use ops::{check_in, uncheck};
pub use request_response::{
    CheckinRequest, ImportRequest, ImportResponse, ParticipantsResponse, ResetResponse,
    UncheckRequest,
};
