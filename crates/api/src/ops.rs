// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Check-in and uncheck operations.
//!
//! These validate raw request input and produce the [`CheckinDelta`] that
//! the server durably writes, applies to the cache, and broadcasts — in
//! that order, under one exclusion.

use rollcall::CheckinDelta;
use rollcall_domain::ParticipantId;

use crate::clock;
use crate::error::ApiError;

/// Name attributed to a check-in when no staff member is given.
const UNKNOWN_STAFF: &str = "Unknown";

/// Validates a check-in request and produces its delta.
///
/// The delta carries attribution (who, when). A missing or blank staff
/// name is attributed to `"Unknown"`. Repeating a check-in for an
/// already-checked-in participant is allowed; the last writer wins.
///
/// # Arguments
///
/// * `raw_id` - The participant identity from the request
/// * `staff` - The staff member performing the check-in, if named
///
/// # Errors
///
/// Returns an error if the identity is empty.
pub fn check_in(raw_id: &str, staff: Option<&str>) -> Result<CheckinDelta, ApiError> {
    let participant_id: ParticipantId = ParticipantId::parse(raw_id)?;

    let staff: String = staff
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(UNKNOWN_STAFF)
        .to_string();

    let timestamp: String = clock::now_iso8601()?;

    Ok(CheckinDelta::checked_in(participant_id, staff, timestamp))
}

/// Validates an uncheck request and produces its delta.
///
/// Unchecking clears attribution entirely; it does not preserve who had
/// checked the participant in.
///
/// # Arguments
///
/// * `raw_id` - The participant identity from the request
///
/// # Errors
///
/// Returns an error if the identity is empty.
pub fn uncheck(raw_id: &str) -> Result<CheckinDelta, ApiError> {
    let participant_id: ParticipantId = ParticipantId::parse(raw_id)?;
    Ok(CheckinDelta::unchecked(participant_id))
}
