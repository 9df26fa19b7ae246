// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::error::ApiError;

/// Returns the current UTC time as an ISO 8601 string.
///
/// # Errors
///
/// Returns an error if the timestamp cannot be formatted.
pub fn now_iso8601() -> Result<String, ApiError> {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|e| ApiError::InternalError {
            message: format!("Failed to format timestamp: {e}"),
        })
}
