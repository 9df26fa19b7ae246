// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV export of the current check-in projection.

use rollcall::ProjectionEntry;
use rollcall_domain::ImportConfig;

use crate::error::ApiError;

fn internal(message: String) -> ApiError {
    ApiError::InternalError { message }
}

/// Renders the projection as CSV text.
///
/// Column headers reuse the names configured at import time, so the export
/// reads like the uploaded sheet with check-in columns appended. The QR
/// column appears only when the import configured one.
///
/// # Arguments
///
/// * `entries` - The projection rows to export, in roster order
/// * `config` - The active import configuration
///
/// # Errors
///
/// Returns an error if CSV serialization fails.
pub fn export_csv(entries: &[ProjectionEntry], config: &ImportConfig) -> Result<String, ApiError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut headers: Vec<&str> = vec![config.field1_name.as_str(), config.field2_name.as_str()];
    if config.has_qr {
        headers.push(config.qr_col_name.as_str());
    }
    headers.extend(["Checked In", "Checked By", "Checked At"]);
    writer
        .write_record(&headers)
        .map_err(|e| internal(e.to_string()))?;

    for entry in entries {
        let mut row: Vec<String> = vec![
            entry.participant.field1.clone(),
            entry.participant.field2.clone(),
        ];
        if config.has_qr {
            row.push(entry.participant.qr_code.clone().unwrap_or_default());
        }
        row.push(String::from(if entry.state.checked_in { "Yes" } else { "No" }));
        row.push(entry.state.checked_by.clone().unwrap_or_default());
        row.push(entry.state.checked_at.clone().unwrap_or_default());

        writer
            .write_record(&row)
            .map_err(|e| internal(e.to_string()))?;
    }

    let bytes: Vec<u8> = writer
        .into_inner()
        .map_err(|e| internal(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| internal(e.to_string()))
}
