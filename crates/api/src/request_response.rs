// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response payloads for the HTTP API.

use rollcall::ProjectionEntry;
use rollcall_domain::ImportConfig;
use serde::{Deserialize, Serialize};

/// A roster upload: CSV text plus the column configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportRequest {
    /// The CSV file contents.
    pub data: String,
    /// Header name of the first identity column.
    pub field1_name: String,
    /// Header name of the second identity column.
    pub field2_name: String,
    /// Whether a QR code column should be read.
    #[serde(default)]
    pub has_qr: bool,
    /// Header name of the QR code column (required when `has_qr` is true).
    #[serde(default)]
    pub qr_col_name: Option<String>,
    /// The uploaded file's name, for display and export.
    #[serde(default)]
    pub source_filename: Option<String>,
}

/// Response to a successful import.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportResponse {
    /// Number of participants imported.
    pub total: usize,
    /// The configuration now in effect.
    pub config: ImportConfig,
}

/// Request to check a participant in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckinRequest {
    /// The participant's derived identity.
    pub participant_id: String,
    /// The staff member performing the check-in. Attributed to `"Unknown"`
    /// when absent.
    #[serde(default)]
    pub staff: Option<String>,
}

/// Request to undo a participant's check-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UncheckRequest {
    /// The participant's derived identity.
    pub participant_id: String,
}

/// Response to a participants query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantsResponse {
    /// Matching projection rows, in roster order.
    pub participants: Vec<ProjectionEntry>,
    /// Number of rows returned.
    pub total: usize,
    /// The import configuration in effect.
    pub config: ImportConfig,
}

/// Response to a reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetResponse {
    /// Number of check-in rows deleted.
    pub deleted: usize,
}
