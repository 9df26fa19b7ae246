// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Roster import from uploaded CSV data.
//!
//! The uploader names which columns hold the two identity fields (and
//! optionally a QR code column); everything else in the file is ignored.
//! Parsing produces a [`Roster`] without touching any stored state.

use std::collections::HashMap;

use csv::{ReaderBuilder, StringRecord};
use rollcall_domain::{ImportConfig, Participant, ParticipantId, Roster, derive_participant_id};
use thiserror::Error;
use tracing::warn;

use crate::clock;
use crate::error::ApiError;
use crate::request_response::ImportRequest;

/// Errors produced while parsing an uploaded roster file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    /// A configured column is missing from the file's header row.
    #[error("Column '{column}' not found. Available columns: {}", available.join(", "))]
    ColumnNotFound {
        /// The column name that was requested.
        column: String,
        /// The columns the uploaded file actually has.
        available: Vec<String>,
    },
    /// The file could not be parsed as CSV.
    #[error("CSV parse error: {reason}")]
    Csv {
        /// The underlying parse failure.
        reason: String,
    },
}

/// Normalizes a header string for case-insensitive, whitespace-tolerant
/// matching.
fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase()
}

/// Resolves a configured column name against the file's header row.
fn find_column(
    header_map: &HashMap<String, usize>,
    available: &[String],
    column: &str,
) -> Result<usize, ImportError> {
    header_map
        .get(&normalize_header(column))
        .copied()
        .ok_or_else(|| ImportError::ColumnNotFound {
            column: column.trim().to_string(),
            available: available.to_vec(),
        })
}

/// Parses uploaded CSV data into a roster.
///
/// Rows blank in both configured columns are skipped; a file whose rows are
/// all blank yields an empty roster. When two rows derive the same identity,
/// the later row wins; the earlier row's position in the roster is kept and
/// a warning is logged.
///
/// # Arguments
///
/// * `request` - The upload payload with its column configuration
///
/// # Errors
///
/// Returns an error if a configured column is missing or the data is not
/// valid CSV.
pub fn parse_roster(request: &ImportRequest) -> Result<Roster, ApiError> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_reader(request.data.as_bytes());

    let headers: StringRecord = reader
        .headers()
        .map_err(|e| ImportError::Csv {
            reason: e.to_string(),
        })?
        .clone();

    let available: Vec<String> = headers.iter().map(|h| h.trim().to_string()).collect();
    let mut header_map: HashMap<String, usize> = HashMap::new();
    for (idx, header) in headers.iter().enumerate() {
        header_map.insert(normalize_header(header), idx);
    }

    let field1_idx: usize = find_column(&header_map, &available, &request.field1_name)?;
    let field2_idx: usize = find_column(&header_map, &available, &request.field2_name)?;

    let qr_idx: Option<usize> = if request.has_qr {
        let qr_col_name: &str =
            request
                .qr_col_name
                .as_deref()
                .ok_or_else(|| ApiError::InvalidInput {
                    field: String::from("qr_col_name"),
                    message: String::from("required when has_qr is true"),
                })?;
        Some(find_column(&header_map, &available, qr_col_name)?)
    } else {
        None
    };

    let mut participants: Vec<Participant> = Vec::new();
    let mut seen: HashMap<ParticipantId, usize> = HashMap::new();

    for record in reader.records() {
        let record: StringRecord = record.map_err(|e| ImportError::Csv {
            reason: e.to_string(),
        })?;

        let field1: String = record.get(field1_idx).unwrap_or("").trim().to_string();
        let field2: String = record.get(field2_idx).unwrap_or("").trim().to_string();

        // Rows blank in both configured columns carry no identity.
        if field1.is_empty() && field2.is_empty() {
            continue;
        }

        let qr_code: Option<String> = qr_idx
            .and_then(|idx| record.get(idx))
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        let id: ParticipantId = derive_participant_id(&field1, &field2);
        let participant: Participant = Participant::new(id.clone(), field1, field2, qr_code);

        if let Some(&position) = seen.get(&id) {
            warn!(
                participant_id = id.value(),
                "Duplicate identity in upload; keeping the later row"
            );
            participants[position] = participant;
        } else {
            seen.insert(id, participants.len());
            participants.push(participant);
        }
    }

    let config: ImportConfig = ImportConfig {
        field1_name: request.field1_name.trim().to_string(),
        field2_name: request.field2_name.trim().to_string(),
        has_qr: request.has_qr,
        qr_col_name: request
            .qr_col_name
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string(),
        total: participants.len(),
        uploaded_at: clock::now_iso8601()?,
        source_filename: request
            .source_filename
            .clone()
            .unwrap_or_else(|| String::from("upload.csv")),
    };

    Ok(Roster::new(participants, config))
}
