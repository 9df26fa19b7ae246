// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// The derived identity of a participant.
///
/// A `ParticipantId` is a short deterministic hash of the participant's two
/// imported field values (see [`crate::derive_participant_id`]). It is the
/// primary key of the durable check-in state, and it is stable across process
/// restarts and re-imports of the same roster.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    /// Parses an externally supplied identity string.
    ///
    /// The value is accepted as-is; only empty or whitespace-only input is
    /// rejected. Whether the identity is present in the current roster is
    /// deliberately not validated here — check-in state may precede or
    /// outlive any given roster version.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyParticipantId`] if the input is empty or
    /// contains only whitespace.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed: &str = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyParticipantId);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Creates a participant ID from an already-derived value.
    #[must_use]
    pub(crate) const fn from_derived(value: String) -> Self {
        Self(value)
    }

    /// Returns the identity as a string slice.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single imported participant record.
///
/// Participants are created in bulk by an import, which replaces the entire
/// prior roster. They are never individually mutated; check-in state lives
/// separately, keyed by [`ParticipantId`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// The derived identity (primary key for check-in state).
    pub id: ParticipantId,
    /// The first configured field value (e.g. a name column).
    pub field1: String,
    /// The second configured field value.
    pub field2: String,
    /// Optional QR code value, when the import configured a QR column.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_code: Option<String>,
}

impl Participant {
    /// Creates a new participant record.
    #[must_use]
    pub const fn new(
        id: ParticipantId,
        field1: String,
        field2: String,
        qr_code: Option<String>,
    ) -> Self {
        Self {
            id,
            field1,
            field2,
            qr_code,
        }
    }
}

/// Durable check-in state for one participant identity.
///
/// An absent row is equivalent to the default: never checked in. Timestamps
/// are ISO 8601 strings; `checked_at` is `None` whenever `checked_in` is
/// false.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CheckinState {
    /// Whether the participant is currently checked in.
    pub checked_in: bool,
    /// Who performed the most recent check-in (last writer wins).
    pub checked_by: Option<String>,
    /// When the most recent check-in happened (ISO 8601).
    pub checked_at: Option<String>,
}

impl CheckinState {
    /// State for a participant checked in by `staff` at `timestamp`.
    #[must_use]
    pub const fn checked(staff: String, timestamp: String) -> Self {
        Self {
            checked_in: true,
            checked_by: Some(staff),
            checked_at: Some(timestamp),
        }
    }

    /// State for a participant who is not checked in.
    #[must_use]
    pub const fn cleared() -> Self {
        Self {
            checked_in: false,
            checked_by: None,
            checked_at: None,
        }
    }
}

/// Configuration recorded by the most recent import.
///
/// Replaced wholesale on each import; read-only between imports.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Header name mapped to `field1`.
    pub field1_name: String,
    /// Header name mapped to `field2`.
    pub field2_name: String,
    /// Whether a QR code column was configured.
    pub has_qr: bool,
    /// Header name mapped to the QR code column (empty when `has_qr` is
    /// false).
    pub qr_col_name: String,
    /// Number of participants produced by the import.
    pub total: usize,
    /// When the import happened (ISO 8601).
    pub uploaded_at: String,
    /// The name of the uploaded source file.
    pub source_filename: String,
}

/// The imported participant list together with its import configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Roster {
    /// Participants in sheet order.
    pub participants: Vec<Participant>,
    /// The active import configuration.
    pub config: ImportConfig,
}

impl Roster {
    /// Creates a roster from participants and the configuration that
    /// produced them.
    #[must_use]
    pub const fn new(participants: Vec<Participant>, config: ImportConfig) -> Self {
        Self {
            participants,
            config,
        }
    }

    /// An empty roster, used before anything has been imported.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }
}
