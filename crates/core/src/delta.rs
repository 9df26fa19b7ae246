// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rollcall_domain::{CheckinState, ParticipantId};
use serde::{Deserialize, Serialize};

/// A single check-in state change.
///
/// A delta is produced by a successful check-in or uncheck request. It is
/// applied to the [`crate::StateCache`] after the corresponding durable write
/// has been confirmed, and it is the payload fanned out to live observers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckinDelta {
    /// The participant identity the change applies to.
    pub participant_id: ParticipantId,
    /// The new checked-in flag.
    pub checked_in: bool,
    /// Who performed the change (`None` for uncheck).
    pub checked_by: Option<String>,
    /// When the change happened, ISO 8601 (`None` for uncheck).
    pub checked_at: Option<String>,
}

impl CheckinDelta {
    /// A delta marking a participant as checked in.
    #[must_use]
    pub const fn checked_in(participant_id: ParticipantId, staff: String, timestamp: String) -> Self {
        Self {
            participant_id,
            checked_in: true,
            checked_by: Some(staff),
            checked_at: Some(timestamp),
        }
    }

    /// A delta clearing a participant's check-in.
    #[must_use]
    pub const fn unchecked(participant_id: ParticipantId) -> Self {
        Self {
            participant_id,
            checked_in: false,
            checked_by: None,
            checked_at: None,
        }
    }

    /// The check-in state this delta resolves to.
    #[must_use]
    pub fn to_state(&self) -> CheckinState {
        CheckinState {
            checked_in: self.checked_in,
            checked_by: self.checked_by.clone(),
            checked_at: self.checked_at.clone(),
        }
    }
}
