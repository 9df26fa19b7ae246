// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The in-memory check-in projection.
//!
//! The cache joins the imported roster with the durable check-in snapshot
//! into a read-optimized list. It is a performance optimization, never an
//! independent source of truth: its contents are always re-derivable from
//! the roster and the durable store, and the incremental patch path
//! ([`StateCache::apply_checkin`]) must reach exactly the state a full
//! [`StateCache::rebuild`] would.
//!
//! The cache itself is synchronous and lock-free; callers are expected to
//! wrap it in a single exclusion mechanism and hold that exclusion across
//! every durable-write → patch → broadcast sequence.

use std::collections::HashMap;

use rollcall_domain::{CheckinState, ImportConfig, ParticipantId, Roster};
use serde::{Deserialize, Serialize};

use crate::delta::CheckinDelta;

/// One row of the cached projection: a participant record with its check-in
/// state overlaid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionEntry {
    /// The immutable participant record.
    #[serde(flatten)]
    pub participant: rollcall_domain::Participant,
    /// The overlaid check-in state (default when no durable row exists).
    #[serde(flatten)]
    pub state: CheckinState,
}

impl ProjectionEntry {
    /// Returns true when any of the participant's searchable values contains
    /// `needle` case-insensitively. `needle` must already be lower-cased.
    fn matches(&self, needle: &str) -> bool {
        self.participant.field1.to_lowercase().contains(needle)
            || self.participant.field2.to_lowercase().contains(needle)
            || self
                .participant
                .qr_code
                .as_ref()
                .is_some_and(|qr| qr.to_lowercase().contains(needle))
    }
}

/// The in-memory projection of roster ⋈ durable check-in state.
///
/// Mutations come in two flavors with one required convergence property:
/// wholesale [`StateCache::rebuild`] after import/reset, and incremental
/// [`StateCache::apply_checkin`] after a single confirmed durable write.
#[derive(Debug, Default)]
pub struct StateCache {
    /// Projection rows in roster order.
    entries: Vec<ProjectionEntry>,
    /// Identity → index into `entries`, for O(1) incremental patches.
    index: HashMap<ParticipantId, usize>,
    /// The active import configuration.
    config: ImportConfig,
}

impl StateCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recomputes the full projection from a roster and a durable snapshot.
    ///
    /// The replacement structure is built aside and swapped in whole, so no
    /// reader of the previous generation ever observes a half-built list.
    /// O(roster size).
    pub fn rebuild(&mut self, roster: &Roster, snapshot: &HashMap<ParticipantId, CheckinState>) {
        let mut entries: Vec<ProjectionEntry> = Vec::with_capacity(roster.participants.len());
        let mut index: HashMap<ParticipantId, usize> =
            HashMap::with_capacity(roster.participants.len());

        for participant in &roster.participants {
            let state: CheckinState = snapshot
                .get(&participant.id)
                .cloned()
                .unwrap_or_default();
            index.insert(participant.id.clone(), entries.len());
            entries.push(ProjectionEntry {
                participant: participant.clone(),
                state,
            });
        }

        self.entries = entries;
        self.index = index;
        self.config = roster.config.clone();
    }

    /// Patches the single matching entry in place.
    ///
    /// A delta for an identity absent from the current roster is a silent
    /// no-op: the state may still have been durably written, and a later
    /// rebuild against a roster containing that identity will surface it.
    pub fn apply_checkin(&mut self, delta: &CheckinDelta) {
        if let Some(&position) = self.index.get(&delta.participant_id)
            && let Some(entry) = self.entries.get_mut(position)
        {
            entry.state = delta.to_state();
        }
    }

    /// Returns the projection, optionally filtered by a search query.
    ///
    /// An empty or absent query returns the full projection in roster order.
    /// A non-empty query returns only entries whose field1, field2, or QR
    /// code contains it as a case-insensitive substring.
    #[must_use]
    pub fn list(&self, query: Option<&str>) -> Vec<ProjectionEntry> {
        let needle: Option<String> = query
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase);

        match needle {
            None => self.entries.clone(),
            Some(needle) => self
                .entries
                .iter()
                .filter(|entry| entry.matches(&needle))
                .cloned()
                .collect(),
        }
    }

    /// The active import configuration.
    #[must_use]
    pub const fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// Number of participants in the projection.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no roster has been imported (or it was empty).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
