// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::HashMap;

use rollcall_domain::{CheckinState, ParticipantId};
use rusqlite::{Connection, params};
use tracing::debug;

use crate::error::PersistenceError;

/// Writes a participant's check-in state, inserting or updating as needed.
///
/// The upsert is idempotent: replaying the same state is harmless. The row's
/// `updated_at` column is refreshed on every conflict update.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `participant_id` - The derived participant identity
/// * `state` - The state to persist
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn upsert_checkin(
    conn: &Connection,
    participant_id: &ParticipantId,
    state: &CheckinState,
) -> Result<(), PersistenceError> {
    conn.execute(
        "INSERT INTO checkins (participant_id, checked_in, checked_by, checked_at)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(participant_id) DO UPDATE SET
             checked_in = excluded.checked_in,
             checked_by = excluded.checked_by,
             checked_at = excluded.checked_at,
             updated_at = CURRENT_TIMESTAMP",
        params![
            participant_id.value(),
            i32::from(state.checked_in),
            state.checked_by,
            state.checked_at,
        ],
    )?;

    debug!(
        participant_id = participant_id.value(),
        checked_in = state.checked_in,
        "Persisted check-in state"
    );

    Ok(())
}

/// Loads the full durable check-in snapshot.
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is corrupt.
pub fn load_checkins(
    conn: &Connection,
) -> Result<HashMap<ParticipantId, CheckinState>, PersistenceError> {
    let mut stmt = conn.prepare(
        "SELECT participant_id, checked_in, checked_by, checked_at
         FROM checkins",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, i32>(1)?,
            row.get::<_, Option<String>>(2)?,
            row.get::<_, Option<String>>(3)?,
        ))
    })?;

    let mut snapshot: HashMap<ParticipantId, CheckinState> = HashMap::new();
    for row in rows {
        let (raw_id, checked_in, checked_by, checked_at) = row?;
        let participant_id: ParticipantId = ParticipantId::parse(&raw_id)?;
        snapshot.insert(
            participant_id,
            CheckinState {
                checked_in: checked_in != 0,
                checked_by,
                checked_at,
            },
        );
    }

    debug!(count = snapshot.len(), "Loaded check-in snapshot");

    Ok(snapshot)
}

/// Deletes all check-in rows.
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Returns
///
/// The number of rows deleted.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn reset_checkins(conn: &Connection) -> Result<usize, PersistenceError> {
    let deleted: usize = conn.execute("DELETE FROM checkins", [])?;
    debug!(deleted, "Reset check-in table");
    Ok(deleted)
}
