// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rollcall_domain::{ImportConfig, Participant, ParticipantId, Roster};
use rusqlite::{Connection, OptionalExtension, Transaction, params};
use tracing::debug;

use crate::error::PersistenceError;

/// Replaces the stored roster and import configuration within a transaction.
///
/// All existing roster rows are deleted first; the new rows are inserted in
/// source order. Check-in rows are left untouched.
///
/// # Arguments
///
/// * `tx` - The active database transaction
/// * `roster` - The roster to store
///
/// # Errors
///
/// Returns an error if any database operation fails.
pub fn replace_roster(tx: &Transaction<'_>, roster: &Roster) -> Result<(), PersistenceError> {
    tx.execute("DELETE FROM roster", [])?;

    for (position, participant) in roster.participants.iter().enumerate() {
        let position: i64 = i64::try_from(position)
            .map_err(|e| PersistenceError::DatabaseError(e.to_string()))?;
        tx.execute(
            "INSERT INTO roster (position, participant_id, field1, field2, qr_code)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                position,
                participant.id.value(),
                participant.field1,
                participant.field2,
                participant.qr_code,
            ],
        )?;
    }

    let config: &ImportConfig = &roster.config;
    let total: i64 =
        i64::try_from(config.total).map_err(|e| PersistenceError::DatabaseError(e.to_string()))?;
    tx.execute(
        "INSERT INTO import_config (
            config_id, field1_name, field2_name, has_qr, qr_col_name,
            total, uploaded_at, source_filename
        ) VALUES (1, ?1, ?2, ?3, ?4, ?5, ?6, ?7)
        ON CONFLICT(config_id) DO UPDATE SET
            field1_name = excluded.field1_name,
            field2_name = excluded.field2_name,
            has_qr = excluded.has_qr,
            qr_col_name = excluded.qr_col_name,
            total = excluded.total,
            uploaded_at = excluded.uploaded_at,
            source_filename = excluded.source_filename",
        params![
            config.field1_name,
            config.field2_name,
            i32::from(config.has_qr),
            config.qr_col_name,
            total,
            config.uploaded_at,
            config.source_filename,
        ],
    )?;

    debug!(
        total = roster.participants.len(),
        source = %config.source_filename,
        "Replaced stored roster"
    );

    Ok(())
}

/// Loads the stored roster and import configuration.
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Returns
///
/// `Ok(None)` when no roster has ever been imported.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is corrupt.
pub fn load_roster(conn: &Connection) -> Result<Option<Roster>, PersistenceError> {
    let config: Option<ImportConfig> = conn
        .query_row(
            "SELECT field1_name, field2_name, has_qr, qr_col_name,
                    total, uploaded_at, source_filename
             FROM import_config
             WHERE config_id = 1",
            [],
            |row| {
                Ok(ImportConfig {
                    field1_name: row.get(0)?,
                    field2_name: row.get(1)?,
                    has_qr: row.get::<_, i32>(2)? != 0,
                    qr_col_name: row.get(3)?,
                    total: usize::try_from(row.get::<_, i64>(4)?).unwrap_or(0),
                    uploaded_at: row.get(5)?,
                    source_filename: row.get(6)?,
                })
            },
        )
        .optional()?;

    let Some(config) = config else {
        return Ok(None);
    };

    let mut stmt = conn.prepare(
        "SELECT participant_id, field1, field2, qr_code
         FROM roster
         ORDER BY position ASC",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, Option<String>>(3)?,
        ))
    })?;

    let mut participants: Vec<Participant> = Vec::new();
    for row in rows {
        let (raw_id, field1, field2, qr_code) = row?;
        let id: ParticipantId = ParticipantId::parse(&raw_id)?;
        participants.push(Participant::new(id, field1, field2, qr_code));
    }

    debug!(total = participants.len(), "Loaded stored roster");

    Ok(Some(Roster::new(participants, config)))
}
