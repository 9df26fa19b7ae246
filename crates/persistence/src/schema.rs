// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rusqlite::Connection;
use tracing::info;

use crate::error::PersistenceError;

/// Initializes the database schema.
///
/// # Arguments
///
/// * `conn` - The database connection to initialize
///
/// # Errors
///
/// Returns an error if schema creation fails.
pub fn initialize_schema(conn: &Connection) -> Result<(), PersistenceError> {
    info!("Initializing database schema");

    // Enable foreign key enforcement
    conn.execute("PRAGMA foreign_keys = ON", [])?;

    conn.execute_batch(
        "
        -- Durable check-in state, keyed by derived participant identity.
        -- Rows survive roster re-imports: a participant absent from the
        -- current roster keeps their row until an explicit reset.
        CREATE TABLE IF NOT EXISTS checkins (
            participant_id TEXT PRIMARY KEY NOT NULL,
            checked_in INTEGER NOT NULL DEFAULT 0 CHECK(checked_in IN (0, 1)),
            checked_by TEXT,
            checked_at TEXT,
            created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
        );

        -- The imported roster, in source-file order.
        CREATE TABLE IF NOT EXISTS roster (
            position INTEGER PRIMARY KEY NOT NULL,
            participant_id TEXT NOT NULL UNIQUE,
            field1 TEXT NOT NULL,
            field2 TEXT NOT NULL,
            qr_code TEXT
        );

        -- Single-row table describing the active import.
        CREATE TABLE IF NOT EXISTS import_config (
            config_id INTEGER PRIMARY KEY CHECK(config_id = 1),
            field1_name TEXT NOT NULL,
            field2_name TEXT NOT NULL,
            has_qr INTEGER NOT NULL DEFAULT 0 CHECK(has_qr IN (0, 1)),
            qr_col_name TEXT NOT NULL DEFAULT '',
            total INTEGER NOT NULL DEFAULT 0,
            uploaded_at TEXT NOT NULL,
            source_filename TEXT NOT NULL
        );
        ",
    )?;

    Ok(())
}
