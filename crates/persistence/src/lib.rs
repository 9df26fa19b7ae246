// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `SQLite` persistence layer for the Rollcall check-in system.
//!
//! This crate owns the durable side of the system: check-in rows keyed by
//! derived participant identity, the imported roster in source order, and
//! the single-row import configuration.
//!
//! The durable store is the source of truth. The in-memory projection held
//! by the server is always re-derivable from what this crate stores, and a
//! write here must succeed before any cache or broadcast side effect
//! happens.
//!
//! `SQLite` requires no external infrastructure: in-memory databases back
//! unit tests, a WAL-mode file backs production deployments.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use std::collections::HashMap;
use std::path::Path;

use rollcall_domain::{CheckinState, ParticipantId, Roster};
use rusqlite::Connection;
use tracing::info;

mod checkins;
mod error;
mod roster;
mod schema;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;

/// Persistence adapter for check-in state and the imported roster.
pub struct Persistence {
    conn: Connection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a private database instance, giving deterministic
    /// test isolation with no shared state between adapters.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let conn: Connection = Connection::open_in_memory()
            .map_err(|e| PersistenceError::DatabaseConnectionFailed(e.to_string()))?;

        schema::initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let conn: Connection = Connection::open(path)
            .map_err(|e| PersistenceError::DatabaseConnectionFailed(e.to_string()))?;

        // Enable WAL mode for better read concurrency
        let journal_mode: String =
            conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
        info!(journal_mode = %journal_mode, "Opened database file");

        schema::initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Writes a participant's check-in state, inserting or updating as needed.
    ///
    /// # Arguments
    ///
    /// * `participant_id` - The derived participant identity
    /// * `state` - The state to persist
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn upsert_checkin(
        &self,
        participant_id: &ParticipantId,
        state: &CheckinState,
    ) -> Result<(), PersistenceError> {
        checkins::upsert_checkin(&self.conn, participant_id, state)
    }

    /// Loads the full durable check-in snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row is corrupt.
    pub fn load_checkins(&self) -> Result<HashMap<ParticipantId, CheckinState>, PersistenceError> {
        checkins::load_checkins(&self.conn)
    }

    /// Deletes all check-in rows.
    ///
    /// # Returns
    ///
    /// The number of rows deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn reset_checkins(&self) -> Result<usize, PersistenceError> {
        checkins::reset_checkins(&self.conn)
    }

    /// Replaces the stored roster and import configuration atomically.
    ///
    /// Check-in rows are left untouched: identity is stable across imports,
    /// so existing durable state re-attaches to matching roster entries.
    ///
    /// # Arguments
    ///
    /// * `roster` - The roster to store
    ///
    /// # Errors
    ///
    /// Returns an error if any database operation fails. On error, no
    /// partial roster is visible.
    pub fn replace_roster(&mut self, roster: &Roster) -> Result<(), PersistenceError> {
        let tx: rusqlite::Transaction<'_> = self.conn.transaction()?;
        roster::replace_roster(&tx, roster)?;
        tx.commit()?;
        Ok(())
    }

    /// Loads the stored roster and import configuration.
    ///
    /// # Returns
    ///
    /// `Ok(None)` when no roster has ever been imported.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row is corrupt.
    pub fn load_roster(&self) -> Result<Option<Roster>, PersistenceError> {
        roster::load_roster(&self.conn)
    }
}
