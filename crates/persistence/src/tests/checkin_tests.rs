// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::HashMap;

use rollcall_domain::{CheckinState, ParticipantId, derive_participant_id};

use crate::Persistence;

#[test]
fn test_snapshot_is_empty_on_fresh_database() {
    let persistence: Persistence = Persistence::new_in_memory().expect("in-memory db");

    let snapshot: HashMap<ParticipantId, CheckinState> =
        persistence.load_checkins().expect("load");

    assert!(snapshot.is_empty());
}

#[test]
fn test_upsert_then_load_round_trips_state() {
    let persistence: Persistence = Persistence::new_in_memory().expect("in-memory db");
    let id: ParticipantId = derive_participant_id("Ana", "Silva");
    let state: CheckinState =
        CheckinState::checked(String::from("staff1"), String::from("2026-08-25T10:00:00Z"));

    persistence.upsert_checkin(&id, &state).expect("upsert");

    let snapshot: HashMap<ParticipantId, CheckinState> =
        persistence.load_checkins().expect("load");
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot.get(&id), Some(&state));
}

#[test]
fn test_upsert_overwrites_existing_row() {
    let persistence: Persistence = Persistence::new_in_memory().expect("in-memory db");
    let id: ParticipantId = derive_participant_id("Ana", "Silva");

    persistence
        .upsert_checkin(
            &id,
            &CheckinState::checked(String::from("staff1"), String::from("2026-08-25T10:00:00Z")),
        )
        .expect("first upsert");
    persistence
        .upsert_checkin(&id, &CheckinState::cleared())
        .expect("second upsert");

    let snapshot: HashMap<ParticipantId, CheckinState> =
        persistence.load_checkins().expect("load");
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot.get(&id), Some(&CheckinState::cleared()));
}

#[test]
fn test_upsert_is_idempotent() {
    let persistence: Persistence = Persistence::new_in_memory().expect("in-memory db");
    let id: ParticipantId = derive_participant_id("Ana", "Silva");
    let state: CheckinState =
        CheckinState::checked(String::from("staff1"), String::from("2026-08-25T10:00:00Z"));

    persistence.upsert_checkin(&id, &state).expect("first");
    persistence.upsert_checkin(&id, &state).expect("replay");

    let snapshot: HashMap<ParticipantId, CheckinState> =
        persistence.load_checkins().expect("load");
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot.get(&id), Some(&state));
}

#[test]
fn test_reset_deletes_all_rows() {
    let persistence: Persistence = Persistence::new_in_memory().expect("in-memory db");

    for (field1, field2) in [("Ana", "Silva"), ("Bob", "Lee")] {
        persistence
            .upsert_checkin(
                &derive_participant_id(field1, field2),
                &CheckinState::checked(
                    String::from("staff1"),
                    String::from("2026-08-25T10:00:00Z"),
                ),
            )
            .expect("upsert");
    }

    let deleted: usize = persistence.reset_checkins().expect("reset");

    assert_eq!(deleted, 2);
    assert!(persistence.load_checkins().expect("load").is_empty());
}
