// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::HashMap;

use rollcall_domain::{
    CheckinState, ImportConfig, Participant, ParticipantId, Roster, derive_participant_id,
};

pub fn create_participant(field1: &str, field2: &str) -> Participant {
    Participant::new(
        derive_participant_id(field1, field2),
        field1.to_string(),
        field2.to_string(),
        None,
    )
}

pub fn create_participant_with_qr(field1: &str, field2: &str, qr: &str) -> Participant {
    Participant::new(
        derive_participant_id(field1, field2),
        field1.to_string(),
        field2.to_string(),
        Some(qr.to_string()),
    )
}

pub fn create_test_roster() -> Roster {
    let participants: Vec<Participant> = vec![
        create_participant("Ana", "Silva"),
        create_participant("Bob", "Lee"),
    ];
    let config: ImportConfig = ImportConfig {
        field1_name: String::from("First Name"),
        field2_name: String::from("Last Name"),
        has_qr: false,
        qr_col_name: String::new(),
        total: participants.len(),
        uploaded_at: String::from("2026-08-25T09:00:00Z"),
        source_filename: String::from("roster.csv"),
    };
    Roster::new(participants, config)
}

pub fn empty_snapshot() -> HashMap<ParticipantId, CheckinState> {
    HashMap::new()
}
