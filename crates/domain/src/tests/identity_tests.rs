// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{PARTICIPANT_ID_LENGTH, ParticipantId, derive_participant_id};

#[test]
fn test_derive_is_deterministic() {
    let first: ParticipantId = derive_participant_id("Ana", "Silva");
    let second: ParticipantId = derive_participant_id("Ana", "Silva");

    assert_eq!(first, second);
}

#[test]
fn test_derive_normalizes_whitespace_and_case() {
    let padded: ParticipantId = derive_participant_id(" A ", "b");
    let plain: ParticipantId = derive_participant_id("a", "B");

    assert_eq!(padded, plain);
}

#[test]
fn test_derive_distinguishes_different_inputs() {
    let ana: ParticipantId = derive_participant_id("Ana", "Silva");
    let bob: ParticipantId = derive_participant_id("Bob", "Lee");

    assert_ne!(ana, bob);
}

#[test]
fn test_derive_has_fixed_length() {
    let id: ParticipantId = derive_participant_id("Ana", "Silva");

    assert_eq!(id.value().len(), PARTICIPANT_ID_LENGTH);
}

#[test]
fn test_derive_is_lowercase_hex() {
    let id: ParticipantId = derive_participant_id("Ana", "Silva");

    assert!(id.value().chars().all(|c| c.is_ascii_hexdigit()));
    assert!(!id.value().chars().any(|c| c.is_ascii_uppercase()));
}

#[test]
fn test_field_order_matters() {
    let forward: ParticipantId = derive_participant_id("Ana", "Silva");
    let reversed: ParticipantId = derive_participant_id("Silva", "Ana");

    assert_ne!(forward, reversed);
}

#[test]
fn test_empty_fields_still_derive() {
    // Rows with both fields empty are skipped by the importer, but the
    // derivation itself is total.
    let id: ParticipantId = derive_participant_id("", "");

    assert_eq!(id.value().len(), PARTICIPANT_ID_LENGTH);
}
