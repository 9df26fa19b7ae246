// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rollcall::CheckinDelta;
use rollcall_domain::derive_participant_id;

use crate::error::ApiError;
use crate::ops::{check_in, uncheck};

#[test]
fn test_check_in_produces_attributed_delta() {
    let id = derive_participant_id("Ana", "Silva");

    let delta: CheckinDelta = check_in(id.value(), Some("staff1")).expect("check in");

    assert_eq!(delta.participant_id, id);
    assert!(delta.checked_in);
    assert_eq!(delta.checked_by.as_deref(), Some("staff1"));
    assert!(delta.checked_at.is_some());
}

#[test]
fn test_check_in_trims_staff_name() {
    let id = derive_participant_id("Ana", "Silva");

    let delta: CheckinDelta = check_in(id.value(), Some("  staff1  ")).expect("check in");

    assert_eq!(delta.checked_by.as_deref(), Some("staff1"));
}

#[test]
fn test_check_in_without_staff_is_attributed_unknown() {
    let id = derive_participant_id("Ana", "Silva");

    let delta: CheckinDelta = check_in(id.value(), None).expect("check in");

    assert!(delta.checked_in);
    assert_eq!(delta.checked_by.as_deref(), Some("Unknown"));
}

#[test]
fn test_check_in_with_blank_staff_is_attributed_unknown() {
    let id = derive_participant_id("Ana", "Silva");

    let delta: CheckinDelta = check_in(id.value(), Some("   ")).expect("check in");

    assert_eq!(delta.checked_by.as_deref(), Some("Unknown"));
}

#[test]
fn test_check_in_rejects_empty_identity() {
    let err: ApiError = check_in("  ", Some("staff1")).expect_err("should fail");

    assert!(matches!(err, ApiError::InvalidInput { field, .. } if field == "participant_id"));
}

#[test]
fn test_uncheck_clears_attribution() {
    let id = derive_participant_id("Ana", "Silva");

    let delta: CheckinDelta = uncheck(id.value()).expect("uncheck");

    assert_eq!(delta.participant_id, id);
    assert!(!delta.checked_in);
    assert!(delta.checked_by.is_none());
    assert!(delta.checked_at.is_none());
}

#[test]
fn test_uncheck_rejects_empty_identity() {
    let err: ApiError = uncheck("").expect_err("should fail");

    assert!(matches!(err, ApiError::InvalidInput { .. }));
}
