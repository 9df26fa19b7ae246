// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rollcall_domain::{PARTICIPANT_ID_LENGTH, Roster, derive_participant_id};

use crate::error::ApiError;
use crate::import::parse_roster;
use crate::request_response::ImportRequest;
use crate::tests::create_import_request;

#[test]
fn test_parse_roster_reads_configured_columns() {
    let request: ImportRequest = create_import_request(
        "First Name,Last Name,Email\nAna,Silva,ana@example.com\nBob,Lee,bob@example.com\n",
    );

    let roster: Roster = parse_roster(&request).expect("parse");

    assert_eq!(roster.participants.len(), 2);
    assert_eq!(roster.participants[0].field1, "Ana");
    assert_eq!(roster.participants[0].field2, "Silva");
    assert_eq!(roster.participants[1].field1, "Bob");
    assert_eq!(roster.config.total, 2);
    assert_eq!(roster.config.source_filename, "roster.csv");
    assert!(!roster.config.uploaded_at.is_empty());
}

#[test]
fn test_parse_roster_derives_stable_identities() {
    let request: ImportRequest = create_import_request("First Name,Last Name\nAna,Silva\n");

    let roster: Roster = parse_roster(&request).expect("parse");

    assert_eq!(roster.participants[0].id, derive_participant_id("Ana", "Silva"));
    assert_eq!(
        roster.participants[0].id.value().len(),
        PARTICIPANT_ID_LENGTH
    );
}

#[test]
fn test_header_matching_is_case_insensitive() {
    let request: ImportRequest =
        create_import_request("  first name , LAST NAME \nAna,Silva\n");

    let roster: Roster = parse_roster(&request).expect("parse");

    assert_eq!(roster.participants.len(), 1);
}

#[test]
fn test_missing_column_reports_available_headers() {
    let request: ImportRequest = create_import_request("Given,Family\nAna,Silva\n");

    let err: ApiError = parse_roster(&request).expect_err("should fail");

    match err {
        ApiError::ColumnNotFound { column, available } => {
            assert_eq!(column, "First Name");
            assert_eq!(available, vec!["Given", "Family"]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_rows_blank_in_both_columns_are_skipped() {
    let request: ImportRequest =
        create_import_request("First Name,Last Name\nAna,Silva\n , \nBob,Lee\n");

    let roster: Roster = parse_roster(&request).expect("parse");

    assert_eq!(roster.participants.len(), 2);
}

#[test]
fn test_row_with_one_blank_column_is_kept() {
    let request: ImportRequest = create_import_request("First Name,Last Name\nMadonna,\n");

    let roster: Roster = parse_roster(&request).expect("parse");

    assert_eq!(roster.participants.len(), 1);
    assert_eq!(roster.participants[0].field1, "Madonna");
    assert_eq!(roster.participants[0].field2, "");
}

#[test]
fn test_duplicate_identity_keeps_later_row() {
    // Same identity fields, different QR codes: the later row wins but the
    // original position is kept.
    let request: ImportRequest = ImportRequest {
        data: String::from(
            "First Name,Last Name,Ticket\nAna,Silva,QR-1\nBob,Lee,QR-2\nana,SILVA,QR-3\n",
        ),
        field1_name: String::from("First Name"),
        field2_name: String::from("Last Name"),
        has_qr: true,
        qr_col_name: Some(String::from("Ticket")),
        source_filename: None,
    };

    let roster: Roster = parse_roster(&request).expect("parse");

    assert_eq!(roster.participants.len(), 2);
    assert_eq!(roster.participants[0].qr_code.as_deref(), Some("QR-3"));
    assert_eq!(roster.participants[1].qr_code.as_deref(), Some("QR-2"));
}

#[test]
fn test_qr_column_requires_name_when_enabled() {
    let request: ImportRequest = ImportRequest {
        qr_col_name: None,
        has_qr: true,
        ..create_import_request("First Name,Last Name\nAna,Silva\n")
    };

    let err: ApiError = parse_roster(&request).expect_err("should fail");

    assert!(matches!(err, ApiError::InvalidInput { field, .. } if field == "qr_col_name"));
}

#[test]
fn test_file_with_only_blank_rows_yields_empty_roster() {
    let request: ImportRequest = create_import_request("First Name,Last Name\n,\n,\n");

    let roster: Roster = parse_roster(&request).expect("parse");

    assert!(roster.participants.is_empty());
    assert_eq!(roster.config.total, 0);
}

#[test]
fn test_default_source_filename() {
    let request: ImportRequest = ImportRequest {
        source_filename: None,
        ..create_import_request("First Name,Last Name\nAna,Silva\n")
    };

    let roster: Roster = parse_roster(&request).expect("parse");

    assert_eq!(roster.config.source_filename, "upload.csv");
}
