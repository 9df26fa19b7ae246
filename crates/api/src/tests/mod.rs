// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod import_tests;
mod ops_tests;

use crate::request_response::ImportRequest;

pub fn create_import_request(data: &str) -> ImportRequest {
    ImportRequest {
        data: data.to_string(),
        field1_name: String::from("First Name"),
        field2_name: String::from("Last Name"),
        has_qr: false,
        qr_col_name: None,
        source_filename: Some(String::from("roster.csv")),
    }
}
