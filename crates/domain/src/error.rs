// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors raised by domain-level validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A participant identity was empty or whitespace-only.
    EmptyParticipantId,
    /// A required field value was invalid.
    InvalidField {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the problem.
        message: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyParticipantId => write!(f, "Participant ID must not be empty"),
            Self::InvalidField { field, message } => {
                write!(f, "Invalid value for field '{field}': {message}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
