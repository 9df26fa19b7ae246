// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Optional shared-credential gate for mutating operations.
//!
//! Deployments on a trusted network run without a credential; every
//! request passes. When a credential is configured, mutating requests must
//! present it.

use crate::error::AuthError;

/// The optionally configured admin credential.
#[derive(Debug, Clone, Default)]
pub struct AdminCredential(Option<String>);

impl AdminCredential {
    /// Creates a credential gate. Empty or whitespace-only values count as
    /// unconfigured.
    #[must_use]
    pub fn new(password: Option<String>) -> Self {
        Self(
            password
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty()),
        )
    }

    /// Returns true when a credential is configured.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.0.is_some()
    }

    /// Verifies a presented credential.
    ///
    /// Always succeeds when no credential is configured.
    ///
    /// # Arguments
    ///
    /// * `presented` - The credential from the request, if any
    ///
    /// # Errors
    ///
    /// Returns an error if a credential is configured and the presented
    /// value is missing or wrong.
    pub fn verify(&self, presented: Option<&str>) -> Result<(), AuthError> {
        match &self.0 {
            None => Ok(()),
            Some(expected) if presented == Some(expected.as_str()) => Ok(()),
            Some(_) => Err(AuthError::AuthenticationFailed {
                reason: if presented.is_none() {
                    String::from("missing credential")
                } else {
                    String::from("incorrect credential")
                },
            }),
        }
    }
}
