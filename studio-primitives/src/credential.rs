//! API credential newtype.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// API key for the completion endpoint. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiCredential(String);

impl ApiCredential {
    /// Wraps a credential, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCredential`] when nothing remains after trimming.
    pub fn new(value: impl AsRef<str>) -> Result<Self> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(Error::EmptyCredential);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Exposes the secret for transport.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiCredential(***)")
    }
}
