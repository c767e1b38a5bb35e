//! Identifier type for user records.
//!
//! Record ids are random (version 4) UUIDs generated by the service; the
//! lookup path only accepts ids of that exact shape.

use crate::{Result, TypeError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::{Uuid, Variant, Version};

/// Unique identifier for a user record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Creates a new random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }

    /// Parses an identifier, accepting only RFC 4122 version 4 UUIDs in
    /// hyphenated form.
    ///
    /// # Errors
    ///
    /// Returns [`TypeError::MalformedId`] for any other input, including
    /// well-formed UUIDs of a different version.
    pub fn parse_v4(s: &str) -> Result<Self> {
        if s.len() != 36 {
            return Err(TypeError::MalformedId(s.to_string()));
        }
        let uuid = Uuid::parse_str(s).map_err(|_| TypeError::MalformedId(s.to_string()))?;
        if uuid.get_version() != Some(Version::Random) || uuid.get_variant() != Variant::RFC4122 {
            return Err(TypeError::MalformedId(s.to_string()));
        }
        Ok(Self(uuid))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_v4(s)
    }
}
