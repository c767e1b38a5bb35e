//! Continuation cursor codec.
//!
//! A cursor is the last key of a delivered page, encoded as base64url
//! without padding so it can travel in a query string untouched. It
//! carries nothing besides the key: no offset, no session, no expiry.

use crate::error::CursorDecodeError;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound on accepted token length. Keys are email addresses, so
/// anything far beyond that is not one of ours.
pub const MAX_CURSOR_TOKEN_LEN: usize = 1024;

/// Opaque resumption token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    /// Wraps a token received from a client without validating it.
    #[must_use]
    pub fn from_token(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    /// Decodes this token back into the boundary key.
    pub fn key(&self) -> Result<String, CursorDecodeError> {
        decode(&self.0)
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Encodes a key into a cursor.
///
/// `decode(encode(k))` returns `k` for every non-empty key. The empty key
/// encodes to an empty token, which [`decode`] rejects; stored keys are
/// never empty.
#[must_use]
pub fn encode(key: &str) -> Cursor {
    Cursor(URL_SAFE_NO_PAD.encode(key.as_bytes()))
}

/// Decodes a cursor token into the key it was built from.
///
/// Surrounding whitespace is ignored.
///
/// # Errors
///
/// Fails when the token is empty, oversized, not base64url, or does not
/// carry UTF-8 text.
pub fn decode(token: &str) -> Result<String, CursorDecodeError> {
    let token = token.trim();

    if token.is_empty() {
        return Err(CursorDecodeError::Empty);
    }

    if token.len() > MAX_CURSOR_TOKEN_LEN {
        return Err(CursorDecodeError::TooLong {
            len: token.len(),
            max: MAX_CURSOR_TOKEN_LEN,
        });
    }

    let bytes = URL_SAFE_NO_PAD
        .decode(token)
        .map_err(|e| CursorDecodeError::Base64(e.to_string()))?;

    String::from_utf8(bytes).map_err(|_| CursorDecodeError::NotUtf8)
}
