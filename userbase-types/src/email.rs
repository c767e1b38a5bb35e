//! Email address shape validation.
//!
//! Accepts the common `local@domain.tld` form: an unquoted dot-atom local
//! part and a hostname with an alphabetic top-level label. Quoted local
//! parts and IP-literal domains are rejected.

use crate::{Result, TypeError};
use regex_lite::Regex;
use std::sync::LazyLock;

/// Maximum length of a whole address.
pub const MAX_EMAIL_LEN: usize = 254;

/// Maximum length of the part before `@`.
pub const MAX_LOCAL_PART_LEN: usize = 64;

static LOCAL_PART: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*$")
        .expect("local part pattern compiles")
});

static DOMAIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+[A-Za-z]{2,63}$")
        .expect("domain pattern compiles")
});

/// Checks that `email` looks like a deliverable address.
///
/// # Errors
///
/// Returns [`TypeError::InvalidEmail`] when the address is empty, too long,
/// or not of the `local@domain.tld` shape.
pub fn validate_email(email: &str) -> Result<()> {
    let invalid = || TypeError::InvalidEmail(email.to_string());

    if email.is_empty() || email.len() > MAX_EMAIL_LEN {
        return Err(invalid());
    }
    let (local, domain) = email.rsplit_once('@').ok_or_else(invalid)?;
    if local.is_empty() || local.len() > MAX_LOCAL_PART_LEN {
        return Err(invalid());
    }
    if !LOCAL_PART.is_match(local) || !DOMAIN.is_match(domain) {
        return Err(invalid());
    }
    Ok(())
}
