//! Lexical checks: format validation and local/domain splitting. Pure,
//! no I/O; everything network-facing lives in [`crate::mx`] and
//! [`crate::probe`].

mod types;

pub use types::{EmailAddress, FormatError, ParseError};

use std::sync::LazyLock;

use regex::Regex;

// Deliberately permissive: the pattern may match anywhere in the input, so
// surrounding garbage is tolerated. Not an RFC 5322 validator.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9_.-]+@([A-Za-z0-9_-]+\.)+[A-Za-z0-9_-]+").expect("email pattern")
});

/// Check that `email` contains something shaped like `local@domain.tld`.
pub fn check_format(email: &str) -> Result<(), FormatError> {
    if email.is_empty() {
        return Err(FormatError::Empty);
    }
    if EMAIL_PATTERN.is_match(email) {
        Ok(())
    } else {
        Err(FormatError::Malformed {
            address: email.to_string(),
        })
    }
}

/// Split `email` into local part and domain.
///
/// Every `@` is a separator and the component right after the first one is
/// the domain, so the domain itself can never contain `@`. Parts are
/// whitespace-trimmed.
pub fn parse_address(email: &str) -> Result<EmailAddress, ParseError> {
    let no_domain = || ParseError::NoDomain {
        address: email.to_string(),
    };

    let mut parts = email.split('@').map(str::trim);
    let local = parts.next().ok_or_else(no_domain)?;
    let domain = parts.next().ok_or_else(no_domain)?;
    if domain.is_empty() {
        return Err(no_domain());
    }

    Ok(EmailAddress {
        raw: email.trim().to_string(),
        local: local.to_string(),
        domain: domain.to_string(),
    })
}
