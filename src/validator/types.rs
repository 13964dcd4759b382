use thiserror::Error;

/// An address split into the parts the pipeline needs downstream.
///
/// Built once per validation call by [`parse_address`](super::parse_address)
/// and never mutated afterwards; nothing outlives the call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress {
    /// The input as given (trimmed), used verbatim in `RCPT TO`.
    pub raw: String,
    pub local: String,
    /// Non-empty, never contains `@`.
    pub domain: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("email address is empty")]
    Empty,
    #[error("email address format invalid: {address}")]
    Malformed { address: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("no domain part in address: {address}")]
    NoDomain { address: String },
}
