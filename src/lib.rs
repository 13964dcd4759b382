#![forbid(unsafe_code)]
//! mailprobe — SMTP deliverability probing (format check, MX lookup, live
//! RCPT TO handshake; no mail is ever sent).
//!
//! The single external contract is [`validate`], which folds every stage
//! failure into `false` and surfaces the detail through `tracing` only.

pub mod mx;
pub mod probe;
pub mod validator;

mod verify;

pub use mx::{MxError, MxRecord, resolve_mx};
pub use probe::{ProbeError, ProbeOptions, SmtpReply, Verdict};
pub use validator::{EmailAddress, FormatError, ParseError, check_format, parse_address};
pub use verify::{VerifyError, validate, validate_with_options, verify};
