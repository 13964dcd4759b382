//! The validation pipeline: format check → local/domain split → MX
//! resolution → live SMTP probe, in that strict order. The first failing
//! stage stops the run.

use thiserror::Error;
use tracing::{debug, info, warn};
use trust_dns_resolver::Resolver;

use crate::mx::{self, LookupMx, MxError};
use crate::probe::{self, ProbeError, ProbeOptions, Verdict};
use crate::validator::{FormatError, ParseError, check_format, parse_address};

/// Any stage failure in the pipeline. Callers of [`validate`] never see
/// these; the orchestrator folds them into `false` and keeps the detail in
/// the trace output only.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Resolve(#[from] MxError),
    #[error(transparent)]
    Probe(#[from] ProbeError),
}

/// Check whether `email` is deliverable, with default probe options.
///
/// Any failure anywhere in the pipeline, from a malformed address to an
/// unreachable MX host, yields `false`: this call cannot distinguish
/// "confirmed invalid" from "could not be confirmed". Each invocation owns
/// its resolver and its SMTP session, so concurrent calls never share
/// state.
pub fn validate(email: &str) -> bool {
    validate_with_options(email, &ProbeOptions::default())
}

pub fn validate_with_options(email: &str, options: &ProbeOptions) -> bool {
    match verify(email, options) {
        Ok(verdict) => {
            info!(%email, valid = verdict.valid, exchange = %verdict.exchange, "verdict");
            verdict.valid
        }
        Err(err) => {
            warn!(%email, %err, "verification failed");
            false
        }
    }
}

/// Typed variant of [`validate`]: same pipeline, but surfaces the failing
/// stage instead of folding everything into a boolean.
pub fn verify(email: &str, options: &ProbeOptions) -> Result<Verdict, VerifyError> {
    let resolver = Resolver::from_system_conf().map_err(MxError::resolver_init)?;
    verify_with_resolver(email, options, &resolver)
}

pub(crate) fn verify_with_resolver<R: LookupMx>(
    email: &str,
    options: &ProbeOptions,
    resolver: &R,
) -> Result<Verdict, VerifyError> {
    check_format(email)?;
    let recipient = parse_address(email)?;
    debug!(local = %recipient.local, domain = %recipient.domain, "address parsed");

    let records = mx::resolve_with(resolver, &recipient.domain)?;
    debug!(domain = %recipient.domain, count = records.len(), "MX records resolved");

    Ok(probe::probe(&records, &recipient, options)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mx::MxRecord;
    use crate::mx::tests::StubResolver;

    fn no_lookup_resolver() -> StubResolver {
        StubResolver::new(|_| panic!("resolver must not be consulted"))
    }

    fn options() -> ProbeOptions {
        ProbeOptions::default()
    }

    #[test]
    fn malformed_address_short_circuits_before_dns() {
        let err = verify_with_resolver("not-an-email", &options(), &no_lookup_resolver())
            .expect_err("should fail");
        assert!(matches!(
            err,
            VerifyError::Format(FormatError::Malformed { .. })
        ));
    }

    #[test]
    fn empty_address_short_circuits_before_dns() {
        let err =
            verify_with_resolver("", &options(), &no_lookup_resolver()).expect_err("should fail");
        assert!(matches!(err, VerifyError::Format(FormatError::Empty)));
    }

    #[test]
    fn doubled_at_short_circuits_before_dns() {
        let err = verify_with_resolver("user@@bad..domain", &options(), &no_lookup_resolver())
            .expect_err("should fail");
        assert!(matches!(err, VerifyError::Format(_)));
    }

    #[test]
    fn no_mx_records_fails_before_any_connection() {
        let stub = StubResolver::new(|domain| {
            assert_eq!(domain, "example.com");
            Ok(Vec::new())
        });
        let err =
            verify_with_resolver("user@example.com", &options(), &stub).expect_err("should fail");
        assert!(matches!(
            err,
            VerifyError::Resolve(MxError::NoRecords { .. })
        ));
    }

    #[test]
    fn lookup_failure_fails_before_any_connection() {
        let stub = StubResolver::new(|_| {
            Err(trust_dns_resolver::error::ResolveError::from("nxdomain"))
        });
        let err =
            verify_with_resolver("user@example.com", &options(), &stub).expect_err("should fail");
        assert!(matches!(err, VerifyError::Resolve(MxError::Lookup { .. })));
    }

    #[test]
    fn repeated_calls_agree_for_the_same_stub_state() {
        let run = || {
            let stub = StubResolver::new(|_| Ok(vec![MxRecord::new(10, "mx.invalid")]));
            let options = ProbeOptions {
                connect_timeout: std::time::Duration::from_millis(500),
                command_timeout: std::time::Duration::from_millis(500),
                ..ProbeOptions::default()
            };
            verify_with_resolver("user@example.com", &options, &stub)
        };
        // "mx.invalid" never resolves to an address, so both runs land on
        // the same NoReachableMx outcome
        let first = run().expect_err("unreachable exchange");
        let second = run().expect_err("unreachable exchange");
        assert!(matches!(
            first,
            VerifyError::Probe(ProbeError::NoReachableMx { .. })
        ));
        assert!(matches!(
            second,
            VerifyError::Probe(ProbeError::NoReachableMx { .. })
        ));
    }

    #[test]
    fn validate_folds_format_failures_into_false() {
        assert!(!validate("not-an-email"));
        assert!(!validate(""));
    }
}
