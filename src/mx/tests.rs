use trust_dns_resolver::error::ResolveError;

use super::{MxError, MxRecord, resolver};

type LookupResult = Result<Vec<MxRecord>, ResolveError>;
type LookupFn = dyn Fn(&str) -> LookupResult;

pub(crate) struct StubResolver {
    pub on_lookup: Box<LookupFn>,
}

impl StubResolver {
    pub(crate) fn new<F>(f: F) -> Self
    where
        F: Fn(&str) -> LookupResult + 'static,
    {
        Self {
            on_lookup: Box::new(f),
        }
    }
}

impl resolver::LookupMx for StubResolver {
    fn lookup_mx(&self, domain: &str) -> LookupResult {
        (self.on_lookup)(domain)
    }
}

#[test]
fn empty_domain_rejected() {
    let err = super::resolve_mx("   ").expect_err("empty domain should fail");
    assert!(matches!(err, MxError::EmptyDomain));
}

#[test]
fn records_sorted_by_priority_and_deduped() {
    let stub = StubResolver::new(|domain| {
        assert_eq!(domain, "example.com");
        Ok(vec![
            MxRecord::new(20, "mx2.example.com"),
            MxRecord::new(10, "mx1.example.com"),
            MxRecord::new(10, "mx1.example.com"),
            MxRecord::new(30, "mx3.example.com"),
        ])
    });

    let records = resolver::resolve_with(&stub, "example.com").expect("lookup succeeds");
    assert_eq!(records.len(), 3);
    assert_eq!(records[0], MxRecord::new(10, "mx1.example.com"));
    assert_eq!(records[2], MxRecord::new(30, "mx3.example.com"));
}

#[test]
fn empty_answer_set_is_an_error() {
    let stub = StubResolver::new(|_| Ok(Vec::new()));
    let err = resolver::resolve_with(&stub, "example.com").expect_err("no records should fail");
    assert!(matches!(err, MxError::NoRecords { domain } if domain == "example.com"));
}

#[test]
fn lookup_failure_is_an_error() {
    let stub = StubResolver::new(|_| Err(ResolveError::from("nxdomain")));
    let err = resolver::resolve_with(&stub, "example.com").expect_err("lookup should fail");
    assert!(matches!(err, MxError::Lookup { domain, .. } if domain == "example.com"));
}

#[test]
fn normalize_exchange_trims_dot_and_lowercases() {
    assert_eq!(
        resolver::normalize_exchange("Mail.EXAMPLE.com."),
        "mail.example.com"
    );
}
