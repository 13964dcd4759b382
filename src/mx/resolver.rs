use trust_dns_resolver::{Resolver, error::ResolveError};

use super::{MxError, MxRecord};

/// Lookup MX records for `domain` using the system resolver.
///
/// Records come back sorted ascending by priority and deduplicated, so the
/// caller can try exchanges front to back. NXDOMAIN, timeouts and an empty
/// answer set are all hard failures.
pub fn resolve_mx(domain: &str) -> Result<Vec<MxRecord>, MxError> {
    let trimmed = domain.trim();
    if trimmed.is_empty() {
        return Err(MxError::EmptyDomain);
    }
    let resolver = Resolver::from_system_conf().map_err(MxError::resolver_init)?;
    resolve_with(&resolver, trimmed)
}

pub(crate) fn resolve_with<R>(resolver: &R, domain: &str) -> Result<Vec<MxRecord>, MxError>
where
    R: LookupMx,
{
    let mut records = resolver
        .lookup_mx(domain)
        .map_err(|source| MxError::lookup(domain, source))?;

    records.sort();
    records.dedup();

    if records.is_empty() {
        return Err(MxError::no_records(domain));
    }
    Ok(records)
}

pub(crate) fn normalize_exchange(exchange: &str) -> String {
    exchange.trim_end_matches('.').to_ascii_lowercase()
}

/// Seam between the pipeline and the DNS capability, so tests can inject a
/// stub instead of the system resolver.
pub(crate) trait LookupMx {
    fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, ResolveError>;
}

impl LookupMx for Resolver {
    fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, ResolveError> {
        let lookup = Resolver::mx_lookup(self, domain)?;
        let records = lookup
            .iter()
            .map(|mx| MxRecord::new(mx.preference(), normalize_exchange(&mx.exchange().to_utf8())))
            .collect();
        Ok(records)
    }
}
