//! The live SMTP probe: pick the first reachable MX host, walk the
//! handshake as far as RCPT TO, and read the verdict off the reply code.
//! DATA is never sent, so no message is ever delivered.

mod error;
mod options;
mod session;
mod types;

pub use error::ProbeError;
pub use options::ProbeOptions;
pub use types::{SmtpReply, Verdict};

use std::io;
use std::net::{SocketAddr, ToSocketAddrs};

use tracing::{debug, warn};

use crate::mx::MxRecord;
use crate::validator::EmailAddress;

use session::SmtpSession;

/// RCPT TO acceptance is exactly "250 requested action okay". Any other
/// code, including other 2xx replies, counts as not deliverable.
const ACTION_OK: u16 = 250;

/// Run the SMTP handshake against the first reachable candidate.
///
/// Candidates are tried strictly in the order given; once one greets with a
/// positive completion no other host is contacted, and hosts that failed
/// are never retried. The session is torn down on every exit path.
pub fn probe(
    records: &[MxRecord],
    recipient: &EmailAddress,
    options: &ProbeOptions,
) -> Result<Verdict, ProbeError> {
    let (mut session, exchange) =
        select_server(records, options).ok_or_else(|| ProbeError::NoReachableMx {
            domain: recipient.domain.clone(),
        })?;

    let reply = handshake(&mut session, recipient, options)?;
    session.quit();

    let valid = reply.code == ACTION_OK;
    debug!(%exchange, code = reply.code, valid, "probe complete");
    Ok(Verdict {
        valid,
        exchange,
        reply,
    })
}

/// First-success-wins scan over the candidates. A host that cannot be
/// resolved, refuses the connection, or greets with a non-2xx banner is
/// skipped and the next one is tried.
fn select_server(records: &[MxRecord], options: &ProbeOptions) -> Option<(SmtpSession, String)> {
    for record in records {
        debug!(exchange = %record.exchange, priority = record.priority, "connecting");
        let addrs = match socket_addrs(&record.exchange, options.port) {
            Ok(addrs) if !addrs.is_empty() => addrs,
            Ok(_) => {
                warn!(exchange = %record.exchange, "no socket addresses resolved");
                continue;
            }
            Err(err) => {
                warn!(exchange = %record.exchange, %err, "address resolution failed");
                continue;
            }
        };

        let mut session =
            match SmtpSession::connect(&addrs, options.connect_timeout, options.command_timeout) {
                Ok(session) => session,
                Err(err) => {
                    warn!(exchange = %record.exchange, %err, "connection failed");
                    continue;
                }
            };

        match session.read_reply() {
            Ok(greeting) if greeting.is_positive_completion() => {
                debug!(exchange = %record.exchange, %greeting, "connection succeeded");
                return Some((session, record.exchange.clone()));
            }
            Ok(greeting) => {
                warn!(exchange = %record.exchange, %greeting, "server refused dialogue");
            }
            Err(err) => {
                warn!(exchange = %record.exchange, %err, "no greeting");
            }
        }
    }
    None
}

/// HELO → MAIL FROM → RCPT TO. Replies to the first two commands are
/// recorded but not acted on; only the RCPT TO reply decides the verdict.
fn handshake(
    session: &mut SmtpSession,
    recipient: &EmailAddress,
    options: &ProbeOptions,
) -> Result<SmtpReply, ProbeError> {
    let helo = session.exchange(&format!("HELO {}", options.helo_domain))?;
    debug!(reply = %helo, "HELO");

    let mail = session.exchange(&format!("MAIL FROM:<{}>", options.mail_from))?;
    debug!(reply = %mail, "MAIL FROM");

    let rcpt = session.exchange(&format!("RCPT TO:<{}>", recipient.raw))?;
    debug!(reply = %rcpt, "RCPT TO");

    Ok(rcpt)
}

fn socket_addrs(exchange: &str, port: u16) -> io::Result<Vec<SocketAddr>> {
    format!("{exchange}:{port}")
        .to_socket_addrs()
        .map(|iter| iter.collect())
}
