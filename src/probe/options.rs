use std::time::Duration;

/// Fixed configuration for the SMTP dialogue.
///
/// The HELO identity and the envelope sender are static: they are never
/// derived from the recipient under test. Construct once, share freely;
/// nothing here is mutated during a probe.
#[derive(Debug, Clone)]
pub struct ProbeOptions {
    pub port: u16,
    /// Name announced in `HELO`.
    pub helo_domain: String,
    /// Envelope sender for `MAIL FROM`.
    pub mail_from: String,
    pub connect_timeout: Duration,
    pub command_timeout: Duration,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            port: 25,
            helo_domain: "localhost".to_string(),
            mail_from: "postmaster@localhost".to_string(),
            connect_timeout: Duration::from_secs(5),
            command_timeout: Duration::from_secs(5),
        }
    }
}
