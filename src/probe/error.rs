use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("no reachable MX server for {domain}")]
    NoReachableMx { domain: String },
    #[error("I/O failure during SMTP handshake: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },
}

impl From<std::io::Error> for ProbeError {
    fn from(source: std::io::Error) -> Self {
        Self::Io { source }
    }
}
