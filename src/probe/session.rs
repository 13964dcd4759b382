use std::io::{self, BufRead, BufReader, Write};
use std::net::{Shutdown, SocketAddr, TcpStream};
use std::time::Duration;

use super::types::SmtpReply;

/// One live SMTP connection, exclusively owned by a single probe for a
/// single validation call.
///
/// Dropping the session always tears the connection down, sending a
/// best-effort QUIT first if the dialogue was not already closed; no exit
/// path can leak an open socket.
pub(crate) struct SmtpSession {
    stream: TcpStream,
    reader: BufReader<TcpStream>,
    closed: bool,
}

impl SmtpSession {
    /// Connect to the first address that accepts, applying the connect
    /// timeout per attempt and the command timeout to all later reads and
    /// writes.
    pub(crate) fn connect(
        addrs: &[SocketAddr],
        connect_timeout: Duration,
        command_timeout: Duration,
    ) -> io::Result<Self> {
        let mut last_err = None;
        for addr in addrs {
            match TcpStream::connect_timeout(addr, connect_timeout) {
                Ok(stream) => {
                    stream.set_read_timeout(Some(command_timeout))?;
                    stream.set_write_timeout(Some(command_timeout))?;
                    let reader = BufReader::new(stream.try_clone()?);
                    return Ok(Self {
                        stream,
                        reader,
                        closed: false,
                    });
                }
                Err(err) => last_err = Some(err),
            }
        }
        Err(last_err.unwrap_or_else(|| {
            io::Error::new(
                io::ErrorKind::AddrNotAvailable,
                "no socket address available",
            )
        }))
    }

    /// Send `command` and read the server's reply to it.
    pub(crate) fn exchange(&mut self, command: &str) -> io::Result<SmtpReply> {
        self.send_command(command)?;
        self.read_reply()
    }

    fn send_command(&mut self, command: &str) -> io::Result<()> {
        let mut line = command.as_bytes().to_vec();
        line.extend_from_slice(b"\r\n");
        self.stream.write_all(&line)?;
        self.stream.flush()
    }

    /// Read one (possibly multiline) reply. All lines of a reply must carry
    /// the same status code.
    pub(crate) fn read_reply(&mut self) -> io::Result<SmtpReply> {
        let mut code = None;
        let mut lines = Vec::new();
        loop {
            let mut raw = String::new();
            if self.reader.read_line(&mut raw)? == 0 {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "connection closed while reading reply",
                ));
            }
            let line = parse_reply_line(raw.trim_end_matches(['\r', '\n']))?;
            match code {
                Some(existing) if existing != line.code => {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidData,
                        format!("inconsistent reply codes: {existing} vs {}", line.code),
                    ));
                }
                _ => code = Some(line.code),
            }
            lines.push(line.text);
            if !line.more {
                break;
            }
        }
        let code = code.ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidData, "reply missing status code")
        })?;
        Ok(SmtpReply {
            code,
            message: lines.join("\n"),
        })
    }

    /// Close the dialogue politely. Errors are ignored: teardown must never
    /// mask whatever happened during the handshake.
    pub(crate) fn quit(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        if self.send_command("QUIT").is_ok() {
            let _ = self.read_reply();
        }
        let _ = self.stream.shutdown(Shutdown::Both);
    }
}

impl Drop for SmtpSession {
    fn drop(&mut self) {
        self.quit();
    }
}

struct ReplyLine {
    code: u16,
    /// Continuation marker (`250-`): more lines of the same reply follow.
    more: bool,
    text: String,
}

fn parse_reply_line(raw: &str) -> io::Result<ReplyLine> {
    let code_part = raw.get(..3).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("invalid SMTP reply: '{raw}'"),
        )
    })?;
    let code = code_part.parse::<u16>().map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("invalid SMTP status code: '{code_part}'"),
        )
    })?;
    let more = raw.as_bytes().get(3).copied() == Some(b'-');
    let text = raw.get(4..).unwrap_or("").to_string();
    Ok(ReplyLine { code, more, text })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_final_line() {
        let line = parse_reply_line("250 2.1.5 Ok").expect("parses");
        assert_eq!(line.code, 250);
        assert!(!line.more);
        assert_eq!(line.text, "2.1.5 Ok");
    }

    #[test]
    fn parses_continuation_line() {
        let line = parse_reply_line("250-mx.example greets you").expect("parses");
        assert_eq!(line.code, 250);
        assert!(line.more);
        assert_eq!(line.text, "mx.example greets you");
    }

    #[test]
    fn parses_bare_code() {
        let line = parse_reply_line("502").expect("parses");
        assert_eq!(line.code, 502);
        assert!(!line.more);
        assert_eq!(line.text, "");
    }

    #[test]
    fn rejects_short_line() {
        assert!(parse_reply_line("25").is_err());
    }

    #[test]
    fn rejects_non_numeric_code() {
        assert!(parse_reply_line("abc hello").is_err());
    }
}
