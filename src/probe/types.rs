use std::fmt;

/// A raw SMTP reply, preserving the numeric status code and message text.
/// Multiline replies are folded into one value with the lines joined by
/// `\n`.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpReply {
    pub code: u16,
    pub message: String,
}

impl SmtpReply {
    pub fn is_positive_completion(&self) -> bool {
        (200..300).contains(&self.code)
    }

    pub fn is_transient_failure(&self) -> bool {
        (400..500).contains(&self.code)
    }

    pub fn is_permanent_failure(&self) -> bool {
        (500..600).contains(&self.code)
    }
}

impl fmt::Display for SmtpReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code, self.message)
    }
}

/// Outcome of one deliverability probe, for the caller that wants more
/// than the boolean: the exchange that answered and the RCPT TO reply the
/// verdict was read from.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub valid: bool,
    /// MX host the handshake ran against.
    pub exchange: String,
    /// The RCPT TO reply.
    pub reply: SmtpReply,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(code: u16) -> SmtpReply {
        SmtpReply {
            code,
            message: String::new(),
        }
    }

    #[test]
    fn reply_classes() {
        assert!(reply(220).is_positive_completion());
        assert!(reply(250).is_positive_completion());
        assert!(!reply(354).is_positive_completion());
        assert!(reply(451).is_transient_failure());
        assert!(reply(550).is_permanent_failure());
        assert!(!reply(250).is_permanent_failure());
    }

    #[test]
    fn reply_displays_code_and_text() {
        let r = SmtpReply {
            code: 250,
            message: "2.1.5 Ok".to_string(),
        };
        assert_eq!(r.to_string(), "250 2.1.5 Ok");
    }
}
