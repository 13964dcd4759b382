use std::time::Duration;

use clap::{Parser, Subcommand};
use mailprobe::ProbeOptions;

#[derive(Parser)]
#[command(name = "mailprobe-cli")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Option<Commands>,

    /// show the SMTP dialogue on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// probe deliverability of one address and print the boolean verdict
    Validate {
        /// email address to test
        email: String,
        /// output format (human|json)
        #[arg(long, default_value = "human")]
        format: String,
        /// name announced in HELO
        #[arg(long)]
        helo: Option<String>,
        /// envelope MAIL FROM sender
        #[arg(long = "from")]
        mail_from: Option<String>,
        /// SMTP port to probe
        #[arg(long, default_value_t = 25)]
        port: u16,
        /// connect/command timeout (ms), 0 keeps the default
        #[arg(long = "timeout", default_value_t = 5_000)]
        timeout_ms: u64,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn clap_command() -> clap::Command {
        <Self as clap::CommandFactory>::command()
    }
}

pub fn probe_options(
    helo: Option<String>,
    mail_from: Option<String>,
    port: u16,
    timeout_ms: u64,
) -> ProbeOptions {
    let mut options = ProbeOptions {
        port,
        ..ProbeOptions::default()
    };
    if timeout_ms > 0 {
        options.connect_timeout = Duration::from_millis(timeout_ms);
        options.command_timeout = Duration::from_millis(timeout_ms);
    }
    if let Some(helo) = helo {
        options.helo_domain = helo;
    }
    if let Some(mail_from) = mail_from {
        options.mail_from = mail_from;
    }
    options
}
