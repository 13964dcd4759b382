#[path = "mailprobe-cli/args.rs"]
mod args;
#[path = "mailprobe-cli/output.rs"]
mod output;

use anyhow::Result;

use args::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let Some(Commands::Validate {
        email,
        format,
        helo,
        mail_from,
        port,
        timeout_ms,
    }) = cli.cmd
    else {
        Cli::clap_command().print_help()?;
        println!();
        return Ok(());
    };

    let options = args::probe_options(helo, mail_from, port, timeout_ms);
    let outcome = mailprobe::verify(&email, &options);
    output::render(&email, &outcome, &format)?;

    // exit codes: 0 deliverable, 2 not (or not confirmable), 1 fatal
    if !matches!(&outcome, Ok(verdict) if verdict.valid) {
        std::process::exit(2);
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "mailprobe=debug"
    } else {
        "mailprobe=warn"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
