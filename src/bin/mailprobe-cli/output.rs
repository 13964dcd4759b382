use anyhow::Result;
use mailprobe::{Verdict, VerifyError};

/// Print the verdict. Human format keeps stdout to the bare boolean so the
/// command stays scriptable; everything else goes through tracing.
pub fn render(email: &str, outcome: &Result<Verdict, VerifyError>, format: &str) -> Result<()> {
    match format {
        "human" => {
            let valid = matches!(outcome, Ok(verdict) if verdict.valid);
            println!("{valid}");
            Ok(())
        }
        "json" => render_json(email, outcome),
        other => {
            eprintln!("unknown --format '{other}', use: human|json");
            std::process::exit(1);
        }
    }
}

#[cfg(feature = "with-serde")]
fn render_json(email: &str, outcome: &Result<Verdict, VerifyError>) -> Result<()> {
    use mailprobe::SmtpReply;

    #[derive(serde::Serialize)]
    struct Report<'a> {
        email: &'a str,
        valid: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        exchange: Option<&'a str>,
        #[serde(skip_serializing_if = "Option::is_none")]
        reply: Option<&'a SmtpReply>,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    }

    let report = match outcome {
        Ok(verdict) => Report {
            email,
            valid: verdict.valid,
            exchange: Some(&verdict.exchange),
            reply: Some(&verdict.reply),
            error: None,
        },
        Err(err) => Report {
            email,
            valid: false,
            exchange: None,
            reply: None,
            error: Some(err.to_string()),
        },
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[cfg(not(feature = "with-serde"))]
fn render_json(_email: &str, _outcome: &Result<Verdict, VerifyError>) -> Result<()> {
    eprintln!("format=json requires the 'with-serde' feature");
    std::process::exit(1);
}
