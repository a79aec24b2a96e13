use crate::config::Config;
use crate::error::{error_chain, ClientError};
use crate::services::{resolve_message, ApiClient};
use log::error;
use std::io::{self, BufRead, Write};

const BANNER: &str = "🦙 Llama API Test Script";
const SEPARATOR_WIDTH: usize = 30;

fn separator() -> String {
    "=".repeat(SEPARATOR_WIDTH)
}

/// Writes the human-readable outcome of one test.
pub fn report<W: Write>(out: &mut W, result: &Result<String, ClientError>) -> io::Result<()> {
    match result {
        Ok(reply) => {
            writeln!(out, "\n✅ Success! Llama responded:")?;
            writeln!(out, "Response: {}", reply)
        }
        Err(ClientError::Network(e)) => writeln!(out, "❌ Request failed: {}", error_chain(e)),
        Err(ClientError::HttpStatus { status, body }) => {
            writeln!(out, "❌ Request failed: HTTP {}", status)?;
            writeln!(out, "Status code: {}", status)?;
            writeln!(out, "Response text: {}", body)
        }
        Err(ClientError::JsonParse { reason, body }) => {
            writeln!(out, "❌ Failed to parse JSON response: {}", reason)?;
            writeln!(out, "Response text: {}", body)
        }
        Err(ClientError::Format { body }) => {
            writeln!(out, "❌ Unexpected response format:")?;
            let pretty = serde_json::to_string_pretty(body).unwrap_or_else(|_| body.to_string());
            writeln!(out, "{}", pretty)
        }
    }
}

/// Sends one message and reports the result. Returns whether it succeeded.
pub async fn run_test<W: Write>(
    client: &ApiClient,
    message: Option<&str>,
    out: &mut W,
) -> io::Result<bool> {
    writeln!(out, "Sending test message: '{}'", resolve_message(message))?;
    writeln!(out, "Making API request...")?;
    out.flush()?;

    let result = client.send_test_message(message).await;
    if let Err(e) = &result {
        error!("Test request failed: {}", e);
    }
    report(out, &result)?;
    Ok(result.is_ok())
}

/// Prints `question` and reads one trimmed line. EOF yields an empty string.
fn ask<R: BufRead, W: Write>(input: &mut R, out: &mut W, question: &str) -> io::Result<String> {
    write!(out, "{}", question)?;
    out.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

pub fn wants_custom_test<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<bool> {
    let answer = ask(input, out, "Want to test with a custom message? (y/n): ")?;
    Ok(answer.to_lowercase().starts_with('y'))
}

pub async fn run_custom_test<R: BufRead, W: Write>(
    client: &ApiClient,
    input: &mut R,
    out: &mut W,
) -> io::Result<bool> {
    let message = ask(
        input,
        out,
        "Enter your test message (or press Enter for default): ",
    )?;
    let message = (!message.is_empty()).then_some(message.as_str());
    run_test(client, message, out).await
}

/// Default test, then the optional custom test. Returns whether every test
/// that ran succeeded.
pub async fn run_session<R: BufRead, W: Write>(
    client: &ApiClient,
    config: &Config,
    input: &mut R,
    out: &mut W,
) -> io::Result<bool> {
    writeln!(out, "{}", BANNER)?;
    writeln!(out, "{}", separator())?;

    let mut all_ok = run_test(client, config.message.as_deref(), out).await?;

    writeln!(out, "\n{}", separator())?;

    if config.interactive && wants_custom_test(input, out)? {
        all_ok &= run_custom_test(client, input, out).await?;
    }

    Ok(all_ok)
}
