use serde_json::Value;
use std::error::Error as StdError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("{}", error_chain(.0))]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status}")]
    HttpStatus { status: u16, body: String },

    #[error("{reason}")]
    JsonParse { reason: String, body: String },

    #[error("Unexpected response format")]
    Format { body: Value },
}

/// Joins an error and every `source()` below it with `": "`.
pub fn error_chain(err: &dyn StdError) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}
