use anyhow::Context;
use clap::Parser;
use reqwest::Url;

pub const DEFAULT_API_URL: &str = "https://ai.hackclub.com/chat/completions";

/// Send a test message to a chat-completion endpoint and print the reply.
#[derive(Parser, Debug)]
#[command(name = "llama-probe", version, about)]
pub struct Cli {
    /// Message for the first test (defaults to a canned greeting)
    #[arg(short, long)]
    pub message: Option<String>,

    /// Chat-completion endpoint
    #[arg(long, default_value = DEFAULT_API_URL)]
    pub url: String,

    /// Skip the custom message prompt
    #[arg(long)]
    pub no_interactive: bool,

    /// Exit with a non-zero status when a test fails
    #[arg(long)]
    pub fail_on_error: bool,
}

pub struct Config {
    pub api_url: Url,
    pub message: Option<String>,
    pub interactive: bool,
    pub fail_on_error: bool,
}

impl Config {
    pub fn from_cli(cli: Cli) -> anyhow::Result<Self> {
        let api_url =
            Url::parse(&cli.url).with_context(|| format!("invalid API url: {}", cli.url))?;

        Ok(Self {
            api_url,
            message: cli.message,
            interactive: !cli.no_interactive,
            fail_on_error: cli.fail_on_error,
        })
    }
}
