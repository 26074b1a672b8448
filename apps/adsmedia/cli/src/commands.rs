//! Command-line definitions and dispatch.

use clap::{Args, Parser, Subcommand};
use domain_adsmedia::config::{API_KEY_ENV, BASE_URL_ENV, DEFAULT_BASE_URL};
use domain_adsmedia::{
    AdsMediaClient, AdsMediaConfig, EmailApi, EmailMessage, StatusLookup, StatusQuery,
    ToolParameters, ToolRuntime, find_tool, registry,
};
use eyre::{Result, eyre};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Parser)]
#[command(name = "adsmedia")]
#[command(about = "Send transactional email through ADSMedia")]
pub struct Cli {
    /// Bearer token for the ADSMedia API
    #[arg(long, env = API_KEY_ENV, hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// API endpoint
    #[arg(long, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL, global = true)]
    pub base_url: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30, global = true)]
    pub timeout: u64,

    /// Log requests to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the available tools
    Tools,

    /// Invoke a tool by name, printing its text answer
    Invoke {
        /// Tool name (see `adsmedia tools`)
        tool: String,

        /// Tool parameter as key=value, repeatable
        #[arg(short, long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,
    },

    /// Send a single email
    Send(SendArgs),

    /// Check whether an address is suppressed
    Check {
        email: String,
    },

    /// Test the connection and credentials
    Ping,

    /// Show account usage statistics
    Usage,

    /// Show account details
    Account,

    /// Show the delivery status of a sent email
    Status {
        /// Message id returned by a send
        #[arg(long, conflicts_with = "id", required_unless_present = "id")]
        message_id: Option<String>,

        /// Numeric send id returned by a send
        #[arg(long)]
        id: Option<u64>,
    },
}

#[derive(Debug, Clone, Args)]
pub struct SendArgs {
    #[arg(long)]
    pub to: String,
    #[arg(long)]
    pub subject: String,
    #[arg(long)]
    pub html: String,
    #[arg(long)]
    pub to_name: Option<String>,
    #[arg(long)]
    pub from_name: Option<String>,
    #[arg(long)]
    pub text: Option<String>,
    #[arg(long)]
    pub reply_to: Option<String>,
}

impl From<SendArgs> for EmailMessage {
    fn from(args: SendArgs) -> Self {
        let mut message = EmailMessage::new(args.to, args.subject, args.html);
        if let Some(name) = args.to_name {
            message = message.with_to_name(name);
        }
        if let Some(name) = args.from_name {
            message = message.with_from_name(name);
        }
        if let Some(text) = args.text {
            message = message.with_text(text);
        }
        if let Some(reply_to) = args.reply_to {
            message = message.with_reply_to(reply_to);
        }
        message
    }
}

/// Parses `key=value`; the value may itself contain `=`.
fn parse_param(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", raw))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing parameter name in '{}'", raw));
    }
    Ok((key.to_string(), value.to_string()))
}

impl Cli {
    fn client(&self) -> Result<AdsMediaClient> {
        let config = AdsMediaConfig::new(self.api_key.clone().unwrap_or_default())
            .with_base_url(self.base_url.clone())
            .with_timeout(Duration::from_secs(self.timeout));
        Ok(AdsMediaClient::from_config(config)?)
    }

    fn runtime(&self) -> ToolRuntime {
        match &self.api_key {
            Some(key) => ToolRuntime::with_api_key(key.clone()),
            None => ToolRuntime::default(),
        }
    }

    /// Runs the command and returns what should be printed.
    pub async fn run(self) -> Result<String> {
        debug!(command = ?self.command, base_url = %self.base_url, "Running command");

        match &self.command {
            Commands::Tools => Ok(registry(&self.base_url)
                .iter()
                .map(|tool| {
                    format!(
                        "{:<20} {} [{}]",
                        tool.name(),
                        tool.description(),
                        tool.parameters().join(", ")
                    )
                })
                .collect::<Vec<_>>()
                .join("\n")),

            Commands::Invoke { tool, params } => {
                let tool = find_tool(&self.base_url, tool)
                    .ok_or_else(|| eyre!("unknown tool '{}'", tool))?;
                let params: ToolParameters = params
                    .iter()
                    .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                    .collect();
                Ok(tool.invoke(&self.runtime(), &params).await.text)
            }

            Commands::Send(args) => {
                let message = EmailMessage::from(args.clone());
                let receipt = self.client()?.send(&message).await?;
                Ok(serde_json::to_string_pretty(&receipt)?)
            }

            Commands::Check { email } => {
                let status = self.client()?.check_suppression(email).await?;
                Ok(serde_json::to_string_pretty(&status)?)
            }

            Commands::Ping => pretty(self.client()?.ping().await?),
            Commands::Usage => pretty(self.client()?.get_usage().await?),
            Commands::Account => pretty(self.client()?.get_account().await?),

            Commands::Status { message_id, id } => {
                let lookup = StatusLookup::try_from(StatusQuery {
                    message_id: message_id.clone(),
                    id: *id,
                })?;
                pretty(self.client()?.get_status(&lookup).await?)
            }
        }
    }
}

fn pretty(value: Value) -> Result<String> {
    Ok(serde_json::to_string_pretty(&value)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_param() {
        assert_eq!(
            parse_param("html=<a href=\"x\">x</a>").unwrap(),
            ("html".to_string(), "<a href=\"x\">x</a>".to_string())
        );
        assert!(parse_param("novalue").is_err());
        assert!(parse_param("=value").is_err());
    }

    #[test]
    fn test_invoke_args() {
        let cli = Cli::try_parse_from([
            "adsmedia",
            "--api-key",
            "key",
            "invoke",
            "send_email",
            "-p",
            "to=a@example.com",
            "--param",
            "subject=Hi",
        ])
        .unwrap();

        match cli.command {
            Commands::Invoke { tool, params } => {
                assert_eq!(tool, "send_email");
                assert_eq!(params.len(), 2);
                assert_eq!(params[1], ("subject".to_string(), "Hi".to_string()));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_status_requires_exactly_one_key() {
        assert!(Cli::try_parse_from(["adsmedia", "status"]).is_err());
        assert!(
            Cli::try_parse_from(["adsmedia", "status", "--message-id", "m1", "--id", "3"]).is_err()
        );
        assert!(Cli::try_parse_from(["adsmedia", "status", "--id", "3"]).is_ok());
    }

    #[test]
    fn test_send_args_to_message() {
        let cli = Cli::try_parse_from([
            "adsmedia",
            "send",
            "--to",
            "a@example.com",
            "--subject",
            "Hi",
            "--html",
            "<p>hi</p>",
            "--from-name",
            "Shop",
        ])
        .unwrap();

        let Commands::Send(args) = cli.command else {
            panic!("expected send");
        };
        let message = EmailMessage::from(args);
        assert_eq!(message.from_name.as_deref(), Some("Shop"));
        assert_eq!(message.to_name, None);
    }

    #[tokio::test]
    async fn test_tools_listing() {
        let cli = Cli::try_parse_from(["adsmedia", "tools"]).unwrap();
        let output = cli.run().await.unwrap();
        assert!(output.contains("send_email"));
        assert!(output.contains("check_suppression"));
    }

    #[tokio::test]
    async fn test_invoke_without_api_key_prints_tool_error() {
        temp_env::async_with_vars([(API_KEY_ENV, None::<&str>)], async {
            let cli = Cli::try_parse_from([
                "adsmedia",
                "invoke",
                "check_suppression",
                "-p",
                "email=a@example.com",
            ])
            .unwrap();
            assert_eq!(cli.run().await.unwrap(), "Error: API key not configured");
        })
        .await;
    }

    #[tokio::test]
    async fn test_unknown_tool_is_error() {
        let cli = Cli::try_parse_from(["adsmedia", "invoke", "nope"]).unwrap();
        assert!(cli.run().await.is_err());
    }
}
