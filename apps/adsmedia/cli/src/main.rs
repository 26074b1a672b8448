//! adsmedia: send email and run the ADSMedia tools from a terminal.
//!
//! Usage:
//!   adsmedia tools
//!   adsmedia invoke send_email -p to=user@example.com -p subject=Hi -p html="<p>Hi</p>"
//!   adsmedia send --to user@example.com --subject Hi --html "<p>Hi</p>"
//!   adsmedia check user@example.com
//!   adsmedia status --message-id m_123
//!
//! The API key comes from `--api-key` or ADSMEDIA_API_KEY.

use clap::Parser;
use core_config::tracing::{init_cli_tracing, install_color_eyre};

mod commands;

use commands::Cli;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let cli = Cli::parse();
    init_cli_tracing(cli.verbose);

    let output = cli.run().await?;
    println!("{}", output);

    Ok(())
}
