use anyhow::Result;
use clap::Parser;
use console_cli::Cli;
use console_startup::{execute_console_auth_startup, init_tracing};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();
    let output = execute_console_auth_startup(&cli).await?;
    println!("{output}");
    Ok(())
}
