//! agentloop - terminal agent with code execution, memory, and skills

mod cli;

use agentloop_core::cli::Cli;
use agentloop_core::config::api_keys::load_dotenv;
use agentloop_core::AgentloopConfig;
use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.verbose);

    if let Some(path) = &args.init_config {
        AgentloopConfig::create_sample_config(path)?;
        println!("Wrote sample configuration to {}", path.display());
        return Ok(());
    }

    load_dotenv()?;
    let config = args.load_config()?;
    cli::handle_chat_command(&args, config).await
}

/// Logs go to stderr so the transcript on stdout stays clean
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "warn,agentloop=debug,agentloop_core=debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
