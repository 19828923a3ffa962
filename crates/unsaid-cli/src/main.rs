use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use unsaid_core::export::is_likely_export;
use unsaid_server::state::AppState;

#[derive(Parser)]
#[command(name = "unsaid", version, about = "Conversation analysis service")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Run the HTTP API server (reads GEMINI_API_KEY)")]
    Serve {
        #[arg(long, default_value = "127.0.0.1", help = "Bind address")]
        bind: String,
        #[arg(long, default_value = "3000", help = "HTTP API server port")]
        port: u16,
    },
    #[command(about = "Check whether a file looks like an exported chat transcript")]
    Validate {
        #[arg(help = "Path to the exported .txt file")]
        file: PathBuf,
    },
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Commands::Serve { bind, port } => {
            let state = AppState::from_env();
            unsaid_server::serve(state, &format!("{bind}:{port}")).await
        }
        Commands::Validate { file } => {
            let content = std::fs::read_to_string(&file)?;
            if is_likely_export(&content) {
                println!("{}: looks like a chat export", file.display());
                Ok(())
            } else {
                bail!("{}: does not look like a chat export", file.display())
            }
        }
    }
}
