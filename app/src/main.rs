#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

use clap::{Parser, Subcommand};
use stringlens_config::Config;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod command;

use command::{
    CommandStrategy, InfoStrategy, InitStrategy, ParseInput, ParseStrategy, ServeInput,
    ServeStrategy, VersionStrategy,
};

#[derive(Parser)]
#[command(name = "stringlens")]
#[command(about = "String analysis HTTP service", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Address to bind (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config and $PORT)
        #[arg(short = 'p', long)]
        port: Option<u16>,
    },
    /// Show how a natural-language query is interpreted
    Parse {
        /// The query, e.g. "single word palindromes"
        query: String,
    },
    /// Initialize configuration
    Init,
    /// Show configuration and query rules
    Info,
    /// Show version
    Version,
}

fn init_tracing(default_level: &str) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_level)?,
    };
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::load()?;
    init_tracing(&config.logging.level)?;
    let config = config.apply_env();

    match cli.command {
        Commands::Serve { host, port } => {
            ServeStrategy
                .execute(ServeInput { config, host, port })
                .await?;
        }
        Commands::Parse { query } => {
            ParseStrategy.execute(ParseInput { query }).await?;
        }
        Commands::Init => {
            InitStrategy.execute(()).await?;
        }
        Commands::Info => {
            InfoStrategy.execute(config).await?;
        }
        Commands::Version => {
            VersionStrategy.execute(()).await?;
        }
    }

    Ok(())
}
