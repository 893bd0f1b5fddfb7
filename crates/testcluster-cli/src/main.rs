//! Test cluster CLI.
//!
//! Drives the shared integration-test cluster by hand.
//!
//! ```bash
//! # Write a default testcluster.toml
//! testcluster init
//!
//! # Install, start, and stop on Ctrl+C
//! testcluster up
//!
//! # Check a captured start report
//! testcluster parse report.txt
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// Install, start and inspect the shared multi-node test cluster.
#[derive(Parser)]
#[command(name = "testcluster")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default testcluster.toml.
    Init {
        /// Project directory to write the configuration into.
        #[arg(short, long, default_value = ".")]
        dir: String,

        /// Overwrite an existing configuration file.
        #[arg(long)]
        force: bool,
    },

    /// Install and start the cluster, then stop it on Ctrl+C.
    Up {
        /// Project directory holding testcluster.toml.
        #[arg(short, long, default_value = ".")]
        dir: String,

        /// Kill the cluster instead of stopping it gracefully.
        #[arg(long)]
        kill: bool,
    },

    /// Parse a start report and print its members.
    Parse {
        /// Report file. Reads stdin when omitted.
        file: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so member tables on stdout stay clean.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { dir, force } => commands::init::run(&dir, force),
        Commands::Up { dir, kill } => commands::up::run(&dir, kill).await,
        Commands::Parse { file } => commands::parse::run(file.as_deref()),
    }
}
