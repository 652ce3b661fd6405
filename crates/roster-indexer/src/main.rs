//! roster-indexer CLI - builds the employee search index

use clap::{Parser, Subcommand};
use roster_indexer::{DEFAULT_ROSTER_PATH, run_build, status};
use roster_store::FastEmbedder;
use roster_store::artifacts::{ArtifactPaths, DEFAULT_INDEX_PATH, DEFAULT_METADATA_PATH};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "roster-indexer")]
#[command(about = "Build the employee vector index for the HR chat server")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Embed every employee profile and write the index/metadata pair
    Build {
        /// Roster document ({"employees": [...]})
        #[arg(short, long, default_value = DEFAULT_ROSTER_PATH)]
        input: PathBuf,

        /// Output path of the vector index blob
        #[arg(long, default_value = DEFAULT_INDEX_PATH)]
        index: PathBuf,

        /// Output path of the metadata store
        #[arg(long, default_value = DEFAULT_METADATA_PATH)]
        metadata: PathBuf,
    },
    /// Verify an existing index/metadata pair
    Status {
        #[arg(long, default_value = DEFAULT_INDEX_PATH)]
        index: PathBuf,

        #[arg(long, default_value = DEFAULT_METADATA_PATH)]
        metadata: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            input,
            index,
            metadata,
        } => {
            info!("Building index from: {}", input.display());
            let embedder = FastEmbedder::new()?;
            let paths = ArtifactPaths { index, metadata };

            let summary = run_build(&input, &paths, &embedder)?;
            info!(
                "Index built: {} employees, {} dimensions",
                summary.employees, summary.dimension
            );
        }
        Commands::Status { index, metadata } => {
            let paths = ArtifactPaths { index, metadata };
            let report = status(&paths)?;
            info!(
                "Artifacts OK: {} employees, {} dimensions, metadata fingerprint {}",
                report.employees, report.dimension, report.fingerprint
            );
        }
    }

    Ok(())
}
