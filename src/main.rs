//! hr-rag-chat server and one-shot terminal client

use clap::{Parser, Subcommand};
use hr_rag_chat::api::{self, AppState};
use hr_rag_chat::config::ServerConfig;
use hr_rag_chat::engine::{self, pagination};
use roster_types::or_na;
use tracing::info;

#[derive(Parser)]
#[command(name = "hr-rag-chat")]
#[command(about = "Answer questions about the employee roster")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the HTTP API (default)
    Serve,
    /// Answer one query and print a page of matches
    Ask {
        query: String,

        /// 1-based page of matches to print
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::from_env();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config).await,
        Commands::Ask { query, page } => ask(config, &query, page).await,
    }
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let state = AppState::from_config(&config)?;
    let app = api::router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "hr-rag-chat listening");

    axum::serve(listener, app).await?;
    Ok(())
}

async fn ask(config: ServerConfig, query: &str, page: usize) -> anyhow::Result<()> {
    let state = AppState::from_config(&config)?;
    let reply = engine::answer(query, &state.ctx).await;

    println!("{}", reply.response);

    let window = pagination::window(&reply.matches, page, pagination::PAGE_SIZE);
    if window.total == 0 {
        return Ok(());
    }

    println!("\nMatches (page {}, {} total):", window.page, window.total);
    for employee in window.items {
        println!(
            "  - {} | {} | {} | {}",
            employee.name,
            or_na(&employee.role),
            or_na(&employee.location),
            or_na(&employee.email)
        );
    }
    if window.has_more {
        println!("\nMore results available: rerun with --page {}", window.page + 1);
    }

    Ok(())
}
