// Interactive search-tree shell
//
// Reads commands from stdin and drives one exploration session against the
// search backend. Backend-bound commands run as separate tasks, so a slow
// refresh on one node does not block expanding another.

use anyhow::Result;
use clap::Parser;
use kodegen_tools_searchtree::cli::{self, Command, Outcome};
use kodegen_tools_searchtree::utils::DEFAULT_BACKEND_URL;
use kodegen_tools_searchtree::{ExplorerConfig, SearchSource};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "kodegen-searchtree", about = "Explore a keyword as a tree of searches")]
struct Args {
    /// Base URL of the search backend
    #[arg(long, conflicts_with = "config")]
    backend_url: Option<String>,

    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Source for root searches (baidu or cc98)
    #[arg(long)]
    source: Option<SearchSource>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => ExplorerConfig::from_json_file(path)?,
        None => ExplorerConfig::builder()
            .backend_url(args.backend_url.as_deref().unwrap_or(DEFAULT_BACKEND_URL))
            .build()?,
    };
    let mut source = args.source.unwrap_or(config.default_source());

    let session = kodegen_tools_searchtree::connect(config)?;
    tracing::info!(backend = session.config().backend_url(), "Session ready");

    // Refresh start notices, so long requests show up before they finish
    tokio::spawn(cli::watch_events(session.subscribe()));

    println!("{}", cli::HELP);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("! {e}");
                continue;
            }
        };

        if command.is_remote() {
            let session = session.clone();
            tokio::spawn(async move {
                if let Outcome::Output(text) = cli::execute(&session, source, command).await {
                    println!("{text}");
                }
            });
            continue;
        }

        match cli::execute(&session, source, command).await {
            Outcome::Output(text) => println!("{text}"),
            Outcome::SetSource(next) => {
                source = next;
                println!("Root searches now use {}.", source.label());
            }
            Outcome::Quit => break,
        }
    }

    Ok(())
}
