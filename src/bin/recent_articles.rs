//! Print the most recently modified articles once and exit.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use recent_articles::config::FeedConfig;
use recent_articles::feed::create_feed;

#[derive(Debug, Parser)]
#[command(name = "recent-articles", about = "List the most recently modified articles")]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Only list articles of this section (overrides the configuration).
    #[arg(short, long)]
    section: Option<String>,

    /// Print the articles as JSON.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recent_articles=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = FeedConfig::load(cli.config).context("failed to load configuration")?;
    if cli.section.is_some() {
        config.section = cli.section;
    }

    let feed = create_feed(&config).await?;
    feed.refresh().await.context("failed to refresh recent articles")?;

    let articles = feed.articles();
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&*articles)?);
        return Ok(());
    }

    if articles.is_empty() {
        println!("No recent articles.");
    }
    for (rank, article) in articles.iter().enumerate() {
        println!("{:>2}. {}  ({})", rank + 1, article.title, article.path);
        if !article.description.is_empty() {
            println!("    {}", article.description);
        }
    }

    Ok(())
}
