use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tokio::sync::mpsc;

use newsdash::app::{App, AppEvent};
use newsdash::config::Config;
use newsdash::{feed, output, ui};

/// Get the config directory path (~/.config/newsdash/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("newsdash"))
}

#[derive(Parser, Debug)]
#[command(
    name = "newsdash",
    about = "Search Google News and browse the results in the terminal"
)]
struct Args {
    /// Search query (defaults to `default_query` from the config file)
    query: Option<String>,

    /// Print the results as plain text instead of opening the dashboard
    #[arg(long, conflicts_with = "json")]
    print: bool,

    /// Print the results as JSON instead of opening the dashboard
    #[arg(long)]
    json: bool,

    /// Config file (default: ~/.config/newsdash/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing for debug logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config_path = match args.config {
        Some(path) => path,
        None => get_config_dir()?.join("config.toml"),
    };
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    let settings = config.search_settings();
    let query = args.query.unwrap_or_else(|| config.default_query.clone());

    let client = reqwest::Client::builder()
        .user_agent(concat!("newsdash/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")?;

    if args.print || args.json {
        let outcome = feed::search(&client, &settings, &query).await;
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        if args.json {
            output::write_json(&mut out, &outcome)?;
        } else {
            output::write_cards(&mut out, &query, &outcome)?;
        }
        return Ok(());
    }

    let mut app = App::new(client, settings, query.clone());

    // Create event channel for background tasks
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>(8);

    ui::spawn_search(&mut app, query, &event_tx);
    ui::run(&mut app, event_tx, event_rx).await?;

    Ok(())
}
