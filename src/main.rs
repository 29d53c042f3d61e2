use anyhow::Context;
use clap::{Parser, Subcommand};
use locale_scout::config::AppConfig;
use locale_scout::credentials::FileStore;
use locale_scout::providers::IdealistaProvider;
use locale_scout::ranking::ScoreTier;
use locale_scout::{PropertyService, SearchRequest};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "locale-scout", about = "Find commercial rentals for your business")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Search listings and print them ranked by price score
    Search(SearchArgs),
    /// Manage the RapidAPI key used for live listings
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },
}

#[derive(Debug, clap::Args)]
struct SearchArgs {
    /// City or area, e.g. "Milano Centro"
    #[arg(long)]
    location: String,
    #[arg(long, default_value_t = 0.0)]
    min_price: f64,
    #[arg(long, default_value_t = 5000.0)]
    max_price: f64,
    #[arg(long, default_value_t = 0.0)]
    min_surface: f64,
    #[arg(long, default_value_t = 500.0)]
    max_surface: f64,
    /// Business subtype the space is for
    #[arg(long, default_value = "Negozio")]
    property_type: String,
    /// Print results as JSON
    #[arg(long)]
    json: bool,
    /// Also write results as JSON to this file
    #[arg(long)]
    save: Option<String>,
}

#[derive(Debug, Subcommand)]
enum KeyAction {
    /// Save a key
    Set { key: String },
    /// Show whether a key is configured
    Show,
    /// Remove the saved key
    Clear,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .init();

    let store = FileStore::new(&config.store_path);
    let store_path = store.path().display().to_string();
    let provider = IdealistaProvider::with_settings(config.provider.clone())?;
    let service = PropertyService::new(store, provider);

    match cli.command {
        Command::Search(args) => search(&service, args).await,
        Command::Key { action } => manage_key(&service, action, &store_path),
    }
}

async fn search(service: &PropertyService, args: SearchArgs) -> anyhow::Result<()> {
    let request = SearchRequest::new(
        args.location,
        args.max_price,
        args.min_surface,
        args.max_surface,
        args.property_type,
    )?
    .with_min_price(args.min_price)?;

    info!(
        "🔎 Searching '{}' for {} up to €{}",
        request.location(),
        request.property_type(),
        request.max_price()
    );

    let results = service.search_ranked(&request).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        println!("\nFound {} opportunities\n", results.len());
        for (i, scored) in results.iter().enumerate() {
            let listing = &scored.listing;
            println!(
                "{}. {} [{}/100, {:?}]",
                i + 1,
                listing.title,
                scored.score,
                ScoreTier::from_score(scored.score)
            );
            println!("   €{}/mese, {} m²", listing.price, listing.surface);
            println!("   {}", listing.address);
            println!("   Features: {}", listing.features.join(", "));
            if !listing.url.is_empty() {
                println!("   URL: {}", listing.url);
            }
            println!("   Source: {}", listing.source.label());
            println!();
        }
    }

    if let Some(path) = args.save {
        let json = serde_json::to_string_pretty(&results)?;
        tokio::fs::write(&path, json)
            .await
            .with_context(|| format!("writing results to {}", path))?;
        info!("💾 Saved {} listings to {}", results.len(), path);
    }

    Ok(())
}

fn manage_key(service: &PropertyService, action: KeyAction, store_path: &str) -> anyhow::Result<()> {
    match action {
        KeyAction::Set { key } => {
            service.set_credential(&key)?;
            println!("API key saved to {}, live listings enabled", store_path);
        }
        KeyAction::Show => match service.get_credential() {
            Some(key) => println!("API key configured ({}) in {}", mask(&key), store_path),
            None => println!("No API key configured, searches use demo data"),
        },
        KeyAction::Clear => {
            service.clear_credential()?;
            println!("API key removed from {}", store_path);
        }
    }
    Ok(())
}

/// Keep only the last four characters visible
fn mask(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let visible = chars.len().min(4);
    let hidden = chars.len() - visible;
    let tail: String = chars[hidden..].iter().collect();
    format!("{}{}", "*".repeat(hidden), tail)
}
