use cinema_watch::core::filter::{promotional_items, total_count};
use cinema_watch::core::CatalogSource;
use cinema_watch::utils::error::Result;
use cinema_watch::utils::validation::Validate;
use cinema_watch::TomlConfig;
use clap::Parser;

/// One-shot fetch of the gift-shop catalog, for checking the API by hand.
#[derive(Parser)]
#[command(name = "catalog_probe")]
#[command(about = "Fetch the catalog once and print movie ticket counts")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "cinema-watch.toml")]
    config: String,

    /// Print the re-encoded response
    #[arg(long)]
    raw: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let config = TomlConfig::from_file(&args.config)?;
    config.validate()?;

    println!("📡 Fetching catalog from {}", config.source.endpoint);
    let client = config.build_client()?;
    let snapshot = match client.fetch().await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            if let Some(body) = e.raw_body() {
                eprintln!("Raw body:\n{}", body);
            }
            return Err(e);
        }
    };

    println!("📊 Classifications: {}", snapshot.classifications.len());
    for entry in &snapshot.classifications {
        println!(
            "  - {}/{}: {} items",
            entry.large_code, entry.middle_code, entry.item_count
        );
    }

    println!("🎬 Movie tickets: {}", total_count(&snapshot));

    let promos = promotional_items(&snapshot);
    println!("🎟️ Promotional tickets: {}", promos.len());
    for item in &promos {
        println!(
            "  - {} ({}원, {}) id={}",
            item.name, item.price, item.restriction, item.item_id
        );
    }

    if args.raw {
        println!("\n{}", snapshot.to_json()?);
    }

    Ok(())
}
