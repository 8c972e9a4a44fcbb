use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use listing_scout::catalog;
use listing_scout::config::AppConfig;
use listing_scout::models::{City, Listing, ListingUpdate, NewListing};
use listing_scout::seo;
use listing_scout::store::{Backends, ListingQuery, ListingSource, ListingStore};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "listing-scout")]
#[command(about = "Browse property listings and find related ones", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List listings, filtered and paginated
    List {
        #[arg(long)]
        city: Option<City>,
        #[arg(long)]
        district: Option<String>,
        #[arg(long = "type")]
        kind: Option<String>,
        #[arg(long)]
        min_price: Option<f64>,
        #[arg(long)]
        max_price: Option<f64>,
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long, default_value_t = 12)]
        per_page: usize,
    },
    /// Show a listing with its URL and SEO metadata
    Show { id: String },
    /// Related listings for a listing
    Related {
        id: String,
        /// Number of results (defaults to the configured related_limit)
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Print the JSON-LD document for a listing
    Schema { id: String },
    /// Add a listing from a JSON file
    Add { file: PathBuf },
    /// Apply a partial update from a JSON file
    Update { id: String, file: PathBuf },
    /// Delete a listing
    Delete { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;

    let backends = Backends::from_config(&config)?;
    let reader = backends.reader();
    let store = &backends.store;

    match cli.command {
        Commands::List {
            city,
            district,
            kind,
            min_price,
            max_price,
            page,
            per_page,
        } => {
            let listings = reader.fetch_all().await?;
            let query = ListingQuery {
                city,
                district,
                kind,
                min_price,
                max_price,
            };
            let result = catalog::page(&listings, &query, page, per_page)?;
            println!(
                "Page {}/{} ({} listings)\n",
                result.page, result.total_pages, result.total
            );
            for (i, listing) in result.items.iter().enumerate() {
                let n = (page - 1).saturating_mul(per_page).saturating_add(i + 1);
                print_summary(n, listing);
            }
        }
        Commands::Show { id } => {
            let listing = find(reader, &id).await?;
            print_summary(1, &listing);
            println!("   Title: {}", seo::enhance_title(&listing.title, &listing));
            println!("   Description: {}", seo::description(&listing));
            println!("   Keywords: {}", seo::keywords(&listing).join(", "));
        }
        Commands::Related { id, limit } => {
            let limit = limit.unwrap_or(config.related_limit);
            let related = catalog::related(reader, &id, limit).await?;
            println!(
                "Related to {} ({})\n",
                related.listing.id,
                seo::title(&related.listing)
            );
            for (i, candidate) in related.matches.iter().enumerate() {
                println!("[{}% similar]", candidate.similarity);
                print_summary(i + 1, &candidate.listing);
            }
        }
        Commands::Schema { id } => {
            let listing = find(reader, &id).await?;
            let doc = seo::schema(&listing, &config.site_url);
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
        Commands::Add { file } => {
            let new: NewListing = read_json(&file).await?;
            let created = store.add(new).await?;
            info!("✅ Added listing {}", created.id);
            print_summary(1, &created);
        }
        Commands::Update { id, file } => {
            let update: ListingUpdate = read_json(&file).await?;
            let updated = store.update(&id, update).await?;
            info!("✅ Updated listing {}", updated.id);
            print_summary(1, &updated);
        }
        Commands::Delete { id } => {
            store.delete(&id).await?;
            info!("🗑️ Deleted listing {}", id);
        }
    }

    Ok(())
}

async fn find(source: &dyn ListingSource, id: &str) -> Result<Listing> {
    source
        .fetch_by_id(id)
        .await?
        .with_context(|| format!("listing {id} not found"))
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}

fn print_summary(n: usize, listing: &Listing) {
    println!("{}. {} ({})", n, listing.kind, seo::format_price(listing.price));
    println!(
        "   {} m², {} bedrooms, {:?}",
        listing.details.area_sqm, listing.details.bedrooms, listing.status
    );
    println!("   Area: {}", listing.location.district);
    println!("   ID: {}", listing.id);
    if !listing.amenities.is_empty() {
        println!("   Features: {}", listing.amenities.join(", "));
    }
    println!("   URL: {}", seo::listing_path(listing));
    println!();
}
