use anyhow::Result;
use clap::{Parser, Subcommand};
use listing_scout::format::listing_price;
use listing_scout::{
    Catalog, Config, HttpPropertyStore, MemoryPropertyStore, PropertyListing, PropertyStore,
    QueryParams, SortKey,
};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "listing-scout")]
#[command(about = "Browse and search property listings")]
#[command(version)]
struct Cli {
    /// Use the built-in sample catalogue instead of the property store
    #[arg(long, global = true)]
    demo: bool,

    /// Property store base URL (overrides PROPERTY_STORE_URL)
    #[arg(long, global = true)]
    store_url: Option<String>,

    /// Request timeout in seconds (overrides PROPERTY_STORE_TIMEOUT_SECS)
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search and sort all listings
    Browse {
        /// Case-insensitive text to look for in listing names
        #[arg(short, long)]
        search: Option<String>,

        /// none, price_asc, price_desc, date_desc or date_asc
        #[arg(long)]
        sort: Option<String>,

        #[arg(long, default_value_t = 0)]
        offset: usize,

        #[arg(long)]
        limit: Option<usize>,

        /// Also write the results to this JSON file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Homepage selection
    Featured,

    /// One listing with its reviews
    Show { id: String },

    /// Listings posted by an owner
    Mine {
        email: String,

        #[arg(long, default_value = "none")]
        sort: SortKey,
    },

    /// Reviews written by a user
    Ratings { email: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    if cli.demo {
        info!("🏠 Listing Scout - sample catalogue");
        let catalog = Catalog::new(MemoryPropertyStore::with_sample_data());
        return run(&catalog, cli.command).await;
    }

    let mut config = Config::from_env()?;
    if let Some(url) = cli.store_url {
        config.store_url = url;
    }
    if let Some(secs) = cli.timeout {
        config.timeout = Duration::from_secs(secs);
    }

    info!("🏠 Listing Scout - {}", config.store_url);
    let catalog = Catalog::new(HttpPropertyStore::from_config(&config)?);
    run(&catalog, cli.command).await
}

async fn run<S: PropertyStore>(catalog: &Catalog<S>, command: Command) -> Result<()> {
    match command {
        Command::Browse {
            search,
            sort,
            offset,
            limit,
            output,
        } => {
            let page = catalog
                .browse_raw(search.as_deref(), sort.as_deref(), offset, limit)
                .await?;

            if page.is_empty() {
                println!("No properties found");
            }
            print_listings(&page.items, page.offset);
            if page.has_more() {
                println!("... {} more", page.total - page.offset - page.items.len());
            }

            if let Some(path) = output {
                let json = serde_json::to_string_pretty(&page.items)?;
                tokio::fs::write(&path, json).await?;
                info!("💾 Saved {} listings to {}", page.items.len(), path.display());
            }
        }
        Command::Featured => {
            let listings = catalog.featured().await?;
            print_listings(&listings, 0);
        }
        Command::Show { id } => {
            let details = catalog.listing_details(&id).await?;
            print_listings(std::slice::from_ref(&details.listing), 0);
            println!("   {}", details.listing.description);
            match details.average_stars {
                Some(average) => println!(
                    "   Rated {:.1}/5 from {} reviews",
                    average,
                    details.ratings.len()
                ),
                None => println!("   No reviews yet"),
            }
            for rating in &details.ratings {
                let stars = "★".repeat(rating.stars.into());
                println!("   {} {}: {}", stars, rating.reviewer_name, rating.review);
            }
        }
        Command::Mine { email, sort } => {
            let page = catalog
                .my_listings(&email, &QueryParams::new().sort(sort))
                .await?;
            if page.is_empty() {
                println!("{} has no listings", email);
            }
            print_listings(&page.items, 0);
        }
        Command::Ratings { email } => {
            let ratings = catalog.my_ratings(&email).await?;
            if ratings.is_empty() {
                println!("No ratings yet");
            }
            for rating in &ratings {
                let property = rating.property_name.as_deref().unwrap_or(&rating.property_id);
                println!("{} - {}/5", property, rating.stars);
                println!("   {}", rating.review);
                if let Some(date) = rating.created_at {
                    println!("   {}", date.format("%Y-%m-%d"));
                }
                println!();
            }
        }
    }

    Ok(())
}

fn print_listings(listings: &[PropertyListing], offset: usize) {
    for (i, listing) in listings.iter().enumerate() {
        println!("{}. {} ({})", offset + i + 1, listing.name, listing_price(listing));
        println!("   {} · {}", listing.category, listing.location);
        println!("   Posted by {}", listing.owner_name);
        if let Some(posted) = listing.posted_at {
            println!("   Posted: {}", posted.format("%Y-%m-%d"));
        }
        println!("   ID: {}", listing.id);
        println!();
    }
}
