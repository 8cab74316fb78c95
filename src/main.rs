use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info};

use voice_of_dine::config::Config;
use voice_of_dine::constants;
use voice_of_dine::dashboard::{build_report, DashboardReport, Selection};
use voice_of_dine::dataset;
use voice_of_dine::domain::Dataset;
use voice_of_dine::logging;
use voice_of_dine::observability::metrics;
use voice_of_dine::pipeline::filter::{restaurant_names, FacetFilter, FacetSelection};
use voice_of_dine::web::{app_router, AppState};

#[derive(Parser)]
#[command(name = "voice_of_dine")]
#[command(about = "Restaurant review analytics dashboard")]
#[command(version)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, global = true, default_value = constants::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Review CSV, overriding the configured path
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the dashboard over HTTP
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print a dashboard report for one restaurant or a city/cuisine selection
    Report {
        /// Restaurant name (single-restaurant mode)
        #[arg(long, conflicts_with_all = ["city", "cuisine", "no_cities", "no_cuisines"])]
        restaurant: Option<String>,
        /// Cities to include (repeatable); all when omitted
        #[arg(long)]
        city: Vec<String>,
        /// Cuisines to include (repeatable); all when omitted
        #[arg(long)]
        cuisine: Vec<String>,
        /// Select no cities at all
        #[arg(long, conflicts_with = "city")]
        no_cities: bool,
        /// Select no cuisines at all
        #[arg(long, conflicts_with = "cuisine")]
        no_cuisines: bool,
        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// List restaurant names in dataset order
    Restaurants,
}

fn facet_filter(values: Vec<String>, none: bool) -> FacetFilter {
    if none {
        FacetFilter::none()
    } else if values.is_empty() {
        FacetFilter::All
    } else {
        FacetFilter::only(values)
    }
}

fn load(config: &Config) -> anyhow::Result<&'static Dataset> {
    dataset::get_or_load(&config.data.path).map_err(|e| {
        error!("Failed to load dataset: {}", e);
        anyhow::Error::new(e)
    })
}

fn print_excerpts(title: &str, excerpts: Option<&[String]>) {
    println!("{}", title);
    match excerpts {
        Some(texts) => {
            for text in texts {
                println!("   - {}", text);
            }
        }
        None => println!("   {}", constants::NO_DATA),
    }
}

fn print_report(report: &DashboardReport) {
    match &report.selection {
        Selection::Restaurant { name } => println!("\n🍽️  {}", name),
        Selection::Facets(_) => println!("\n🌆 City & cuisine selection"),
    }
    println!("   Total reviews: {}", report.metrics.review_count);
    println!("   Average rating: {}", report.metrics.mean_rating_display());
    println!("   Total votes: {}", report.metrics.total_votes);
    if let Selection::Restaurant { .. } = report.selection {
        match report.health {
            Some(status) => println!("   Health: {} ({})", status.label(), status.indicator()),
            None => println!("   Health: {}", constants::NO_DATA),
        }
    }

    println!("\n📊 Sentiment:");
    for (sentiment, count) in report.sentiment_entries() {
        println!("   {}: {}", sentiment, count);
    }

    if let Some(rollups) = &report.rollups {
        println!("\n🏙️  Average rating by city:");
        for group in &rollups.mean_rating_by_city {
            println!("   {}: {:.2} ({} reviews)", group.key, group.value, group.members);
        }
        println!("\n🍜 Total votes by cuisine:");
        for group in &rollups.total_votes_by_cuisine {
            println!("   {}: {:.0}", group.key, group.value);
        }
    }

    if !report.word_cloud.is_empty() {
        let top: Vec<String> = report
            .word_cloud
            .iter()
            .take(10)
            .map(|w| format!("{} ({})", w.word, w.count))
            .collect();
        println!("\n☁️  Top words: {}", top.join(", "));
    }

    print_excerpts("\n👎 Top complaints:", report.complaints.as_deref());
    print_excerpts("\n👍 Top praise:", report.praise.as_deref());

    if !report.advisories.is_empty() {
        println!("\n💡 Recommendations:");
        for advisory in &report.advisories {
            println!("   [{}] {}", advisory.tone.as_str(), advisory.message);
        }
    }

    if report.is_empty() {
        println!("\n⚠️  No reviews match this selection");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();
    let mut config = Config::load(&cli.config).context("Failed to load configuration")?;
    if let Some(data) = cli.data {
        config.data.path = data;
    }

    match cli.command {
        Commands::Serve { host, port } => {
            metrics::init();
            let dataset = load(&config)?;

            let host = host.unwrap_or(config.server.host);
            let port = port.unwrap_or(config.server.port);
            let app = app_router(AppState::new(dataset, config.insights));

            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("Failed to bind {}", addr))?;
            info!(%addr, records = dataset.len(), "Dashboard listening");
            println!("🚀 Dashboard running on http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Report {
            restaurant,
            city,
            cuisine,
            no_cities,
            no_cuisines,
            json,
        } => {
            let dataset = load(&config)?;
            let selection = match restaurant {
                Some(name) => Selection::restaurant(name),
                None => Selection::Facets(FacetSelection::new(
                    facet_filter(city, no_cities),
                    facet_filter(cuisine, no_cuisines),
                )),
            };
            let report = build_report(dataset, &selection, &config.insights);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
        }
        Commands::Restaurants => {
            let dataset = load(&config)?;
            for name in restaurant_names(dataset) {
                println!("{}", name);
            }
        }
    }

    Ok(())
}
