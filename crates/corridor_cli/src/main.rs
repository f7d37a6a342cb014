use clap::Parser;
use corridor_core::{init_logging, FeedSource, Result};
use corridor_news::aggregator::API_KEY_ENV;
use corridor_news::{AggregatorConfig, NewsAggregator};
use corridor_web::AppState;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, Level};

#[derive(Debug, Clone, Copy, PartialEq)]
struct HumanDuration(Duration);

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut total_seconds = 0u64;
        let mut current_number = String::new();
        let mut has_unit = false;

        for c in s.chars() {
            if c.is_ascii_digit() {
                current_number.push(c);
            } else if let Ok(num) = current_number.parse::<u64>() {
                let multiplier = match c {
                    's' => 1,
                    'm' => 60,
                    'h' => 3600,
                    _ => return Err(format!("Invalid duration unit: {}", c)),
                };
                total_seconds = num
                    .checked_mul(multiplier)
                    .and_then(|secs| total_seconds.checked_add(secs))
                    .ok_or_else(|| "Duration too large".to_string())?;
                current_number.clear();
                has_unit = true;
            } else if !c.is_whitespace() {
                return Err(format!("Invalid character in duration: {}", c));
            }
        }

        // A bare number means seconds
        if !current_number.is_empty() {
            let num = current_number
                .parse::<u64>()
                .map_err(|_| "Invalid number in duration".to_string())?;
            total_seconds = total_seconds
                .checked_add(num)
                .ok_or_else(|| "Duration too large".to_string())?;
            has_unit = true;
        }

        if !has_unit {
            return Err("Duration must include a number".to_string());
        }
        if total_seconds == 0 {
            return Err("Duration must be greater than zero".to_string());
        }

        Ok(HumanDuration(Duration::from_secs(total_seconds)))
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Corridor news feed service", long_about = None)]
struct Cli {
    /// NewsAPI key. Without one only the curated articles are served.
    #[arg(long, env = API_KEY_ENV, hide_env_values = true, global = true)]
    api_key: Option<String>,
    /// Per-query timeout for the news provider (e.g. 10s, 1m)
    #[arg(long, default_value = "10s", global = true)]
    timeout: HumanDuration,
    #[arg(long, default_value = "info", global = true)]
    log_level: Level,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Serve the feed over HTTP
    Serve {
        #[arg(long, env = "CORRIDOR_ADDR", default_value = "0.0.0.0:3000")]
        addr: SocketAddr,
    },
    /// Build the feed once and print it as JSON
    Fetch {
        #[arg(long)]
        pretty: bool,
    },
}

fn build_aggregator(cli: &Cli) -> Result<NewsAggregator> {
    let config = AggregatorConfig {
        api_key: cli.api_key.clone(),
        query_timeout: cli.timeout.0,
        ..AggregatorConfig::default()
    };
    let aggregator = NewsAggregator::new(config)?;
    if aggregator.is_live_enabled() {
        info!(
            "🗞️ Live news enabled for {} topics",
            aggregator.queries().len()
        );
    } else {
        info!("📚 No {} set, serving curated articles only", API_KEY_ENV);
    }
    Ok(aggregator)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    let aggregator = build_aggregator(&cli)?;

    match cli.command {
        Commands::Serve { addr } => {
            corridor_web::serve(addr, AppState::new(aggregator)).await?;
        }
        Commands::Fetch { pretty } => {
            let feed = aggregator.fetch_feed().await;
            if feed.source == FeedSource::Cached {
                info!(
                    "📚 Serving curated articles: {}",
                    feed.error.as_deref().unwrap_or("")
                );
            }
            let json = if pretty {
                serde_json::to_string_pretty(&feed)?
            } else {
                serde_json::to_string(&feed)?
            };
            println!("{}", json);
        }
    }

    Ok(())
}
