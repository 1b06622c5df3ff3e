use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tripflow_agents::{GeminiClient, GeminiConfig, TripPlanner};
use tripflow_core::{build_plan_from_model_text, PlanRequest};
use tripflow_observability::{init_tracing, AppMetrics};
use tripflow_places::{GooglePlacesClient, PlaceResolver, PlacesConfig};

#[derive(Debug, Parser)]
#[command(name = "tripflow")]
#[command(about = "TripFlow itinerary tools")]
struct Cli {
    #[arg(long, env = "TRIPFLOW_CACHE_TTL_SECONDS", default_value_t = 21_600)]
    cache_ttl_seconds: i64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Normalize raw model output into a plan without calling any backend.
    Normalize {
        /// Model output file; reads stdin when omitted.
        #[arg(long)]
        file: Option<PathBuf>,
        #[arg(long)]
        days: u32,
        #[arg(long, default_value = "")]
        destination: String,
        #[arg(long, default_value = "")]
        style: String,
    },
    /// Generate a plan with the configured model.
    Plan {
        #[arg(long)]
        destination: String,
        #[arg(long, default_value_t = 3)]
        days: u32,
        #[arg(long, default_value = "solo")]
        companions: String,
        #[arg(long, default_value = "balanced")]
        style: String,
        #[arg(long)]
        transportation: Option<String>,
        #[arg(long)]
        month: Option<String>,
        #[arg(long)]
        web_search: bool,
    },
    /// Resolve place names against the place provider.
    Resolve {
        #[arg(long, default_value = "")]
        destination: String,
        #[arg(required = true)]
        names: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("tripflow_cli");
    let cli = Cli::parse();

    match cli.command {
        Command::Normalize {
            file,
            days,
            destination,
            style,
        } => {
            let raw = read_model_text(file.as_ref())?;
            let request = PlanRequest {
                destination,
                days,
                companions: String::new(),
                style,
                transportation: None,
                month: None,
                use_web_search: false,
            };

            let plan = build_plan_from_model_text(&raw, &request)
                .context("model output does not contain a plan")?;
            println!("{}", serde_json::to_string_pretty(&plan)?);
        }
        Command::Plan {
            destination,
            days,
            companions,
            style,
            transportation,
            month,
            web_search,
        } => {
            let request = PlanRequest {
                destination,
                days,
                companions,
                style,
                transportation,
                month,
                use_web_search: web_search,
            };
            request.validate()?;

            let gemini =
                GeminiClient::new(GeminiConfig::from_env()).context("failed to build Gemini client")?;
            let planner = TripPlanner::new(gemini, AppMetrics::shared());

            let plan = planner.generate_plan(&request).await?;
            println!("{}", serde_json::to_string_pretty(&plan)?);
        }
        Command::Resolve { destination, names } => {
            let places = GooglePlacesClient::new(PlacesConfig::from_env())
                .context("failed to build Google Places client")?;
            let resolver = PlaceResolver::new(
                places,
                chrono::Duration::seconds(cli.cache_ttl_seconds.max(1)),
                AppMetrics::shared(),
            );

            let results = resolver
                .resolve_batch(&names, destination.trim())
                .await
                .into_iter()
                .collect::<BTreeMap<_, _>>();
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
    }

    Ok(())
}

fn read_model_text(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed reading model output from {}", path.display())),
        None => {
            let mut raw = String::new();
            io::stdin()
                .read_to_string(&mut raw)
                .context("failed reading model output from stdin")?;
            Ok(raw)
        }
    }
}
