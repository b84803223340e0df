use anyhow::Result;
use chrono::Local;
use clap::Parser;
use mealwise::inventory_model::expiring_within;
use mealwise::planner_config::PlannerConfig;
use mealwise::report::{build_report, load_inventory, load_recipes};
use std::env;
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "mealwise",
    about = "Recipe nutrition and pantry availability report",
    long_about = "Compute per-serving nutrition for a recipe collection, rank it against a pantry inventory and print the report as JSON"
)]
struct Args {
    /// JSON array of recipes
    recipes: PathBuf,

    /// JSON array of inventory items
    inventory: Option<PathBuf>,
}

/// Items expiring within this many days are flagged on startup
const EXPIRY_WARNING_DAYS: i64 = 3;

fn main() {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let args = Args::parse();
    init_logging();

    if let Err(e) = run(&args) {
        error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = env::var("MEALWISE_LOG_FORMAT").is_ok_and(|format| format == "json");

    // Logs go to stderr so the report on stdout stays valid JSON
    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn run(args: &Args) -> Result<()> {
    let config = PlannerConfig::from_env()?;
    info!("Starting mealwise (language: {})", config.language);

    let recipes = load_recipes(&args.recipes)?;
    let inventory = match &args.inventory {
        Some(path) => load_inventory(path)?,
        None => Vec::new(),
    };

    let today = Local::now().date_naive();
    for item in expiring_within(&inventory, today, EXPIRY_WARNING_DAYS) {
        if item.is_expired(today) {
            warn!("{} has expired", item);
        } else {
            warn!("{} expires soon", item);
        }
    }

    let report = build_report(&recipes, &inventory, &config);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_recipes_only() {
        let args = Args::try_parse_from(["mealwise", "recipes.json"]).unwrap();
        assert_eq!(args.recipes, PathBuf::from("recipes.json"));
        assert!(args.inventory.is_none());
    }

    #[test]
    fn test_args_with_inventory() {
        let args = Args::try_parse_from(["mealwise", "recipes.json", "pantry.json"]).unwrap();
        assert_eq!(args.inventory, Some(PathBuf::from("pantry.json")));
    }

    #[test]
    fn test_args_rejects_missing_and_extra() {
        assert!(Args::try_parse_from(["mealwise"]).is_err());
        assert!(Args::try_parse_from(["mealwise", "a.json", "b.json", "c.json"]).is_err());
    }
}
