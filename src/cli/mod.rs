//! Command-line interface for running analyses against JSON inputs

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use tracing::info;

use crate::analyzer::ContextAnalyzer;
use crate::config::AnalyzerConfig;
use crate::context::BusinessContext;
use crate::history::DataPoint;

#[derive(Parser)]
#[command(name = "venuepulse")]
#[command(about = "Contextual business analytics for hospitality venues")]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a metric history against a business context
    Analyze {
        /// Path to a BusinessContext JSON file
        #[arg(long)]
        context: PathBuf,
        /// Path to a JSON array of data points
        #[arg(long)]
        data: PathBuf,
        /// Free-text query describing what to look at
        #[arg(long, default_value = "")]
        query: String,
        /// Restrict the analysis to these metrics (default: all)
        #[arg(long)]
        metrics: Vec<String>,
    },
    /// Run the pipeline over generated sample data
    Demo,
}

pub fn run(cli: Cli) -> Result<()> {
    let config = AnalyzerConfig::load()?;
    let analyzer = ContextAnalyzer::new(config);

    match cli.command {
        Commands::Analyze {
            context,
            data,
            query,
            metrics,
        } => {
            let context: BusinessContext = read_json(&context)?;
            let points: Vec<DataPoint> = read_json(&data)?;

            analyzer.set_business_context(context);
            let accepted = analyzer.add_data_points(points);
            info!(accepted, "data points loaded");

            let analysis = analyzer.analyze_with_context(&query, &metrics, None)?;
            println!("{}", serde_json::to_string_pretty(&analysis)?);
        }
        Commands::Demo => {
            analyzer.set_business_context(demo_context());
            analyzer.add_data_points(demo_points());

            let analysis = analyzer.analyze_with_context("demo", &[], None)?;
            println!("{}", serde_json::to_string_pretty(&analysis)?);
        }
    }

    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &PathBuf) -> Result<T> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

fn demo_context() -> BusinessContext {
    use crate::context::{
        CurrentPeriod, HistoricalBaseline, PeakHours, Season, VenueCategory, VenueProfile,
    };
    use std::collections::HashMap;

    let today = Utc::now().date_naive();
    BusinessContext {
        venue: VenueProfile {
            id: "demo-venue".to_string(),
            name: "Demo Taproom".to_string(),
            category: VenueCategory::Bar,
            location: "Lisbon".to_string(),
            capacity: 140,
            opening_days: vec![
                "thursday".to_string(),
                "friday".to_string(),
                "saturday".to_string(),
            ],
            peak_hours: PeakHours {
                start: "19:00".to_string(),
                end: "01:00".to_string(),
            },
        },
        current_period: CurrentPeriod {
            date: today,
            day_of_week: today.format("%A").to_string().to_lowercase(),
            is_weekend: true,
            is_holiday: false,
            season: Season::Summer,
            is_event_day: false,
        },
        historical_baseline: HistoricalBaseline {
            average_daily_sales: 3200.0,
            average_customer_count: 130.0,
            average_ticket: 24.0,
            seasonality_factors: HashMap::new(),
            event_impact_factors: HashMap::new(),
        },
    }
}

/// Thirty days of sales and customer counts with a ramp in the final week.
fn demo_points() -> Vec<DataPoint> {
    let now = Utc::now();
    let mut points = Vec::new();

    for day in 0..30 {
        let age = 29 - day;
        let ramp = if day >= 23 { 1.6 } else { 1.0 };
        points.push(DataPoint {
            timestamp: now - Duration::days(age),
            metric: "sales".to_string(),
            value: 3000.0 * ramp,
            category: "revenue".to_string(),
            metadata: None,
        });
        points.push(DataPoint {
            timestamp: now - Duration::days(age),
            metric: "customers".to_string(),
            value: 120.0 * ramp,
            category: "traffic".to_string(),
            metadata: None,
        });
    }

    points
}
