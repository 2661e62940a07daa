//! Business context types
//!
//! A `BusinessContext` is the venue-level snapshot an analysis runs against:
//! who the venue is, what calendar period it is in right now, and what its
//! historical baselines look like. It is set wholesale and read-only for the
//! duration of an analysis call.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Venue category classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VenueCategory {
    Bar,
    Restaurant,
    Nightclub,
    Pub,
    Brewery,
}

impl VenueCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            VenueCategory::Bar => "bar",
            VenueCategory::Restaurant => "restaurant",
            VenueCategory::Nightclub => "nightclub",
            VenueCategory::Pub => "pub",
            VenueCategory::Brewery => "brewery",
        }
    }
}

/// Season of the year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Summer,
    Autumn,
    Winter,
    Spring,
}

impl Season {
    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Summer => "summer",
            Season::Autumn => "autumn",
            Season::Winter => "winter",
            Season::Spring => "spring",
        }
    }
}

/// Opening-hours window for the venue's peak period (e.g. "22:00" - "02:00")
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeakHours {
    pub start: String,
    pub end: String,
}

/// Static profile of the venue under analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueProfile {
    pub id: String,
    pub name: String,
    pub category: VenueCategory,
    pub location: String,
    pub capacity: u32,
    pub opening_days: Vec<String>,
    pub peak_hours: PeakHours,
}

/// Descriptor of the calendar period the analysis applies to
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentPeriod {
    pub date: NaiveDate,
    pub day_of_week: String,
    pub is_weekend: bool,
    pub is_holiday: bool,
    pub season: Season,
    pub is_event_day: bool,
}

/// Historically expected values used as denominators for performance ratios
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalBaseline {
    pub average_daily_sales: f64,
    pub average_customer_count: f64,
    pub average_ticket: f64,
    pub seasonality_factors: HashMap<String, f64>,
    pub event_impact_factors: HashMap<String, f64>,
}

/// The full business context: exactly one is active at a time, and setting a
/// new one fully replaces the old.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessContext {
    pub venue: VenueProfile,
    pub current_period: CurrentPeriod,
    pub historical_baseline: HistoricalBaseline,
}

impl BusinessContext {
    /// Baseline lookup for a metric name. Unknown metrics fall back to a
    /// default baseline of 100.
    pub fn baseline_for_metric(&self, metric: &str) -> f64 {
        match metric {
            "sales" => self.historical_baseline.average_daily_sales,
            "customers" => self.historical_baseline.average_customer_count,
            "ticket" => self.historical_baseline.average_ticket,
            _ => 100.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_context() -> BusinessContext {
        BusinessContext {
            venue: VenueProfile {
                id: "venue-1".to_string(),
                name: "The Copper Still".to_string(),
                category: VenueCategory::Bar,
                location: "Lisbon".to_string(),
                capacity: 120,
                opening_days: vec!["friday".to_string(), "saturday".to_string()],
                peak_hours: PeakHours {
                    start: "20:00".to_string(),
                    end: "01:00".to_string(),
                },
            },
            current_period: CurrentPeriod {
                date: NaiveDate::from_ymd_opt(2025, 7, 12).expect("valid date"),
                day_of_week: "saturday".to_string(),
                is_weekend: true,
                is_holiday: false,
                season: Season::Summer,
                is_event_day: false,
            },
            historical_baseline: HistoricalBaseline {
                average_daily_sales: 4500.0,
                average_customer_count: 180.0,
                average_ticket: 25.0,
                seasonality_factors: HashMap::new(),
                event_impact_factors: HashMap::new(),
            },
        }
    }

    #[test]
    fn test_baseline_lookup() {
        let ctx = sample_context();
        assert_eq!(ctx.baseline_for_metric("sales"), 4500.0);
        assert_eq!(ctx.baseline_for_metric("customers"), 180.0);
        assert_eq!(ctx.baseline_for_metric("ticket"), 25.0);
    }

    #[test]
    fn test_unknown_metric_uses_default_baseline() {
        let ctx = sample_context();
        assert_eq!(ctx.baseline_for_metric("reservations"), 100.0);
    }

    #[test]
    fn test_category_and_season_labels() {
        assert_eq!(VenueCategory::Nightclub.as_str(), "nightclub");
        assert_eq!(Season::Summer.as_str(), "summer");
    }
}
