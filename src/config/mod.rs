use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;

/// Tuning knobs for the analytics engine.
///
/// Defaults match the production behavior: a 90-day rolling history, the
/// top 10 insights per analysis, and action/risk/opportunity lists capped
/// at 5 entries each.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    pub retention_days: i64,
    pub max_insights: usize,
    pub max_recommendations: usize,
    pub max_risk_factors: usize,
    pub max_opportunities: usize,
}

impl AnalyzerConfig {
    pub fn load() -> Result<Self> {
        // Load .env file - this sets env vars that aren't already set
        dotenv::dotenv().ok();

        let config = AnalyzerConfig {
            retention_days: env::var("VENUEPULSE_RETENTION_DAYS")
                .unwrap_or_else(|_| "90".to_string())
                .parse()
                .context("Invalid VENUEPULSE_RETENTION_DAYS value")?,
            max_insights: env::var("VENUEPULSE_MAX_INSIGHTS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("Invalid VENUEPULSE_MAX_INSIGHTS value")?,
            max_recommendations: env::var("VENUEPULSE_MAX_RECOMMENDATIONS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .context("Invalid VENUEPULSE_MAX_RECOMMENDATIONS value")?,
            max_risk_factors: env::var("VENUEPULSE_MAX_RISK_FACTORS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .context("Invalid VENUEPULSE_MAX_RISK_FACTORS value")?,
            max_opportunities: env::var("VENUEPULSE_MAX_OPPORTUNITIES")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .context("Invalid VENUEPULSE_MAX_OPPORTUNITIES value")?,
        };

        Ok(config)
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            retention_days: 90,
            max_insights: 10,
            max_recommendations: 5,
            max_risk_factors: 5,
            max_opportunities: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_production_constants() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.retention_days, 90);
        assert_eq!(config.max_insights, 10);
        assert_eq!(config.max_recommendations, 5);
        assert_eq!(config.max_risk_factors, 5);
        assert_eq!(config.max_opportunities, 5);
    }
}
