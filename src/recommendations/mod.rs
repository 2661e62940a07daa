//! Recommendation and risk/opportunity synthesizer
//!
//! Maps insights and KPIs into immediate / short-term / long-term action
//! lists plus risk-factor and opportunity summaries. Every list is deduped
//! preserving first occurrence and capped.

use crate::context::{BusinessContext, Season, VenueCategory};
use crate::insights::{Impact, Insight, Severity};
use crate::kpi::{KpiBlock, PerformanceTier, TrendDirection};
use serde::{Deserialize, Serialize};

/// Tiered action lists produced from insights and KPIs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendations {
    pub immediate: Vec<String>,
    pub short_term: Vec<String>,
    pub long_term: Vec<String>,
}

/// Build the three action lists: KPI-seeded fixed copy first, then each
/// insight's own recommendation routed by severity, then venue-category
/// extras.
pub fn synthesize(
    insights: &[Insight],
    kpis: &KpiBlock,
    context: &BusinessContext,
    cap: usize,
) -> Recommendations {
    let mut immediate = Vec::new();
    let mut short_term = Vec::new();
    let mut long_term = Vec::new();

    if matches!(
        kpis.performance,
        PerformanceTier::Critical | PerformanceTier::Poor
    ) {
        immediate.push("Review operations immediately - performance below expectations".to_string());
        immediate.push("Analyze costs and identify waste".to_string());
    }

    if kpis.trend == TrendDirection::Declining {
        immediate.push("Implement customer retention strategies".to_string());
        short_term.push("Review marketing and promotions strategy".to_string());
    }

    for insight in insights {
        if let Some(recommendation) = &insight.recommendation {
            match insight.severity {
                Severity::Critical => immediate.push(recommendation.clone()),
                Severity::High => short_term.push(recommendation.clone()),
                _ => long_term.push(recommendation.clone()),
            }
        }
    }

    if context.venue.category == VenueCategory::Bar {
        short_term.push("Consider a happy hour to attract more customers".to_string());
        long_term.push("Expand the snack menu".to_string());
    }

    Recommendations {
        immediate: dedupe_and_cap(immediate, cap),
        short_term: dedupe_and_cap(short_term, cap),
        long_term: dedupe_and_cap(long_term, cap),
    }
}

/// Risk factors: high-severity negative insights plus contextual risks.
pub fn identify_risk_factors(
    insights: &[Insight],
    context: &BusinessContext,
    cap: usize,
) -> Vec<String> {
    let mut risks = Vec::new();

    for insight in insights {
        if insight.impact == Impact::Negative && insight.severity == Severity::High {
            risks.push(format!("{}: {}", insight.title, insight.description));
        }
    }

    if context.current_period.is_weekend && context.current_period.is_event_day {
        risks.push("Operational overload - weekend with an event".to_string());
    }

    risks.truncate(cap);
    risks
}

/// Opportunities: confident positive insights plus contextual openings.
pub fn identify_opportunities(
    insights: &[Insight],
    context: &BusinessContext,
    cap: usize,
) -> Vec<String> {
    let mut opportunities = Vec::new();

    for insight in insights {
        if insight.impact == Impact::Positive && insight.confidence > 0.7 {
            opportunities.push(format!("{}: growth potential identified", insight.title));
        }
    }

    if context.current_period.season == Season::Summer
        && context.venue.category == VenueCategory::Bar
    {
        opportunities.push("Summer season: opportunity for outdoor events".to_string());
    }

    opportunities.truncate(cap);
    opportunities
}

/// Remove duplicates keeping the first occurrence, then cap the list length.
fn dedupe_and_cap(entries: Vec<String>, cap: usize) -> Vec<String> {
    let mut seen = Vec::with_capacity(entries.len().min(cap));
    for entry in entries {
        if !seen.contains(&entry) {
            seen.push(entry);
        }
        if seen.len() == cap {
            break;
        }
    }
    seen
}
