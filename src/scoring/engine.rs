use chrono::{DateTime, Utc};
use serde::Serialize;

use super::factors::{compute_factors, Factor, ScoreFactors};
use super::label::ScoreLabel;
use crate::listing::Listing;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FactorContribution {
    pub factor: Factor,
    pub score: u8,        // Sub-score, 0..=100
    pub weight: u8,       // Out of 100
    pub contribution: u8, // round(score * weight / 100)
}

impl FactorContribution {
    pub fn label(&self) -> &'static str {
        self.factor.label()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreResult {
    pub score: u8,
    pub label: ScoreLabel,
    pub breakdown: Vec<FactorContribution>,
}

impl ScoreResult {
    /// Sum of the per-factor rounded contributions.
    ///
    /// May differ from `score` by one because each contribution is rounded
    /// on its own while the score rounds the unrounded total.
    pub fn breakdown_total(&self) -> u32 {
        self.breakdown.iter().map(|c| c.contribution as u32).sum()
    }
}

/// Final lead score in 0..=100 for `listing` as of `now`.
pub fn calculate_lead_score(listing: &Listing, now: DateTime<Utc>) -> u8 {
    combine(&compute_factors(listing, now))
}

/// Per-factor contributions, always five entries in `Factor::ALL` order.
pub fn score_breakdown(listing: &Listing, now: DateTime<Utc>) -> Vec<FactorContribution> {
    contributions(&compute_factors(listing, now))
}

/// Score, label and breakdown from a single pass over the factors.
pub fn score_listing(listing: &Listing, now: DateTime<Utc>) -> ScoreResult {
    let factors = compute_factors(listing, now);
    let score = combine(&factors);
    ScoreResult {
        score,
        label: ScoreLabel::from_score(score),
        breakdown: contributions(&factors),
    }
}

fn combine(factors: &ScoreFactors) -> u8 {
    let total: f64 = Factor::ALL
        .iter()
        .map(|f| factors.get(*f) as f64 * f.weight() as f64 / 100.0)
        .sum();
    total.clamp(0.0, 100.0).round() as u8
}

fn contributions(factors: &ScoreFactors) -> Vec<FactorContribution> {
    Factor::ALL
        .iter()
        .map(|&factor| {
            let score = factors.get(factor);
            let weight = factor.weight();
            FactorContribution {
                factor,
                score,
                weight,
                contribution: (score as f64 * weight as f64 / 100.0).round() as u8,
            }
        })
        .collect()
}
