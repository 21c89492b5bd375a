//! Handler for the `score` command.

use std::fs;

use serde_json::{json, Value};
use tabled::{Table, Tabled};
use tracing::{info, warn};

use super::command::ScoreArgs;
use super::engine::Engine;
use super::output;
use crate::domain::{Opportunity, ScoredOpportunity, ScoringMode};
use crate::error::Result;

#[derive(Tabled)]
struct ScoreRow {
    #[tabled(rename = "#")]
    rank: usize,
    #[tabled(rename = "Market")]
    market: String,
    #[tabled(rename = "Urgency")]
    urgency: String,
    #[tabled(rename = "Edge")]
    edge: String,
    #[tabled(rename = "Conf")]
    confidence: String,
    #[tabled(rename = "ML")]
    ml_score: String,
    #[tabled(rename = "Adj Conf")]
    adjusted: String,
    #[tabled(rename = "EV")]
    expected_value: String,
    #[tabled(rename = "Rank Score")]
    rank_score: String,
}

impl ScoreRow {
    fn new(rank: usize, scored: &ScoredOpportunity) -> Self {
        let opportunity = &scored.opportunity;
        Self {
            rank,
            market: opportunity.market.clone(),
            urgency: opportunity.urgency.to_string(),
            edge: format!("{:.3}", opportunity.edge),
            confidence: format!("{:.3}", opportunity.confidence),
            ml_score: format!("{:.3}", scored.ml_score),
            adjusted: format!("{:.3}", scored.adjusted_confidence),
            expected_value: format!("{:.4}", scored.expected_value),
            rank_score: format!("{:.4}", scored.rank_score),
        }
    }
}

/// Read opportunities from a JSON array file.
///
/// Items are decoded one at a time so a malformed item scores with neutral
/// defaults instead of failing the whole batch.
pub fn read_opportunities(path: &std::path::Path) -> Result<Vec<Opportunity>> {
    let content = fs::read_to_string(path)?;
    let items: Vec<Value> = serde_json::from_str(&content)?;
    Ok(items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item).unwrap_or_else(|e| {
                warn!(index, error = %e, "opportunity is not an object, using neutral defaults");
                Opportunity::default()
            })
        })
        .collect())
}

/// Execute the score command.
pub fn execute(args: &ScoreArgs) -> Result<()> {
    let opportunities = read_opportunities(&args.file)?;
    let engine = Engine::open(&args.engine)?;

    let mut ranked = engine.scorer().score_and_rank(&opportunities);
    if let Some(limit) = args.limit {
        ranked.truncate(limit);
    }
    let blended = ranked
        .iter()
        .filter(|s| s.mode == ScoringMode::Blended)
        .count();
    info!(
        scored = opportunities.len(),
        shown = ranked.len(),
        blended,
        "scored opportunities"
    );

    if output::is_json() {
        output::json_output(json!({
            "command": "score",
            "count": ranked.len(),
            "opportunities": ranked,
        }));
        return Ok(());
    }
    if output::is_quiet() {
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    if ranked.is_empty() {
        output::note("No opportunities to score");
        return Ok(());
    }

    let rows: Vec<ScoreRow> = ranked
        .iter()
        .enumerate()
        .map(|(i, scored)| ScoreRow::new(i + 1, scored))
        .collect();
    output::lines(&Table::new(rows).to_string());

    println!();
    if blended == 0 {
        output::note("Heuristic only: no trusted model");
    } else {
        output::note(&format!("{blended} of {} blended with model", ranked.len()));
    }
    Ok(())
}
