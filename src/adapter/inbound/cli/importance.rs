//! Handler for the `importance` command.

use serde_json::json;
use tabled::{Table, Tabled};

use super::command::EngineArgs;
use super::engine::Engine;
use super::output;
use crate::domain::{importance, EdgeModel, FeatureImportance, FEATURE_NAMES};
use crate::error::Result;

#[derive(Tabled)]
struct ImportanceRow {
    #[tabled(rename = "Feature")]
    name: String,
    #[tabled(rename = "Importance")]
    importance: String,
    #[tabled(rename = "Weight")]
    weight: String,
}

/// Importance ranking for `model`, recomputed when the stored list is empty.
fn ranking(model: &EdgeModel) -> Vec<FeatureImportance> {
    if model.feature_importance.is_empty() {
        importance::compute(&model.weights)
    } else {
        model.feature_importance.clone()
    }
}

fn weight_of(model: &EdgeModel, name: &str) -> f64 {
    FEATURE_NAMES
        .iter()
        .position(|n| *n == name)
        .map_or(0.0, |i| model.weights.weights[i])
}

/// Execute the importance command.
pub fn execute(args: &EngineArgs) -> Result<()> {
    let engine = Engine::open(args)?;
    let Some(model) = engine.handle.current() else {
        if output::is_json() {
            output::json_output(json!({
                "command": "importance",
                "available": false,
                "features": [],
            }));
        } else {
            output::warning("No saved model");
        }
        return Ok(());
    };

    let features = ranking(&model);

    if output::is_json() {
        output::json_output(json!({
            "command": "importance",
            "available": true,
            "version": model.version,
            "features": features,
        }));
        return Ok(());
    }
    if output::is_quiet() {
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    if model.weights.is_zero() {
        output::note("Model is untrained: all features weigh equally");
    }

    let rows: Vec<ImportanceRow> = features
        .iter()
        .map(|f| {
            let weight = weight_of(&model, &f.name);
            let formatted = format!("{weight:+.4}");
            ImportanceRow {
                name: f.name.clone(),
                importance: output::percent(f.importance),
                weight: if weight > 0.0 {
                    output::positive(formatted)
                } else if weight < 0.0 {
                    output::negative(formatted)
                } else {
                    output::muted(formatted)
                },
            }
        })
        .collect();
    output::lines(&Table::new(rows).to_string());
    Ok(())
}
