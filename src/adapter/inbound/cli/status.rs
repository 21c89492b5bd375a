//! Handler for the `status` command.

use serde_json::json;

use super::command::EngineArgs;
use super::engine::Engine;
use super::output;
use crate::application::ModelStatus;
use crate::error::Result;

/// Execute the status command.
pub fn execute(args: &EngineArgs) -> Result<()> {
    let engine = Engine::open(args)?;
    let status = engine.scorer().model_status();

    if output::is_json() {
        output::json_output(json!({
            "command": "status",
            "model": engine.model_path.display().to_string(),
            "status": status,
        }));
        return Ok(());
    }
    if output::is_quiet() {
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Model", engine.model_path.display());

    if !status.available {
        println!();
        output::warning("No saved model");
        output::hint(&format!(
            "run {} to train one; scoring uses heuristic confidence until then",
            output::highlight("edgerank train <outcomes.json>")
        ));
        return Ok(());
    }

    display_status(&status);
    Ok(())
}

fn display_status(status: &ModelStatus) {
    output::section("Model");
    output::field("Version", status.version);
    output::field("Samples", status.training_samples);
    output::field(
        "Updated",
        status
            .last_updated
            .map_or_else(|| "never".to_string(), |t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string()),
    );
    output::field("Accuracy", output::percent(status.accuracy));
    if let Some(auc) = status.validation_auc {
        let formatted = format!("{auc:.3}");
        let value = if auc >= 0.5 {
            output::positive(formatted)
        } else {
            output::negative(formatted)
        };
        output::field("Holdout AUC", value);
    }

    output::section("Scoring");
    if status.blending {
        output::success(&format!(
            "Blending model at {} weight",
            output::percent(status.ml_weight)
        ));
    } else {
        output::note("Heuristic only: model not yet trusted");
    }
}
