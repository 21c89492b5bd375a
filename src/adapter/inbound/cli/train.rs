//! Handler for the `train` command.

use std::fs;
use std::path::Path;

use serde_json::json;

use super::command::TrainArgs;
use super::engine::Engine;
use super::output;
use crate::application::{LabeledOpportunity, RetrainReport};
use crate::domain::TrainingMetrics;
use crate::error::Result;

/// Read labeled outcomes from a JSON array file.
pub fn read_outcomes(path: &Path) -> Result<Vec<LabeledOpportunity>> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Execute the train command.
pub fn execute(args: &TrainArgs) -> Result<()> {
    let samples = read_outcomes(&args.file)?;
    let engine = Engine::open(&args.engine)?;
    let report = engine.retrainer(args.epochs, args.seed).retrain(&samples)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "train",
            "model": engine.model_path.display().to_string(),
            "report": report,
        }));
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::success(&format!(
        "Trained model v{} on {} samples",
        report.version, report.trained_samples
    ));
    output::field("Model", engine.model_path.display());
    output::field("Total samples", report.total_training_samples);
    display_report(&report);
    Ok(())
}

fn display_report(report: &RetrainReport) {
    output::section("Training batch");
    display_metrics(&report.metrics);

    match &report.validation_metrics {
        Some(validation) => {
            output::section(&format!("Holdout ({} samples)", report.validation_samples));
            display_metrics(validation);
        }
        None => output::hint("batch too small for a validation holdout"),
    }
}

fn display_metrics(metrics: &TrainingMetrics) {
    output::field("Loss", format!("{:.4}", metrics.loss));
    output::field("Accuracy", output::percent(metrics.accuracy));
    output::field("Precision", output::percent(metrics.precision));
    output::field("Recall", output::percent(metrics.recall));
    output::field("F1", format!("{:.3}", metrics.f1));
    output::field("AUC", format!("{:.3}", metrics.auc));
}
