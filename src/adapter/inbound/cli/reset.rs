//! Handler for the `reset` command.

use serde_json::json;

use super::command::ResetArgs;
use super::engine::Engine;
use super::output;
use crate::error::{Error, Result};

/// Execute the reset command.
pub fn execute(args: &ResetArgs) -> Result<()> {
    let engine = Engine::open(&args.engine)?;

    if let Some(current) = engine.handle.current() {
        if current.is_trained() && !args.force {
            return Err(Error::ResetRefused {
                training_samples: current.training_samples,
            });
        }
    }

    let model = engine.retrainer(None, None).reset()?;

    if output::is_json() {
        output::json_output(json!({
            "command": "reset",
            "model": engine.model_path.display().to_string(),
            "version": model.version,
        }));
        return Ok(());
    }

    output::success(&format!("Reset model to untrained v{}", model.version));
    output::field("Model", engine.model_path.display());
    Ok(())
}
