//! Command-line interface definitions.
//!
//! Defines the CLI structure for the edgerank binary using `clap`. Every
//! command operates on the local model file; scoring never writes to it.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use super::paths;

/// Online-learned edge scoring for prediction market opportunities
#[derive(Parser, Debug)]
#[command(name = "edgerank")]
#[command(version, about)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the stored model and whether scoring blends it in
    Status(EngineArgs),

    /// Score and rank opportunities from a JSON file
    Score(ScoreArgs),

    /// Retrain the model from a JSON file of resolved outcomes
    Train(TrainArgs),

    /// Show learned feature importance
    Importance(EngineArgs),

    /// Replace the stored model with an untrained one
    Reset(ResetArgs),

    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Subcommands for `edgerank config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Write a documented configuration template.
    Init(ConfigInitArgs),
    /// Display the effective configuration with defaults applied.
    Show(ConfigPathArg),
    /// Validate a configuration file for correctness.
    Validate(ConfigPathArg),
}

/// Config file selection.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigPathArg {
    /// Path to the configuration file (defaults to ~/.edgerank/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Arguments for `edgerank config init`.
#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Where to write the template
    #[arg(default_value_os_t = paths::default_config())]
    pub path: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Arguments shared by commands that open the model.
#[derive(Args, Debug, Clone, Default)]
pub struct EngineArgs {
    #[command(flatten)]
    pub config: ConfigPathArg,

    /// Model file path (overrides config and EDGERANK_MODEL_PATH)
    #[arg(short, long)]
    pub model: Option<PathBuf>,
}

/// Arguments for `edgerank score`.
#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// JSON array of opportunities
    pub file: PathBuf,

    /// Show only the top N ranked opportunities
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    #[command(flatten)]
    pub engine: EngineArgs,
}

/// Arguments for `edgerank train`.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// JSON array of `{ "opportunity": {...}, "outcome": bool }`
    pub file: PathBuf,

    /// Passes over the batch (overrides config)
    #[arg(long)]
    pub epochs: Option<u32>,

    /// Shuffle seed (overrides config)
    #[arg(long)]
    pub seed: Option<u64>,

    #[command(flatten)]
    pub engine: EngineArgs,
}

/// Arguments for `edgerank reset`.
#[derive(Args, Debug)]
pub struct ResetArgs {
    /// Discard a trained model without asking
    #[arg(long)]
    pub force: bool,

    #[command(flatten)]
    pub engine: EngineArgs,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn cli_name_and_version() {
        let cmd = Cli::command();
        assert_eq!(cmd.get_name(), "edgerank");
        assert!(cmd.get_version().is_some());
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["edgerank", "status", "--json", "-vv"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Status(_)));
    }

    #[test]
    fn color_defaults_to_auto() {
        let cli = Cli::try_parse_from(["edgerank", "status"]).unwrap();
        assert!(matches!(cli.color, ColorChoice::Auto));

        let cli = Cli::try_parse_from(["edgerank", "--color", "never", "status"]).unwrap();
        assert!(matches!(cli.color, ColorChoice::Never));
    }

    #[test]
    fn score_takes_file_limit_and_model() {
        let cli = Cli::try_parse_from([
            "edgerank",
            "score",
            "opps.json",
            "-n",
            "5",
            "--model",
            "/tmp/m.json",
        ])
        .unwrap();
        let Commands::Score(args) = cli.command else {
            panic!("expected score command");
        };
        assert_eq!(args.file, PathBuf::from("opps.json"));
        assert_eq!(args.limit, Some(5));
        assert_eq!(args.engine.model, Some(PathBuf::from("/tmp/m.json")));
    }

    #[test]
    fn train_overrides_are_optional() {
        let cli = Cli::try_parse_from(["edgerank", "train", "outcomes.json"]).unwrap();
        let Commands::Train(args) = cli.command else {
            panic!("expected train command");
        };
        assert!(args.epochs.is_none());
        assert!(args.seed.is_none());

        let cli =
            Cli::try_parse_from(["edgerank", "train", "o.json", "--epochs", "3", "--seed", "9"])
                .unwrap();
        let Commands::Train(args) = cli.command else {
            panic!("expected train command");
        };
        assert_eq!(args.epochs, Some(3));
        assert_eq!(args.seed, Some(9));
    }

    #[test]
    fn reset_force_defaults_off() {
        let cli = Cli::try_parse_from(["edgerank", "reset"]).unwrap();
        let Commands::Reset(args) = cli.command else {
            panic!("expected reset command");
        };
        assert!(!args.force);
    }

    #[test]
    fn config_init_defaults_to_home_config() {
        let cli = Cli::try_parse_from(["edgerank", "config", "init"]).unwrap();
        let Commands::Config(ConfigCommand::Init(args)) = cli.command else {
            panic!("expected config init");
        };
        assert_eq!(args.path, paths::default_config());
        assert!(!args.force);
    }

    #[test]
    fn config_validate_accepts_path() {
        let cli = Cli::try_parse_from(["edgerank", "config", "validate", "-c", "x.toml"]).unwrap();
        let Commands::Config(ConfigCommand::Validate(arg)) = cli.command else {
            panic!("expected config validate");
        };
        assert_eq!(arg.config, Some(PathBuf::from("x.toml")));
    }
}
