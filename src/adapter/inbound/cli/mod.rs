//! CLI module graph and command dispatch.

pub mod command;
pub mod config;
pub mod engine;
pub mod importance;
pub mod output;
pub mod paths;
pub mod reset;
pub mod score;
pub mod status;
pub mod train;

use command::{Cli, ColorChoice, Commands, ConfigCommand};
use output::OutputConfig;

use crate::error::Result;

/// Apply global flags: colors, output mode, and logging.
///
/// Logging comes from the config file's `[logging]` section when one loads;
/// `-q` and `-v` adjust the level.
pub fn configure(cli: &Cli) {
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {}
    }
    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose));

    let config_arg = match &cli.command {
        Commands::Status(args) | Commands::Importance(args) => Some(&args.config),
        Commands::Score(args) => Some(&args.engine.config),
        Commands::Train(args) => Some(&args.engine.config),
        Commands::Reset(args) => Some(&args.engine.config),
        Commands::Config(ConfigCommand::Show(arg) | ConfigCommand::Validate(arg)) => Some(arg),
        Commands::Config(ConfigCommand::Init(_)) => None,
    };
    let logging = config_arg
        .and_then(|arg| engine::load_config(arg).ok())
        .map(|config| config.logging)
        .unwrap_or_default();

    let logging = match (cli.quiet, cli.verbose) {
        (true, _) => logging.with_level("error"),
        (false, 0) => logging,
        (false, 1) => logging.with_level("debug"),
        (false, _) => logging.with_level("trace"),
    };
    logging.init();
}

/// Run the parsed command.
pub fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Status(args) => status::execute(args),
        Commands::Score(args) => score::execute(args),
        Commands::Train(args) => train::execute(args),
        Commands::Importance(args) => importance::execute(args),
        Commands::Reset(args) => reset::execute(args),
        Commands::Config(ConfigCommand::Init(args)) => config::execute_init(&args.path, args.force),
        Commands::Config(ConfigCommand::Show(arg)) => config::execute_show(arg),
        Commands::Config(ConfigCommand::Validate(arg)) => config::execute_validate(arg),
    }
}
