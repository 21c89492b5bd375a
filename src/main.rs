use clap::Parser;
use tracing::error;

use edgerank::adapter::inbound::cli::{self, command::Cli, output};

fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    cli::configure(&cli);

    if let Err(e) = cli::run(&cli) {
        error!(error = %e, "command failed");
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
