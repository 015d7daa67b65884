use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::debug;

use cohere::adapter::inbound::cli::command::{CheckCommand, Cli, Commands, ProjectArgs};
use cohere::adapter::inbound::cli::output::{self, OutputConfig};
use cohere::adapter::inbound::cli::{check, project};
use cohere::infrastructure::config::settings::Config;

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    output::configure(OutputConfig::new(cli.json, cli.quiet));

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Project(args) => {
            let config = load_config(&args)?;
            config.init_logging();
            debug!(outcomes = args.prices.len(), set = %args.set, "starting projection");
            project::execute(&args, &config)?;
        }
        Commands::Check(CheckCommand::Config(arg)) => {
            check::execute_config(&arg.config)
                .with_context(|| format!("invalid configuration {}", arg.config.display()))?;
        }
    }
    Ok(())
}

fn load_config(args: &ProjectArgs) -> anyhow::Result<Config> {
    match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(Config::default()),
    }
}
