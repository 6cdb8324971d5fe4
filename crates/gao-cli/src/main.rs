use clap::Parser;
use tracing_subscriber::FmtSubscriber;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder().with_max_level(cli.log_level).finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    let result = match &cli.command {
        Commands::Solve { input, output } => commands::solve::handle(input, output),
        Commands::Validate { input } => commands::validate::handle(input),
    };

    if let Err(err) = result {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
