mod cli;
mod commands;
mod context;
mod output;

use clap::Parser;
use cli::{Cli, Commands};
use context::Context;
use log::info;
use setup_rome_core::SetupError;

fn main() {
    output::init_logger();
    let cli = Cli::parse();

    let result = Context::from_cli(&cli).and_then(|ctx| {
        match cli.command.unwrap_or(Commands::Install) {
            Commands::Install => commands::install::execute_install(&ctx),
            Commands::Resolve => commands::resolve::execute_resolve(&ctx),
        }
    });

    if let Err(e) = result {
        let message = match e.downcast_ref::<SetupError>() {
            Some(err) => {
                if err.is_user_actionable() {
                    info!("Check the 'version', 'preview' and 'github-token' inputs of this step.");
                }
                // Carries its own cause
                err.to_string()
            }
            None => format!("{:#}", e),
        };
        output::set_failed(&message);
        std::process::exit(1);
    }
}
