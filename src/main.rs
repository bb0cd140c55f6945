//! term-courier CLI entry point

use std::process::ExitCode;

use clap::Parser;

use term_courier::cli::{
    app::{run_send, run_status, EXIT_ERROR},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    logging,
    presenter::Presenter,
};
use term_courier::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Commands::Send(args) => run_send(args).await,
        Commands::Status {
            pane_id,
            caller_pane,
        } => run_status(pane_id, caller_pane).await,
        Commands::Config { action } => {
            let presenter = Presenter::new();
            let store = XdgConfigStore::new();
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            ExitCode::SUCCESS
        }
    }
}
