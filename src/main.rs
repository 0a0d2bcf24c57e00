use clap::Parser;
use prnotes::errors::ErrorHandler;
use prnotes::structs::cli::Cli;
use prnotes::workers::command_runner::CommandRunner;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_target(false)
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();
    let mut runner = CommandRunner::new(cli.config);

    if let Err(error) = runner.run_command(cli.command).await {
        ErrorHandler::handle_error(&error);
        std::process::exit(1);
    }
}
