use clap::Parser;
use tracing::debug;

mod cli;

use cli::Cli;
use gestao_ai::{error::AppError, logging::init_logging};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;

    debug!("CLI arguments: {:?}", cli);

    match cli.run().await {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::error!("gestao-ai error: {}", e);
            eprintln!("Erro: {}", e);
            std::process::exit(e.exit_code());
        }
    }
}
