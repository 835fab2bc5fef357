//! wordpos - Part-of-speech lookups, definitions and random words from WordNet.

use clap::CommandFactory;
use tracing::{error, info};
use wordpos::app;
use wordpos::cli::Cli;
use wordpos::config::Config;
use wordpos::error::{Result, WordposError};
use wordpos::lexicon;
use wordpos::logging;

fn main() {
    logging::init_stderr_logging();

    if let Err(e) = run() {
        error!("{}: {}", e.category(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let Some(command) = cli.command.clone() else {
        Cli::command()
            .print_help()
            .map_err(|e| WordposError::internal(format!("Failed to print help: {e}")))?;
        return Ok(());
    };

    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let config = Config::load_from_file(&config_path)?;
    let request = cli.to_request(&command, &config)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| WordposError::internal(format!("Failed to start runtime: {e}")))?;

    let output = runtime.block_on(async {
        let prepared = app::prepare(&request).await?;
        if prepared.needs_lexicon() {
            let provider = lexicon::connect(&cli.lexicon_source(&config)?).await?;
            app::complete(prepared, Some(provider.as_ref())).await
        } else {
            app::complete(prepared, None).await
        }
    })?;

    println!("{output}");
    Ok(())
}
