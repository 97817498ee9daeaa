use clap::Parser;
use folio::commands::{Cli, ThemeSession};
use folio::{config, logger};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let app_config = config::load_config(cli.config.as_deref())?;
    logger::setup_logger(app_config.logging())?;
    log::debug!("Data directory: {}", app_config.data_dir().display());

    let mut session = ThemeSession::open(&app_config)?;
    let output = session.execute(cli.command).await?;
    print!("{output}");
    if !output.is_empty() && !output.ends_with('\n') {
        println!();
    }

    for event in session.drain_events() {
        log::info!("UI event: {event:?}");
    }

    Ok(())
}
