use anyhow::Result;
use cart_widget::{
    cli::{Args, CliApp},
    utils::Config,
};
use clap::Parser;

fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::from_env(args.catalog.clone(), args.currency.clone())?;

    tracing_subscriber::fmt()
        .with_env_filter(config.log_filter(args.verbose)?)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("🛒 Cart widget starting...");
    tracing::info!(
        "Configuration loaded for {} environment",
        config.environment
    );

    let app = CliApp::new(config)?;
    app.run(args.command)?;

    tracing::info!("🛒 Cart widget stopped");
    Ok(())
}
