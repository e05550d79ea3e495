use clap::Parser;
use price_alert::cli::{describe_config, Cli, Commands};
use price_alert::config::Config;
use std::path::Path;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // File first, then PRICE_ALERT_* environment overrides
    let config = Config::resolve(&cli.config)?;

    // Initialize telemetry
    price_alert::telemetry::init_telemetry(&config.telemetry)?;

    tracing::debug!(
        path = %cli.config,
        file_found = Path::new(&cli.config).exists(),
        "Configuration resolved"
    );

    match cli.command {
        Commands::Run(args) => {
            config.validate()?;
            tracing::info!("Starting scheduled price checks");
            args.execute(&config).await?;
        }
        Commands::Check(args) => {
            config.validate()?;
            tracing::info!("Running a single price check");
            args.execute(&config).await?;
        }
        Commands::Config => {
            println!("Current configuration:");
            println!("{}", describe_config(&config));
            if let Err(e) = config.validate() {
                println!("  Invalid: {}", e);
            }
        }
    }

    Ok(())
}
