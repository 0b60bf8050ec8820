mod app;
mod settings;
mod tui;

use anyhow::Result;
use settings::Settings;
use sim::WorldConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so headless JSON on stdout stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "viewer=info,sim=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let settings = Settings::from_env()?;

    tracing::info!("Starting ecosim viewer");
    tracing::info!(?settings, "Loaded settings");

    if let Some(ticks) = settings.headless_ticks {
        let stats = sim::run_headless(WorldConfig::default(), ticks, settings.seed)?;
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    app::run(&settings).await
}
