use alertbot::api::MoralisClient;
use alertbot::notify::DiscordSink;
use alertbot::{Config, PollingEngine, Result, TrackedAssetRegistry};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    setup_logging();

    tracing::info!("AlertBot starting");

    let config = Config::from_env()?;
    tracing::info!(
        interval_secs = config.poll_interval.as_secs(),
        rsi_period = config.rsi_period,
        max_history = config.max_history,
        chain = %config.default_chain,
        "Configuration loaded"
    );

    let source = MoralisClient::new(config.api_url_template.clone(), config.api_key.clone())?;
    let sink = DiscordSink::new(config.bot_token.clone())?;
    let registry = TrackedAssetRegistry::new(config.max_history);

    seed_registry(&registry, &config);
    if registry.is_empty() {
        tracing::warn!("No assets tracked yet; waiting for track commands");
    }

    let engine = PollingEngine::new(registry, source, sink, config.rsi_period);
    let poll_interval = config.poll_interval;
    let poll_task = tokio::spawn(async move {
        engine.run(poll_interval).await;
    });

    tracing::info!("Polling loop spawned; press Ctrl+C to stop");

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received Ctrl+C, shutting down");
        }
        result = poll_task => {
            tracing::error!("Polling loop exited: {:?}", result);
        }
    }

    tracing::info!("AlertBot stopped");
    Ok(())
}

fn setup_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "alertbot=info".into()),
        )
        .init();
}

/// Register the assets listed in the configuration so the bot polls
/// something before any chat command arrives
fn seed_registry(registry: &TrackedAssetRegistry, config: &Config) {
    for asset in &config.seed_assets {
        registry.track(
            &asset.symbol,
            &config.default_chain,
            asset.channel_id,
            asset.lower,
            asset.upper,
        );
        tracing::info!(
            symbol = %asset.symbol,
            channel_id = asset.channel_id,
            "Seeded tracked asset"
        );
    }
}
