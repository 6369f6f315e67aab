use crate::error::{BotError, Result};
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_API_URL: &str = "https://deep-index.moralis.io/api/v2/erc20/{}/price";
const DEFAULT_CHAIN: &str = "eth";
const DEFAULT_CHECK_INTERVAL_SECS: u64 = 300;
const DEFAULT_MAX_HISTORY_HOURS: usize = 720;
const DEFAULT_RSI_PERIOD: usize = 14;
const DEFAULT_CHART_PATH: &str = "chart.png";

/// All process-wide settings and secrets, built once at startup and
/// passed down explicitly. Nothing reads the environment after this.
#[derive(Debug, Clone)]
pub struct Config {
    /// Price API URL template; `{}` marks where the symbol goes
    /// (the endpoint puts it mid-path, before a `/price` segment)
    pub api_url_template: String,
    pub api_key: String,
    pub bot_token: String,
    pub default_chain: String,
    pub poll_interval: Duration,
    /// Ring-buffer cap on per-asset price history
    pub max_history: usize,
    pub rsi_period: usize,
    /// Fixed path the chart command renders into (overwritten each call)
    pub chart_path: PathBuf,
    /// Assets polled from startup, before any track command arrives
    pub seed_assets: Vec<SeedAsset>,
}

/// One `TRACKED_ASSETS` entry: `symbol:channel_id:lower:upper`
#[derive(Debug, Clone, PartialEq)]
pub struct SeedAsset {
    pub symbol: String,
    pub channel_id: u64,
    pub lower: f64,
    pub upper: f64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("MORALIS_API_KEY")
            .map_err(|_| BotError::Config("MORALIS_API_KEY not set".to_string()))?;
        let bot_token = std::env::var("DISCORD_BOT_TOKEN")
            .map_err(|_| BotError::Config("DISCORD_BOT_TOKEN not set".to_string()))?;

        Ok(Self {
            api_url_template: std::env::var("PRICE_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            api_key,
            bot_token,
            default_chain: std::env::var("DEFAULT_CHAIN")
                .unwrap_or_else(|_| DEFAULT_CHAIN.to_string()),
            poll_interval: Duration::from_secs(parse_env(
                "CHECK_INTERVAL_SECS",
                DEFAULT_CHECK_INTERVAL_SECS,
            )),
            max_history: parse_env("MAX_HISTORY_HOURS", DEFAULT_MAX_HISTORY_HOURS),
            rsi_period: parse_env("RSI_PERIOD", DEFAULT_RSI_PERIOD),
            chart_path: std::env::var("CHART_PATH")
                .unwrap_or_else(|_| DEFAULT_CHART_PATH.to_string())
                .into(),
            seed_assets: parse_seed_assets(
                &std::env::var("TRACKED_ASSETS").unwrap_or_default(),
            ),
        })
    }
}

/// Parse the `TRACKED_ASSETS` comma-separated list. Malformed entries are
/// skipped with a warning rather than failing startup.
fn parse_seed_assets(raw: &str) -> Vec<SeedAsset> {
    let mut assets = Vec::new();

    for entry in raw.split(',').filter(|e| !e.trim().is_empty()) {
        let parts: Vec<&str> = entry.trim().split(':').collect();
        let parsed = match parts.as_slice() {
            [symbol, channel, lower, upper] => channel
                .parse::<u64>()
                .ok()
                .zip(lower.parse::<f64>().ok())
                .zip(upper.parse::<f64>().ok())
                .map(|((channel_id, lower), upper)| SeedAsset {
                    symbol: symbol.to_string(),
                    channel_id,
                    lower,
                    upper,
                }),
            _ => None,
        };

        match parsed {
            Some(asset) => assets.push(asset),
            None => tracing::warn!(entry, "Ignoring malformed TRACKED_ASSETS entry"),
        }
    }

    assets
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_falls_back_on_missing() {
        assert_eq!(parse_env("ALERTBOT_NO_SUCH_VAR", 300u64), 300);
    }

    #[test]
    fn test_parse_env_falls_back_on_garbage() {
        std::env::set_var("ALERTBOT_TEST_GARBAGE", "not a number");
        assert_eq!(parse_env("ALERTBOT_TEST_GARBAGE", 14usize), 14);
        std::env::remove_var("ALERTBOT_TEST_GARBAGE");
    }

    #[test]
    fn test_parse_env_reads_value() {
        std::env::set_var("ALERTBOT_TEST_INTERVAL", "60");
        assert_eq!(parse_env("ALERTBOT_TEST_INTERVAL", 300u64), 60);
        std::env::remove_var("ALERTBOT_TEST_INTERVAL");
    }

    #[test]
    fn test_default_url_template_has_mid_path_symbol() {
        // Symbol goes mid-path with a terminal /price segment
        assert_eq!(
            DEFAULT_API_URL.replace("{}", "eth"),
            "https://deep-index.moralis.io/api/v2/erc20/eth/price"
        );
    }

    #[test]
    fn test_parse_seed_assets() {
        let assets = parse_seed_assets("eth:42:1500:2500, btc:7:10000:90000");
        assert_eq!(
            assets,
            vec![
                SeedAsset {
                    symbol: "eth".to_string(),
                    channel_id: 42,
                    lower: 1500.0,
                    upper: 2500.0,
                },
                SeedAsset {
                    symbol: "btc".to_string(),
                    channel_id: 7,
                    lower: 10000.0,
                    upper: 90000.0,
                },
            ]
        );
    }

    #[test]
    fn test_parse_seed_assets_skips_malformed() {
        let assets = parse_seed_assets("eth:42:1500, :::, sol:not_a_channel:1:2, jup:9:0.5:2");
        assert_eq!(assets.len(), 1);
        assert_eq!(assets[0].symbol, "jup");
    }

    #[test]
    fn test_parse_seed_assets_empty() {
        assert!(parse_seed_assets("").is_empty());
    }
}
