//! Chat command handlers, values only.
//!
//! Parsing the chat-platform message syntax is the gateway adapter's job;
//! these functions take already-parsed arguments and return the reply to
//! post back. Raw error detail never reaches the user.

use crate::api::PriceSource;
use crate::chart::render_price_chart;
use crate::registry::TrackedAssetRegistry;
use std::path::{Path, PathBuf};
use tracing::warn;

pub const DEFAULT_CHART_DAYS: usize = 7;

/// What the gateway should post back to the invoking channel
#[derive(Debug, Clone, PartialEq)]
pub enum CommandReply {
    Text(String),
    /// Attach the file at `path` alongside `text`
    File { path: PathBuf, text: String },
}

/// `track <symbol> <lower> <upper>` - register the asset in the invoking
/// channel. Always succeeds; re-tracking overwrites and resets history.
pub fn track_command(
    registry: &TrackedAssetRegistry,
    symbol: &str,
    chain: &str,
    channel_id: u64,
    lower: f64,
    upper: f64,
) -> CommandReply {
    registry.track(symbol, chain, channel_id, lower, upper);
    CommandReply::Text(format!(
        "Now tracking {} in this channel",
        symbol.to_uppercase()
    ))
}

/// `price <symbol>` - one-shot fetch and reply; bypasses history and RSI
pub async fn price_command(
    source: &dyn PriceSource,
    symbol: &str,
    chain: &str,
) -> CommandReply {
    match source.price(symbol, chain).await {
        Ok(price) => CommandReply::Text(format!(
            "Current {} price: ${:.2}",
            symbol.to_uppercase(),
            price
        )),
        Err(e) => {
            warn!(symbol, error = %e, "Price command failed");
            CommandReply::Text("Could not retrieve price data".to_string())
        }
    }
}

/// `chart <symbol> [days]` - render the last `days * 24` history points.
///
/// Empty history replies "no data" and writes nothing. The chart always
/// lands at the one configured path and is overwritten per invocation, so
/// two chart commands racing share that file.
pub fn chart_command(
    registry: &TrackedAssetRegistry,
    symbol: &str,
    days: usize,
    chart_path: &Path,
) -> CommandReply {
    let history = registry.history(symbol);
    if history.is_empty() {
        return CommandReply::Text("No historical data available".to_string());
    }

    let window_start = history.len().saturating_sub(days * 24);
    match render_price_chart(&history[window_start..], symbol, chart_path) {
        Ok(()) => CommandReply::File {
            path: chart_path.to_path_buf(),
            text: format!("{} price history", symbol.to_uppercase()),
        },
        Err(e) => {
            warn!(symbol, error = %e, "Chart rendering failed");
            CommandReply::Text("Could not render chart".to_string())
        }
    }
}
