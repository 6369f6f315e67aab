//! Error handling for the bot

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    /// Price API failure: transport error, bad status, or malformed body.
    /// Recovered at the call site - the asset is skipped for the cycle.
    #[error("price unavailable for {symbol}: {reason}")]
    PriceUnavailable { symbol: String, reason: String },

    /// Channel no longer reachable. Recovered - the alert is dropped.
    #[error("destination {channel_id} unavailable: {reason}")]
    DestinationUnavailable { channel_id: u64, reason: String },

    #[error("chart rendering failed: {0}")]
    Chart(String),

    /// Missing or malformed environment. Fatal at startup only.
    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, BotError>;
