use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A token being watched by the polling engine
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrackedAsset {
    /// Normalized lowercase symbol, unique in the registry
    pub symbol: String,
    /// Chain the symbol is priced on ("eth" unless told otherwise)
    pub chain: String,
    /// Channel that receives alerts for this asset
    pub channel_id: u64,
    /// User-supplied (lower, upper) bounds; stored, advisory only
    pub thresholds: (f64, f64),
    /// Observed prices, oldest first
    pub history: Vec<f64>,
}

/// Trading signal derived from RSI
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Signal {
    Buy,
    Sell,
    Hold,
    /// History too short to compute RSI; normal low-data state, not an error
    InsufficientData,
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Signal::Buy => write!(f, "BUY"),
            Signal::Sell => write!(f, "SELL"),
            Signal::Hold => write!(f, "HOLD"),
            Signal::InsufficientData => write!(f, "HOLD (insufficient data)"),
        }
    }
}

/// One per-asset result of a polling cycle, delivered to the asset's channel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceAlert {
    pub symbol: String,
    pub price: f64,
    /// None while history is shorter than the RSI window
    pub rsi: Option<f64>,
    pub signal: Signal,
    pub timestamp: DateTime<Utc>,
}

impl PriceAlert {
    /// Message body sent to the destination channel
    pub fn format_message(&self) -> String {
        let rsi_text = match self.rsi {
            Some(v) => format!("{:.2}", v),
            None => "N/A".to_string(),
        };
        format!(
            "**{} Alert**\nCurrent Price: ${:.2}\nRSI: {}\nSignal: {}",
            self.symbol.to_uppercase(),
            self.price,
            rsi_text,
            self.signal
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_display() {
        assert_eq!(Signal::Buy.to_string(), "BUY");
        assert_eq!(Signal::Sell.to_string(), "SELL");
        assert_eq!(Signal::Hold.to_string(), "HOLD");
        assert_eq!(
            Signal::InsufficientData.to_string(),
            "HOLD (insufficient data)"
        );
    }

    #[test]
    fn test_alert_message_with_rsi() {
        let alert = PriceAlert {
            symbol: "eth".to_string(),
            price: 1834.5,
            rsi: Some(71.3),
            signal: Signal::Sell,
            timestamp: Utc::now(),
        };

        let msg = alert.format_message();
        assert!(msg.contains("**ETH Alert**"));
        assert!(msg.contains("$1834.50"));
        assert!(msg.contains("RSI: 71.30"));
        assert!(msg.contains("Signal: SELL"));
    }

    #[test]
    fn test_alert_message_without_rsi() {
        let alert = PriceAlert {
            symbol: "pepe".to_string(),
            price: 0.0,
            rsi: None,
            signal: Signal::InsufficientData,
            timestamp: Utc::now(),
        };

        let msg = alert.format_message();
        assert!(msg.contains("RSI: N/A"));
        assert!(msg.contains("Signal: HOLD (insufficient data)"));
    }
}
