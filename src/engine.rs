use crate::api::PriceSource;
use crate::indicators::{calculate_rsi, rsi_signal};
use crate::models::{PriceAlert, Signal};
use crate::notify::NotificationSink;
use crate::registry::TrackedAssetRegistry;
use chrono::Utc;
use std::time::Duration;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{info, warn};

/// Periodic orchestrator: every tick, fetch a fresh price for each tracked
/// asset, append it to history, run RSI, and push an alert to the asset's
/// channel.
///
/// One asset's failure never aborts the cycle for the others, and the loop
/// itself never exits; the next tick is the only retry mechanism.
pub struct PollingEngine<P, N> {
    registry: TrackedAssetRegistry,
    source: P,
    sink: N,
    rsi_period: usize,
}

impl<P: PriceSource, N: NotificationSink> PollingEngine<P, N> {
    pub fn new(registry: TrackedAssetRegistry, source: P, sink: N, rsi_period: usize) -> Self {
        Self {
            registry,
            source,
            sink,
            rsi_period,
        }
    }

    /// Drive cycles forever on a fixed timer. Ticks missed while a slow
    /// cycle is still running are skipped, not replayed.
    pub async fn run(&self, interval: Duration) {
        let mut ticker = interval_at(Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            self.run_cycle().await;
        }
    }

    /// One polling cycle across all tracked assets
    pub async fn run_cycle(&self) {
        let assets = self.registry.all_tracked();
        if assets.is_empty() {
            return;
        }

        info!(assets = assets.len(), "Polling cycle");

        for asset in &assets {
            let price = match self.source.price(&asset.symbol, &asset.chain).await {
                Ok(p) => p,
                Err(e) => {
                    // Skipped for this cycle: no history mutation, no alert
                    warn!(symbol = %asset.symbol, error = %e, "Price fetch failed");
                    continue;
                }
            };

            self.registry.append_price(&asset.symbol, price);

            let alert = self.build_alert(&asset.symbol, price);
            info!(
                symbol = %asset.symbol,
                price,
                signal = %alert.signal,
                "Cycle result"
            );

            if let Err(e) = self
                .sink
                .send_message(asset.channel_id, &alert.format_message())
                .await
            {
                warn!(symbol = %asset.symbol, error = %e, "Alert delivery failed");
            }
        }
    }

    /// RSI over the most recent `period + 1` observations; shorter history
    /// degrades to the insufficient-data sentinel instead of a value.
    fn build_alert(&self, symbol: &str, price: f64) -> PriceAlert {
        let history = self.registry.history(symbol);
        let window_start = history.len().saturating_sub(self.rsi_period + 1);
        let window = &history[window_start..];

        let (rsi, signal) = match calculate_rsi(window, self.rsi_period) {
            Some(v) => (Some(v), rsi_signal(v)),
            None => (None, Signal::InsufficientData),
        };

        PriceAlert {
            symbol: symbol.to_string(),
            price,
            rsi,
            signal,
            timestamp: Utc::now(),
        }
    }
}
