use crate::models::TrackedAsset;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, RwLock};

struct Entry {
    chain: String,
    channel_id: u64,
    thresholds: (f64, f64),
    history: VecDeque<f64>,
}

/// Thread-safe registry of tracked assets
///
/// Keeps a rolling window of observed prices per symbol. Clone-able handle;
/// all clones share the same map. Track commands and the polling cycle run
/// on different tasks, so mutation goes through the lock.
#[derive(Clone)]
pub struct TrackedAssetRegistry {
    // Guard unwraps are safe: the lock is only poisoned if a holder
    // panicked, and nothing in this module panics while holding it.
    data: Arc<RwLock<HashMap<String, Entry>>>,
    max_history: usize,
}

impl TrackedAssetRegistry {
    /// # Arguments
    /// * `max_history` - Maximum number of price observations kept per symbol
    pub fn new(max_history: usize) -> Self {
        Self {
            data: Arc::new(RwLock::new(HashMap::new())),
            max_history,
        }
    }

    /// Register a symbol for polling, bound to a destination channel.
    ///
    /// Upsert: re-tracking an already-tracked symbol replaces its chain,
    /// channel and thresholds and resets its history. Symbols are
    /// normalized to lowercase, so `BTC` and `btc` are the same entry.
    pub fn track(&self, symbol: &str, chain: &str, channel_id: u64, lower: f64, upper: f64) {
        let mut data = self.data.write().unwrap();
        data.insert(
            symbol.to_lowercase(),
            Entry {
                chain: chain.to_string(),
                channel_id,
                thresholds: (lower, upper),
                history: VecDeque::new(),
            },
        );
    }

    /// Append an observed price, evicting the oldest past the cap.
    /// No-op if the symbol is not tracked.
    pub fn append_price(&self, symbol: &str, price: f64) {
        let mut data = self.data.write().unwrap();
        if let Some(entry) = data.get_mut(&symbol.to_lowercase()) {
            entry.history.push_back(price);
            while entry.history.len() > self.max_history {
                entry.history.pop_front();
            }
        }
    }

    /// Price history for a symbol, oldest first. Empty if unknown.
    pub fn history(&self, symbol: &str) -> Vec<f64> {
        let data = self.data.read().unwrap();
        data.get(&symbol.to_lowercase())
            .map(|e| e.history.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Stored (lower, upper) thresholds for a symbol
    pub fn thresholds(&self, symbol: &str) -> Option<(f64, f64)> {
        let data = self.data.read().unwrap();
        data.get(&symbol.to_lowercase()).map(|e| e.thresholds)
    }

    /// Snapshot of every tracked asset. The engine iterates this copy, so
    /// a track command landing mid-cycle cannot race the iteration.
    pub fn all_tracked(&self) -> Vec<TrackedAsset> {
        let data = self.data.read().unwrap();
        data.iter()
            .map(|(symbol, e)| TrackedAsset {
                symbol: symbol.clone(),
                chain: e.chain.clone(),
                channel_id: e.channel_id,
                thresholds: e.thresholds,
                history: e.history.iter().copied().collect(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.data.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_and_snapshot() {
        let registry = TrackedAssetRegistry::new(720);
        registry.track("eth", "eth", 42, 1500.0, 2500.0);

        let assets = registry.all_tracked();
        assert_eq!(assets.len(), 1);
        assert_eq!(assets[0].symbol, "eth");
        assert_eq!(assets[0].channel_id, 42);
        assert_eq!(assets[0].thresholds, (1500.0, 2500.0));
        assert!(assets[0].history.is_empty());
    }

    #[test]
    fn test_track_is_case_insensitive_upsert() {
        let registry = TrackedAssetRegistry::new(720);
        registry.track("BTC", "eth", 1, 10.0, 20.0);
        registry.track("btc", "eth", 2, 5.0, 50.0);

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.thresholds("btc"), Some((5.0, 50.0)));
        assert_eq!(registry.all_tracked()[0].channel_id, 2);
    }

    #[test]
    fn test_retrack_resets_history() {
        let registry = TrackedAssetRegistry::new(720);
        registry.track("sol", "eth", 1, 10.0, 20.0);
        registry.append_price("sol", 100.0);
        registry.append_price("sol", 101.0);
        assert_eq!(registry.history("sol").len(), 2);

        registry.track("sol", "eth", 1, 10.0, 20.0);
        assert!(registry.history("sol").is_empty());
    }

    #[test]
    fn test_append_untracked_is_noop() {
        let registry = TrackedAssetRegistry::new(720);
        registry.append_price("ghost", 1.0);
        assert!(registry.history("ghost").is_empty());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_history_order_and_eviction() {
        let registry = TrackedAssetRegistry::new(5);
        registry.track("eth", "eth", 1, 0.0, 0.0);

        for i in 0..10 {
            registry.append_price("eth", 100.0 + i as f64);
        }

        let history = registry.history("eth");
        assert_eq!(history.len(), 5);
        // Oldest first, keeping the most recent five
        assert_eq!(history[0], 105.0);
        assert_eq!(history[4], 109.0);
    }

    #[test]
    fn test_history_unknown_symbol_is_empty() {
        let registry = TrackedAssetRegistry::new(720);
        assert!(registry.history("nope").is_empty());
    }

    #[test]
    fn test_shared_across_clones() {
        let registry = TrackedAssetRegistry::new(720);
        let clone = registry.clone();

        clone.track("eth", "eth", 7, 1.0, 2.0);
        registry.append_price("ETH", 42.0);

        assert_eq!(clone.history("eth"), vec![42.0]);
    }
}
