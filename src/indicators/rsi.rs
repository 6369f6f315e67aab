use crate::models::Signal;

/// Calculate Relative Strength Index (RSI) with Wilder smoothing
///
/// RSI measures the magnitude of recent price changes to evaluate
/// overbought or oversold conditions.
///
/// Values:
/// - RSI > 70: Overbought
/// - RSI < 30: Oversold
///
/// Returns `None` when fewer than `period + 1` prices are available.
///
/// Zero-loss input takes the `rs = 0` branch, giving RSI = 0 rather than
/// the textbook 100. Intentional: matches the bot's historical alerting
/// behavior, pending product sign-off on a fix.
pub fn calculate_rsi(prices: &[f64], period: usize) -> Option<f64> {
    if prices.len() < period + 1 {
        return None;
    }

    let mut gains = Vec::with_capacity(prices.len() - 1);
    let mut losses = Vec::with_capacity(prices.len() - 1);

    // Successive price changes
    for i in 1..prices.len() {
        let change = prices[i] - prices[i - 1];
        if change > 0.0 {
            gains.push(change);
            losses.push(0.0);
        } else {
            gains.push(0.0);
            losses.push(change.abs());
        }
    }

    // Seed with the arithmetic mean of the first `period` changes
    let mut avg_gain: f64 = gains[..period].iter().sum::<f64>() / period as f64;
    let mut avg_loss: f64 = losses[..period].iter().sum::<f64>() / period as f64;

    // Wilder smoothing over the remaining changes
    for i in period..gains.len() {
        avg_gain = (avg_gain * (period - 1) as f64 + gains[i]) / period as f64;
        avg_loss = (avg_loss * (period - 1) as f64 + losses[i]) / period as f64;
    }

    let rs = if avg_loss != 0.0 { avg_gain / avg_loss } else { 0.0 };
    Some(100.0 - (100.0 / (1.0 + rs)))
}

/// Derive a trading signal from an RSI value
pub fn rsi_signal(rsi: f64) -> Signal {
    if rsi > 70.0 {
        Signal::Sell
    } else if rsi < 30.0 {
        Signal::Buy
    } else {
        Signal::Hold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rsi_calculation() {
        let prices = vec![
            44.0, 44.25, 44.5, 43.75, 44.0, 44.5, 45.0, 45.5, 45.25, 45.5, 46.0, 46.5, 46.25,
            46.0, 46.5,
        ];

        let rsi = calculate_rsi(&prices, 14);
        assert!(rsi.is_some());

        let rsi_value = rsi.unwrap();
        assert!(rsi_value > 0.0 && rsi_value < 100.0);
    }

    #[test]
    fn test_rsi_insufficient_data() {
        let prices = vec![100.0, 102.0, 101.0];
        assert!(calculate_rsi(&prices, 14).is_none());

        // Exactly `period` prices is still one short
        let prices: Vec<f64> = (0..14).map(|i| 100.0 + i as f64).collect();
        assert!(calculate_rsi(&prices, 14).is_none());
    }

    #[test]
    fn test_rsi_minimum_length() {
        let prices: Vec<f64> = (0..15).map(|i| 100.0 + (i % 3) as f64).collect();
        assert!(calculate_rsi(&prices, 14).is_some());
    }

    #[test]
    fn test_all_gains_hits_zero_loss_fallback() {
        // Strictly ascending: avg_loss == 0 takes the rs = 0 branch,
        // so the result is 0, not the textbook 100.
        let prices: Vec<f64> = (0..15).map(|i| 100.0 + i as f64).collect();
        let rsi = calculate_rsi(&prices, 14).unwrap();
        assert_eq!(rsi, 0.0);
    }

    #[test]
    fn test_all_losses_is_zero() {
        let prices: Vec<f64> = (0..15).map(|i| 100.0 - i as f64).collect();
        let rsi = calculate_rsi(&prices, 14).unwrap();
        assert_eq!(rsi, 0.0);
    }

    #[test]
    fn test_rsi_is_deterministic() {
        let prices: Vec<f64> = (0..30)
            .map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0)
            .collect();

        let first = calculate_rsi(&prices, 14);
        let second = calculate_rsi(&prices, 14);
        assert_eq!(first, second);
    }

    #[test]
    fn test_wilder_smoothing_uses_full_series() {
        // A late downswing must move the smoothed averages; a plain
        // last-window mean would ignore the early ramp entirely.
        let mut prices: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
        prices.extend((0..10).map(|i| 119.0 - i as f64 * 2.0));

        let rsi = calculate_rsi(&prices, 14).unwrap();
        assert!(rsi > 0.0 && rsi < 50.0, "got {}", rsi);
    }

    #[test]
    fn test_signal_thresholds() {
        assert_eq!(rsi_signal(75.0), Signal::Sell);
        assert_eq!(rsi_signal(25.0), Signal::Buy);
        assert_eq!(rsi_signal(50.0), Signal::Hold);
        // Boundaries are exclusive
        assert_eq!(rsi_signal(70.0), Signal::Hold);
        assert_eq!(rsi_signal(30.0), Signal::Hold);
    }
}
