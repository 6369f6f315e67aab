use crate::error::{BotError, Result};
use plotters::prelude::*;
use std::path::Path;

const CHART_WIDTH: u32 = 1000;
const CHART_HEIGHT: u32 = 500;

/// Render a price history line chart as a PNG at `path`.
///
/// The x axis is the observation index (one observation per polling cycle,
/// labelled in hours); the y axis is USD price.
pub fn render_price_chart(prices: &[f64], symbol: &str, path: &Path) -> Result<()> {
    if prices.is_empty() {
        return Err(BotError::Chart("no price points to plot".to_string()));
    }

    let y_min = prices.iter().copied().fold(f64::INFINITY, f64::min);
    let y_max = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    // Flat series still needs a non-empty range
    let pad = ((y_max - y_min) * 0.05).max(y_max.abs() * 0.01).max(1e-9);
    let y_range = (y_min - pad)..(y_max + pad);

    let root = BitMapBackend::new(path, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| BotError::Chart(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("{} Price History", symbol.to_uppercase()),
            ("sans-serif", 30),
        )
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0..prices.len().max(2) - 1, y_range)
        .map_err(|e| BotError::Chart(e.to_string()))?;

    chart
        .configure_mesh()
        .x_desc("Hours")
        .y_desc("Price (USD)")
        .draw()
        .map_err(|e| BotError::Chart(e.to_string()))?;

    chart
        .draw_series(LineSeries::new(
            prices.iter().enumerate().map(|(i, p)| (i, *p)),
            &BLUE,
        ))
        .map_err(|e| BotError::Chart(e.to_string()))?;

    root.present().map_err(|e| BotError::Chart(e.to_string()))?;
    Ok(())
}
