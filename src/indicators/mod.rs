// Technical indicators module

pub mod rsi;

pub use rsi::{calculate_rsi, rsi_signal};
