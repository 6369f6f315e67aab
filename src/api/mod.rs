pub mod moralis;

pub use moralis::{MoralisClient, PriceSource};
