//! Bonding-curve trader library
//!
//! Buys tokens from a pump.fun-style bonding curve and burns tokens,
//! by building and submitting signed Solana transactions.

pub mod cli;
pub mod config;
pub mod error;
pub mod pump;
pub mod trading;
pub mod wallet;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
pub use trading::{BurnOutcome, BuyOutcome, Trader};
