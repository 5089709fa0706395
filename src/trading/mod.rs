//! Trading module - instruction assembly, submission, and orchestration

pub mod executor;
pub mod submit;
pub mod transaction;

pub use executor::{BurnOutcome, BuyOutcome, Trader};
