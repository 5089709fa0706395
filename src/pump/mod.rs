//! Pump.fun protocol layer: program constants, account layouts, PDA
//! derivation, curve pricing, and account fetching.

pub mod accounts;
pub mod fetch;
pub mod mint;
pub mod pda;
pub mod price;
pub mod program;

pub use accounts::{BondingCurve, Global};
pub use mint::MintInfo;
