//! Error types for the curve trader

use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

/// Result type alias using our custom Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the curve trader
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid keypair: {0}")]
    InvalidKeypair(String),

    // Not-found errors
    #[error("Global config account not found - wrong program id or network?")]
    GlobalNotFound,

    #[error("No bonding curve found for mint {0} - token does not exist on this market")]
    CurveNotFound(Pubkey),

    #[error("Mint account not found: {0}")]
    MintNotFound(Pubkey),

    #[error("No token account for mint {0} - nothing to burn")]
    NothingToBurn(Pubkey),

    // State errors
    #[error("Bonding curve for {0} is complete - market has migrated, buys are closed")]
    CurveComplete(Pubkey),

    // Funds errors
    #[error("Insufficient balance: {available} lamports available, {required} required")]
    InsufficientBalance { available: u64, required: u64 },

    // Format errors
    #[error("Account decode failed: {0}")]
    AccountDecode(String),

    #[error("Price calculation overflow")]
    PriceOverflow,

    #[error("Unsupported token program: {0}")]
    UnsupportedTokenProgram(Pubkey),

    // Trading errors
    #[error("Transaction build failed: {0}")]
    TransactionBuild(String),

    #[error("Transaction send failed: {0}")]
    TransactionSend(String),

    // RPC errors
    #[error("RPC error: {0}")]
    Rpc(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Check if this error is a local precondition failure (nothing was submitted)
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Error::GlobalNotFound
                | Error::CurveNotFound(_)
                | Error::MintNotFound(_)
                | Error::NothingToBurn(_)
                | Error::CurveComplete(_)
                | Error::InsufficientBalance { .. }
        )
    }
}

// Conversion from solana_client errors
impl From<solana_client::client_error::ClientError> for Error {
    fn from(e: solana_client::client_error::ClientError) -> Self {
        Error::Rpc(e.to_string())
    }
}
