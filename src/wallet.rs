//! Wallet key import
//!
//! Loads the signing keypair from a base58-encoded private key, taken from
//! an explicit override or the `PRIVATE_KEY` environment variable.

use solana_sdk::signature::Keypair;
use tracing::debug;

use crate::error::{Error, Result};

/// Environment variable holding the base58-encoded 64-byte secret key
pub const PRIVATE_KEY_ENV: &str = "PRIVATE_KEY";

/// Load the signing keypair.
///
/// An explicit `private_key` wins over the environment. A missing key and a
/// malformed key are distinct failures so callers can tell "not configured"
/// apart from "mis-pasted".
pub fn load_keypair(private_key: Option<&str>) -> Result<Keypair> {
    let encoded = match private_key {
        Some(key) => key.to_string(),
        None => std::env::var(PRIVATE_KEY_ENV)
            .map_err(|_| Error::MissingEnvVar(PRIVATE_KEY_ENV.to_string()))?,
    };

    keypair_from_base58(encoded.trim())
}

/// Decode a base58 private key into a Keypair
pub fn keypair_from_base58(encoded: &str) -> Result<Keypair> {
    let bytes = bs58::decode(encoded)
        .into_vec()
        .map_err(|e| Error::InvalidKeypair(format!("Not valid base58: {}", e)))?;

    if bytes.len() != 64 {
        return Err(Error::InvalidKeypair(format!(
            "Expected 64-byte secret key, got {} bytes",
            bytes.len()
        )));
    }

    let keypair = Keypair::from_bytes(&bytes)
        .map_err(|e| Error::InvalidKeypair(format!("Invalid keypair bytes: {}", e)))?;

    debug!("Loaded keypair");
    Ok(keypair)
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::signer::Signer;

    #[test]
    fn test_base58_round_trip() {
        let keypair = Keypair::new();
        let encoded = bs58::encode(keypair.to_bytes()).into_string();

        let decoded = keypair_from_base58(&encoded).unwrap();
        assert_eq!(decoded.pubkey(), keypair.pubkey());
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            keypair_from_base58("not base58 at all!!"),
            Err(Error::InvalidKeypair(_))
        ));
    }

    #[test]
    fn test_rejects_wrong_length() {
        let encoded = bs58::encode([1u8; 32]).into_string();
        assert!(matches!(
            keypair_from_base58(&encoded),
            Err(Error::InvalidKeypair(_))
        ));
    }
}
