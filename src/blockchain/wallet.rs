//! Signing identity for the write path.
//!
//! # Security
//! - Private keys come only from configuration (environment)
//! - Keys are never logged or serialized

use alloy::network::EthereumWallet;
use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;

use crate::config::SignerConfig;
use crate::error::{Error, Result};

/// Local private-key signer.
#[derive(Debug, Clone)]
pub struct Wallet {
    signer: PrivateKeySigner,
}

impl Wallet {
    /// Create a wallet from a hex-encoded private key string.
    ///
    /// # Arguments
    /// * `private_key_hex` - Hex string (with or without 0x prefix)
    pub fn from_private_key(private_key_hex: &str) -> Result<Self> {
        let key_hex = private_key_hex.strip_prefix("0x").unwrap_or(private_key_hex);

        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| Error::Config(format!("Invalid private key format: {}", e)))?;

        tracing::info!(address = %signer.address(), "Wallet initialized");

        Ok(Self { signer })
    }

    /// Build the wallet from validated signer settings.
    ///
    /// `PUBLIC_KEY` is informational; a mismatch with the derived address
    /// is logged, not fatal.
    pub fn from_config(config: &SignerConfig) -> Result<Self> {
        let wallet = Self::from_private_key(config.private_key())?;
        if let Some(expected) = config.public_key {
            if expected != wallet.address() {
                tracing::warn!(
                    public_key = %expected,
                    signer = %wallet.address(),
                    "PUBLIC_KEY does not match the address derived from PRIVATE_KEY"
                );
            }
        }
        Ok(wallet)
    }

    /// Get the wallet's address.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Wallet form accepted by the provider builder.
    pub fn ethereum_wallet(&self) -> EthereumWallet {
        EthereumWallet::from(self.signer.clone())
    }
}
