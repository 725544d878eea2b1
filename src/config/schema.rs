//! Configuration schema definitions.
//!
//! Values here are already validated; construct them through
//! [`crate::config::loader`] rather than by hand outside of tests.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use alloy::primitives::Address;
use url::Url;

/// Default per-call RPC deadline.
pub const DEFAULT_RPC_TIMEOUT_SECS: u64 = 10;

/// Default deadline for waiting on confirmations.
pub const DEFAULT_CONFIRMATION_TIMEOUT_SECS: u64 = 120;

/// Settings shared by both scripts: where the node and the contract are.
#[derive(Debug, Clone)]
pub struct ChainConfig {
    /// JSON-RPC endpoint URL.
    pub rpc_url: Url,

    /// Deployed contract address.
    pub contract_address: Address,

    /// Deadline applied to every remote call.
    pub rpc_timeout: Duration,

    /// Expected chain ID; verified against the node when set.
    pub chain_id: Option<u64>,

    /// Override for the bundled ABI metadata file.
    pub abi_path: Option<PathBuf>,
}

impl ChainConfig {
    /// Config with default timeout and no optional settings.
    pub fn new(rpc_url: Url, contract_address: Address) -> Self {
        Self {
            rpc_url,
            contract_address,
            rpc_timeout: Duration::from_secs(DEFAULT_RPC_TIMEOUT_SECS),
            chain_id: None,
            abi_path: None,
        }
    }
}

/// Signing credential for the write path.
#[derive(Clone)]
pub struct SignerConfig {
    private_key: String,

    /// Caller address from `PUBLIC_KEY`, if provided.
    pub public_key: Option<Address>,
}

impl SignerConfig {
    pub fn new(private_key: impl Into<String>, public_key: Option<Address>) -> Self {
        Self {
            private_key: private_key.into(),
            public_key,
        }
    }

    /// Hex-encoded private key. Never log this.
    pub fn private_key(&self) -> &str {
        &self.private_key
    }
}

impl fmt::Debug for SignerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignerConfig")
            .field("private_key", &"<redacted>")
            .field("public_key", &self.public_key)
            .finish()
    }
}

/// Configuration for the read-only script.
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    pub chain: ChainConfig,
}

/// Configuration for the transaction-submitting script.
#[derive(Debug, Clone)]
pub struct WriterConfig {
    pub chain: ChainConfig,

    pub signer: SignerConfig,

    /// Blocks to wait for after submission (0 = report at submission time).
    pub confirmation_blocks: u64,

    /// Overall deadline for the confirmation wait.
    pub confirmation_timeout: Duration,
}
