//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! ReaderConfig / WriterConfig
//!     → abi.rs (bundled or ABI_PATH metadata, shape validation)
//!     → wallet.rs (key loading, write path only)
//!     → client.rs (contract-bound RPC with timeouts)
//!     → transaction.rs (sign, broadcast, confirmations)
//! ```
//!
//! # Security Constraints
//! - Private keys ONLY from configuration (environment)
//! - Never log private keys or sensitive data
//! - All RPC calls have configurable timeouts

pub mod abi;
pub mod client;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use abi::PlayerStateAbi;
pub use client::PlayerStateClient;
pub use transaction::TxSubmitter;
pub use types::{ChainId, ConfirmationStatus, Player, PlayerReport, PlayerUpdate, SubmittedTx};
pub use wallet::Wallet;
