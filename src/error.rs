//! Error taxonomy shared by both scripts.
//!
//! Every failure falls into one of four kinds: configuration, network,
//! remote rejection, or interface mismatch. Binaries map the kind to an
//! exit code; nothing is retried.

use std::fmt;
use std::time::Duration;

use alloy::primitives::TxHash;
use alloy::transports::{RpcError, TransportErrorKind};
use thiserror::Error;

use crate::config::validation::ValidationError;

/// Coarse failure classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Missing or malformed environment values, bad key, chain mismatch.
    Config,
    /// Endpoint unreachable or a call exceeded its deadline.
    Network,
    /// The node or contract refused the call (revert, invalid sender, ...).
    Rejected,
    /// The ABI does not match what the scripts need or what the contract returned.
    InterfaceMismatch,
}

impl ErrorKind {
    /// Process exit code for this kind.
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorKind::Config => 2,
            ErrorKind::Network => 3,
            ErrorKind::Rejected => 4,
            ErrorKind::InterfaceMismatch => 5,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Config => "configuration error",
            ErrorKind::Network => "network error",
            ErrorKind::Rejected => "remote rejection",
            ErrorKind::InterfaceMismatch => "interface mismatch",
        };
        f.write_str(name)
    }
}

/// Errors produced by the contract scripts.
#[derive(Debug, Error)]
pub enum Error {
    /// A single configuration problem.
    #[error("Configuration error: {0}")]
    Config(String),

    /// One or more environment values failed validation.
    #[error("Invalid configuration: {}", join_errors(.0))]
    ConfigInvalid(Vec<ValidationError>),

    /// Transport-level failure talking to the node.
    #[error("Network error: {0}")]
    Network(String),

    /// A remote call did not finish in time.
    #[error("RPC timeout after {0:?}")]
    Timeout(Duration),

    /// The node returned a JSON-RPC error or the transaction reverted.
    #[error("Remote call rejected: {0}")]
    Rejected(String),

    /// ABI shape or return data does not fit the contract interface.
    #[error("Interface mismatch: {0}")]
    InterfaceMismatch(String),

    /// The transaction was broadcast but its confirmation could not be established.
    #[error("Transaction {tx_hash} was sent but not confirmed: {source}")]
    Unconfirmed {
        tx_hash: TxHash,
        source: Box<Error>,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Config(_) | Error::ConfigInvalid(_) => ErrorKind::Config,
            Error::Network(_) | Error::Timeout(_) => ErrorKind::Network,
            Error::Rejected(_) => ErrorKind::Rejected,
            Error::InterfaceMismatch(_) => ErrorKind::InterfaceMismatch,
            Error::Unconfirmed { source, .. } => source.kind(),
        }
    }

    /// Hash of a transaction that reached the network before the failure.
    pub fn tx_hash(&self) -> Option<TxHash> {
        match self {
            Error::Unconfirmed { tx_hash, .. } => Some(*tx_hash),
            _ => None,
        }
    }
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<RpcError<TransportErrorKind>> for Error {
    fn from(err: RpcError<TransportErrorKind>) -> Self {
        if let Some(payload) = err.as_error_resp() {
            return Error::Rejected(payload.to_string());
        }
        if err.is_transport_error() {
            return Error::Network(err.to_string());
        }
        match err {
            RpcError::NullResp | RpcError::DeserError { .. } => {
                Error::InterfaceMismatch(err.to_string())
            }
            other => Error::Network(other.to_string()),
        }
    }
}

impl From<alloy::contract::Error> for Error {
    fn from(err: alloy::contract::Error) -> Self {
        use alloy::contract::Error as ContractError;

        match err {
            ContractError::TransportError(e) => e.into(),
            ContractError::UnknownFunction(name) => {
                Error::InterfaceMismatch(format!("function '{}' not in ABI", name))
            }
            ContractError::AbiError(e) => Error::InterfaceMismatch(e.to_string()),
            ContractError::ZeroData(..) | ContractError::ContractNotDeployed => {
                Error::InterfaceMismatch(err.to_string())
            }
            other => Error::Rejected(other.to_string()),
        }
    }
}
