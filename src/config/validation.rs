//! Configuration validation.
//!
//! # Responsibilities
//! - Parse raw environment strings into typed values
//! - Check value ranges (timeouts > 0, keys and addresses well-formed)
//! - Report every problem at once, not just the first
//!
//! Validation happens before any client is built, so malformed input never
//! reaches the network.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use alloy::primitives::Address;
use thiserror::Error;
use url::Url;

use crate::config::loader::vars;
use crate::config::schema::{
    ChainConfig, SignerConfig, DEFAULT_CONFIRMATION_TIMEOUT_SECS, DEFAULT_RPC_TIMEOUT_SECS,
};

/// A single configuration problem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{var} is not a valid URL: {reason}")]
    InvalidUrl { var: &'static str, reason: String },

    #[error("{var} must use http or https, got '{scheme}'")]
    UnsupportedScheme { var: &'static str, scheme: String },

    #[error("{var} is not a valid address: {reason}")]
    InvalidAddress { var: &'static str, reason: String },

    // The key itself is deliberately left out of the message.
    #[error("{0} must be 32 bytes of hex (64 characters, optional 0x prefix)")]
    InvalidPrivateKey(&'static str),

    #[error("{var} must be a non-negative integer, got '{value}'")]
    InvalidNumber { var: &'static str, value: String },

    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

/// Collects errors while parsing a group of variables.
pub(crate) struct Validator<'a, F> {
    lookup: &'a F,
    errors: Vec<ValidationError>,
}

impl<'a, F> Validator<'a, F>
where
    F: Fn(&str) -> Option<String>,
{
    pub(crate) fn new(lookup: &'a F) -> Self {
        Self {
            lookup,
            errors: Vec::new(),
        }
    }

    /// Finish, returning all collected errors if any.
    pub(crate) fn finish(self) -> Result<(), Vec<ValidationError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }

    fn get(&self, var: &str) -> Option<String> {
        (self.lookup)(var)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn required(&mut self, var: &'static str) -> Option<String> {
        let value = self.get(var);
        if value.is_none() {
            self.errors.push(ValidationError::Missing(var));
        }
        value
    }

    fn url(&mut self, var: &'static str) -> Option<Url> {
        let raw = self.required(var)?;
        match Url::parse(&raw) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Some(url),
            Ok(url) => {
                self.errors.push(ValidationError::UnsupportedScheme {
                    var,
                    scheme: url.scheme().to_string(),
                });
                None
            }
            Err(e) => {
                self.errors.push(ValidationError::InvalidUrl {
                    var,
                    reason: e.to_string(),
                });
                None
            }
        }
    }

    fn parse_address(&mut self, var: &'static str, raw: &str) -> Option<Address> {
        match parse_address(raw) {
            Ok(address) => Some(address),
            Err(reason) => {
                self.errors.push(ValidationError::InvalidAddress { var, reason });
                None
            }
        }
    }

    fn address(&mut self, var: &'static str) -> Option<Address> {
        let raw = self.required(var)?;
        self.parse_address(var, &raw)
    }

    fn optional_address(&mut self, var: &'static str) -> Option<Address> {
        let raw = self.get(var)?;
        self.parse_address(var, &raw)
    }

    fn optional_u64(&mut self, var: &'static str) -> Option<u64> {
        let raw = self.get(var)?;
        match raw.parse::<u64>() {
            Ok(n) => Some(n),
            Err(_) => {
                self.errors.push(ValidationError::InvalidNumber { var, value: raw });
                None
            }
        }
    }

    fn secs(&mut self, var: &'static str, default: u64) -> Duration {
        match self.optional_u64(var) {
            Some(0) => {
                self.errors.push(ValidationError::Zero(var));
                Duration::from_secs(default)
            }
            Some(n) => Duration::from_secs(n),
            None => Duration::from_secs(default),
        }
    }

    /// Endpoint, contract and shared tuning knobs.
    pub(crate) fn chain(&mut self) -> Option<ChainConfig> {
        let rpc_url = self.url(vars::API_URL);
        let contract_address = self.address(vars::CONTRACT_ADDRESS);
        let rpc_timeout = self.secs(vars::RPC_TIMEOUT_SECS, DEFAULT_RPC_TIMEOUT_SECS);
        let chain_id = self.optional_u64(vars::CHAIN_ID);
        let abi_path = self.get(vars::ABI_PATH).map(PathBuf::from);

        Some(ChainConfig {
            rpc_url: rpc_url?,
            contract_address: contract_address?,
            rpc_timeout,
            chain_id,
            abi_path,
        })
    }

    /// Signing credential for the write path.
    pub(crate) fn signer(&mut self) -> Option<SignerConfig> {
        let private_key = self.required(vars::PRIVATE_KEY);
        let public_key = self.optional_address(vars::PUBLIC_KEY);

        let private_key = private_key?;
        if !is_private_key_hex(&private_key) {
            self.errors
                .push(ValidationError::InvalidPrivateKey(vars::PRIVATE_KEY));
            return None;
        }
        Some(SignerConfig::new(private_key, public_key))
    }

    pub(crate) fn confirmation_blocks(&mut self) -> u64 {
        self.optional_u64(vars::CONFIRMATION_BLOCKS).unwrap_or(0)
    }

    pub(crate) fn confirmation_timeout(&mut self) -> Duration {
        self.secs(
            vars::CONFIRMATION_TIMEOUT_SECS,
            DEFAULT_CONFIRMATION_TIMEOUT_SECS,
        )
    }
}

/// Parse a 20-byte hex address, rejecting wrong lengths and bad checksums.
pub fn parse_address(raw: &str) -> Result<Address, String> {
    let hex = raw.strip_prefix("0x").unwrap_or(raw);
    if hex.len() != 40 {
        return Err(format!("expected 40 hex characters, got {}", hex.len()));
    }
    let address = Address::from_str(raw).map_err(|e| e.to_string())?;

    // Mixed case means the caller supplied an EIP-55 checksum; enforce it.
    let has_lower = hex.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = hex.chars().any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper {
        let prefixed = format!("0x{}", hex);
        Address::parse_checksummed(&prefixed, None).map_err(|e| e.to_string())?;
    }
    Ok(address)
}

fn is_private_key_hex(raw: &str) -> bool {
    let hex = raw.strip_prefix("0x").unwrap_or(raw);
    hex.len() == 64 && hex.chars().all(|c| c.is_ascii_hexdigit())
}
