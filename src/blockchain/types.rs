//! Contract-facing value types.

use std::fmt;

use alloy::dyn_abi::DynSolValue;
use alloy::primitives::{Address, TxHash, U256};

use crate::config::validation::parse_address;
use crate::error::{Error, Result};

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId(pub u64);

/// One player record as stored by the contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    /// Content identifier (IPFS CID) of the player's metadata.
    pub uri: String,
    pub address: Address,
    pub score: U256,
}

impl Player {
    /// Decode a `(string,address,uint256)` tuple returned by the contract.
    pub fn from_sol_value(value: &DynSolValue) -> Result<Self> {
        let fields = value
            .as_tuple()
            .ok_or_else(|| mismatch("player record is not a tuple", value))?;

        match fields {
            [uri, address, score] => Ok(Self {
                uri: uri
                    .as_str()
                    .ok_or_else(|| mismatch("player URI is not a string", uri))?
                    .to_string(),
                address: address
                    .as_address()
                    .ok_or_else(|| mismatch("player address is not an address", address))?,
                score: score
                    .as_uint()
                    .map(|(v, _)| v)
                    .ok_or_else(|| mismatch("player score is not a uint", score))?,
            }),
            _ => Err(Error::InterfaceMismatch(format!(
                "player record has {} fields, expected 3",
                fields.len()
            ))),
        }
    }

    /// Decode the full output of `getAllPlayers()`.
    pub fn list_from_outputs(outputs: &[DynSolValue]) -> Result<Vec<Self>> {
        let list = match outputs {
            [list] => list,
            _ => {
                return Err(Error::InterfaceMismatch(format!(
                    "getAllPlayers returned {} values, expected 1",
                    outputs.len()
                )))
            }
        };
        let items = list
            .as_array()
            .or_else(|| list.as_fixed_array())
            .ok_or_else(|| mismatch("player list is not an array", list))?;
        items.iter().map(Self::from_sol_value).collect()
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.uri, self.address, self.score)
    }
}

fn mismatch(what: &str, value: &DynSolValue) -> Error {
    Error::InterfaceMismatch(format!("{}: {:?}", what, value))
}

/// Arguments for `updatePlayerInfo`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerUpdate {
    pub uri: String,
    pub address: Address,
    pub score: U256,
}

impl PlayerUpdate {
    /// Build an update, validating the player address locally.
    pub fn new(uri: impl Into<String>, address: &str, score: u64) -> Result<Self> {
        let address = parse_address(address)
            .map_err(|reason| Error::Config(format!("invalid player address: {}", reason)))?;
        Ok(Self {
            uri: uri.into(),
            address,
            score: U256::from(score),
        })
    }

    /// ABI arguments in declaration order.
    pub fn to_call_args(&self) -> Vec<DynSolValue> {
        vec![
            DynSolValue::String(self.uri.clone()),
            DynSolValue::Address(self.address),
            DynSolValue::Uint(self.score, 256),
        ]
    }
}

/// Outcome of submitting a state-mutating call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmittedTx {
    pub tx_hash: TxHash,
    /// Blocks observed on top of (and including) the inclusion block.
    pub confirmations: u64,
}

impl fmt::Display for SubmittedTx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Transaction Successfully Done")?;
        writeln!(f, "Tx Hash : {}", self.tx_hash)?;
        writeln!(f, "Confirmation : {}", self.confirmations)
    }
}

/// Results of the read-only queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerReport {
    pub players: Vec<Player>,
    pub owner: Address,
}

impl fmt::Display for PlayerReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "All Player Details")?;
        if self.players.is_empty() {
            writeln!(f, "(none)")?;
        }
        for player in &self.players {
            writeln!(f, "{}", player)?;
        }
        writeln!(f, "Owner : {}", self.owner)
    }
}

/// Transaction confirmation status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationStatus {
    /// Transaction is confirmed with required block depth.
    Confirmed { block_number: u64, confirmations: u64 },
    /// Transaction reverted.
    Failed(String),
}

/// Confirmations for a transaction mined in `tx_block` when the chain head is `latest`.
///
/// The inclusion block counts as the first confirmation.
pub fn confirmations_between(tx_block: u64, latest: u64) -> u64 {
    latest.saturating_sub(tx_block) + 1
}
