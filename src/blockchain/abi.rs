//! Contract interface loading and shape validation.
//!
//! The interface ships as compiler metadata (`output.abi`) bundled into the
//! binary. `ABI_PATH` may point at a replacement file. Either way it is
//! checked against the functions the scripts call before any RPC happens.

use std::fs;
use std::path::Path;

use alloy::contract::Interface;
use alloy::json_abi::{Function, JsonAbi, StateMutability};
use serde::Deserialize;

use crate::error::{Error, Result};

/// Bundled compiler metadata for `PlayerStateContract`.
pub const BUNDLED_METADATA: &str = include_str!("../../abi/PlayerStateContract_metadata.json");

/// Metadata format version this crate understands.
pub const SUPPORTED_METADATA_VERSION: u64 = 1;

pub const UPDATE_PLAYER_INFO: &str = "updatePlayerInfo";
pub const GET_ALL_PLAYERS: &str = "getAllPlayers";
pub const OWNER: &str = "owner";

#[derive(Deserialize)]
struct Metadata {
    #[serde(default)]
    version: Option<u64>,
    output: MetadataOutput,
}

#[derive(Deserialize)]
struct MetadataOutput {
    abi: JsonAbi,
}

/// One function the scripts depend on.
struct Expected {
    name: &'static str,
    inputs: &'static str,
    outputs: &'static [&'static str],
    read_only: bool,
}

const EXPECTED: &[Expected] = &[
    Expected {
        name: UPDATE_PLAYER_INFO,
        inputs: "string,address,uint256",
        outputs: &[],
        read_only: false,
    },
    Expected {
        name: GET_ALL_PLAYERS,
        inputs: "",
        outputs: &["(string,address,uint256)[]"],
        read_only: true,
    },
    Expected {
        name: OWNER,
        inputs: "",
        outputs: &["address"],
        read_only: true,
    },
];

/// Validated `PlayerStateContract` interface.
#[derive(Debug, Clone)]
pub struct PlayerStateAbi {
    abi: JsonAbi,
}

impl PlayerStateAbi {
    /// The interface compiled into the binary.
    pub fn bundled() -> Result<Self> {
        Self::from_metadata_str(BUNDLED_METADATA)
    }

    /// Load from `path` if given, else the bundled copy.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_path(path),
            None => Self::bundled(),
        }
    }

    /// Read and validate a metadata file from disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Cannot read ABI file '{}': {}", path.display(), e))
        })?;
        tracing::debug!(path = %path.display(), "Loaded ABI metadata from file");
        Self::from_metadata_str(&content)
    }

    /// Parse and validate a metadata document.
    pub fn from_metadata_str(content: &str) -> Result<Self> {
        let metadata: Metadata = serde_json::from_str(content)
            .map_err(|e| Error::InterfaceMismatch(format!("Malformed ABI metadata: {}", e)))?;

        if let Some(version) = metadata.version {
            if version != SUPPORTED_METADATA_VERSION {
                return Err(Error::InterfaceMismatch(format!(
                    "Unsupported metadata version {} (expected {})",
                    version, SUPPORTED_METADATA_VERSION
                )));
            }
        }

        Self::from_abi(metadata.output.abi)
    }

    /// Validate an already-parsed ABI.
    pub fn from_abi(abi: JsonAbi) -> Result<Self> {
        let problems: Vec<String> = EXPECTED
            .iter()
            .filter_map(|expected| check(&abi, expected).err())
            .collect();
        if !problems.is_empty() {
            return Err(Error::InterfaceMismatch(problems.join("; ")));
        }
        Ok(Self { abi })
    }

    /// Dynamic interface for binding a contract instance.
    pub fn interface(&self) -> Interface {
        Interface::new(self.abi.clone())
    }
}

fn check(abi: &JsonAbi, expected: &Expected) -> std::result::Result<(), String> {
    let wanted = format!("{}({})", expected.name, expected.inputs);
    let function = abi
        .function(expected.name)
        .and_then(|overloads| overloads.iter().find(|f| f.signature() == wanted))
        .ok_or_else(|| format!("missing function {}", wanted))?;

    let outputs: Vec<String> = function
        .outputs
        .iter()
        .map(|p| p.selector_type().into_owned())
        .collect();
    if outputs != expected.outputs {
        return Err(format!(
            "{} returns ({}), expected ({})",
            wanted,
            outputs.join(","),
            expected.outputs.join(",")
        ));
    }

    if is_read_only(function) != expected.read_only {
        return Err(format!(
            "{} has state mutability {:?}",
            wanted, function.state_mutability
        ));
    }
    Ok(())
}

fn is_read_only(function: &Function) -> bool {
    matches!(
        function.state_mutability,
        StateMutability::View | StateMutability::Pure
    )
}
