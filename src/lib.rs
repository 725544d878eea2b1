//! Client scripts for the `PlayerStateContract`.
//!
//! Two flows share this library:
//! - [`scripts::update_player`] signs and submits `updatePlayerInfo`
//! - [`scripts::read_players`] reads `getAllPlayers` and `owner`
//!
//! ```text
//! env / .env → config → blockchain::abi → blockchain::{client, wallet, transaction} → stdout
//! ```

pub mod blockchain;
pub mod config;
pub mod error;
pub mod observability;
pub mod resilience;
pub mod scripts;

pub use config::{ReaderConfig, WriterConfig};
pub use error::{Error, ErrorKind, Result};
