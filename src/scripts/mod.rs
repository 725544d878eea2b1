//! The two script flows as library functions.
//!
//! Each takes an explicit configuration value so it can be driven from a
//! binary or from tests against any node.

pub mod read_players;
pub mod update_player;
