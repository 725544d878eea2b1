//! Read path: list all players and read the contract owner.

use crate::blockchain::{PlayerReport, PlayerStateAbi, PlayerStateClient};
use crate::config::ReaderConfig;
use crate::error::Result;

/// Query `getAllPlayers()` then `owner()`, in that order.
pub async fn run(config: &ReaderConfig) -> Result<PlayerReport> {
    let abi = PlayerStateAbi::load(config.chain.abi_path.as_deref())?;
    let client = PlayerStateClient::connect(&config.chain, &abi);
    client.verify_chain_id().await?;

    let players = client.get_all_players().await?;
    let owner = client.owner().await?;

    Ok(PlayerReport { players, owner })
}
