//! Write path: submit one `updatePlayerInfo` transaction.

use crate::blockchain::{PlayerStateAbi, PlayerUpdate, SubmittedTx, TxSubmitter};
use crate::config::WriterConfig;
use crate::error::Result;

/// Player metadata CID submitted by the `update-player` binary.
pub const DEFAULT_PLAYER_URI: &str = "QmbFYtJqYuDwAYucwxyvYPLfgegpjGpNMWPt5p3cxTY9sy";

/// Player address submitted by the `update-player` binary.
pub const DEFAULT_PLAYER_ADDRESS: &str = "0x8c8e240C723F5F850c6fdfD04a1B08598DaF6B53";

/// Score submitted by the `update-player` binary.
pub const DEFAULT_PLAYER_SCORE: u64 = 200;

/// The fixed update the binary sends.
pub fn default_update() -> Result<PlayerUpdate> {
    PlayerUpdate::new(DEFAULT_PLAYER_URI, DEFAULT_PLAYER_ADDRESS, DEFAULT_PLAYER_SCORE)
}

/// Sign and submit `update`, reporting the hash and confirmations.
pub async fn run(config: &WriterConfig, update: &PlayerUpdate) -> Result<SubmittedTx> {
    let abi = PlayerStateAbi::load(config.chain.abi_path.as_deref())?;
    let submitter = TxSubmitter::connect(config, &abi)?;
    submitter.client().verify_chain_id().await?;

    submitter.update_player_info(update).await
}
