//! Submit `updatePlayerInfo` to the configured `PlayerStateContract`.
//!
//! Reads `API_URL`, `PRIVATE_KEY`, `CONTRACT_ADDRESS` (and optionally
//! `PUBLIC_KEY`, `RPC_TIMEOUT_SECS`, `CHAIN_ID`, `ABI_PATH`,
//! `CONFIRMATION_BLOCKS`, `CONFIRMATION_TIMEOUT_SECS`) from the environment
//! or a `.env` file.

use std::process::ExitCode;

use player_state::config::{load_dotenv, load_writer_config};
use player_state::observability::logging;
use player_state::scripts::update_player;
use player_state::Error;

#[tokio::main]
async fn main() -> ExitCode {
    // `.env` may carry RUST_LOG, so it is read before the subscriber starts.
    let dotenv = load_dotenv();
    logging::init();

    let result = match dotenv {
        Ok(()) => run().await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(kind = %e.kind(), error = %e, "update-player failed");
            if let Some(tx_hash) = e.tx_hash() {
                println!("Tx Hash : {}", tx_hash);
            }
            eprintln!("Error ({}): {}", e.kind(), e);
            ExitCode::from(e.kind().exit_code())
        }
    }
}

async fn run() -> Result<(), Error> {
    let config = load_writer_config()?;
    let update = update_player::default_update()?;

    let submitted = update_player::run(&config, &update).await?;
    print!("{}", submitted);
    Ok(())
}
