//! List all players and the owner of the configured `PlayerStateContract`.
//!
//! Reads `API_URL` and `CONTRACT_ADDRESS` (and optionally
//! `RPC_TIMEOUT_SECS`, `CHAIN_ID`, `ABI_PATH`) from the environment or a
//! `.env` file. No signing key is needed.

use std::process::ExitCode;

use player_state::config::{load_dotenv, load_reader_config};
use player_state::observability::logging;
use player_state::scripts::read_players;
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
            tracing::error!(kind = %e.kind(), error = %e, "read-players failed");
            eprintln!("Error ({}): {}", e.kind(), e);
            ExitCode::from(e.kind().exit_code())
        }
    }
}

async fn run() -> Result<(), Error> {
    let config = load_reader_config()?;

    let report = read_players::run(&config).await?;
    print!("{}", report);
    Ok(())
}
