//! Configuration loading from the process environment.

use crate::config::schema::{ReaderConfig, WriterConfig};
use crate::config::validation::Validator;
use crate::error::{Error, Result};

/// Environment variable names.
pub mod vars {
    pub const API_URL: &str = "API_URL";
    pub const PUBLIC_KEY: &str = "PUBLIC_KEY";
    pub const PRIVATE_KEY: &str = "PRIVATE_KEY";
    pub const CONTRACT_ADDRESS: &str = "CONTRACT_ADDRESS";
    pub const RPC_TIMEOUT_SECS: &str = "RPC_TIMEOUT_SECS";
    pub const CHAIN_ID: &str = "CHAIN_ID";
    pub const ABI_PATH: &str = "ABI_PATH";
    pub const CONFIRMATION_BLOCKS: &str = "CONFIRMATION_BLOCKS";
    pub const CONFIRMATION_TIMEOUT_SECS: &str = "CONFIRMATION_TIMEOUT_SECS";
}

/// Load `.env` from the working directory if present.
///
/// Variables already set in the environment take precedence, so calling
/// this more than once is harmless.
pub fn load_dotenv() -> Result<()> {
    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "Loaded .env file");
            Ok(())
        }
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(Error::Config(format!("Failed to read .env file: {}", e))),
    }
}

fn env_lookup(var: &str) -> Option<String> {
    std::env::var(var).ok()
}

/// Load and validate read-path configuration from the environment.
pub fn load_reader_config() -> Result<ReaderConfig> {
    load_dotenv()?;
    reader_config_from(env_lookup)
}

/// Load and validate write-path configuration from the environment.
pub fn load_writer_config() -> Result<WriterConfig> {
    load_dotenv()?;
    writer_config_from(env_lookup)
}

/// Build a [`ReaderConfig`] from an arbitrary variable lookup.
pub fn reader_config_from<F>(lookup: F) -> Result<ReaderConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut validator = Validator::new(&lookup);
    let chain = validator.chain();
    validator.finish().map_err(Error::ConfigInvalid)?;

    let chain = chain.ok_or_else(|| Error::Config("incomplete chain settings".into()))?;
    tracing::info!(
        rpc_url = %chain.rpc_url,
        contract = %chain.contract_address,
        timeout_secs = chain.rpc_timeout.as_secs(),
        "Configuration loaded"
    );
    Ok(ReaderConfig { chain })
}

/// Build a [`WriterConfig`] from an arbitrary variable lookup.
pub fn writer_config_from<F>(lookup: F) -> Result<WriterConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut validator = Validator::new(&lookup);
    let chain = validator.chain();
    let signer = validator.signer();
    let confirmation_blocks = validator.confirmation_blocks();
    let confirmation_timeout = validator.confirmation_timeout();
    validator.finish().map_err(Error::ConfigInvalid)?;

    let (chain, signer) = chain
        .zip(signer)
        .ok_or_else(|| Error::Config("incomplete signer settings".into()))?;
    tracing::info!(
        rpc_url = %chain.rpc_url,
        contract = %chain.contract_address,
        timeout_secs = chain.rpc_timeout.as_secs(),
        confirmation_blocks,
        "Configuration loaded"
    );
    Ok(WriterConfig {
        chain,
        signer,
        confirmation_blocks,
        confirmation_timeout,
    })
}
