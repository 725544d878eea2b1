//! Contract-bound RPC client with timeout and error handling.
//!
//! # Responsibilities
//! - Connect to the JSON-RPC endpoint
//! - Bind the validated interface to the contract address
//! - Run the read-only queries (`getAllPlayers`, `owner`)
//! - Query chain state needed for confirmations

use std::time::Duration;

use alloy::contract::ContractInstance;
use alloy::dyn_abi::DynSolValue;
use alloy::primitives::{Address, TxHash};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::rpc::types::TransactionReceipt;

use crate::blockchain::abi::{PlayerStateAbi, GET_ALL_PLAYERS, OWNER};
use crate::blockchain::types::{confirmations_between, ChainId, Player};
use crate::config::ChainConfig;
use crate::error::{Error, Result};
use crate::resilience::with_deadline;

/// RPC client bound to a deployed `PlayerStateContract`.
#[derive(Clone)]
pub struct PlayerStateClient {
    contract: ContractInstance<DynProvider>,
    config: ChainConfig,
}

impl PlayerStateClient {
    /// Build an unauthenticated client for read-only calls.
    ///
    /// No network traffic happens here.
    pub fn connect(config: &ChainConfig, abi: &PlayerStateAbi) -> Self {
        let provider = ProviderBuilder::new()
            .connect_http(config.rpc_url.clone())
            .erased();
        Self::from_provider(provider, config, abi)
    }

    /// Bind an existing provider (e.g. one with a wallet attached).
    pub fn from_provider(provider: DynProvider, config: &ChainConfig, abi: &PlayerStateAbi) -> Self {
        let contract = ContractInstance::new(config.contract_address, provider, abi.interface());
        tracing::debug!(
            rpc_url = %config.rpc_url,
            contract = %config.contract_address,
            "Contract client bound"
        );
        Self {
            contract,
            config: config.clone(),
        }
    }

    fn timeout(&self) -> Duration {
        self.config.rpc_timeout
    }

    /// Get the chain ID from the RPC.
    pub async fn get_chain_id(&self) -> Result<ChainId> {
        let provider = self.provider();
        let id = with_deadline(self.timeout(), "eth_chainId", async {
            provider.get_chain_id().await
        })
        .await?;
        Ok(ChainId(id))
    }

    /// Verify the connected chain ID matches the configured one, if any.
    pub async fn verify_chain_id(&self) -> Result<()> {
        let Some(expected) = self.config.chain_id else {
            return Ok(());
        };
        let actual = self.get_chain_id().await?;
        if actual.0 != expected {
            return Err(Error::Config(format!(
                "Chain ID mismatch: expected {}, got {}",
                expected, actual.0
            )));
        }
        tracing::debug!(chain_id = expected, "Chain ID verified");
        Ok(())
    }

    /// Get the latest block number.
    pub async fn get_block_number(&self) -> Result<u64> {
        let provider = self.provider();
        with_deadline(self.timeout(), "eth_blockNumber", async {
            provider.get_block_number().await
        })
        .await
    }

    /// Get a transaction receipt by hash.
    pub async fn get_transaction_receipt(&self, tx_hash: TxHash) -> Result<Option<TransactionReceipt>> {
        let provider = self.provider();
        with_deadline(self.timeout(), "eth_getTransactionReceipt", async {
            provider.get_transaction_receipt(tx_hash).await
        })
        .await
    }

    /// Confirmations observed right now; 0 while the transaction is pending.
    pub async fn confirmations(&self, tx_hash: TxHash) -> Result<u64> {
        let Some(receipt) = self.get_transaction_receipt(tx_hash).await? else {
            return Ok(0);
        };
        let Some(tx_block) = receipt.block_number else {
            return Ok(0);
        };
        let latest = self.get_block_number().await?;
        Ok(confirmations_between(tx_block, latest))
    }

    async fn call(&self, function: &'static str, args: &[DynSolValue]) -> Result<Vec<DynSolValue>> {
        let call = self.contract.function(function, args)?;
        with_deadline(self.timeout(), function, async { call.call().await }).await
    }

    /// All player records. Empty when none are registered.
    pub async fn get_all_players(&self) -> Result<Vec<Player>> {
        let outputs = self.call(GET_ALL_PLAYERS, &[]).await?;
        let players = Player::list_from_outputs(&outputs)?;
        tracing::info!(count = players.len(), "Fetched players");
        Ok(players)
    }

    /// Current contract owner.
    pub async fn owner(&self) -> Result<Address> {
        let outputs = self.call(OWNER, &[]).await?;
        let owner = match outputs.as_slice() {
            [value] => value.as_address(),
            _ => None,
        }
        .ok_or_else(|| {
            Error::InterfaceMismatch(format!("owner() returned unexpected data: {:?}", outputs))
        })?;
        tracing::info!(owner = %owner, "Fetched owner");
        Ok(owner)
    }

    /// The contract instance, for building state-mutating calls.
    pub fn contract(&self) -> &ContractInstance<DynProvider> {
        &self.contract
    }

    /// Get the underlying provider.
    pub fn provider(&self) -> &DynProvider {
        self.contract.provider()
    }

    /// Get the configuration.
    pub fn config(&self) -> &ChainConfig {
        &self.config
    }
}

impl std::fmt::Debug for PlayerStateClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerStateClient")
            .field("rpc_url", &self.config.rpc_url.as_str())
            .field("contract", &self.config.contract_address)
            .field("timeout_secs", &self.config.rpc_timeout.as_secs())
            .finish()
    }
}
