//! Transaction submission and confirmation monitoring.
//!
//! # Responsibilities
//! - Encode and sign `updatePlayerInfo`
//! - Broadcast through the wallet-enabled provider
//! - Report confirmations at submission, or wait for a configured depth

use std::time::Duration;

use alloy::primitives::{Address, TxHash};
use alloy::providers::{Provider, ProviderBuilder};
use tokio::time::{interval, timeout};

use crate::blockchain::abi::{PlayerStateAbi, UPDATE_PLAYER_INFO};
use crate::blockchain::client::PlayerStateClient;
use crate::blockchain::types::{confirmations_between, ConfirmationStatus, PlayerUpdate, SubmittedTx};
use crate::blockchain::wallet::Wallet;
use crate::config::WriterConfig;
use crate::error::{Error, Result};
use crate::resilience::with_deadline;

const CONFIRMATION_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Submits signed calls to the player contract.
pub struct TxSubmitter {
    client: PlayerStateClient,
    wallet: Wallet,
    required_confirmations: u64,
    confirmation_timeout: Duration,
}

impl TxSubmitter {
    /// Build a signing client. No network traffic happens here.
    pub fn connect(config: &WriterConfig, abi: &PlayerStateAbi) -> Result<Self> {
        let wallet = Wallet::from_config(&config.signer)?;
        let provider = ProviderBuilder::new()
            .wallet(wallet.ethereum_wallet())
            .connect_http(config.chain.rpc_url.clone())
            .erased();
        let client = PlayerStateClient::from_provider(provider, &config.chain, abi);

        Ok(Self {
            client,
            wallet,
            required_confirmations: config.confirmation_blocks,
            confirmation_timeout: config.confirmation_timeout,
        })
    }

    /// Send `updatePlayerInfo(uri, address, score)`.
    ///
    /// Returns once the node accepts the transaction (or, with a non-zero
    /// confirmation depth, once that depth is reached). Once broadcast, a
    /// failed wait is returned as [`Error::Unconfirmed`] carrying the hash.
    pub async fn update_player_info(&self, update: &PlayerUpdate) -> Result<SubmittedTx> {
        let args = update.to_call_args();
        let call = self.client.contract().function(UPDATE_PLAYER_INFO, &args)?;
        let timeout_duration = self.client.config().rpc_timeout;

        let pending = with_deadline(timeout_duration, UPDATE_PLAYER_INFO, async {
            call.send().await
        })
        .await?;
        let tx_hash = *pending.tx_hash();

        tracing::info!(
            tx_hash = %tx_hash,
            from = %self.address(),
            score = %update.score,
            "Transaction submitted"
        );

        // The write is on the network from here on; failures must keep the hash.
        let confirmations = if self.required_confirmations == 0 {
            match self.client.confirmations(tx_hash).await {
                Ok(confirmations) => confirmations,
                Err(e) => {
                    tracing::warn!(
                        tx_hash = %tx_hash,
                        error = %e,
                        "Confirmation lookup failed, reporting 0"
                    );
                    0
                }
            }
        } else {
            let unconfirmed = |source: Error| Error::Unconfirmed {
                tx_hash,
                source: Box::new(source),
            };
            match self.wait_for_confirmation(tx_hash).await.map_err(unconfirmed)? {
                ConfirmationStatus::Confirmed {
                    block_number,
                    confirmations,
                } => {
                    tracing::info!(tx_hash = %tx_hash, block_number, "Transaction confirmed");
                    confirmations
                }
                ConfirmationStatus::Failed(reason) => {
                    return Err(unconfirmed(Error::Rejected(reason)))
                }
            }
        };

        tracing::info!(tx_hash = %tx_hash, confirmations, "Transaction reported");
        Ok(SubmittedTx {
            tx_hash,
            confirmations,
        })
    }

    /// Poll until the transaction reaches the configured depth.
    ///
    /// A reverted receipt yields [`ConfirmationStatus::Failed`]; running out of
    /// time is [`Error::Timeout`].
    pub async fn wait_for_confirmation(&self, tx_hash: TxHash) -> Result<ConfirmationStatus> {
        let required = self.required_confirmations;

        let result: std::result::Result<Result<ConfirmationStatus>, _> =
            timeout(self.confirmation_timeout, async {
                let mut ticker = interval(CONFIRMATION_POLL_INTERVAL);

                loop {
                    ticker.tick().await;

                    let receipt = match self.client.get_transaction_receipt(tx_hash).await? {
                        Some(r) => r,
                        None => {
                            tracing::debug!(tx_hash = %tx_hash, "Transaction pending");
                            continue;
                        }
                    };

                    if !receipt.status() {
                        return Ok(ConfirmationStatus::Failed(format!(
                            "Transaction {} reverted",
                            tx_hash
                        )));
                    }

                    let current_block = self.client.get_block_number().await?;
                    let tx_block = receipt.block_number.unwrap_or(current_block);
                    let confirmations = confirmations_between(tx_block, current_block);

                    if confirmations >= required {
                        return Ok(ConfirmationStatus::Confirmed {
                            block_number: tx_block,
                            confirmations,
                        });
                    }

                    tracing::debug!(
                        tx_hash = %tx_hash,
                        confirmations,
                        required,
                        "Waiting for confirmations"
                    );
                }
            })
            .await;

        match result {
            Ok(status) => status,
            Err(_) => Err(Error::Timeout(self.confirmation_timeout)),
        }
    }

    /// The signing address.
    pub fn address(&self) -> Address {
        self.wallet.address()
    }

    pub fn client(&self) -> &PlayerStateClient {
        &self.client
    }
}
