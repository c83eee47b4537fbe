//! Thin wrapper around the SDK's RPC client for network operations.
mod history;

use log::{debug, info};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::hash::Hash;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signer};
use solana_sdk::system_instruction;
use solana_sdk::transaction::Transaction;

use crate::error::{WalletError, WalletResult};
use crate::wallet::{Network, NetworkConfig};

pub use history::{balance_change, DEFAULT_ACTIVITY_LIMIT, MAX_ACTIVITY_LIMIT};

pub struct NetworkClient {
    client: RpcClient,
    network: Network,
}

impl NetworkClient {
    pub fn new(config: &NetworkConfig) -> Self {
        let client = RpcClient::new_with_timeout_and_commitment(
            config.rpc_url().to_string(),
            config.timeout,
            CommitmentConfig::confirmed(),
        );
        Self {
            client,
            network: config.network,
        }
    }

    /// Query the SOL balance for an address (in lamports).
    pub async fn balance(&self, address: &Pubkey) -> WalletResult<u64> {
        debug!("Querying balance of {address}");
        self.client
            .get_balance(address)
            .await
            .map_err(|e| WalletError::gateway("Failed to query balance", e))
    }

    /// Send SOL from `sender` to `recipient` and wait for confirmation.
    /// Amount is in lamports (1 SOL = 1_000_000_000 lamports).
    pub async fn send_sol(
        &self,
        sender: &Keypair,
        recipient: &Pubkey,
        lamports: u64,
    ) -> WalletResult<TransferResult> {
        let blockhash = self
            .client
            .get_latest_blockhash()
            .await
            .map_err(|e| WalletError::gateway("Failed to fetch recent blockhash", e))?;

        let tx = transfer_transaction(sender, recipient, lamports, blockhash);
        let signature = self
            .client
            .send_and_confirm_transaction(&tx)
            .await
            .map_err(|e| WalletError::gateway("Failed to send transaction", e))?;

        info!("Sent {lamports} lamports from {} to {recipient}", sender.pubkey());
        Ok(TransferResult {
            signature: signature.to_string(),
            lamports,
        })
    }

    /// Request test funds from the cluster faucet (devnet/testnet only) and
    /// wait until the airdrop transaction is confirmed.
    pub async fn airdrop(&self, address: &Pubkey, lamports: u64) -> WalletResult<String> {
        if !self.network.has_faucet() {
            return Err(WalletError::gateway(
                "Airdrop failed",
                format!("no faucet on {}", self.network),
            ));
        }

        let signature = self
            .client
            .request_airdrop(address, lamports)
            .await
            .map_err(|e| WalletError::gateway("Airdrop request failed", e))?;
        self.client
            .poll_for_signature(&signature)
            .await
            .map_err(|e| WalletError::gateway("Airdrop was not confirmed", e))?;

        info!("Airdropped {lamports} lamports to {address}");
        Ok(signature.to_string())
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn url(&self) -> String {
        self.client.url()
    }
}

/// A signed single-instruction transfer from `sender` to `recipient`.
pub fn transfer_transaction(
    sender: &Keypair,
    recipient: &Pubkey,
    lamports: u64,
    recent_blockhash: Hash,
) -> Transaction {
    let instruction = system_instruction::transfer(&sender.pubkey(), recipient, lamports);
    Transaction::new_signed_with_payer(
        &[instruction],
        Some(&sender.pubkey()),
        &[sender],
        recent_blockhash,
    )
}

pub struct TransferResult {
    pub signature: String,
    pub lamports: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionSummary {
    pub signature: String,
    pub slot: u64,
    /// Unix timestamp of the block, if the node reports one.
    pub block_time: Option<i64>,
    pub failed: bool,
    /// Fee in lamports, if the details lookup succeeded.
    pub fee: Option<u64>,
    /// Lamport change for the queried address, if it appears in the transaction.
    pub balance_change: Option<i64>,
}
