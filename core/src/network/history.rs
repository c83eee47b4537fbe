use std::str::FromStr;

use futures::future::join_all;
use log::warn;
use solana_client::rpc_client::GetConfirmedSignaturesForAddress2Config;
use solana_client::rpc_config::RpcTransactionConfig;
use solana_client::rpc_response::RpcConfirmedTransactionStatusWithSignature;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_transaction_status::{EncodedTransaction, UiMessage, UiTransactionEncoding};

use super::{NetworkClient, TransactionSummary};
use crate::error::{WalletError, WalletResult};

pub const DEFAULT_ACTIVITY_LIMIT: usize = 10;
/// Largest page the RPC node accepts for signature queries.
pub const MAX_ACTIVITY_LIMIT: u64 = 1000;

struct TransactionDetails {
    fee: u64,
    balance_change: Option<i64>,
}

impl NetworkClient {
    /// Most recent transactions touching `address`, newest first.
    ///
    /// Details for every signature are fetched concurrently. A failed lookup
    /// only blanks that row's fee and balance change.
    pub async fn recent_activity(
        &self,
        address: &Pubkey,
        limit: usize,
    ) -> WalletResult<Vec<TransactionSummary>> {
        let config = GetConfirmedSignaturesForAddress2Config {
            limit: Some(limit),
            ..Default::default()
        };
        let statuses = self
            .client
            .get_signatures_for_address_with_config(address, config)
            .await
            .map_err(|e| WalletError::gateway("Failed to query recent transactions", e))?;

        let lookups = statuses
            .iter()
            .map(|status| self.transaction_details(&status.signature, address));
        let details = join_all(lookups).await;

        Ok(summarize(statuses, details))
    }

    async fn transaction_details(
        &self,
        signature: &str,
        owner: &Pubkey,
    ) -> WalletResult<TransactionDetails> {
        let parsed = Signature::from_str(signature)
            .map_err(|e| WalletError::gateway("Node returned an invalid signature", e))?;
        let config = RpcTransactionConfig {
            encoding: Some(UiTransactionEncoding::Json),
            commitment: Some(CommitmentConfig::confirmed()),
            max_supported_transaction_version: Some(0),
        };

        let confirmed = self
            .client
            .get_transaction_with_config(&parsed, config)
            .await
            .map_err(|e| WalletError::gateway("Failed to query transaction", e))?;
        let meta = confirmed.transaction.meta.ok_or_else(|| {
            WalletError::gateway("Failed to query transaction", "no status metadata")
        })?;

        let keys = account_keys(&confirmed.transaction.transaction);
        Ok(TransactionDetails {
            fee: meta.fee,
            balance_change: balance_change(
                &keys,
                &meta.pre_balances,
                &meta.post_balances,
                &owner.to_string(),
            ),
        })
    }
}

/// Pair each signature with its details lookup, keeping the node's order.
fn summarize(
    statuses: Vec<RpcConfirmedTransactionStatusWithSignature>,
    details: Vec<WalletResult<TransactionDetails>>,
) -> Vec<TransactionSummary> {
    statuses
        .into_iter()
        .zip(details)
        .map(|(status, details)| {
            let details = details
                .map_err(|e| warn!("No details for {}: {e}", status.signature))
                .ok();
            TransactionSummary {
                slot: status.slot,
                block_time: status.block_time,
                failed: status.err.is_some(),
                fee: details.as_ref().map(|d| d.fee),
                balance_change: details.and_then(|d| d.balance_change),
                signature: status.signature,
            }
        })
        .collect()
}

fn account_keys(tx: &EncodedTransaction) -> Vec<String> {
    match tx {
        EncodedTransaction::Json(ui) => match &ui.message {
            UiMessage::Raw(raw) => raw.account_keys.clone(),
            UiMessage::Parsed(parsed) => parsed
                .account_keys
                .iter()
                .map(|account| account.pubkey.clone())
                .collect(),
        },
        _ => Vec::new(),
    }
}

/// Lamports gained (positive) or spent (negative) by `owner` in a transaction.
pub fn balance_change(keys: &[String], pre: &[u64], post: &[u64], owner: &str) -> Option<i64> {
    let index = keys.iter().position(|key| key == owner)?;
    let before = i64::try_from(*pre.get(index)?).ok()?;
    let after = i64::try_from(*post.get(index)?).ok()?;
    Some(after - before)
}
