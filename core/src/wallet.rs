use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use bip39::Mnemonic;
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signer};
use zeroize::Zeroizing;

use crate::error::{WalletError, WalletResult};
use crate::registry::WalletEntry;
use crate::wallet_file;

/// Default request timeout for RPC and price lookups.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Devnet,
    Testnet,
    Mainnet,
}

impl Network {
    pub const ALL: [Network; 3] = [Network::Devnet, Network::Testnet, Network::Mainnet];

    /// Public RPC endpoint for this cluster.
    pub fn rpc_url(&self) -> &'static str {
        match self {
            Network::Devnet => "https://api.devnet.solana.com",
            Network::Testnet => "https://api.testnet.solana.com",
            Network::Mainnet => "https://api.mainnet-beta.solana.com",
        }
    }

    pub fn has_faucet(&self) -> bool {
        !matches!(self, Network::Mainnet)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Network::Devnet => "devnet",
            Network::Testnet => "testnet",
            Network::Mainnet => "mainnet",
        };
        f.write_str(name)
    }
}

impl FromStr for Network {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "devnet" => Ok(Network::Devnet),
            "testnet" => Ok(Network::Testnet),
            "mainnet" => Ok(Network::Mainnet),
            other => Err(WalletError::InvalidNetwork(other.to_string())),
        }
    }
}

/// Where and how to reach the cluster for this invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkConfig {
    pub network: Network,
    pub custom_url: Option<String>,
    pub timeout: Duration,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            network: Network::default(),
            custom_url: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl NetworkConfig {
    pub fn rpc_url(&self) -> &str {
        self.custom_url
            .as_deref()
            .unwrap_or_else(|| self.network.rpc_url())
    }
}

/// A registry entry whose keyfile has been loaded.
pub struct Wallet {
    name: String,
    keypair: Keypair,
}

impl Wallet {
    pub fn open(entry: &WalletEntry) -> WalletResult<Self> {
        let keypair = wallet_file::load(&entry.path)?;
        Ok(Self {
            name: entry.name.clone(),
            keypair,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    pub fn keypair(&self) -> &Keypair {
        &self.keypair
    }

    pub fn private_key_hex(&self) -> Zeroizing<String> {
        private_key_hex(&self.keypair)
    }

    pub fn private_key_base58(&self) -> Zeroizing<String> {
        Zeroizing::new(self.keypair.to_base58_string())
    }
}

pub fn private_key_hex(keypair: &Keypair) -> Zeroizing<String> {
    let bytes = Zeroizing::new(keypair.to_bytes());
    Zeroizing::new(hex::encode(bytes.as_slice()))
}

/// English mnemonic encoding the 32-byte seed of `keypair`.
///
/// This is a plain entropy-to-words encoding. It does not follow a BIP44
/// derivation path, so other wallets restoring from it will not arrive at
/// the same account.
pub fn recovery_phrase(keypair: &Keypair) -> WalletResult<Zeroizing<String>> {
    let bytes = Zeroizing::new(keypair.to_bytes());
    let mnemonic = Mnemonic::from_entropy(&bytes[..32]).map_err(|e| WalletError::InvalidKey {
        path: PathBuf::new(),
        reason: format!("cannot encode recovery phrase: {e}"),
    })?;
    Ok(Zeroizing::new(mnemonic.to_string()))
}
