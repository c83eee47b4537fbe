//! Command definitions and handlers for one-shot wallet invocations.
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use log::warn;
use solana_sdk::native_token::LAMPORTS_PER_SOL;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signer};

use crate::config::WalletHome;
use crate::display;
use crate::error::{WalletError, WalletResult};
use crate::network::NetworkClient;
use crate::price::{PriceClient, COINGECKO_URL};
use crate::registry::{normalize_name, validate_name, Registry, WalletEntry};
use crate::wallet::{recovery_phrase, private_key_hex, NetworkConfig, Wallet};
use crate::wallet_file;

/// Default airdrop size, in lamports.
pub const DEFAULT_AIRDROP: u64 = LAMPORTS_PER_SOL;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Create a keypair and register it: generate [name]
    Generate { name: Option<String> },
    /// Copy an existing keyfile into the wallet directory: import <path> [name]
    Import { path: PathBuf, name: Option<String> },
    /// List registered wallets
    List,
    /// Make a wallet the active one
    Select { name: String },
    /// Rename a wallet and its keyfile
    Rename { current: String, new: String },
    /// Delete a wallet and its keyfile
    Remove { name: String },
    /// Transfer SOL from a named wallet: send <wallet> <recipient> <amount>
    Send {
        wallet: String,
        recipient: Pubkey,
        amount: u64,
    },
    /// Show the balance of an address (defaults to the selected wallet)
    Balance { address: Option<Pubkey> },
    /// Request faucet funds (devnet/testnet only)
    Airdrop { address: Option<Pubkey>, amount: u64 },
    /// Persist the active network
    SetConfig { network: String },
    /// Print the selected wallet's private key
    ShowPrivateKey,
    /// Show the active configuration and selected wallet
    Show,
    /// Recent transactions of the selected wallet
    RecentActivity { limit: usize },
    /// Current SOL/USD quote
    SolPrice,
}

/// Chooses a replacement when an imported wallet's name is taken, or when a
/// previously suggested replacement is not a valid name.
pub trait ConflictResolver {
    /// A new name to try, or `None` to abandon the import.
    fn replacement_name(&self, taken: &str) -> Option<String>;
}

impl<F> ConflictResolver for F
where
    F: Fn(&str) -> Option<String>,
{
    fn replacement_name(&self, taken: &str) -> Option<String> {
        self(taken)
    }
}

/// Everything a command needs for one invocation.
pub struct Session {
    pub home: WalletHome,
    pub registry: Registry,
    pub network: NetworkClient,
    pub price: PriceClient,
}

impl Session {
    /// Build gateways for the registry's network. `custom_url` replaces the
    /// cluster's public RPC endpoint.
    pub fn new(
        home: WalletHome,
        registry: Registry,
        custom_url: Option<String>,
        timeout: Duration,
    ) -> WalletResult<Self> {
        let network = NetworkClient::new(&NetworkConfig {
            network: registry.network(),
            custom_url,
            timeout,
        });
        let price = PriceClient::new(COINGECKO_URL, timeout)?;
        Ok(Self {
            home,
            registry,
            network,
            price,
        })
    }

    pub fn save(&self) -> WalletResult<()> {
        self.registry.save(&self.home)
    }
}

pub struct GeneratedWallet {
    pub entry: WalletEntry,
    pub keypair: Keypair,
}

/// Create a keypair under `home` and register it, selecting it if nothing is selected.
pub fn generate_wallet(
    registry: &mut Registry,
    home: &WalletHome,
    name: Option<&str>,
) -> WalletResult<GeneratedWallet> {
    let wallet_dir = home.ensure_wallet_dir()?;
    let name = match name {
        Some(name) => {
            let name = normalize_name(name);
            validate_name(&name)?;
            if registry.find_wallet(&name).is_some() || wallet_dir.join(&name).exists() {
                return Err(WalletError::DuplicateName(name));
            }
            name
        }
        None => registry.next_default_name(&wallet_dir),
    };

    let keypair = Keypair::new();
    let path = wallet_dir.join(&name);
    wallet_file::save(&keypair, &path)?;
    let entry = registry.add_wallet(&name, path)?.clone();
    if registry.selected().is_none() {
        registry.select_wallet(&entry.name)?;
    }
    Ok(GeneratedWallet { entry, keypair })
}

#[derive(Debug, Clone, PartialEq)]
pub enum ImportOutcome {
    Imported { entry: WalletEntry, address: Pubkey },
    /// The name is already registered or its keyfile already exists.
    Conflict(String),
}

/// Validate `source` and copy it into the wallet directory.
///
/// The name defaults to the source file name. Nothing is written when the
/// name is taken; the caller decides what to try next.
pub fn import_wallet(
    registry: &mut Registry,
    home: &WalletHome,
    source: &Path,
    name: Option<&str>,
) -> WalletResult<ImportOutcome> {
    let keypair = wallet_file::load(source)?;

    let name = match name {
        Some(name) => normalize_name(name),
        None => source
            .file_name()
            .and_then(|f| f.to_str())
            .map(normalize_name)
            .ok_or_else(|| WalletError::InvalidName(source.display().to_string()))?,
    };
    validate_name(&name)?;

    let wallet_dir = home.ensure_wallet_dir()?;
    let dest = wallet_dir.join(&name);
    if registry.find_wallet(&name).is_some() || dest.exists() {
        return Ok(ImportOutcome::Conflict(name));
    }

    fs::copy(source, &dest).map_err(|e| {
        WalletError::io(
            format!("Failed to copy {} to {}", source.display(), dest.display()),
            e,
        )
    })?;
    let entry = registry.add_wallet(&name, dest)?.clone();
    Ok(ImportOutcome::Imported {
        entry,
        address: keypair.pubkey(),
    })
}

/// clap value parser for base-58 addresses.
pub fn parse_address(input: &str) -> Result<Pubkey, String> {
    Pubkey::from_str(input.trim()).map_err(|e| format!("Invalid address '{input}': {e}"))
}

fn open_selected(registry: &Registry) -> Result<Wallet> {
    let Some(entry) = registry.selected() else {
        bail!("No wallet selected. Use 'select <name>' or 'generate' first.");
    };
    Wallet::open(entry).with_context(|| format!("Failed to open wallet '{}'", entry.name))
}

fn open_named(registry: &Registry, name: &str) -> Result<Wallet> {
    let entry = registry
        .find_wallet(name)
        .ok_or_else(|| WalletError::NotFound(format!("wallet '{}'", normalize_name(name))))?;
    Wallet::open(entry).with_context(|| format!("Failed to open wallet '{}'", entry.name))
}

fn address_or_selected(registry: &Registry, address: Option<Pubkey>) -> Result<Pubkey> {
    match address {
        Some(address) => Ok(address),
        None => Ok(open_selected(registry)?.address()),
    }
}

impl Command {
    /// Whether the registry must be written back after a successful run.
    pub fn mutates_registry(&self) -> bool {
        matches!(
            self,
            Command::Generate { .. }
                | Command::Import { .. }
                | Command::Select { .. }
                | Command::Rename { .. }
                | Command::Remove { .. }
                | Command::SetConfig { .. }
        )
    }

    /// Whether this command should prompt for confirmation before executing.
    pub fn requires_confirmation(&self) -> bool {
        matches!(self, Command::ShowPrivateKey)
    }

    /// Execute a command and return the output string.
    pub async fn execute(
        &self,
        session: &mut Session,
        resolver: &dyn ConflictResolver,
        json_output: bool,
    ) -> Result<String> {
        match self {
            Command::Generate { name } => {
                let generated =
                    generate_wallet(&mut session.registry, &session.home, name.as_deref())?;
                let address = generated.keypair.pubkey().to_string();
                let secret = private_key_hex(&generated.keypair);
                let phrase = recovery_phrase(&generated.keypair)?;

                if json_output {
                    Ok(serde_json::json!({
                        "name": generated.entry.name,
                        "path": generated.entry.path,
                        "public_key": address,
                        "private_key": secret.as_str(),
                        "recovery_phrase": phrase.as_str(),
                    })
                    .to_string())
                } else {
                    Ok(format!(
                        "Wallet '{}' created at {}\n  \
                         Public key:      {}\n  \
                         Private key:     {}\n  \
                         Recovery phrase: {}\n\
                         Keep the private key and recovery phrase secret.",
                        generated.entry.name,
                        generated.entry.path.display(),
                        address,
                        secret.as_str(),
                        phrase.as_str(),
                    ))
                }
            }

            Command::Import { path, name } => {
                let mut name = name.clone();
                let mut renamed = false;
                let (entry, address) = loop {
                    let unusable = match import_wallet(
                        &mut session.registry,
                        &session.home,
                        path,
                        name.as_deref(),
                    ) {
                        Ok(ImportOutcome::Imported { entry, address }) => break (entry, address),
                        Ok(ImportOutcome::Conflict(taken)) => taken,
                        Err(WalletError::InvalidName(invalid)) if renamed => {
                            warn!("'{invalid}' is not a valid wallet name");
                            invalid
                        }
                        Err(e) => return Err(e.into()),
                    };
                    match resolver.replacement_name(&unusable) {
                        Some(replacement) => {
                            name = Some(replacement);
                            renamed = true;
                        }
                        None => bail!("Import cancelled: the name '{unusable}' is unavailable."),
                    }
                };

                if json_output {
                    Ok(serde_json::json!({
                        "name": entry.name,
                        "path": entry.path,
                        "public_key": address.to_string(),
                    })
                    .to_string())
                } else {
                    Ok(format!(
                        "Imported {} as '{}'\n  Public key: {}",
                        path.display(),
                        entry.name,
                        address
                    ))
                }
            }

            Command::List => {
                let selected = session.registry.selected().map(|w| w.name.clone());
                let mut rows = Vec::new();
                for (index, entry) in session.registry.wallets().iter().enumerate() {
                    match Wallet::open(entry) {
                        Ok(wallet) => rows.push((index, entry, wallet.address())),
                        Err(e) => warn!("Skipping wallet '{}': {e}", entry.name),
                    }
                }

                if json_output {
                    let json_rows: Vec<serde_json::Value> = rows
                        .iter()
                        .map(|(index, entry, address)| {
                            serde_json::json!({
                                "index": index,
                                "name": entry.name,
                                "path": entry.path,
                                "public_key": address.to_string(),
                                "selected": selected.as_deref() == Some(entry.name.as_str()),
                            })
                        })
                        .collect();
                    return Ok(serde_json::Value::Array(json_rows).to_string());
                }

                if rows.is_empty() {
                    return Ok("No wallets found. Use 'generate' to create one.".to_string());
                }
                let mut output = format!("  {:>3}  {:<24}  {}\n", "#", "Name", "Public key");
                for (index, entry, address) in rows {
                    let marker = if selected.as_deref() == Some(entry.name.as_str()) {
                        '*'
                    } else {
                        ' '
                    };
                    output.push_str(&format!(
                        "{marker} {index:>3}  {:<24}  {address}\n",
                        entry.name
                    ));
                }
                Ok(output.trim_end().to_string())
            }

            Command::Select { name } => {
                let entry = session.registry.select_wallet(name)?;
                if json_output {
                    Ok(serde_json::json!({ "selected": entry.name }).to_string())
                } else {
                    Ok(format!("Selected wallet '{}'", entry.name))
                }
            }

            Command::Rename { current, new } => {
                let entry = session.registry.rename_wallet(current, new)?;
                if json_output {
                    Ok(serde_json::json!({
                        "name": entry.name,
                        "path": entry.path,
                    })
                    .to_string())
                } else {
                    Ok(format!(
                        "Renamed '{}' to '{}'",
                        normalize_name(current),
                        entry.name
                    ))
                }
            }

            Command::Remove { name } => {
                let entry = session.registry.remove_wallet(name)?;
                if json_output {
                    Ok(serde_json::json!({ "removed": entry.name }).to_string())
                } else {
                    Ok(format!("Removed wallet '{}'", entry.name))
                }
            }

            Command::Send {
                wallet,
                recipient,
                amount,
            } => {
                if *amount == 0 {
                    bail!("Cannot send 0 SOL.");
                }
                let sender = open_named(&session.registry, wallet)?;
                let result = session
                    .network
                    .send_sol(sender.keypair(), recipient, *amount)
                    .await?;

                if json_output {
                    Ok(serde_json::json!({
                        "signature": result.signature,
                        "from": sender.address().to_string(),
                        "recipient": recipient.to_string(),
                        "amount_lamports": result.lamports,
                        "amount_sol": display::lamports_to_sol(result.lamports),
                    })
                    .to_string())
                } else {
                    Ok(format!(
                        "Transaction sent!\n  Signature: {}\n  Amount: {} -> {}",
                        result.signature,
                        display::format_balance(result.lamports),
                        recipient,
                    ))
                }
            }

            Command::Balance { address } => {
                let address = address_or_selected(&session.registry, *address)?;
                let lamports = session.network.balance(&address).await?;
                if json_output {
                    Ok(display::format_balance_json(&address.to_string(), lamports))
                } else {
                    Ok(format!(
                        "Balance for {address}: {}",
                        display::format_balance(lamports)
                    ))
                }
            }

            Command::Airdrop { address, amount } => {
                if *amount == 0 {
                    bail!("Cannot airdrop 0 SOL.");
                }
                let address = address_or_selected(&session.registry, *address)?;
                let signature = session.network.airdrop(&address, *amount).await?;
                if json_output {
                    Ok(serde_json::json!({
                        "signature": signature,
                        "address": address.to_string(),
                        "amount_lamports": amount,
                    })
                    .to_string())
                } else {
                    Ok(format!(
                        "Airdrop of {} confirmed for {address}\n  Signature: {signature}",
                        display::format_balance(*amount)
                    ))
                }
            }

            Command::SetConfig { network } => {
                let network = session.registry.set_network(network)?;
                if json_output {
                    Ok(serde_json::json!({ "network": network.to_string() }).to_string())
                } else {
                    Ok(format!("Network set to {network}"))
                }
            }

            Command::ShowPrivateKey => {
                let wallet = open_selected(&session.registry)?;
                let hex = wallet.private_key_hex();
                let base58 = wallet.private_key_base58();
                if json_output {
                    Ok(serde_json::json!({
                        "name": wallet.name(),
                        "private_key_hex": hex.as_str(),
                        "private_key_base58": base58.as_str(),
                    })
                    .to_string())
                } else {
                    Ok(format!(
                        "Private key for '{}' (keep this secret!):\n  Hex:    {}\n  Base58: {}",
                        wallet.name(),
                        hex.as_str(),
                        base58.as_str()
                    ))
                }
            }

            Command::Show => {
                let registry = &session.registry;
                let selected = registry.selected();
                let address = selected.map(|entry| Wallet::open(entry).map(|w| w.address()));

                if json_output {
                    return Ok(serde_json::json!({
                        "network": registry.network().to_string(),
                        "rpc_url": session.network.url(),
                        "registry": session.home.registry_path(),
                        "wallets": registry.wallets().len(),
                        "selected": selected.map(|entry| serde_json::json!({
                            "name": entry.name,
                            "path": entry.path,
                            "public_key": address
                                .as_ref()
                                .and_then(|a| a.as_ref().ok())
                                .map(|a| a.to_string()),
                        })),
                    })
                    .to_string());
                }

                let mut output = format!(
                    "Network:  {} ({})\nRegistry: {}\nWallets:  {}\n",
                    registry.network(),
                    session.network.url(),
                    session.home.registry_path().display(),
                    registry.wallets().len()
                );
                match (selected, address) {
                    (Some(entry), Some(address)) => {
                        output.push_str(&format!(
                            "Selected: {}\n  Path:       {}\n",
                            entry.name,
                            entry.path.display()
                        ));
                        match address {
                            Ok(address) => {
                                output.push_str(&format!("  Public key: {address}"))
                            }
                            Err(e) => output.push_str(&format!("  Public key: unavailable ({e})")),
                        }
                    }
                    _ => output.push_str("Selected: none"),
                }
                Ok(output)
            }

            Command::RecentActivity { limit } => {
                let wallet = open_selected(&session.registry)?;
                let txs = session
                    .network
                    .recent_activity(&wallet.address(), *limit)
                    .await?;
                if json_output {
                    Ok(display::format_transactions_json(&txs))
                } else {
                    Ok(format!(
                        "Recent activity for '{}' ({})\n{}",
                        wallet.name(),
                        wallet.address(),
                        display::format_transactions(&txs)
                    ))
                }
            }

            Command::SolPrice => {
                let usd = session.price.sol_usd().await?;
                if json_output {
                    Ok(serde_json::json!({ "sol_usd": usd }).to_string())
                } else {
                    Ok(format!("SOL price: ${usd:.2} USD"))
                }
            }
        }
    }
}
