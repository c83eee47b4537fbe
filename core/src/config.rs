//! On-disk layout of the wallet home directory.
//!
//! ```text
//! <home>/registry.json
//! <home>/wallets/<name>.json
//! ```
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{WalletError, WalletResult};

pub const HOME_ENV: &str = "SOLWALLET_HOME";
pub const REGISTRY_FILE: &str = "registry.json";
pub const WALLET_DIR: &str = "wallets";

const DEFAULT_HOME_DIR: &str = ".solwallet";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletHome {
    root: PathBuf,
}

impl WalletHome {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `~/.solwallet`, or the current directory when no home directory is known.
    pub fn default_location() -> Self {
        let root = dirs::home_dir()
            .map(|home| home.join(DEFAULT_HOME_DIR))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_HOME_DIR));
        Self::new(root)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn registry_path(&self) -> PathBuf {
        self.root.join(REGISTRY_FILE)
    }

    pub fn wallet_dir(&self) -> PathBuf {
        self.root.join(WALLET_DIR)
    }

    /// Create the wallet directory if needed and return its absolute path.
    pub fn ensure_wallet_dir(&self) -> WalletResult<PathBuf> {
        let dir = self.wallet_dir();
        fs::create_dir_all(&dir).map_err(|e| {
            WalletError::io(format!("Failed to create wallet directory {}", dir.display()), e)
        })?;
        fs::canonicalize(&dir).map_err(|e| {
            WalletError::io(format!("Failed to resolve wallet directory {}", dir.display()), e)
        })
    }
}
