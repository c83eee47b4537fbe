use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures raised by the keyfile store, the wallet registry and the gateways.
#[derive(Error, Debug)]
pub enum WalletError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("A wallet named '{0}' already exists")]
    DuplicateName(String),

    #[error("Invalid wallet name '{0}'")]
    InvalidName(String),

    #[error("Malformed keyfile {}: {reason}", path.display())]
    MalformedKeyfile { path: PathBuf, reason: String },

    #[error("Invalid key in {}: {reason}", path.display())]
    InvalidKey { path: PathBuf, reason: String },

    #[error("Unknown network '{0}'. Use 'devnet', 'testnet' or 'mainnet'.")]
    InvalidNetwork(String),

    #[error("Registry file {} is corrupt: {reason}", path.display())]
    CorruptRegistry { path: PathBuf, reason: String },

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    #[error("{context}: {message}")]
    Gateway { context: String, message: String },
}

impl WalletError {
    pub fn io<S: Into<String>>(context: S, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    pub fn gateway<S: Into<String>>(context: S, err: impl std::fmt::Display) -> Self {
        Self::Gateway {
            context: context.into(),
            message: err.to_string(),
        }
    }
}

/// Result type alias using WalletError
pub type WalletResult<T> = Result<T, WalletError>;
