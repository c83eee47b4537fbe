//! Keyfile storage: a keypair persisted as a JSON array of its 64 secret-key bytes.
//!
//! The public key is never trusted from disk. It is re-derived from the
//! 32-byte seed on every load and compared with the stored half.
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use log::{debug, info};
use solana_sdk::signature::{keypair_from_seed, Keypair, Signer};

use crate::error::{WalletError, WalletResult};

/// Length of an ed25519 secret key as the SDK serializes it (seed + public key).
pub const SECRET_KEY_LEN: usize = 64;

const SEED_LEN: usize = 32;

/// Write the keypair's secret key to `path`, replacing any existing file.
pub fn save(keypair: &Keypair, path: &Path) -> WalletResult<()> {
    let bytes = keypair.to_bytes();
    let json = serde_json::to_string(&bytes.as_slice())
        .map_err(|e| WalletError::io("Failed to encode keyfile", e.into()))?;

    fs::write(path, json)
        .map_err(|e| WalletError::io(format!("Failed to write keyfile {}", path.display()), e))?;

    info!("Saved keypair {} to {}", keypair.pubkey(), path.display());
    Ok(())
}

/// Read a keyfile and rebuild the keypair from its seed.
pub fn load(path: &Path) -> WalletResult<Keypair> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(WalletError::NotFound(format!("keyfile {}", path.display())));
        }
        Err(e) => {
            return Err(WalletError::io(
                format!("Failed to read keyfile {}", path.display()),
                e,
            ))
        }
    };

    let bytes: Vec<u8> =
        serde_json::from_str(&contents).map_err(|e| WalletError::MalformedKeyfile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    if bytes.len() != SECRET_KEY_LEN {
        return Err(WalletError::MalformedKeyfile {
            path: path.to_path_buf(),
            reason: format!("expected {SECRET_KEY_LEN} bytes, found {}", bytes.len()),
        });
    }

    let keypair = keypair_from_seed(&bytes[..SEED_LEN]).map_err(|e| WalletError::InvalidKey {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    if keypair.pubkey().to_bytes()[..] != bytes[SEED_LEN..] {
        return Err(WalletError::InvalidKey {
            path: path.to_path_buf(),
            reason: "stored public key does not match the secret key".to_string(),
        });
    }

    debug!("Loaded keypair {} from {}", keypair.pubkey(), path.display());
    Ok(keypair)
}
