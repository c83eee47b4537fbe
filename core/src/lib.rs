pub mod commands;
pub mod config;
pub mod display;
pub mod error;
pub mod network;
pub mod price;
pub mod registry;
pub mod wallet;
pub mod wallet_file;

pub use commands::Command;
pub use config::WalletHome;
pub use error::{WalletError, WalletResult};
pub use network::NetworkClient;
pub use price::PriceClient;
pub use registry::{Registry, WalletEntry};
pub use solana_sdk::pubkey::Pubkey;
pub use wallet::{Network, NetworkConfig, Wallet};
