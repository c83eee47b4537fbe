use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use clap::builder::RangedU64ValueParser;
use clap::{Parser, Subcommand};
use inquire::{Confirm, Text};
use log::{debug, info};

use solwallet_core::commands::{parse_address, ConflictResolver, Session, DEFAULT_AIRDROP};
use solwallet_core::config::HOME_ENV;
use solwallet_core::display::parse_sol_amount;
use solwallet_core::network::{DEFAULT_ACTIVITY_LIMIT, MAX_ACTIVITY_LIMIT};
use solwallet_core::wallet::DEFAULT_TIMEOUT;
use solwallet_core::{Command, Pubkey, Registry, WalletHome};

/// Manage Solana wallets stored as local keyfiles.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding registry.json and the wallets/ folder [default: ~/.solwallet]
    #[arg(long, global = true, env = HOME_ENV)]
    home: Option<PathBuf>,

    /// RPC endpoint overriding the selected network's public URL
    #[arg(long, global = true, env = "SOLWALLET_RPC_URL")]
    url: Option<String>,

    /// Request timeout in seconds
    #[arg(
        long,
        global = true,
        env = "SOLWALLET_TIMEOUT",
        default_value_t = DEFAULT_TIMEOUT.as_secs(),
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout: u64,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    json: bool,

    /// Skip confirmation prompts
    #[arg(short, long, global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Create a new wallet
    Generate { name: Option<String> },
    /// Copy an existing keyfile into the wallet directory
    Import { path: PathBuf, name: Option<String> },
    /// List registered wallets
    List,
    /// Select the active wallet
    Select { name: String },
    /// Rename a wallet and its keyfile
    Rename { current: String, new: String },
    /// Remove a wallet and delete its keyfile
    Remove { name: String },
    /// Send SOL from a wallet
    Send {
        wallet: String,
        #[arg(value_parser = parse_address)]
        recipient: Pubkey,
        /// Amount in SOL, e.g. 0.5
        #[arg(value_parser = parse_sol_amount)]
        amount: u64,
    },
    /// Show the balance of an address or the selected wallet
    Balance {
        #[arg(value_parser = parse_address)]
        address: Option<Pubkey>,
    },
    /// Request SOL from the devnet/testnet faucet
    Airdrop {
        #[arg(value_parser = parse_address)]
        address: Option<Pubkey>,
        /// Amount in SOL [default: 1]
        #[arg(value_parser = parse_sol_amount)]
        amount: Option<u64>,
    },
    /// Set the network: devnet, testnet or mainnet
    SetConfig { network: String },
    /// Print the selected wallet's private key
    ShowPrivateKey,
    /// Show configuration and the selected wallet
    Show,
    /// Show recent transactions of the selected wallet
    RecentActivity {
        /// Number of transactions, 1 to 1000
        #[arg(
            default_value_t = DEFAULT_ACTIVITY_LIMIT,
            value_parser = RangedU64ValueParser::<usize>::new().range(1..=MAX_ACTIVITY_LIMIT)
        )]
        limit: usize,
    },
    /// Show the current SOL price in USD
    SolPrice,
}

impl From<Cmd> for Command {
    fn from(cmd: Cmd) -> Self {
        match cmd {
            Cmd::Generate { name } => Command::Generate { name },
            Cmd::Import { path, name } => Command::Import { path, name },
            Cmd::List => Command::List,
            Cmd::Select { name } => Command::Select { name },
            Cmd::Rename { current, new } => Command::Rename { current, new },
            Cmd::Remove { name } => Command::Remove { name },
            Cmd::Send {
                wallet,
                recipient,
                amount,
            } => Command::Send {
                wallet,
                recipient,
                amount,
            },
            Cmd::Balance { address } => Command::Balance { address },
            Cmd::Airdrop { address, amount } => Command::Airdrop {
                address,
                amount: amount.unwrap_or(DEFAULT_AIRDROP),
            },
            Cmd::SetConfig { network } => Command::SetConfig { network },
            Cmd::ShowPrivateKey => Command::ShowPrivateKey,
            Cmd::Show => Command::Show,
            Cmd::RecentActivity { limit } => Command::RecentActivity { limit },
            Cmd::SolPrice => Command::SolPrice,
        }
    }
}

/// Asks on the terminal for another name when an import collides.
struct PromptResolver;

impl ConflictResolver for PromptResolver {
    fn replacement_name(&self, taken: &str) -> Option<String> {
        let answer = Text::new(&format!(
            "The name '{taken}' is taken or invalid. New name (empty to cancel):"
        ))
        .prompt()
        .ok()?;
        let answer = answer.trim();
        (!answer.is_empty()).then(|| answer.to_string())
    }
}

/// Used with --yes, where nothing may block on stdin.
struct NoPrompt;

impl ConflictResolver for NoPrompt {
    fn replacement_name(&self, _taken: &str) -> Option<String> {
        None
    }
}

async fn run(cli: Cli) -> Result<()> {
    let home = match cli.home {
        Some(root) => WalletHome::new(root),
        None => WalletHome::default_location(),
    };
    debug!("Using wallet home {}", home.root().display());

    let registry = Registry::load(&home)?;
    let mut session = Session::new(
        home,
        registry,
        cli.url,
        Duration::from_secs(cli.timeout),
    )?;
    info!(
        "Network {} at {}",
        session.network.network(),
        session.network.url()
    );

    let command = Command::from(cli.command);
    if command.requires_confirmation() && !cli.yes {
        let confirmed = Confirm::new("This will print your private key. Continue?")
            .with_default(false)
            .prompt()?;
        if !confirmed {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let resolver: &dyn ConflictResolver = if cli.yes { &NoPrompt } else { &PromptResolver };
    let output = command.execute(&mut session, resolver, cli.json).await?;
    if command.mutates_registry() {
        session.save()?;
    }
    println!("{output}");
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
