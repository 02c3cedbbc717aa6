//! Rewards Custodian CLI
//!
//! ```text
//! rewards-custodian links    --status verified --address <card>
//! rewards-custodian balance  --address <card> --token <token>
//! rewards-custodian transfer --address <card> --token <token> --to <card> --amount 1.5
//! ```

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;

use rewards_custodian::config::AppConfig;
use rewards_custodian::logging::init_logging;
use rewards_custodian::custodian::{
    BalanceLookup, CustodianServer, InMemoryWalletRegistry, LinkBuilder, LinkedWallet,
    NonceSource, OsNonceSource, ReqwestClient, Transaction, TransferCoordinator, TransferOutcome,
    WALLET_KEY, WalletStateMachine, WalletStatus,
};

#[derive(Parser, Debug)]
#[command(name = "rewards-custodian", version, about = "Custodial wallet link and transfer tool")]
struct Cli {
    /// Config environment, resolved as config/<env>.yaml
    #[arg(short, long, env = "REWARDS_CUSTODIAN_ENV", default_value = "dev")]
    env: String,

    /// Explicit config file; overrides --env
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the account-action links for a wallet
    Links {
        #[arg(long, value_enum)]
        status: StatusArg,
        #[arg(long, default_value = "")]
        address: String,
        /// One-time string; generated when omitted
        #[arg(long)]
        nonce: Option<String>,
    },
    /// Fetch the available balance of a card
    Balance {
        #[arg(long)]
        address: String,
        #[arg(long, env = "REWARDS_CUSTODIAN_TOKEN")]
        token: String,
    },
    /// Create and commit a transfer
    Transfer {
        #[arg(long)]
        address: String,
        #[arg(long, env = "REWARDS_CUSTODIAN_TOKEN")]
        token: String,
        /// Destination card; defaults to the configured fee card
        #[arg(long)]
        to: Option<String>,
        #[arg(long)]
        amount: Decimal,
        #[arg(long, default_value = "BAT")]
        asset: String,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum StatusArg {
    NotConnected,
    Pending,
    Connected,
    Verified,
    DisconnectedVerified,
    DisconnectedNotVerified,
}

impl From<StatusArg> for WalletStatus {
    fn from(status: StatusArg) -> Self {
        match status {
            StatusArg::NotConnected => WalletStatus::NotConnected,
            StatusArg::Pending => WalletStatus::Pending,
            StatusArg::Connected => WalletStatus::Connected,
            StatusArg::Verified => WalletStatus::Verified,
            StatusArg::DisconnectedVerified => WalletStatus::DisconnectedVerified,
            StatusArg::DisconnectedNotVerified => WalletStatus::DisconnectedNotVerified,
        }
    }
}

struct Services {
    registry: Arc<InMemoryWalletRegistry>,
    server: Arc<CustodianServer>,
}

impl Services {
    fn new(config: &AppConfig, address: &str, token: &str) -> Result<Self> {
        let nonce: Arc<dyn NonceSource> = Arc::new(OsNonceSource);
        let registry = Arc::new(InMemoryWalletRegistry::new(nonce.clone()));
        registry.insert(
            WALLET_KEY,
            LinkedWallet::new(WalletStatus::Verified, address, token, nonce.generate()),
        );

        let client = ReqwestClient::new(Duration::from_secs(
            config.custodian.request_timeout_secs,
        ))?;
        let server = Arc::new(CustodianServer::new(
            config.custodian.clone(),
            Arc::new(client),
        ));

        Ok(Self { registry, server })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let app_config = match &cli.config {
        Some(path) => AppConfig::from_file(path),
        None => AppConfig::load(&cli.env),
    }
    .context("loading configuration")?;
    let _log_guard = init_logging(&app_config.log).context("initialising logging")?;

    tracing::info!(
        environment = app_config.custodian.environment.as_str(),
        "Starting rewards-custodian"
    );

    match cli.command {
        Command::Links {
            status,
            address,
            nonce,
        } => {
            let nonce = nonce.unwrap_or_else(|| OsNonceSource.generate());
            let machine = WalletStateMachine::new(LinkBuilder::new(app_config.custodian.clone()));
            let wallet = LinkedWallet::new(status.into(), address, "", nonce);
            let links = machine.derive_links(&wallet).links();
            println!("{}", serde_json::to_string_pretty(&links)?);
        }
        Command::Balance { address, token } => {
            let services = Services::new(&app_config, &address, &token)?;
            let lookup = BalanceLookup::new(
                services.registry.clone(),
                services.server,
                services.registry,
            );
            let available = lookup.fetch().await.context("fetching balance")?;
            println!("{}", available);
        }
        Command::Transfer {
            address,
            token,
            to,
            amount,
            asset,
        } => {
            let services = Services::new(&app_config, &address, &token)?;
            let transaction = match to {
                Some(destination) => Transaction::new(destination, amount, asset),
                None => Transaction {
                    asset,
                    ..Transaction::fee(&app_config.custodian, amount)
                },
            };

            let coordinator = Arc::new(TransferCoordinator::new(
                services.registry.clone(),
                services.server,
                services.registry,
            ));
            let outcome = coordinator
                .spawn(transaction)
                .await
                .context("transfer task ended without an outcome")?;

            println!("{}", outcome);
            if !matches!(outcome, TransferOutcome::Success(_)) {
                anyhow::bail!("transfer did not complete: {}", outcome);
            }
        }
    }

    Ok(())
}
