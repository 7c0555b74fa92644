use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use stripe_gateway::application::gateway::StripeGateway;
use stripe_gateway::config::GatewayConfig;
use stripe_gateway::domain::ports::CardStoreBox;
use stripe_gateway::error::GatewayError;
use stripe_gateway::infrastructure::in_memory::InMemoryCardStore;
#[cfg(feature = "storage-rocksdb")]
use stripe_gateway::infrastructure::rocksdb::RocksDBStore;
use stripe_gateway::infrastructure::sandbox::SandboxProvider;
use stripe_gateway::interfaces::csv::operation_reader::OperationReader;
use stripe_gateway::interfaces::csv::result_writer::ResultWriter;
use stripe_gateway::interfaces::runner::OperationRunner;
use stripe_gateway::interfaces::seed::Seed;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Operations CSV file (op, payment, amount)
    input: PathBuf,

    /// JSON file with the orders, cards and payments to operate on
    #[arg(long)]
    seed: PathBuf,

    /// JSON gateway config file ({"login": ..., "currency": ...})
    #[arg(long)]
    config: Option<PathBuf>,

    /// Processor secret key. Overrides the config file.
    #[arg(long)]
    login: Option<String>,

    /// Charge currency. Overrides the config file.
    #[arg(long)]
    currency: Option<String>,

    /// Path to persistent card database (optional). If provided, uses RocksDB.
    ///
    /// Only the cards and their saved profile ids persist. The sandbox processor starts
    /// empty on every run, so tokens saved by an earlier run are unknown to it.
    #[arg(long)]
    db_path: Option<PathBuf>,
}

impl Cli {
    fn gateway_config(&self) -> Result<GatewayConfig, GatewayError> {
        let config = match (&self.config, &self.login) {
            (Some(path), login) => {
                let mut config = GatewayConfig::from_path(path)?;
                if let Some(login) = login {
                    config = GatewayConfig::new(login.clone())?.with_currency(config.currency);
                }
                config
            }
            (None, Some(login)) => GatewayConfig::new(login.clone())?,
            (None, None) => {
                return Err(GatewayError::ConfigError(
                    "either --login or --config is required".to_string(),
                ));
            }
        };

        Ok(match &self.currency {
            Some(currency) => config.with_currency(currency.clone()),
            None => config,
        })
    }
}

fn open_card_store(db_path: Option<PathBuf>) -> Result<CardStoreBox> {
    match db_path {
        Some(db_path) => open_persistent_store(db_path),
        None => Ok(Box::new(InMemoryCardStore::new())),
    }
}

#[cfg(feature = "storage-rocksdb")]
fn open_persistent_store(db_path: PathBuf) -> Result<CardStoreBox> {
    let store = RocksDBStore::open(db_path).into_diagnostic()?;
    Ok(Box::new(store))
}

#[cfg(not(feature = "storage-rocksdb"))]
fn open_persistent_store(db_path: PathBuf) -> Result<CardStoreBox> {
    warn!(
        path = %db_path.display(),
        "Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
    );
    Ok(Box::new(InMemoryCardStore::new()))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();

    let cli = Cli::parse();
    let config = cli.gateway_config().into_diagnostic()?;
    let seed = Seed::from_path(&cli.seed).into_diagnostic()?;

    let cards = open_card_store(cli.db_path.clone())?;
    for card in seed.cards {
        // Keep what a previous run already saved.
        if cards.get(card.id).await.into_diagnostic()?.is_none() {
            cards.store(card).await.into_diagnostic()?;
        }
    }

    info!(currency = %config.currency, "gateway ready");
    let gateway = StripeGateway::new(config, Box::new(SandboxProvider::new()), cards);
    let mut runner = OperationRunner::new(gateway, seed.orders, seed.payments);

    let stdout = io::stdout();
    let mut writer = ResultWriter::new(stdout.lock());

    let file = File::open(&cli.input).into_diagnostic()?;
    let reader = OperationReader::new(file);
    for operation in reader.operations() {
        match operation {
            Ok(operation) => match runner.run(&operation).await {
                Ok(result) => writer.write_result(&result).into_diagnostic()?,
                Err(e) => {
                    error!(
                        op = %operation.op,
                        payment = operation.payment,
                        "Error processing operation: {e}"
                    );
                }
            },
            Err(e) => {
                warn!("Error reading operation: {e}");
            }
        }
    }

    writer.flush().into_diagnostic()?;
    Ok(())
}
