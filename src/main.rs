use bmvt_ledger::application::service::LedgerService;
use bmvt_ledger::domain::ports::PaymentRepositoryBox;
use bmvt_ledger::infrastructure::in_memory::{InMemoryOfferCatalog, InMemoryPaymentRepository};
#[cfg(feature = "storage-rocksdb")]
use bmvt_ledger::infrastructure::rocksdb::RocksDbPaymentRepository;
use bmvt_ledger::interfaces::csv::offer_reader::OfferReader;
use bmvt_ledger::interfaces::csv::payment_draft_reader::PaymentDraftReader;
use bmvt_ledger::interfaces::csv::summary_writer::SummaryWriter;
use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Payment entries CSV file (passport, amount, method, date, discount)
    input: PathBuf,

    /// Offer catalog CSV file (passport, package_price)
    #[arg(long)]
    offers: PathBuf,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long)]
    db_path: Option<PathBuf>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();
}

fn payment_repository(db_path: Option<PathBuf>) -> Result<PaymentRepositoryBox> {
    match db_path {
        #[cfg(feature = "storage-rocksdb")]
        Some(path) => {
            info!(path = %path.display(), "Using RocksDB ledger store");
            let store = RocksDbPaymentRepository::open(path).into_diagnostic()?;
            Ok(Box::new(store))
        }
        #[cfg(not(feature = "storage-rocksdb"))]
        Some(_) => {
            tracing::warn!(
                "WARNING: Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
            );
            Ok(Box::new(InMemoryPaymentRepository::new()))
        }
        None => Ok(Box::new(InMemoryPaymentRepository::new())),
    }
}

fn load_offers(path: PathBuf) -> Result<InMemoryOfferCatalog> {
    let file = File::open(path).into_diagnostic()?;
    let mut offers = Vec::new();
    for offer in OfferReader::new(file).offers() {
        match offer {
            Ok(offer) => offers.push(offer),
            Err(e) => error!("Error reading offer: {}", e),
        }
    }
    info!(count = offers.len(), "Offer catalog loaded");
    Ok(InMemoryOfferCatalog::from_offers(offers))
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let catalog = load_offers(cli.offers)?;
    let service = LedgerService::new(payment_repository(cli.db_path)?, Box::new(catalog));

    // Replay payment entries in file order
    let file = File::open(cli.input).into_diagnostic()?;
    let reader = PaymentDraftReader::new(file);
    for draft in reader.drafts() {
        match draft {
            Ok(draft) => {
                if let Err(e) = service.record_payment(draft).await {
                    error!("Error recording payment: {}", e);
                }
            }
            Err(e) => {
                error!("Error reading payment entry: {}", e);
            }
        }
    }

    let summaries = service.summaries().await.into_diagnostic()?;

    let stdout = io::stdout();
    let mut writer = SummaryWriter::new(stdout.lock());
    writer.write_summaries(summaries).into_diagnostic()?;

    Ok(())
}
