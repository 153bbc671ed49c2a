//! One-shot population of a catalog database from card, set and trivia dumps.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use ygo_catalog::config::{CatalogConfig, CARDINFO_URL, CARDSETS_URL};
use ygo_catalog::populate::{self, Populator};
use ygo_catalog::{schema, Catalog, Database, Result};

#[derive(Parser, Debug)]
#[command(name = "ygo-populate", about = "Populate the card catalog database")]
struct Args {
    /// DuckDB file to write (defaults to YGO_DB_PATH or the platform data dir)
    #[arg(long)]
    db: Option<PathBuf>,

    /// Card-info dump: URL, JSON file or .json.gz file
    #[arg(long, default_value = CARDINFO_URL)]
    cards: String,

    /// Card-set dump: URL, JSON file or .json.gz file
    #[arg(long, default_value = CARDSETS_URL)]
    sets: String,

    /// Trivia JSON file; trivia is skipped when absent
    #[arg(long)]
    trivia: Option<String>,
}

fn run(args: Args) -> Result<bool> {
    let config = CatalogConfig::from_env();
    let path = args.db.unwrap_or(config.database_path);

    let db = Database::open(&path)?;
    let conn = db.connect()?;
    schema::apply(&conn)?;

    let cards = populate::parse_cards(populate::load_source(&args.cards)?)?;
    let card_sets = populate::parse_card_sets(populate::load_source(&args.sets)?)?;
    let trivia = match args.trivia.as_deref() {
        Some(source) => populate::parse_trivia(populate::load_source(source)?)?,
        None => Vec::new(),
    };
    tracing::info!(
        cards = cards.len(),
        sets = card_sets.len(),
        trivia = trivia.len(),
        "sources loaded"
    );

    let report = Populator::new(&conn).run(&cards, &card_sets, &trivia);
    drop(conn);

    let catalog = Catalog::open(db)?;
    for rank in catalog.cards().archetype_rank()?.iter().take(10) {
        tracing::info!(
            position = rank.position,
            archetype = %rank.name,
            cards = rank.total,
            "archetype rank"
        );
    }
    tracing::info!(%catalog, "population finished");

    Ok(report.is_success())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run(Args::parse()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => {
            tracing::warn!("some population steps failed");
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::error!(error = %e, "population aborted");
            ExitCode::FAILURE
        }
    }
}
