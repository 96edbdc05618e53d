// cli.rs
use crate::config::ScrapeConfig;
use crate::db::listings::load_listings;
use crate::db::scrapes::{end_scrape_run, get_recent_scrapes, start_scrape_run};
use crate::db::{init_db, save_listings, Database};
use crate::domain::listing::ListingTable;
use crate::errors::AppError;
use crate::exports::{export_listings_json, export_listings_xlsx};
use crate::model_eval::{evaluate_model, AlphaChoice, Dataset};
use crate::scraper::ListingsScraper;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "cl_rentals")]
#[command(about = "Rental listings scraper and ridge/lasso model evaluator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scrape a listings search (every results page, plus each listing's detail page)
    Scrape {
        /// First page of search results
        start_url: String,

        /// Only scrape `start_url` itself, without paginating
        #[arg(long)]
        single_page: bool,

        /// Write the table as an .xlsx workbook
        #[arg(long)]
        xlsx: Option<PathBuf>,

        /// Write the table as a JSON array
        #[arg(long)]
        json: Option<PathBuf>,

        /// Upsert listings into this SQLite database
        #[arg(long)]
        db: Option<PathBuf>,
    },

    /// Evaluate ridge or lasso regression over repeated random splits
    Evaluate {
        /// Headered numeric CSV
        #[arg(long)]
        data: PathBuf,

        /// Column to predict
        #[arg(long)]
        target: String,

        /// ridge or lasso
        #[arg(long, default_value = "ridge")]
        model: String,

        /// Random seeds, one split per seed
        #[arg(long, value_delimiter = ',', default_value = "1,2,3")]
        seeds: Vec<u64>,

        /// Fixed regularization strength
        #[arg(long, conflicts_with = "alphas")]
        alpha: Option<f64>,

        /// Candidate strengths to pick from by cross-validation
        #[arg(long, value_delimiter = ',')]
        alphas: Option<Vec<f64>>,

        /// Cross-validation folds
        #[arg(long, default_value_t = 3)]
        folds: usize,
    },

    /// Show recent scrape runs recorded in a database
    Runs {
        #[arg(long)]
        db: PathBuf,
    },
}

pub fn run(cli: Cli) -> Result<(), AppError> {
    match cli.command {
        Commands::Scrape {
            start_url,
            single_page,
            xlsx,
            json,
            db,
        } => run_scrape(&start_url, single_page, xlsx, json, db),
        Commands::Evaluate {
            data,
            target,
            model,
            seeds,
            alpha,
            alphas,
            folds,
        } => {
            let choice = match (alpha, alphas) {
                (_, Some(candidates)) => AlphaChoice::CrossValidate { candidates, folds },
                (Some(a), None) => AlphaChoice::Fixed(a),
                (None, None) => AlphaChoice::default(),
            };
            run_evaluate(&data, &target, &model, seeds, choice)
        }
        Commands::Runs { db } => run_history(&db),
    }
}

fn run_scrape(
    start_url: &str,
    single_page: bool,
    xlsx: Option<PathBuf>,
    json: Option<PathBuf>,
    db_path: Option<PathBuf>,
) -> Result<(), AppError> {
    let config = ScrapeConfig::from_env()?;
    let scraper = ListingsScraper::from_config(config)?;

    let db = match db_path {
        Some(path) => {
            let db = Database::new(path);
            init_db(&db)?;
            let run_id = db.with_conn(|conn| start_scrape_run(conn, start_url))?;
            Some((db, run_id))
        }
        None => None,
    };

    let result = if single_page {
        scraper.full_page_scrape(start_url)
    } else {
        scraper.full_listings_scrape(start_url)
    };

    if let Some((db, run_id)) = &db {
        let (count, error) = match &result {
            Ok(table) => (table.len(), None),
            Err(e) => (0, Some(e.to_string())),
        };
        if let Err(e) = db.with_conn(|conn| end_scrape_run(conn, *run_id, count, error)) {
            warn!("Failed to record scrape run: {e}");
        }
    }

    let table = result?;
    if table.is_empty() {
        warn!("scrape finished without any listings");
    } else {
        info!(listings = table.len(), "scrape complete");
    }

    if let Some((db, _)) = &db {
        let saved = save_listings(db, &table, start_url)?;
        info!(saved, "listings saved to database");
    }

    let to_stdout = prints_table(db.is_some(), xlsx.as_deref(), json.as_deref());
    write_exports(&table, xlsx, json)?;

    if to_stdout {
        print_table(&table);
    }

    Ok(())
}

fn write_exports(
    table: &ListingTable,
    xlsx: Option<PathBuf>,
    json: Option<PathBuf>,
) -> Result<(), AppError> {
    if let Some(path) = xlsx {
        export_listings_xlsx(table, &path)?;
        info!(path = %path.display(), "wrote workbook");
    }
    if let Some(path) = json {
        export_listings_json(table, &path)?;
        info!(path = %path.display(), "wrote JSON");
    }
    Ok(())
}

/// stdout is the sink of last resort: the table is printed only when it
/// goes nowhere else.
fn prints_table(db: bool, xlsx: Option<&Path>, json: Option<&Path>) -> bool {
    !db && xlsx.is_none() && json.is_none()
}

/// Tab-separated dump to stdout, header first.
fn print_table(table: &ListingTable) {
    println!("{}", crate::domain::listing::COLUMNS.join("\t"));
    for listing in table.rows() {
        println!("{}", listing.cells().join("\t"));
    }
}

fn run_evaluate(
    data: &Path,
    target: &str,
    model: &str,
    seeds: Vec<u64>,
    alpha: AlphaChoice,
) -> Result<(), AppError> {
    let dataset = Dataset::from_csv_path(data, target)?;
    info!(
        rows = dataset.n_samples(),
        features = dataset.feature_names.len(),
        "dataset loaded"
    );

    let evaluation = evaluate_model(&dataset, model, seeds, alpha)?;

    println!("Model Type: {}", evaluation.summary.model);
    println!();
    for run in &evaluation.runs {
        println!("{run}");
        println!();
    }
    println!("Evaluation complete.");
    println!();
    println!("{}", evaluation.summary);

    Ok(())
}

fn run_history(path: &Path) -> Result<(), AppError> {
    let db = Database::new(path);
    init_db(&db)?;

    let runs = db.with_conn(|conn| get_recent_scrapes(conn))?;
    let stored = load_listings(&db)?.len();

    println!("{stored} listings stored");
    for run in runs {
        let status = if run.success {
            "ok".to_string()
        } else {
            run.error_message.unwrap_or_else(|| "unfinished".to_string())
        };
        println!(
            "#{} {} {} listings={} finished={} [{}]",
            run.id,
            run.started_at,
            run.search_url,
            run.listings_seen.unwrap_or(0),
            run.finished_at
                .map(|t| t.to_string())
                .unwrap_or_else(|| "-".to_string()),
            status
        );
    }
    Ok(())
}
