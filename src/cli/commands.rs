use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

use crate::cli::args::{Cli, Commands};
use crate::cli::display;
use crate::error::{ForecastError, Result};
use crate::models::ForecastRecord;
use crate::processors::{CoverageChecker, CoverageReport, ForecastProcessor, LocationLocator};
use crate::readers::{read_document_file, FeedCache, FeedClient, FeedReader};
use crate::settings::Settings;
use crate::utils::constants::{DEFAULT_CHUNK_SIZE, FORMAT_CSV, FORMAT_PARQUET};
use crate::utils::filename::generate_default_export_filename;
use crate::utils::progress::ProgressReporter;
use crate::writers::{CsvWriter, ForecastStore, ParquetWriter};

pub async fn run(cli: Cli) -> Result<()> {
    let result = dispatch(cli).await;
    if let Err(e) = &result {
        if e.is_recoverable() {
            print_hint(e);
        }
    }
    result
}

async fn dispatch(cli: Cli) -> Result<()> {
    let mut settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Update {
            force,
            database,
            api_key,
        } => {
            if let Some(key) = api_key {
                settings.feed.api_key = Some(key);
            }
            let database = database_path(&settings, database);

            println!("Updating forecasts for dataset {}", settings.feed.dataset_id);
            println!("Database: {}", database.display());

            let client = FeedClient::new(&settings.feed)?;
            let cache = FeedCache::new(&settings.storage.cache_file)
                .with_max_age(Duration::from_secs(settings.storage.cache_max_age_secs));
            let reader = FeedReader::new(client, cache);
            let locator = LocationLocator::with_marker_key(&settings.processing.marker_key);

            let progress = ProgressReporter::new_spinner("Reading forecast feed...", false);
            let doc = match reader.read_located(force, &locator).await {
                Ok(doc) => doc,
                Err(e) => {
                    progress.abandon_with_message("Feed unavailable");
                    return Err(e);
                }
            };
            progress.finish_with_message("Feed ready");

            ingest(doc, &settings, &database, false).await?;
        }

        Commands::Process {
            input,
            database,
            validate_only,
        } => {
            let database = database_path(&settings, database);

            println!("Processing {}", input.display());
            let doc = read_document_file(&input)?;

            ingest(doc, &settings, &database, validate_only).await?;
        }

        Commands::Show { database, limit } => {
            let database = database_path(&settings, database);
            let (records, updated) = load_stored(&database)?;

            if records.is_empty() {
                println!(
                    "No forecasts stored in {}. Run `cwa-forecast update` first.",
                    database.display()
                );
                return Ok(());
            }

            if let Some(updated) = updated {
                println!("Forecasts updated {}", updated);
            }
            println!();
            print!("{}", display::render_table(&records, limit));

            if let Some(summary) = display::temperature_summary(&records) {
                println!("\n{}", summary);
            }
        }

        Commands::Export {
            database,
            output_file,
            format,
            compression,
        } => {
            let database = database_path(&settings, database);
            let format = format.to_lowercase();
            if format != FORMAT_CSV && format != FORMAT_PARQUET {
                return Err(ForecastError::InvalidFormat(format!(
                    "Unsupported export format '{}', expected csv or parquet",
                    format
                )));
            }

            let output_file =
                output_file.unwrap_or_else(|| generate_default_export_filename(&format));

            let (records, _) = load_stored(&database)?;
            if records.is_empty() {
                println!("No records to write from {}", database.display());
                return Ok(());
            }

            if let Some(parent) = output_file.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }

            println!(
                "Writing {} records to {}...",
                records.len(),
                output_file.display()
            );

            if format == FORMAT_PARQUET {
                let writer = ParquetWriter::new().with_compression(&compression)?;
                writer.write_records_batched(&records, &output_file, DEFAULT_CHUNK_SIZE)?;

                let file_info = writer.get_file_info(&output_file)?;
                println!("\n{}", file_info.summary());
            } else {
                CsvWriter::new().write_records(&records, &output_file)?;
            }

            info!(path = %output_file.display(), records = records.len(), "export written");
            println!("Export complete!");
        }

        Commands::Inspect { input } => {
            let input = input.unwrap_or_else(|| settings.storage.cache_file.clone());
            println!("Inspecting {}", input.display());

            let doc = read_document_file(&input)?;
            let processor = ForecastProcessor::new(settings.processing.max_workers)
                .with_marker_key(&settings.processing.marker_key);
            let candidates = processor.locator().candidates(&doc);

            if candidates.is_empty() {
                print_not_found(&doc, &settings.processing.marker_key);
                print_hint(&ForecastError::LocationListNotFound {
                    marker: settings.processing.marker_key.clone(),
                });
                return Ok(());
            }

            println!(
                "\nFound {} list(s) keyed by '{}':",
                candidates.len(),
                settings.processing.marker_key
            );
            for (i, candidate) in candidates.iter().enumerate() {
                let marker = if i == 0 { "*" } else { " " };
                let pointer = if candidate.pointer.is_empty() {
                    "(root)"
                } else {
                    candidate.pointer.as_str()
                };
                println!("{} {} ({} entries)", marker, pointer, candidate.len());
            }
            println!("\n* selected for processing");
        }
    }

    Ok(())
}

/// Locate, normalize and (unless `validate_only`) store one document.
async fn ingest(
    doc: Value,
    settings: &Settings,
    database: &Path,
    validate_only: bool,
) -> Result<()> {
    let marker_key = settings.processing.marker_key.clone();
    let processor =
        ForecastProcessor::new(settings.processing.max_workers).with_marker_key(&marker_key);

    let outcome = tokio::task::spawn_blocking(move || {
        let progress = ProgressReporter::new_spinner("Processing forecasts...", false);
        let outcome = processor.process_document(&doc, Some(&progress));
        (doc, outcome)
    })
    .await?;

    let (records, report) = match outcome {
        (_, Ok(processed)) => processed,
        (doc, Err(ForecastError::LocationListNotFound { marker })) => {
            print_not_found(&doc, &marker);
            warn!("stored forecasts left untouched");
            return Err(ForecastError::LocationListNotFound { marker });
        }
        (_, Err(e)) => return Err(e),
    };

    print_report(&report);

    if validate_only {
        println!("Validation complete - database not modified");
        return Ok(());
    }

    store_records(&records, database)
}

/// Stored records and their timestamp, without creating a database that is not there.
fn load_stored(database: &Path) -> Result<(Vec<ForecastRecord>, Option<String>)> {
    match ForecastStore::open_existing(database)? {
        Some(store) => Ok((store.load_all()?, store.last_updated()?)),
        None => Ok((Vec::new(), None)),
    }
}

fn store_records(records: &[ForecastRecord], database: &Path) -> Result<()> {
    let mut store = ForecastStore::open(database)?;
    let written = store.replace_all(records)?;
    println!("Stored {} forecasts in {}", written, database.display());
    Ok(())
}

fn print_report(report: &CoverageReport) {
    let checker = CoverageChecker::new();
    println!("\n{}", checker.generate_summary(report));

    if report.has_gaps() {
        println!("⚠️  Some fields could not be resolved and are stored as N/A");
    } else {
        println!("✅ Every location has a description, minimum and maximum");
    }
}

fn print_hint(err: &ForecastError) {
    match err {
        ForecastError::MissingApiKey => {
            println!("\nSet feed.api_key in cwa-forecast.toml, export CWA_API_KEY or pass --api-key.");
        }
        ForecastError::UnexpectedStatus { status: 401 | 403, .. } => {
            println!("\nThe feed rejected the request; check that the API key is valid.");
        }
        ForecastError::LocationListNotFound { .. } => {
            println!("\nCheck that the API key is valid and that the dataset format has not changed.");
            println!("Run `cwa-forecast update --force` to download a fresh copy of the feed.");
        }
        ForecastError::MalformedInput { origin, .. } => {
            println!("\n{} is not valid JSON.", origin);
            println!("If it came from the feed, run `cwa-forecast update --force` to download it again.");
        }
        _ => {}
    }
}

fn print_not_found(doc: &Value, marker: &str) {
    println!("\nNo list of objects keyed by '{}' was found.", marker);

    match doc {
        Value::Object(map) => {
            let keys: Vec<&str> = map.keys().map(String::as_str).collect();
            println!("Top-level keys: {}", keys.join(", "));
        }
        Value::Array(items) => println!("Top level is a list of {} entries", items.len()),
        other => println!("Top level is a scalar: {}", other),
    }
}

fn database_path(settings: &Settings, database: Option<PathBuf>) -> PathBuf {
    database.unwrap_or_else(|| settings.storage.database.clone())
}
