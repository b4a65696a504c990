use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use serde_json::json;
use tracing::{info, warn};

use kaboni::analysis::{reporting, statistics};
use kaboni::cli::cli::{Args, CalculateArgs, Command};
use kaboni::config::calculator_config::CalculatorConfig;
use kaboni::core::estimator::EmissionCalculator;
use kaboni::core::suggestions::generate_suggestions_with;
use kaboni::storage::history::{FileHistoryStore, HistoryEntry, HistoryStore, LocalHistory};
use kaboni::storage::persistence::{save_with_fallback, Calculation, SaveOutcome};
use kaboni::storage::remote::{HttpRemoteStore, RemoteStore};
use kaboni::utils::csv_export::CsvExporter;
use kaboni::utils::logging::{self, FileIOType, OperationCategory, PersistenceType};

fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_logging(args.enable_timing(), args.debug_logging());

    let mut config = load_config(&args)?;
    if let Some(path) = args.history_file() {
        config.history.path = path.to_path_buf();
    }

    let history = FileHistoryStore::new(config.history.path.clone());

    match args.command() {
        Command::Calculate(calc) => run_calculate(&config, &history, calc)?,
        Command::History => {
            let entries = load_history(&config, &history)?;
            reporting::print_history(&entries);
        }
        Command::Stats => {
            let entries = load_history(&config, &history)?;
            let local = LocalHistory::from_entries(entries, config.history.capacity);
            match statistics::summarize(&local).context("Failed to summarize history")? {
                Some(stats) => reporting::print_statistics(&stats),
                None => println!("No carbon footprint data available"),
            }
        }
        Command::Export { output } => {
            let _timing = logging::start_timing("export_history",
                OperationCategory::FileIO { subcategory: FileIOType::CsvExport });

            let entries = load_history(&config, &history)?;
            let exporter = CsvExporter::new(output);
            let rows = exporter
                .export_history(&entries)
                .with_context(|| format!("Failed to export history to {}", output.display()))?;
            println!("Exported {} calculations to {}", rows, exporter.output_path().display());
        }
    }

    logging::print_timing_report();
    Ok(())
}

fn load_config(args: &Args) -> Result<CalculatorConfig> {
    let Some(path) = args.config() else {
        return Ok(CalculatorConfig::default());
    };

    let _timing = logging::start_timing("load_config",
        OperationCategory::FileIO { subcategory: FileIOType::ConfigLoad });

    CalculatorConfig::load_from_file(path)
        .with_context(|| format!("Failed to load config from {}", path.display()))
}

fn load_history(config: &CalculatorConfig, store: &FileHistoryStore) -> Result<Vec<HistoryEntry>> {
    let _timing = logging::start_timing("load_history",
        OperationCategory::FileIO { subcategory: FileIOType::HistoryLoad });

    let history = store
        .load_history(config.history.capacity)
        .with_context(|| format!("Failed to read history from {}", store.path().display()))?;
    Ok(history.into_entries())
}

fn run_calculate(config: &CalculatorConfig, history: &FileHistoryStore, calc: &CalculateArgs) -> Result<()> {
    let calculator = EmissionCalculator::from_config(config);
    let input = calc.input();

    let breakdown = {
        let _timing = logging::start_timing("compute", OperationCategory::Calculation);
        calculator.compute(&input)
    };
    let suggestions = generate_suggestions_with(&breakdown, &config.suggestions);

    if calc.json() {
        let document = json!({
            "input": input,
            "breakdown": breakdown,
            "suggestions": suggestions,
        });
        println!("{}", serde_json::to_string_pretty(&document)?);
    } else {
        reporting::print_breakdown(&input, &breakdown);
        reporting::print_suggestions(&suggestions);
    }

    if !calc.save() {
        return Ok(());
    }

    let remote = match &config.remote {
        Some(remote_config) => match HttpRemoteStore::new(remote_config) {
            Ok(store) => {
                info!(endpoint = store.endpoint(), "Saving to remote backend");
                Some(store)
            }
            Err(e) => {
                warn!(error = %e, "Could not create HTTP client, skipping remote save");
                None
            }
        },
        None => None,
    };

    let calculation = Calculation {
        input: &input,
        breakdown: &breakdown,
        suggestions: &suggestions,
        at: Utc::now(),
    };

    let outcome = {
        let subcategory = if remote.is_some() { PersistenceType::RemoteSave } else { PersistenceType::LocalSave };
        let _timing = logging::start_timing("save_with_fallback", OperationCategory::Persistence { subcategory });
        save_with_fallback(
            &calculation,
            remote.as_ref().map(|r| r as &dyn RemoteStore),
            history,
            config.history.capacity,
        )
        .context("Carbon footprint could not be saved")?
    };

    if let SaveOutcome::Local { history_len, .. } = &outcome {
        info!(entries = history_len, path = %history.path().display(), "Local history updated");
    }
    println!("{}", outcome.message());

    Ok(())
}
