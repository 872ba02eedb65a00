use crate::output::{Output, OutputFormat};
use color_eyre::eyre::eyre;
use reelport_config::{AuthToken, Config, PathManager};
use reelport_core::{run_import, FixedDelayPacer, ImportReport};
use reelport_models::{ExportEntry, ListKind};
use reelport_sources::imdb::{parse_ratings_csv, parse_watchlist_csv};
use reelport_sources::JustWatchClient;
use std::path::PathBuf;
use tracing::info;

/// Drive one import run end to end: config, token, CSV, batch, summary.
///
/// Configuration problems (missing token, missing file, broken header) are
/// fatal and happen before the client is even constructed; once rows start
/// flowing, only an auth abort produces a nonzero exit.
pub async fn run(
    list: ListKind,
    file: Option<PathBuf>,
    delay_ms: Option<u64>,
    config_path: Option<PathBuf>,
    output: &Output,
) -> color_eyre::Result<()> {
    let config_path = match config_path {
        Some(path) => path,
        None => PathManager::new()
            .map_err(|e| eyre!("Could not resolve the config directory: {}", e))?
            .config_file(),
    };
    let config = Config::load_or_default(&config_path)
        .map_err(|e| eyre!("Failed to load config from {}: {}", config_path.display(), e))?;

    // Fails before any network activity when the token is absent
    let token = AuthToken::from_env()?;

    let csv_path = file.unwrap_or_else(|| match list {
        ListKind::Watchlist => PathManager::watchlist_csv(&config.imports.exports_dir),
        ListKind::Seenlist => PathManager::ratings_csv(&config.imports.exports_dir),
    });
    if !csv_path.exists() {
        return Err(eyre!(
            "CSV file not found at '{}'. Place your IMDb export there or pass --file.",
            csv_path.display()
        ));
    }

    info!(%list, file = %csv_path.display(), "Reading export");
    let entries: Vec<ExportEntry> = match list {
        ListKind::Watchlist => parse_watchlist_csv(&csv_path),
        ListKind::Seenlist => parse_ratings_csv(&csv_path),
    }
    .map_err(|e| eyre!("Failed to parse '{}': {}", csv_path.display(), e))?;

    if entries.is_empty() {
        output.warn(format!(
            "No usable rows in '{}', nothing to import",
            csv_path.display()
        ));
        return Ok(());
    }

    let client = JustWatchClient::new(&token, &config.justwatch);
    let delay = delay_ms.unwrap_or(config.justwatch.request_delay_ms);
    let pacer = FixedDelayPacer::from_millis(delay);

    let report = run_import(&client, &pacer, list, &entries).await;

    print_summary(&report, output);

    if let Some(reason) = &report.aborted {
        return Err(eyre!("Import aborted: {}", reason));
    }
    Ok(())
}

fn print_summary(report: &ImportReport, output: &Output) {
    match output.format() {
        OutputFormat::Human => {
            output.info(format!("--- {} import summary ---", report.list));
            output.success(format!("{} added", report.added()));
            if report.not_found() > 0 {
                output.warn(format!("{} not found on JustWatch", report.not_found()));
            }
            if report.skipped() > 0 {
                output.warn(format!("{} skipped (unsupported title type)", report.skipped()));
            }
            if report.failed() > 0 {
                output.error(format!("{} failed", report.failed()));
            }
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            match serde_json::to_value(report) {
                Ok(value) => output.json(&value),
                Err(e) => output.error(format!("Failed to serialize report: {}", e)),
            }
        }
    }
}
