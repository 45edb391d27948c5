mod app;
mod cli;
mod ui;

use pin_tui::config;
use pin_tui::error::LookupSource;
use pin_tui::geo;
use pin_tui::map::MapView;
use pin_tui::session::Session;
use pin_tui::utils;

use anyhow::{Result, anyhow};
use app::AppState;
use chrono::Local;
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use geo::{Geocoder, GeolocationProvider, NominatimGeocoder, provider_from_config};
use std::fs;
use std::io::Write;
use std::panic;
use std::sync::{Arc, Mutex};
use ui::theme::Theme;
use utils::paths::{get_config_path, get_crash_log_path, get_logs_dir};

/// Last known TUI state, written into crash reports.
static CRASH_CONTEXT: Mutex<String> = Mutex::new(String::new());

pub(crate) fn record_crash_context(summary: String) {
    if let Ok(mut context) = CRASH_CONTEXT.lock() {
        *context = summary;
    }
}

/// Render one crash log entry. `context` is the last recorded TUI summary.
fn format_crash_report(
    timestamp: &str,
    message: Option<&str>,
    location: Option<String>,
    context: Option<&str>,
) -> String {
    let mut report = format!(
        "=== pintui v{} CRASH at {timestamp} ===\n",
        env!("CARGO_PKG_VERSION")
    );
    if let Some(message) = message {
        report.push_str(&format!("Message: {message}\n"));
    }
    if let Some(location) = location {
        report.push_str(&format!("Location: {location}\n"));
    }
    match context {
        Some(context) if !context.is_empty() => report.push_str(&format!("Context: {context}\n")),
        Some(_) => report.push_str("Context: TUI not started\n"),
        None => report.push_str("Context: unavailable\n"),
    }
    report
}

/// Install a panic hook that appends the panic, the last TUI state and a
/// backtrace to the crash log.
fn install_crash_handler() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let Ok(crash_log_path) = get_crash_log_path() else {
            default_hook(panic_info);
            return;
        };

        let payload = panic_info.payload();
        let message = payload
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| payload.downcast_ref::<String>().map(String::as_str));
        let location = panic_info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()));
        // try_lock: the panic may have happened while the context was held
        let context = CRASH_CONTEXT.try_lock().ok().map(|c| c.clone());

        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let mut crash_report = format_crash_report(&timestamp, message, location, context.as_deref());
        crash_report.push_str(&format!(
            "\nBacktrace:\n{}\n\n",
            std::backtrace::Backtrace::force_capture()
        ));

        if let Some(parent) = crash_log_path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        if let Ok(mut file) = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&crash_log_path)
        {
            let _ = file.write_all(crash_report.as_bytes());
            eprintln!("\nCrash logged to: {}", crash_log_path.display());
        }

        default_hook(panic_info);
    }));
}

/// Initialize file-based logging for the TUI mode.
///
/// Logs are written to ~/.pin-tui/logs/pintui.log, rolled daily. The level
/// comes from RUST_LOG (default: info).
fn init_file_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let logs_dir = get_logs_dir().ok()?;

    if let Err(e) = fs::create_dir_all(&logs_dir) {
        eprintln!("Warning: Could not create logs directory: {e}");
        return None;
    }

    let file_appender = tracing_appender::rolling::daily(&logs_dir, "pintui.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    Some(guard)
}

/// One-shot commands log to stderr so stdout stays clean for results.
fn init_stderr_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    install_crash_handler();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Some(Commands::Search { query }) => {
            init_stderr_logging();
            handle_search(&config, &query)?;
        }
        Some(Commands::Locate) => {
            init_stderr_logging();
            handle_locate(&config)?;
        }
        Some(Commands::InitConfig) => {
            handle_init_config(&config)?;
        }
        None => {
            // Guard must be kept alive for the duration of the app
            let _log_guard = init_file_logging();
            tracing::info!("pintui starting");

            let geocoder: Arc<dyn Geocoder> =
                Arc::new(NominatimGeocoder::from_config(&config.geocoding)?);
            let locator = provider_from_config(&config.geolocation)?;

            let view = MapView::new(config.map.center.into(), config.map.zoom);
            let state = AppState::new(
                Session::new(view),
                Theme::from_config(&config),
                geocoder,
                locator,
            );

            ui::run_tui(state)?;
            tracing::info!("pintui exiting");
        }
    }

    Ok(())
}

fn handle_search(config: &Config, query: &str) -> Result<()> {
    let geocoder = NominatimGeocoder::from_config(&config.geocoding)?;
    let query = geo::geocoding::validate_query(query)
        .map_err(|e| anyhow!(e.user_message(LookupSource::Search)))?;

    match geocoder.search(query) {
        Ok(place) => {
            println!("{}", place.display_name);
            println!("{}", place.position.short_label());
            Ok(())
        }
        Err(e) => Err(anyhow!(e.user_message(LookupSource::Search))),
    }
}

fn handle_locate(config: &Config) -> Result<()> {
    let provider = provider_from_config(&config.geolocation)?;
    let position = provider
        .locate()
        .map_err(|e| anyhow!(e.user_message(LookupSource::Geolocation)))?;
    println!("{}", position.short_label());
    Ok(())
}

fn handle_init_config(config: &Config) -> Result<()> {
    let path = get_config_path()?;
    if path.exists() {
        println!("Config already exists at {}", path.display());
        return Ok(());
    }
    config.save_to(&path)?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_crash_report_carries_tui_context() {
        let report = format_crash_report(
            "2026-10-19 12:00:00",
            Some("index out of bounds"),
            Some("src/app/state.rs:10:5".to_string()),
            Some("mode=NAVIGATE pending=AwaitingColorFor(..)"),
        );
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(
            &lines[1..],
            &[
                "Message: index out of bounds",
                "Location: src/app/state.rs:10:5",
                "Context: mode=NAVIGATE pending=AwaitingColorFor(..)",
            ]
        );
        assert!(lines[0].starts_with("=== pintui v"));
    }

    #[test]
    fn test_crash_report_before_first_frame() {
        let report = format_crash_report("now", None, None, Some(""));
        assert!(report.ends_with("Context: TUI not started\n"));

        let report = format_crash_report("now", None, None, None);
        assert!(report.ends_with("Context: unavailable\n"));
    }

    #[test]
    fn test_recorded_context_is_kept() {
        record_crash_context("mode=SEARCH".to_string());
        assert_eq!(*CRASH_CONTEXT.lock().unwrap(), "mode=SEARCH");
    }
}
