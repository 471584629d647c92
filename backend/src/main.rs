//! Date picker preview
//!
//! Builds a picker from a config file and command-line state, then prints
//! the rendered markup or the state snapshot.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::rc::Rc;
use tracing::info;

use datepicker_backend::config::load_config;
use datepicker_backend::domain::SystemClock;
use datepicker_backend::io::{render_picker, render_to_string};
use datepicker_backend::logging::init_logging;
use datepicker_backend::{ControllerOptions, DatePickerController};
use shared::{PickerConfig, SelectionMode, View, YearMonth};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Html,
    Json,
}

#[derive(Parser)]
#[command(name = "datepicker-preview")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Render a date picker sheet from the command line", long_about = None)]
struct Cli {
    /// Picker config (.yaml, .yml or .json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Selection mode, e.g. date, dateRange, weeks, quarter, timeRange
    #[arg(short, long, default_value = "date")]
    mode: SelectionMode,

    /// Year to show (defaults to today)
    #[arg(short, long)]
    year: Option<i32>,

    /// Month to show, 1-12
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    month: Option<u32>,

    /// View to open: month, year, decade, century, time1, time2, timeRange1, timeRange2
    #[arg(long)]
    view: Option<View>,

    /// Initial value in the picker's value format
    #[arg(long)]
    value: Option<String>,

    #[arg(short, long, value_enum, default_value = "html")]
    format: OutputFormat,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(if cli.verbose { "debug" } else { "warn" });

    let config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => PickerConfig::default(),
    };

    let mode = cli.mode;
    let options = ControllerOptions::new(move || mode, || {});
    let mut controller =
        DatePickerController::with_config(options, config, Rc::new(SystemClock::new()));

    if let Some(value) = &cli.value {
        controller
            .set_value(value)
            .with_context(|| format!("Invalid value '{}' for mode {}", value, mode))?;
    }

    if cli.year.is_some() || cli.month.is_some() {
        let anchor = controller.anchor();
        let year = cli.year.unwrap_or(anchor.year);
        let month = cli.month.map(|month| month - 1).unwrap_or(anchor.month);
        controller.navigate_to(YearMonth::new(year, month));
    }

    if let Some(view) = cli.view {
        controller.show_view(view);
    }

    info!("🗓️ Rendering {} mode in {} view", mode, controller.view());

    let output = match cli.format {
        OutputFormat::Html => render_to_string(&render_picker(&mut controller)),
        OutputFormat::Json => serde_json::to_string_pretty(&controller.state())?,
    };
    println!("{}", output);

    Ok(())
}
