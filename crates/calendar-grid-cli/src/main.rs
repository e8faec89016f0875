//! `calgrid` CLI: render maintenance calendars from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Day view for a date (events JSON on stdin, render model on stdout)
//! calgrid render --view day --date 2024-06-01 < events.json
//!
//! # Month view from a file, custom grid geometry, dark palette
//! calgrid render --view month --date 2024-06-01 -i events.json --config grid.json --theme dark
//!
//! # Next three events after a given instant
//! calgrid upcoming -i events.json --now 2024-06-01T12:00:00-05:00
//!
//! # Mini-calendar as text
//! calgrid minical --date 2024-06-01 -i events.json
//! ```
//!
//! Set `RUST_LOG` (or pass `--verbose`) for diagnostics on stderr.

use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use calendar_grid::clock::{parse_date, parse_local_datetime, Clock, FixedClock, SystemClock};
use calendar_grid::{CalendarView, Event, GridConfig, Theme, ViewMode};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "calgrid",
    version,
    about = "Maintenance calendar grid and layout CLI"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Grid configuration JSON (hours, pixel sizes, limits, timezone)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the calendar model for a view as JSON
    Render {
        /// View mode: day, week or month
        #[arg(long, default_value = "month")]
        view: ViewMode,
        /// Focused date (YYYY-MM-DD); defaults to today
        #[arg(long)]
        date: Option<String>,
        /// Events JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Reference instant for "today" and upcoming events (RFC 3339 or local)
        #[arg(long)]
        now: Option<String>,
        /// Color palette: light or dark
        #[arg(long, default_value = "light")]
        theme: Theme,
        /// Render the loading placeholder instead of the grid
        #[arg(long)]
        loading: bool,
    },
    /// List the next events after now
    Upcoming {
        /// Events JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Reference instant (RFC 3339 or local); defaults to the current time
        #[arg(long)]
        now: Option<String>,
        /// How many events to list (overrides the config)
        #[arg(long)]
        limit: Option<usize>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Print the mini-calendar for a month as text
    Minical {
        /// Any date in the month to show (YYYY-MM-DD); defaults to today
        #[arg(long)]
        date: Option<String>,
        /// Events JSON file; days with events are starred
        #[arg(short, long)]
        input: Option<String>,
        /// Reference instant for "today" (RFC 3339 or local)
        #[arg(long)]
        now: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match cli.config.as_deref() {
        Some(path) => GridConfig::from_path(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => GridConfig::default(),
    };

    match cli.command {
        Commands::Render {
            view,
            date,
            input,
            output,
            now,
            theme,
            loading,
        } => {
            let events = read_events(input.as_deref())?;
            let clock = build_clock(&config, now.as_deref())?;
            let focused = match date.as_deref() {
                Some(raw) => parse_date(raw).context("Invalid --date")?,
                None => clock.today(),
            };

            let mut calendar = CalendarView::new(config, clock)
                .context("Invalid grid config")?
                .with_events(events)
                .with_theme(theme)
                .with_loading(loading);
            calendar.set_current_date(focused);
            calendar.set_current_view(view);

            let rendered = calendar.render().context("Failed to render calendar")?;
            let json = serde_json::to_string_pretty(&rendered)?;
            write_output(output.as_deref(), &json)?;
        }
        Commands::Upcoming {
            input,
            now,
            limit,
            output,
        } => {
            let events = read_events(input.as_deref())?;
            let clock = build_clock(&config, now.as_deref())?;
            let mut config = config;
            if let Some(limit) = limit {
                config.upcoming_limit = limit;
            }
            let calendar = CalendarView::new(config, clock)
                .context("Invalid grid config")?
                .with_events(events);
            let upcoming = calendar
                .upcoming()
                .context("Failed to compute upcoming events")?;
            let json = serde_json::to_string_pretty(&upcoming)?;
            write_output(output.as_deref(), &json)?;
        }
        Commands::Minical { date, input, now } => {
            let events = match input.as_deref() {
                Some(path) => read_events(Some(path))?,
                None => Vec::new(),
            };
            let clock = build_clock(&config, now.as_deref())?;
            let focused = match date.as_deref() {
                Some(raw) => parse_date(raw).context("Invalid --date")?,
                None => clock.today(),
            };
            let (first, last) = calendar_grid::view::visible_range(focused, ViewMode::Month);
            let events = calendar_grid::recurrence::expand_all(&events, first, last)
                .context("Failed to expand recurring events")?;
            let mini = calendar_grid::mini_calendar(focused, clock.today(), &events);
            println!("{}", mini.to_text());
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// A clock pinned to `--now` when given, otherwise the system clock in the
/// configured timezone.
fn build_clock(config: &GridConfig, now: Option<&str>) -> Result<Box<dyn Clock>> {
    let tz = config.tz().context("Invalid timezone in config")?;
    match now {
        Some(raw) => {
            let local = parse_local_datetime(raw, tz).context("Invalid --now")?;
            tracing::debug!(%local, "using fixed clock");
            Ok(Box::new(FixedClock(local)))
        }
        None => Ok(Box::new(SystemClock::new(tz))),
    }
}

fn read_events(path: Option<&str>) -> Result<Vec<Event>> {
    let json = read_input(path)?;
    calendar_grid::parse_events(&json).context("Failed to parse events JSON")
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
