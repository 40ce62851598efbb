mod config;
mod ics;
mod report;

use anyhow::{Context, Result};
use calroster_core::{harvest, snapshot, CalendarEvent, ContactDirectory, EventStatus};
use clap::Parser;
use config::Config;
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "calroster")]
#[command(about = "Parse a calendar file into an event summary and a deduplicated contact roster")]
struct Cli {
    /// Path to the .ics calendar file to ingest
    calendar_file: PathBuf,

    /// Log debug output to the console
    #[arg(short, long)]
    verbose: bool,

    /// Use a debug log filter regardless of the configured one
    #[arg(long)]
    verbose_log: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config()?;

    init_logging(&cli, &cfg);

    run(&cli, &cfg)
}

fn init_logging(cli: &Cli, cfg: &Config) {
    let filter = if cli.verbose || cli.verbose_log {
        "debug"
    } else {
        &cfg.log_filter
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter))
        .format(|buf, record| {
            use chrono::Local;
            use std::io::Write;
            writeln!(
                buf,
                "{} [{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .init();
}

fn run(cli: &Cli, cfg: &Config) -> Result<()> {
    let content = fs::read_to_string(&cli.calendar_file).with_context(|| {
        format!(
            "Failed to read calendar file {}",
            cli.calendar_file.display()
        )
    })?;

    info!("parsing {}", cli.calendar_file.display());
    let events = ics::parse_calendar(&content)?;

    // Only confirmed events feed the report and the roster.
    let confirmed: Vec<CalendarEvent> = events
        .into_iter()
        .filter(|event| event.status == EventStatus::Confirmed)
        .collect();
    info!("{} confirmed events", confirmed.len());

    let contacts_path = cfg.contacts_path();
    let mut directory = load_directory(&contacts_path)?;

    for event in &confirmed {
        let inserted = harvest::harvest_event(event, &mut directory)?;
        debug!("event '{}': {} participant records", event.summary, inserted);
    }

    let events_path = cfg.events_path();
    ensure_parent_dir(&events_path)?;
    report::write_event_report(&confirmed, &events_path)?;

    ensure_parent_dir(&contacts_path)?;
    debug!("saving contact snapshot: {}", contacts_path.display());
    snapshot::save(&directory, &contacts_path)?;

    info!("roster now holds {} contacts", directory.len());
    Ok(())
}

/// Restore the roster from the previous run's snapshot, or start empty on
/// the first run.
fn load_directory(contacts_path: &Path) -> Result<ContactDirectory> {
    if contacts_path.exists() {
        let directory = snapshot::load(contacts_path).with_context(|| {
            format!(
                "Failed to load contact snapshot from {}",
                contacts_path.display()
            )
        })?;
        debug!(
            "loaded {} contacts from {}",
            directory.len(),
            contacts_path.display()
        );
        Ok(directory)
    } else {
        debug!(
            "contact snapshot does not exist: {}",
            contacts_path.display()
        );
        Ok(ContactDirectory::new())
    }
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }
    Ok(())
}
