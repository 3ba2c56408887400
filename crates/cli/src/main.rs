//! Home energy audit CLI - booking timelines and scheduling windows.

use std::path::PathBuf;
use std::sync::Arc;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use homeaudit_core::{BookingNumber, DashboardConfig, StageCatalog, StageStatus};
use homeaudit_storage::{BookingSource, HttpStorage, JsonStorage};
use homeaudit_progress::{BookingContext, RescheduleAffordance, SchedulingWindowGuard};

#[derive(Parser)]
#[command(name = "homeaudit")]
#[command(about = "Home energy audit booking dashboard", long_about = None)]
struct Cli {
    /// Config file
    #[arg(long, default_value = ".homeaudit/config.json")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the booking pipeline stages
    Stages,
    /// List known bookings
    List,
    /// Show a booking's stage timeline
    Timeline {
        /// Booking number
        booking: String,
    },
    /// Check whether a booking can still be rescheduled
    Window {
        /// Booking number
        booking: String,
        /// Evaluate at this RFC 3339 instant instead of now
        #[arg(long, value_parser = parse_instant)]
        now: Option<DateTime<Utc>>,
    },
    /// Show everything the booking card displays
    Show {
        /// Booking number
        booking: String,
        /// Evaluate at this RFC 3339 instant instead of now
        #[arg(long, value_parser = parse_instant)]
        now: Option<DateTime<Utc>>,
        /// Print JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let cli = Cli::parse();
    let config = DashboardConfig::load(&cli.config)
        .with_context(|| format!("Failed to load config {}", cli.config.display()))?;

    let catalog = StageCatalog::booking_pipeline();
    let guard = SchedulingWindowGuard::from_minutes(config.reschedule_threshold_minutes);

    match cli.command {
        Commands::Stages => {
            println!("Stages ({})", catalog.len());
            for (i, stage) in catalog.iter().enumerate() {
                println!("  {}. {} ({})", i + 1, stage.label, stage.key);
            }
        }
        Commands::List => {
            let source = open_source(&config).await?;
            let bookings = source.list_bookings().await?;

            println!("Bookings ({})", bookings.len());
            for booking in bookings {
                let label = catalog
                    .get(&booking.current_stage)
                    .map(|s| s.label.as_str())
                    .unwrap_or("Unknown stage");
                let cancelled = if booking.cancelled { " | CANCELLED" } else { "" };
                println!("  {} | {}{}", booking.booking_number, label, cancelled);
            }
        }
        Commands::Timeline { booking } => {
            let ctx = load_context(&config, catalog, guard, &booking).await?;
            let Some(progress) = ctx.progress() else {
                return Ok(());
            };

            println!("Booking {}", booking);
            for entry in progress.stages() {
                println!("  [{}] {}", status_marker(entry.status), entry.stage.label);
            }
            if !progress.is_recognized() {
                println!("  (stage {:?} not recognized)", progress.current_stage_key);
            }
        }
        Commands::Window { booking, now } => {
            let ctx = load_context(&config, catalog, guard, &booking).await?;
            let now = now.unwrap_or_else(Utc::now);

            match ctx.affordance(now) {
                Some(RescheduleAffordance::Reschedule) => println!("Reschedule available"),
                Some(RescheduleAffordance::InMotion) => println!("Things are in motion"),
                None => println!("No appointment scheduled"),
            }
        }
        Commands::Show { booking, now, json } => {
            let ctx = load_context(&config, catalog, guard, &booking).await?;
            let now = now.unwrap_or_else(Utc::now);
            let Some(snapshot) = ctx.snapshot(now) else {
                return Ok(());
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
                return Ok(());
            }

            println!("Booking: {}", snapshot.booking_number);
            if let Some(current) = snapshot.progress.current() {
                println!("  Stage: {}", current.label);
            } else {
                println!("  Stage: {} (unknown)", snapshot.progress.current_stage_key);
            }
            let completed = snapshot.progress.count(StageStatus::Completed);
            println!("  Completed: {}/{}", completed, snapshot.progress.stages().len());
            if !snapshot.appointment_date.is_empty() {
                println!(
                    "  Appointment: {} at {} UTC",
                    snapshot.appointment_date, snapshot.appointment_time
                );
            }
            if snapshot.cancelled {
                println!("  Cancelled");
            }
        }
    }

    Ok(())
}

async fn open_source(config: &DashboardConfig) -> Result<Arc<dyn BookingSource>> {
    match &config.api_base_url {
        Some(url) => {
            info!("Using booking API at {}", url);
            Ok(Arc::new(HttpStorage::new(url, config.request_timeout())?))
        }
        None => Ok(Arc::new(JsonStorage::new(&config.data_dir).await?)),
    }
}

async fn load_context(
    config: &DashboardConfig,
    catalog: StageCatalog,
    guard: SchedulingWindowGuard,
    booking: &str,
) -> Result<BookingContext> {
    let source = open_source(config).await?;
    let mut ctx = BookingContext::new(source, catalog, guard);
    ctx.select_booking(BookingNumber::new(booking));
    ctx.refresh().await?;
    Ok(ctx)
}

fn parse_instant(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| format!("invalid RFC 3339 instant: {}", e))
}

fn status_marker(status: StageStatus) -> &'static str {
    match status {
        StageStatus::Completed => "x",
        StageStatus::Current => ">",
        StageStatus::Upcoming => " ",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_instant_normalizes_offset() {
        let t = parse_instant("2024-01-01T05:00:00-05:00").unwrap();
        assert_eq!(t.to_rfc3339(), "2024-01-01T10:00:00+00:00");
        assert!(parse_instant("tomorrow").is_err());
    }

    #[test]
    fn test_window_command_parses_now() {
        let cli = Cli::try_parse_from([
            "homeaudit", "window", "HA-1", "--now", "2024-01-01T10:00:00Z",
        ])
        .unwrap();
        match cli.command {
            Commands::Window { booking, now } => {
                assert_eq!(booking, "HA-1");
                assert!(now.is_some());
            }
            _ => panic!("expected window command"),
        }
        assert_eq!(cli.config, PathBuf::from(".homeaudit/config.json"));
    }
}
