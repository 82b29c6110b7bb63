//! Operating-hours command handlers for the CLI.
//!
//! These edit the local hours draft only. The draft is what diners would be
//! shown until it is saved to the backend or cleared.

use chrono::{Datelike, NaiveTime};
use clap::{Subcommand, ValueEnum};
use hawkersg_catalog::DraftHoursStore;
use hawkersg_core::{open_status, DaySchedule, WeeklySchedule, Weekday};

/// Sub-commands available under `hours`.
#[derive(Debug, Subcommand)]
pub enum HoursCommands {
    /// Print the draft schedule, or the standard hours when there is no draft
    Show,
    /// Show whether the draft schedule is open at a given day and time
    Status {
        /// Day to check (defaults to today)
        #[arg(long)]
        day: Option<Weekday>,
        /// Time to check as HH:MM (defaults to now)
        #[arg(long, value_parser = parse_hhmm)]
        time: Option<NaiveTime>,
        /// Treat the stall as closed by the emergency toggle
        #[arg(long)]
        emergency_closed: bool,
    },
    /// Apply a preset to the draft
    Preset {
        #[arg(value_enum)]
        preset: HoursPreset,
        /// Source day for `copy-to-all`
        #[arg(long)]
        from: Option<Weekday>,
    },
    /// Set one day's hours in the draft
    Set {
        day: Weekday,
        #[arg(value_parser = parse_hhmm)]
        open: NaiveTime,
        #[arg(value_parser = parse_hhmm)]
        close: NaiveTime,
        /// Mark the day closed, keeping the times for later
        #[arg(long)]
        closed: bool,
    },
    /// Discard the draft
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HoursPreset {
    /// Every day 10:00 to 20:00
    Standard,
    CloseSundays,
    /// Friday and Saturday 08:00 to 22:00
    WeekendExtended,
    /// Copy the `--from` day onto every day
    CopyToAll,
}

/// Dispatch an `hours` sub-command against the draft store.
///
/// # Errors
///
/// Returns an error if the draft cannot be written or removed, or if
/// `copy-to-all` is missing its source day.
pub(crate) fn run_hours(draft: &DraftHoursStore, command: HoursCommands) -> anyhow::Result<()> {
    match command {
        HoursCommands::Show => {
            run_hours_show(draft);
            Ok(())
        }
        HoursCommands::Status {
            day,
            time,
            emergency_closed,
        } => {
            run_hours_status(draft, day, time, emergency_closed);
            Ok(())
        }
        HoursCommands::Preset { preset, from } => {
            apply_preset(draft, preset, from)?;
            run_hours_show(draft);
            Ok(())
        }
        HoursCommands::Set {
            day,
            open,
            close,
            closed,
        } => {
            set_day(draft, day, open, close, closed)?;
            run_hours_show(draft);
            Ok(())
        }
        HoursCommands::Clear => {
            draft.clear()?;
            println!("hours draft cleared ({})", draft.path().display());
            Ok(())
        }
    }
}

fn run_hours_show(draft: &DraftHoursStore) {
    let stored = draft.load();
    let source = if stored.is_some() {
        format!("draft ({})", draft.path().display())
    } else {
        "standard hours (no draft)".to_string()
    };
    let schedule = WeeklySchedule::editor_start(stored.as_ref(), &WeeklySchedule::default());

    println!("Source: {source}");
    println!();
    println!("{:<11}{:<7}{:<7}STATUS", "DAY", "OPEN", "CLOSE");
    for (day, hours) in schedule.iter() {
        println!(
            "{:<11}{:<7}{:<7}{}",
            day.key(),
            hours.open,
            hours.close,
            if hours.closed { "closed" } else { "open" }
        );
    }
}

fn run_hours_status(
    draft: &DraftHoursStore,
    day: Option<Weekday>,
    time: Option<NaiveTime>,
    emergency_closed: bool,
) {
    let now = chrono::Local::now();
    let day = day.unwrap_or_else(|| now.weekday().into());
    let time = time.unwrap_or_else(|| now.time());

    let schedule = WeeklySchedule::effective(draft.load().as_ref(), &WeeklySchedule::default());
    let status = open_status(&schedule, day, time, emergency_closed);
    println!(
        "{} {}: {} ({})",
        day.key(),
        time.format("%H:%M"),
        if status.is_open() { "OPEN" } else { "CLOSED" },
        status.display()
    );
}

/// Apply `preset` on top of the editor's starting schedule and save it.
pub(crate) fn apply_preset(
    draft: &DraftHoursStore,
    preset: HoursPreset,
    from: Option<Weekday>,
) -> anyhow::Result<WeeklySchedule> {
    let mut schedule = WeeklySchedule::editor_start(draft.load().as_ref(), &WeeklySchedule::default());
    match preset {
        HoursPreset::Standard => schedule = WeeklySchedule::standard(),
        HoursPreset::CloseSundays => schedule.close_sundays(),
        HoursPreset::WeekendExtended => schedule.weekend_extended(),
        HoursPreset::CopyToAll => {
            let from = from.ok_or_else(|| anyhow::anyhow!("copy-to-all needs --from DAY"))?;
            schedule.copy_to_all(from);
        }
    }
    draft.save(&schedule)?;
    tracing::info!(preset = ?preset, path = %draft.path().display(), "hours preset applied");
    Ok(schedule)
}

pub(crate) fn set_day(
    draft: &DraftHoursStore,
    day: Weekday,
    open: NaiveTime,
    close: NaiveTime,
    closed: bool,
) -> anyhow::Result<WeeklySchedule> {
    let mut schedule = WeeklySchedule::editor_start(draft.load().as_ref(), &WeeklySchedule::default());
    let (open, close) = (open.format("%H:%M").to_string(), close.format("%H:%M").to_string());
    let hours = if closed {
        DaySchedule::closed_all_day(&open, &close)
    } else {
        DaySchedule::open_between(&open, &close)
    };
    schedule.set_day(day, hours);
    draft.save(&schedule)?;
    Ok(schedule)
}

/// Parse `HH:MM` into a time.
pub(crate) fn parse_hhmm(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M")
        .map_err(|e| format!("expected HH:MM, got \"{s}\": {e}"))
}
