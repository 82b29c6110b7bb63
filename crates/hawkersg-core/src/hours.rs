//! Weekly operating hours and the open/closed status derived from them.
//!
//! Schedules are keyed by lowercase day name (`"monday"` .. `"sunday"`) with
//! `"HH:MM"` open/close strings, the format the business dashboard edits and
//! persists as a draft. A schedule may be empty: stalls arrive from the
//! catalog with no hours until the owner sets them.

use std::collections::BTreeMap;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        }
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
            chrono::Weekday::Sun => Weekday::Sunday,
        }
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for Weekday {
    type Err = String;

    /// Accepts full names (`"monday"`) and chrono's short forms (`"mon"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        if let Some(day) = Weekday::ALL.into_iter().find(|d| d.key() == lower) {
            return Ok(day);
        }
        lower
            .parse::<chrono::Weekday>()
            .map(Weekday::from)
            .map_err(|_| format!("unknown weekday \"{s}\""))
    }
}

/// Hours for a single day. `open`/`close` are `"HH:MM"` strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    #[serde(default)]
    pub open: String,
    #[serde(default)]
    pub close: String,
    #[serde(default)]
    pub closed: bool,
}

impl DaySchedule {
    #[must_use]
    pub fn open_between(open: &str, close: &str) -> Self {
        Self {
            open: open.to_owned(),
            close: close.to_owned(),
            closed: false,
        }
    }

    #[must_use]
    pub fn closed_all_day(open: &str, close: &str) -> Self {
        Self {
            open: open.to_owned(),
            close: close.to_owned(),
            closed: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeeklySchedule {
    days: BTreeMap<Weekday, DaySchedule>,
}

impl WeeklySchedule {
    /// Every day open 10:00 to 20:00; the starting point for a new schedule.
    #[must_use]
    pub fn standard() -> Self {
        let mut schedule = Self::default();
        schedule.set_all(&DaySchedule::open_between("10:00", "20:00"));
        schedule
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    #[must_use]
    pub fn day(&self, day: Weekday) -> Option<&DaySchedule> {
        self.days.get(&day)
    }

    pub fn set_day(&mut self, day: Weekday, hours: DaySchedule) {
        self.days.insert(day, hours);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &DaySchedule)> {
        self.days.iter().map(|(d, h)| (*d, h))
    }

    /// Applies the same hours to all seven days.
    pub fn set_all(&mut self, hours: &DaySchedule) {
        for day in Weekday::ALL {
            self.days.insert(day, hours.clone());
        }
    }

    /// Copies one day's hours onto every day. No-op if that day is unset.
    pub fn copy_to_all(&mut self, from: Weekday) {
        if let Some(hours) = self.days.get(&from).cloned() {
            self.set_all(&hours);
        }
    }

    pub fn close_sundays(&mut self) {
        self.days
            .insert(Weekday::Sunday, DaySchedule::closed_all_day("10:00", "20:00"));
    }

    /// Friday and Saturday open 08:00 to 22:00.
    pub fn weekend_extended(&mut self) {
        let extended = DaySchedule::open_between("08:00", "22:00");
        self.days.insert(Weekday::Friday, extended.clone());
        self.days.insert(Weekday::Saturday, extended);
    }

    /// Hours shown to diners: the owner's unsaved draft wins over the saved
    /// stall hours. An empty result means "hours not set".
    #[must_use]
    pub fn effective(draft: Option<&WeeklySchedule>, saved: &WeeklySchedule) -> WeeklySchedule {
        draft.unwrap_or(saved).clone()
    }

    /// Hours the editor starts from: draft, then saved hours, then
    /// [`WeeklySchedule::standard`].
    #[must_use]
    pub fn editor_start(draft: Option<&WeeklySchedule>, saved: &WeeklySchedule) -> WeeklySchedule {
        match draft {
            Some(d) => d.clone(),
            None if !saved.is_empty() => saved.clone(),
            None => WeeklySchedule::standard(),
        }
    }
}

/// Open/closed state of a stall at a point in its week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenStatus {
    /// The owner flipped the emergency close toggle.
    EmergencyClosed,
    ClosedAllDay,
    Scheduled {
        open: NaiveTime,
        close: NaiveTime,
        is_open: bool,
    },
    HoursNotSet,
}

impl OpenStatus {
    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self, OpenStatus::Scheduled { is_open: true, .. })
    }

    #[must_use]
    pub fn display(&self) -> String {
        match self {
            OpenStatus::EmergencyClosed => "Closed due to emergency toggle".to_owned(),
            OpenStatus::ClosedAllDay => "Closed All Day".to_owned(),
            OpenStatus::Scheduled { open, close, .. } => {
                format!("{} – {}", open.format("%H:%M"), close.format("%H:%M"))
            }
            OpenStatus::HoursNotSet => "Hours not set".to_owned(),
        }
    }
}

/// Derives the open status for `day` at wall-clock time `at`.
///
/// Emergency close takes precedence over everything, then a day marked
/// closed. Hours where `open >= close` are treated as running past midnight.
/// Comparison is at minute resolution.
#[must_use]
pub fn open_status(
    schedule: &WeeklySchedule,
    day: Weekday,
    at: NaiveTime,
    emergency_closed: bool,
) -> OpenStatus {
    if emergency_closed {
        return OpenStatus::EmergencyClosed;
    }
    let Some(today) = schedule.day(day) else {
        return OpenStatus::HoursNotSet;
    };
    if today.closed {
        return OpenStatus::ClosedAllDay;
    }
    let (Some(open), Some(close)) = (parse_hhmm(&today.open), parse_hhmm(&today.close)) else {
        return OpenStatus::HoursNotSet;
    };

    let now = minutes(at);
    let (open_m, close_m) = (minutes(open), minutes(close));
    let is_open = if open_m < close_m {
        now >= open_m && now < close_m
    } else {
        now >= open_m || now < close_m
    };

    OpenStatus::Scheduled {
        open,
        close,
        is_open,
    }
}

fn parse_hhmm(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw.trim(), "%H:%M").ok()
}

fn minutes(t: NaiveTime) -> u32 {
    t.hour() * 60 + t.minute()
}

#[cfg(test)]
#[path = "hours_test.rs"]
mod tests;
