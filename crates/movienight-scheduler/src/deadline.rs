//! Pure deadline math: next weekly occurrence of a (day, hour) instant in
//! a named timezone, and the time-remaining formatting shown to users.

use chrono::{DateTime, Datelike, Duration, NaiveDateTime, NaiveTime, TimeZone, Timelike, Utc};
use chrono::offset::LocalResult;
use chrono_tz::Tz;

use crate::error::{Result, SchedulerError};

const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Name of a day-of-week, 0=Sunday … 6=Saturday.
pub fn day_name(day: u8) -> &'static str {
    DAY_NAMES[day as usize % 7]
}

/// A recurring weekly instant: (day-of-week, hour, minute 0) in a named
/// IANA timezone. Validated at construction, so the occurrence math below
/// never has to fail.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    tz: Tz,
    /// 0=Sunday … 6=Saturday, matching chrono's `num_days_from_sunday`.
    day: u8,
    at: NaiveTime,
}

impl Deadline {
    pub fn new(tz: Tz, day: u8, hour: u8) -> Result<Self> {
        if day > 6 {
            return Err(SchedulerError::InvalidDeadline(format!(
                "day must be 0 (Sunday) … 6 (Saturday), got {day}"
            )));
        }
        let at = NaiveTime::from_hms_opt(hour as u32, 0, 0)
            .ok_or_else(|| SchedulerError::InvalidDeadline(format!("hour must be 0 … 23, got {hour}")))?;
        Ok(Self { tz, day, at })
    }

    /// Compute the next occurrence at or after `now`, as an absolute UTC
    /// instant.
    ///
    /// The calendar arithmetic happens in the target timezone's local
    /// fields — never a fixed offset — so deadlines stay anchored to the
    /// local wall clock across DST transitions.
    pub fn next_from(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let local = now.with_timezone(&self.tz);
        let current_dow = local.weekday().num_days_from_sunday() as i64;

        let mut days_until = (self.day as i64 - current_dow).rem_euclid(7);
        // Today is the target day: if the target time has already arrived
        // (at or past HH:00), this cycle is firing now — the *next*
        // deadline is a week out.
        if days_until == 0 && local.time() >= self.at {
            days_until = 7;
        }

        let date = local.date_naive() + Duration::days(days_until);
        self.resolve_local(date.and_time(self.at)).with_timezone(&Utc)
    }

    /// Human-readable description of the recurring instant, e.g.
    /// "Friday 12:00 (Europe/Berlin)". Display only, never computed with.
    pub fn label(&self) -> String {
        format!("{} {}:00 ({})", day_name(self.day), self.at.hour(), self.tz.name())
    }

    /// Map a local wall-clock value into the zone. During a backward
    /// transition the earlier of the two valid instants wins; in a
    /// spring-forward gap we step past the missing interval to the first
    /// valid wall-clock value.
    fn resolve_local(&self, naive: NaiveDateTime) -> DateTime<Tz> {
        let mut candidate = naive;
        for _ in 0..6 {
            match self.tz.from_local_datetime(&candidate) {
                LocalResult::Single(dt) => return dt,
                LocalResult::Ambiguous(earliest, _) => return earliest,
                LocalResult::None => candidate = candidate + Duration::minutes(30),
            }
        }
        // No real zone has a gap wider than 3 hours; interpret as UTC
        // rather than failing the whole scheduler.
        self.tz.from_utc_datetime(&naive)
    }
}

/// Format the time remaining until a deadline, given milliseconds.
///
/// Decomposes into whole days, hours, minutes — largest unit first, floor
/// division on the remainder, no rounding — and emits only the nonzero
/// components. Zero or negative means the deadline has arrived; a
/// positive remainder under one minute gets its own sentinel rather than
/// an empty string.
pub fn format_time_until(remaining_ms: i64) -> String {
    if remaining_ms <= 0 {
        return "Poll time!".to_string();
    }

    let days = remaining_ms / (1000 * 60 * 60 * 24);
    let hours = (remaining_ms % (1000 * 60 * 60 * 24)) / (1000 * 60 * 60);
    let minutes = (remaining_ms % (1000 * 60 * 60)) / (1000 * 60);

    let mut parts = Vec::new();
    if days > 0 {
        parts.push(format!("{days}d"));
    }
    if hours > 0 {
        parts.push(format!("{hours}h"));
    }
    if minutes > 0 {
        parts.push(format!("{minutes}m"));
    }

    if parts.is_empty() {
        "Less than a minute".to_string()
    } else {
        parts.join(" ")
    }
}
