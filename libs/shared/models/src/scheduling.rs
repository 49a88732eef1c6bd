// libs/shared/models/src/scheduling.rs
use std::fmt;

use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};

/// Wire format for wall-clock times.
pub const WALL_CLOCK_FORMAT: &str = "%H:%M";

/// Parse `HH:MM`, also accepting the `HH:MM:SS` form some backends emit.
pub fn parse_wall_clock(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, WALL_CLOCK_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()
}

/// Half-open `[start_time, end_time)` interval within a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeRange {
    #[serde(with = "wall_clock")]
    pub start_time: NaiveTime,
    #[serde(with = "wall_clock")]
    pub end_time: NaiveTime,
}

impl TimeRange {
    /// Returns `None` unless `start_time < end_time`.
    pub fn new(start_time: NaiveTime, end_time: NaiveTime) -> Option<Self> {
        (start_time < end_time).then_some(Self { start_time, end_time })
    }

    pub fn overlaps(&self, other: &TimeRange) -> bool {
        intervals_overlap(self.start_time, self.end_time, other.start_time, other.end_time)
    }

    pub fn duration(&self) -> Duration {
        self.end_time - self.start_time
    }

    pub fn duration_minutes(&self) -> i64 {
        self.duration().num_minutes()
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.start_time.format(WALL_CLOCK_FORMAT),
            self.end_time.format(WALL_CLOCK_FORMAT)
        )
    }
}

/// `[a1, a2)` and `[b1, b2)` overlap iff `a1 < b2 && b1 < a2`; touching ends do not.
pub fn intervals_overlap(a1: NaiveTime, a2: NaiveTime, b1: NaiveTime, b2: NaiveTime) -> bool {
    a1 < b2 && b1 < a2
}

/// Serde adapter for `NaiveTime` as `HH:MM`.
pub mod wall_clock {
    use chrono::NaiveTime;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    use super::{parse_wall_clock, WALL_CLOCK_FORMAT};

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format(WALL_CLOCK_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_wall_clock(&raw)
            .ok_or_else(|| D::Error::custom(format!("invalid wall-clock time '{}', expected HH:MM", raw)))
    }
}

/// Same as [`wall_clock`] for optional fields.
pub mod optional_wall_clock {
    use chrono::NaiveTime;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    use super::{parse_wall_clock, WALL_CLOCK_FORMAT};

    pub fn serialize<S>(time: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match time {
            Some(time) => serializer.serialize_some(&time.format(WALL_CLOCK_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => parse_wall_clock(&raw)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("invalid wall-clock time '{}', expected HH:MM", raw))),
            None => Ok(None),
        }
    }
}
