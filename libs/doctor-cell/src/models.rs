use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use shared_models::scheduling::wall_clock;
use shared_models::TimeRange;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Specialization {
    pub id: String,
    pub name: String,
}

/// One weekly recurring availability window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    pub id: String,
    pub doctor_id: String,
    #[serde(with = "weekday_name")]
    pub day: Weekday,
    #[serde(with = "wall_clock")]
    pub start_time: NaiveTime,
    #[serde(with = "wall_clock")]
    pub end_time: NaiveTime,
}

impl Availability {
    /// `None` for malformed windows (`start_time >= end_time`).
    pub fn window(&self) -> Option<TimeRange> {
        TimeRange::new(self.start_time, self.end_time)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub biography: String,
    #[serde(default)]
    pub specializations: Vec<Specialization>,
    #[serde(default)]
    pub availability: Vec<Availability>,
}

impl Doctor {
    pub fn full_name(&self) -> String {
        format!("Dr. {} {}", self.first_name, self.last_name)
    }

    pub fn has_specialization(&self, name: &str) -> bool {
        self.specializations
            .iter()
            .any(|spec| spec.name.eq_ignore_ascii_case(name.trim()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorSearchFilters {
    pub specialization: Option<String>,
}

// Error types specific to doctor operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DoctorError {
    #[error("Doctor not found")]
    NotFound,

    #[error("Doctor directory unavailable: {0}")]
    Network(String),
}

/// Serde adapter writing weekdays by full English name (`Monday`).
pub mod weekday_name {
    use chrono::Weekday;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn name(day: Weekday) -> &'static str {
        match day {
            Weekday::Mon => "Monday",
            Weekday::Tue => "Tuesday",
            Weekday::Wed => "Wednesday",
            Weekday::Thu => "Thursday",
            Weekday::Fri => "Friday",
            Weekday::Sat => "Saturday",
            Weekday::Sun => "Sunday",
        }
    }

    pub fn serialize<S>(day: &Weekday, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(name(*day))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Weekday, D::Error>
    where
        D: Deserializer<'de>,
    {
        // chrono accepts both "Monday" and "mon", case-insensitively.
        let raw = String::deserialize(deserializer)?;
        raw.trim()
            .parse::<Weekday>()
            .map_err(|_| D::Error::custom(format!("invalid day of week '{}'", raw)))
    }
}
