//! Weekly slot coordinates
//!
//! A school week has five weekdays (Monday = 1 .. Friday = 5) and six lesson
//! periods per day (1 ..= 6). Both are range-checked at construction and on
//! deserialization, so an out-of-range slot never reaches a snapshot.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{SharedError, SharedResult};

/// Day of the school week, 1 (Monday) to 5 (Friday).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Weekday(u8);

impl Weekday {
    pub const MONDAY: Weekday = Weekday(1);
    pub const TUESDAY: Weekday = Weekday(2);
    pub const WEDNESDAY: Weekday = Weekday(3);
    pub const THURSDAY: Weekday = Weekday(4);
    pub const FRIDAY: Weekday = Weekday(5);

    /// Number of school days in a week
    pub const COUNT: u8 = 5;

    pub fn new(value: u8) -> SharedResult<Self> {
        if (1..=Self::COUNT).contains(&value) {
            Ok(Self(value))
        } else {
            Err(SharedError::InvalidWeekday { value })
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Monday through Friday, in order
    pub fn all() -> impl Iterator<Item = Weekday> {
        (1..=Self::COUNT).map(Weekday)
    }

    pub fn short_name(self) -> &'static str {
        match self.0 {
            1 => "Mon",
            2 => "Tue",
            3 => "Wed",
            4 => "Thu",
            _ => "Fri",
        }
    }
}

impl TryFrom<u8> for Weekday {
    type Error = SharedError;

    fn try_from(value: u8) -> SharedResult<Self> {
        Self::new(value)
    }
}

impl From<Weekday> for u8 {
    fn from(day: Weekday) -> u8 {
        day.0
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// Lesson period within a day, 1 to 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Period(u8);

impl Period {
    /// Number of lesson periods in a day
    pub const COUNT: u8 = 6;

    pub fn new(value: u8) -> SharedResult<Self> {
        if (1..=Self::COUNT).contains(&value) {
            Ok(Self(value))
        } else {
            Err(SharedError::InvalidPeriod { value })
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Periods 1 through 6, in order
    pub fn all() -> impl Iterator<Item = Period> {
        (1..=Self::COUNT).map(Period)
    }
}

impl TryFrom<u8> for Period {
    type Error = SharedError;

    fn try_from(value: u8) -> SharedResult<Self> {
        Self::new(value)
    }
}

impl From<Period> for u8 {
    fn from(period: Period) -> u8 {
        period.0
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// One cell of the weekly timetable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Slot {
    pub weekday: Weekday,
    pub period: Period,
}

impl Slot {
    pub fn new(weekday: Weekday, period: Period) -> Self {
        Self { weekday, period }
    }

    /// All 30 slots of the week, weekday-major
    pub fn week() -> impl Iterator<Item = Slot> {
        Weekday::all()
            .flat_map(|weekday| Period::all().map(move |period| Slot::new(weekday, period)))
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.weekday, self.period)
    }
}
