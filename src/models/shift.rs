use chrono::{NaiveDateTime, Timelike};
use serde::Serialize;

/// Work shift derived from the time of day of a weighbridge event.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum Shift {
    Morning,
    Afternoon,
    Night,
    Unknown,
}

impl Shift {
    /// 06:00–13:59 Morning, 14:00–21:59 Afternoon, otherwise Night.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            6..=13 => Shift::Morning,
            14..=21 => Shift::Afternoon,
            _ => Shift::Night,
        }
    }

    pub fn from_timestamp(ts: Option<NaiveDateTime>) -> Self {
        ts.map(|t| Self::from_hour(t.hour()))
            .unwrap_or(Shift::Unknown)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Shift::Morning => "Morning",
            Shift::Afternoon => "Afternoon",
            Shift::Night => "Night",
            Shift::Unknown => "Unknown",
        }
    }
}
