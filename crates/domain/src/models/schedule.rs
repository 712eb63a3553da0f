//! Training schedule domain model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Day of the week, Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
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

    /// Ordinal used for storage, 1 (Monday) through 7 (Sunday).
    pub fn index(self) -> i16 {
        self as i16 + 1
    }

    pub fn from_index(index: i16) -> Option<Weekday> {
        usize::try_from(index - 1)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Weekday {
    type Err = String;

    /// Accepts full names and three-letter abbreviations in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|day| {
                let name = day.as_str().to_lowercase();
                lower == name || (lower.len() == 3 && name.starts_with(&lower))
            })
            .ok_or_else(|| format!("Unknown weekday: {}", s))
    }
}

/// A recurring class on the training schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleSlot {
    pub id: i64,
    pub day: Weekday,
    pub time_slot: String,
    pub class_type: String,
    pub coach: String,
    pub level: String,
    pub available_slots: i32,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public projection used by the chatbot schedule endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleSlotSummary {
    pub day: Weekday,
    pub time_slot: String,
    pub class_type: String,
    pub coach: String,
    pub available_slots: i32,
}

impl From<&ScheduleSlot> for ScheduleSlotSummary {
    fn from(slot: &ScheduleSlot) -> Self {
        Self {
            day: slot.day,
            time_slot: slot.time_slot.clone(),
            class_type: slot.class_type.clone(),
            coach: slot.coach.clone(),
            available_slots: slot.available_slots,
        }
    }
}

/// Sorts slots by weekday, keeping the existing order within a day.
pub fn sort_by_weekday(slots: &mut [ScheduleSlot]) {
    slots.sort_by_key(|slot| slot.day);
}

/// Request payload for creating a schedule slot.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateScheduleSlotRequest {
    pub day: Weekday,

    #[validate(length(min = 1, max = 100, message = "Time slot must be 1-100 characters"))]
    pub time_slot: String,

    #[validate(length(min = 1, max = 200, message = "Class type must be 1-200 characters"))]
    pub class_type: String,

    #[validate(length(max = 100, message = "Coach name must be at most 100 characters"))]
    #[serde(default)]
    pub coach: String,

    #[validate(length(max = 50, message = "Level must be at most 50 characters"))]
    #[serde(default)]
    pub level: String,

    #[validate(range(min = 0, message = "Available slots cannot be negative"))]
    #[serde(default = "default_available_slots")]
    pub available_slots: i32,

    #[serde(default)]
    pub display_order: i32,

    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Request payload for updating a schedule slot. Absent fields are unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateScheduleSlotRequest {
    pub day: Option<Weekday>,

    #[validate(length(min = 1, max = 100, message = "Time slot must be 1-100 characters"))]
    pub time_slot: Option<String>,

    #[validate(length(min = 1, max = 200, message = "Class type must be 1-200 characters"))]
    pub class_type: Option<String>,

    #[validate(length(max = 100, message = "Coach name must be at most 100 characters"))]
    pub coach: Option<String>,

    #[validate(length(max = 50, message = "Level must be at most 50 characters"))]
    pub level: Option<String>,

    #[validate(range(min = 0, message = "Available slots cannot be negative"))]
    pub available_slots: Option<i32>,

    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
}

fn default_available_slots() -> i32 {
    10
}

fn default_true() -> bool {
    true
}
