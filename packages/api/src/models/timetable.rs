//! # Timetable entries
//!
//! A [`TimetableEntry`] is either a *regular* weekly slot (authoritative `day`)
//! or a *special* one-off (authoritative `special_date`, with `day` informational
//! only). [`TimetableEntry::validate`] enforces the form rules and
//! [`Resource::prepare_submit`] shapes the payload the backend expects: the owner
//! goes in `username`, times gain seconds, and only the authoritative one of
//! `day` / `specialDate` is sent.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::{short_time, with_seconds};
use crate::error::ApiError;
use crate::resource::Resource;

/// Day names as the backend spells them, Monday first.
pub const DAYS: [&str; 7] = [
    "MONDAY",
    "TUESDAY",
    "WEDNESDAY",
    "THURSDAY",
    "FRIDAY",
    "SATURDAY",
    "SUNDAY",
];

/// Notification options offered by the form.
pub const NOTIFICATION_PREFERENCES: [&str; 4] = ["NONE", "EMAIL", "PUSH", "BOTH"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default)]
    pub subject: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub day: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub lecturer: String,
    #[serde(default = "default_notification")]
    pub notification_preference: String,
    #[serde(default)]
    pub special_schedule: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Server-computed date context; never sent back.
    #[serde(default, skip_serializing)]
    pub display_date: Option<String>,
}

fn default_notification() -> String {
    "NONE".to_string()
}

impl Default for TimetableEntry {
    fn default() -> Self {
        Self {
            id: None,
            username: None,
            subject: String::new(),
            day: "MONDAY".to_string(),
            start_time: "09:00".to_string(),
            end_time: "10:00".to_string(),
            location: String::new(),
            lecturer: String::new(),
            notification_preference: default_notification(),
            special_schedule: false,
            special_date: None,
            description: None,
            title: None,
            display_date: None,
        }
    }
}

/// Upper-case weekday name, matching [`DAYS`].
pub fn weekday_name(day: Weekday) -> &'static str {
    DAYS[day.num_days_from_monday() as usize]
}

impl TimetableEntry {
    /// Whether this entry takes place on `date`.
    pub fn is_on(&self, date: NaiveDate) -> bool {
        if self.special_schedule {
            if let Some(special) = self.special_date.as_deref() {
                return special == date.format("%Y-%m-%d").to_string();
            }
        }
        self.day.eq_ignore_ascii_case(weekday_name(date.weekday()))
    }

    /// Switch between regular and special; leaving special clears the date.
    pub fn set_special(&mut self, special: bool) {
        self.special_schedule = special;
        if !special {
            self.special_date = None;
        }
    }

    /// What the schedule column shows: server display date, special date or weekday.
    pub fn schedule_label(&self) -> String {
        if let Some(display) = self.display_date.as_deref().filter(|d| !d.is_empty()) {
            return display.to_string();
        }
        if self.special_schedule {
            if let Some(date) = self.special_date.as_deref().filter(|d| !d.is_empty()) {
                return date.to_string();
            }
        }
        self.day.clone()
    }
}

/// Keep only entries taking place on `date`.
pub fn active_on(entries: Vec<TimetableEntry>, date: NaiveDate) -> Vec<TimetableEntry> {
    entries.into_iter().filter(|e| e.is_on(date)).collect()
}

impl Resource for TimetableEntry {
    const NOUN: &'static str = "timetable entry";
    const NOUN_PLURAL: &'static str = "timetable";

    fn id(&self) -> Option<i64> {
        self.id
    }

    /// Client-side form rules.
    fn validate(&self) -> Result<(), ApiError> {
        if self.subject.trim().is_empty() {
            return Err(ApiError::Invalid("Subject is required".into()));
        }
        if self.start_time.is_empty() || self.end_time.is_empty() {
            return Err(ApiError::Invalid("Start time and end time are required".into()));
        }
        // Zero-padded HH:MM[:SS] strings order the same as the times they encode.
        if with_seconds(&self.start_time) >= with_seconds(&self.end_time) {
            return Err(ApiError::Invalid("End time must be after start time".into()));
        }
        if self.special_schedule && self.special_date.as_deref().unwrap_or("").is_empty() {
            return Err(ApiError::Invalid("Special date is required for special schedules".into()));
        }
        if !self.special_schedule && self.day.is_empty() {
            return Err(ApiError::Invalid("Day is required for regular schedules".into()));
        }
        Ok(())
    }

    fn prepare_submit(&mut self, owner: &str) {
        self.username = Some(owner.to_string());
        self.start_time = with_seconds(&self.start_time);
        self.end_time = with_seconds(&self.end_time);
        self.display_date = None;
        if self.special_schedule {
            // The backend derives the weekday from the date.
            self.day.clear();
        } else {
            self.special_date = None;
        }
    }

    fn for_edit(&self) -> Self {
        Self {
            start_time: short_time(&self.start_time).to_string(),
            end_time: short_time(&self.end_time).to_string(),
            ..self.clone()
        }
    }
}
