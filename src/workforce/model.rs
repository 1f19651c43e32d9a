//! Workforce catalogs: time off, time tracking, groups, entities.
//!
//! These are read-only documents served as loaded.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeOffPolicy {
    #[serde(rename = "type")]
    pub kind: String,
    pub days_per_year: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub carryover_limit: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeOffRequest {
    pub employee: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: String,
}

impl TimeOffRequest {
    /// Calendar days covered, counting both ends.
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeOff {
    #[serde(default)]
    pub policies: Vec<TimeOffPolicy>,
    #[serde(default)]
    pub upcoming_time_off: Vec<TimeOffRequest>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeeklySummary {
    pub total_hours: f64,
    pub expected_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeEntry {
    pub date: NaiveDate,
    pub hours: f64,
    pub project: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeTracking {
    #[serde(default)]
    pub weekly_summary: WeeklySummary,
    #[serde(default)]
    pub entries: Vec<TimeEntry>,
}

impl TimeTracking {
    pub fn logged_hours(&self) -> f64 {
        self.entries.iter().map(|e| e.hours).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    pub name: String,
    pub manager: String,
    pub budget: u64,
    pub members: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub focus: String,
    pub lead: String,
    pub members: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Groups {
    #[serde(default)]
    pub departments: Vec<Department>,
    #[serde(default)]
    pub teams: Vec<Team>,
}

/// A legal entity or office the company operates through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub location: String,
    pub employees: u32,
    pub status: String,
}

/// All workforce documents, loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct WorkforceCatalog {
    pub time_off: TimeOff,
    pub time_tracking: TimeTracking,
    pub groups: Groups,
    pub entities: Vec<Entity>,
}
