//! Task records extracted from note lines

pub mod time;

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

pub use time::{compute_duration, Minutes, TimeOfDay};

/// Nature of a task, always derived and never written by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    Ticket,
    Meeting,
    Other,
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskType::Ticket => write!(f, "ticket"),
            TaskType::Meeting => write!(f, "meeting"),
            TaskType::Other => write!(f, "other"),
        }
    }
}

/// Project and category are set together or not at all
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub project: String,
    pub category: String,
}

/// Text fields of a task that must not be blank
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Project,
    Category,
    Description,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Project => write!(f, "project"),
            Field::Category => write!(f, "category"),
            Field::Description => write!(f, "description"),
        }
    }
}

/// One matched note line
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    /// `end - start`, not clamped
    pub duration: Minutes,
    pub description: String,
    pub ticket: Option<String>,
    /// `None` only for the legacy bare-description format
    pub assignment: Option<Assignment>,
    pub kind: TaskType,
    /// set by the caller once it knows which day the note belongs to
    pub date: Option<NaiveDate>,
}

impl Task {
    pub fn project(&self) -> Option<&str> {
        self.assignment.as_ref().map(|a| a.project.as_str())
    }

    pub fn category(&self) -> Option<&str> {
        self.assignment.as_ref().map(|a| a.category.as_str())
    }

    pub fn record(&self) -> TaskRecord<'_> {
        TaskRecord {
            date: self.date.map(|d| d.format("%Y-%m-%d").to_string()),
            start: self.start.to_string(),
            end: self.end.to_string(),
            duration: self.duration.hours(),
            description: &self.description,
            ticket: self.ticket.as_deref(),
            project: self.project(),
            category: self.category(),
            kind: self.kind,
        }
    }
}

/// Flat serializable view of a `Task`, hours as a decimal number
#[derive(Debug, Serialize)]
pub struct TaskRecord<'t> {
    pub date: Option<String>,
    pub start: String,
    pub end: String,
    pub duration: f64,
    pub description: &'t str,
    pub ticket: Option<&'t str>,
    pub project: Option<&'t str>,
    pub category: Option<&'t str>,
    #[serde(rename = "type")]
    pub kind: TaskType,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn record_flattens_assignment() {
        let task = Task {
            start: "9:00 AM".parse().unwrap(),
            end: "10:30 AM".parse().unwrap(),
            duration: Minutes(90),
            description: "Test harness".to_string(),
            ticket: Some("ENTELECT-1834".to_string()),
            assignment: Some(Assignment {
                project: "Acme".to_string(),
                category: "Development".to_string(),
            }),
            kind: TaskType::Ticket,
            date: NaiveDate::from_ymd_opt(2026, 1, 6),
        };
        let json = serde_json::to_value(task.record()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "date": "2026-01-06",
                "start": "9:00 AM",
                "end": "10:30 AM",
                "duration": 1.5,
                "description": "Test harness",
                "ticket": "ENTELECT-1834",
                "project": "Acme",
                "category": "Development",
                "type": "ticket",
            })
        );
    }
}
