//! Decide which tasks end up on the timesheet
//!
//! A task is billable when it refers to a ticket or is a meeting, unless its
//! description marks it as a pause (lunch, break, ...).

use crate::{
    rules::Rules,
    task::{Task, TaskType},
};

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn is_meeting(task: &Task, rules: &Rules) -> bool {
    rules
        .meeting_keywords
        .iter()
        .any(|kw| contains_ignore_case(&task.description, kw))
        || task
            .category()
            .map(|c| c.eq_ignore_ascii_case(&rules.meeting_category))
            .unwrap_or(false)
}

fn is_excluded(task: &Task, rules: &Rules) -> bool {
    rules
        .exclusion_keywords
        .iter()
        .any(|kw| contains_ignore_case(&task.description, kw))
}

/// Derive the type of a task, a ticket always taking precedence
pub fn classify(task: &Task, rules: &Rules) -> TaskType {
    if task.ticket.is_some() {
        TaskType::Ticket
    } else if is_meeting(task, rules) {
        TaskType::Meeting
    } else {
        TaskType::Other
    }
}

/// Keep the billable tasks, in input order
///
/// Exclusion keywords are checked first and even drop ticketed tasks.
/// Surviving tasks without a ticket are (re)marked as meetings.
pub fn filter_billable(tasks: Vec<Task>, rules: &Rules) -> Vec<Task> {
    tasks
        .into_iter()
        .filter(|task| !is_excluded(task, rules))
        .filter_map(|mut task| {
            if task.ticket.is_some() {
                Some(task)
            } else if is_meeting(&task, rules) {
                task.kind = TaskType::Meeting;
                Some(task)
            } else {
                None
            }
        })
        .collect()
}
