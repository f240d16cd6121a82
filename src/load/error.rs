//! Failures while reading a note
//!
//! Every failure is attached to the 1-based number of the line that caused it.
//! The first failure stops the whole note: no partial result is ever returned.

use thiserror::Error;

use crate::task::{time::TimeError, Field};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {problem}")]
pub struct ParseError {
    pub line: usize,
    pub problem: Problem,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Problem {
    #[error("malformed time: {0}")]
    MalformedTime(#[from] TimeError),

    #[error("invalid task format: found {segments} segment(s), expected 'project | category | [ticket |] description'")]
    InvalidTaskFormat { segments: usize },

    #[error("{0} is empty")]
    EmptyField(Field),

    #[error("unknown project '{project}' (valid projects: {})", .valid.join(", "))]
    UnknownProject { project: String, valid: Vec<String> },

    #[error("invalid category '{category}' for project '{project}' (valid categories: {})", .valid.join(", "))]
    InvalidCategory {
        category: String,
        project: String,
        valid: Vec<String>,
    },
}

impl Problem {
    pub fn at(self, line: usize) -> ParseError {
        ParseError {
            line,
            problem: self,
        }
    }

    /// Short name of the failure
    pub fn label(&self) -> &'static str {
        use Problem::*;
        match self {
            MalformedTime(_) => "Malformed time",
            InvalidTaskFormat { .. } => "Invalid task format",
            EmptyField(_) => "Empty field",
            UnknownProject { .. } => "Unknown project",
            InvalidCategory { .. } => "Invalid category",
        }
    }

    /// What message to show to help fix the line
    pub fn fix_hint(&self) -> String {
        use Problem::*;
        match self {
            MalformedTime(e) => e.fix_hint(),
            InvalidTaskFormat { .. } => {
                "write '- [ ] 9:00 AM - 10:00 AM | Project | Category | Description'".to_string()
            }
            EmptyField(field) => format!("fill in the {} between the pipes", field),
            UnknownProject { valid, .. } => format!("use one of {}", valid.join(", ")),
            InvalidCategory { valid, .. } => format!("use one of {}", valid.join(", ")),
        }
    }
}
