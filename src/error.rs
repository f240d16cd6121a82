//! Error types for timesheet
//!
//! Exit codes:
//! - 0: Success
//! - 2: Bad input (note, taxonomy, arguments)
//! - 4: Operation failed (I/O)

use thiserror::Error;

use crate::{adjust::SelectionError, load::error::ParseError};

pub mod exit_codes {
    pub const USER_ERROR: i32 = 2;
    pub const OPERATION_FAILED: i32 = 4;
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Invalid taxonomy: {0}")]
    InvalidTaxonomy(String),

    #[error("Invalid ticket prefix: {0}")]
    Pattern(#[from] regex::Error),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error("Invalid date input: {0}")]
    InvalidDate(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Parse(_)
            | Error::InvalidTaxonomy(_)
            | Error::Pattern(_)
            | Error::Selection(_)
            | Error::InvalidDate(_)
            | Error::Json(_) => exit_codes::USER_ERROR,
            Error::Io(_) => exit_codes::OPERATION_FAILED,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
