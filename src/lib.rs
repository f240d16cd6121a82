//! timesheet - billable work records from daily task notes
//!
//! Notes are plain markdown where each task line looks like
//!
//! ```txt
//! - [ ] 9:00 AM - 10:30 AM | Acme | Development | ENTELECT-1834 | Test harness
//! ```
//!
//! # Module Organization
//!
//! - `task`: task records, times of day and exact durations
//! - `load`: note lines to tasks, with taxonomy validation
//! - `billable`: task classification and the billable filter
//! - `adjust`: daily totals and gap distribution
//! - `rules`: tunable keywords, target and formats
//! - `taxonomy`: project → categories mapping
//! - `error`: crate-level error type
//!
//! Nothing in here touches the filesystem or logs anything.

pub mod adjust;
pub mod billable;
pub mod error;
pub mod load;
pub mod rules;
pub mod task;
pub mod taxonomy;

pub use error::{Error, Result};
pub use rules::Rules;
pub use task::{Minutes, Task, TaskType};
pub use taxonomy::Taxonomy;
