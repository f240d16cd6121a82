//! Convert one line of a note into a task
//!
//! The grammar only recognizes the fixed prefix of a task line (checkbox and time span).
//! The free-text tail is then split on pipes and resolved into one of the
//! historical formats, see `Tail`.

use pest::Parser;
use pest_derive::*;

/// Wrapper around Pest's `Pair`
type Pair<'i> = pest::iterators::Pair<'i, Rule>;

use crate::{
    billable,
    load::error::Problem,
    rules::{Rules, TicketPattern},
    task::{Assignment, Field, Task, TaskType, TimeOfDay},
};

/// Pest-generated parser
#[derive(Parser)]
#[grammar = "load/notes.pest"]
pub struct NotesParser;

// get first and rest of inner
macro_rules! decapitate {
    ( $node:expr ) => {{
        let mut items = $node.into_inner();
        let fst = items.next().unwrap_or_else(|| panic!("No head"));
        (fst, items)
    }};
}

// extract three-element inner
macro_rules! triplet {
    ( $node:expr ) => {{
        let mut items = $node.into_inner();
        let fst = items.next().unwrap_or_else(|| panic!("No 1st"));
        let snd = items.next().unwrap_or_else(|| panic!("No 2nd"));
        let thr = items.next().unwrap_or_else(|| panic!("No 3rd"));
        assert!(items.next().is_none());
        (fst, snd, thr)
    }};
}

/// The parts of a task line as written, before any interpretation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawLine<'i> {
    pub start: &'i str,
    pub end: &'i str,
    pub tail: &'i str,
}

/// Locate the task pattern in `line`
///
/// Lines that do not contain it are not errors, they are just not tasks.
pub fn match_line(line: &str) -> Option<RawLine<'_>> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let pairs = NotesParser::parse(Rule::line, line).ok()?;
    let line = pairs.into_iter().next()?;
    let (task, _eoi) = decapitate!(line);
    assert_eq!(task.as_rule(), Rule::task);
    Some(read_task(task))
}

/// Grammar ensures this cannot fail
fn read_task(pair: Pair) -> RawLine {
    let (start, end, tail) = triplet!(pair);
    assert_eq!(start.as_rule(), Rule::time);
    assert_eq!(end.as_rule(), Rule::time);
    assert_eq!(tail.as_rule(), Rule::tail);
    RawLine {
        start: start.as_str(),
        end: end.as_str(),
        tail: tail.as_str(),
    }
}

/// Interpretation of the text after the time span
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tail<'i> {
    /// `description`, possibly mentioning a ticket somewhere
    Legacy {
        description: &'i str,
        ticket: Option<&'i str>,
    },
    /// `project | category | description`
    Plain {
        project: &'i str,
        category: &'i str,
        description: &'i str,
    },
    /// `project | category | ticket | description`
    Ticketed {
        project: &'i str,
        category: &'i str,
        ticket: &'i str,
        description: String,
    },
}

impl<'i> Tail<'i> {
    /// Decide the format from the number and content of segments
    ///
    /// With 4 segments or more, the third one has to be a ticket for the line to count
    /// as ticketed; otherwise it is taken as the description and the rest is dropped.
    /// Segments past the fourth belong to the description of a ticketed line.
    pub fn read(tail: &'i str, ticket: &TicketPattern, strict: bool) -> Result<Self, Problem> {
        let segments = tail.split('|').map(str::trim).collect::<Vec<_>>();
        match segments.as_slice() {
            [project, category, description] => Ok(Tail::Plain {
                project: *project,
                category: *category,
                description: *description,
            }),
            [project, category, third, rest @ ..] if ticket.is_exact(third) => Ok(Tail::Ticketed {
                project: *project,
                category: *category,
                ticket: *third,
                description: rest.join(" | "),
            }),
            [project, category, description, _, ..] => Ok(Tail::Plain {
                project: *project,
                category: *category,
                description: *description,
            }),
            _ if strict => Err(Problem::InvalidTaskFormat {
                segments: segments.len(),
            }),
            _ => {
                let description = tail.trim();
                if description.is_empty() {
                    return Err(Problem::EmptyField(Field::Description));
                }
                Ok(Tail::Legacy {
                    description,
                    ticket: ticket.find(description),
                })
            }
        }
    }
}

/// Turn a single line into a classified task, or `None` if it is not a task line
///
/// Taxonomy checks are not done here, see `validate`.
pub fn parse_line(line: &str, rules: &Rules) -> Result<Option<Task>, Problem> {
    let raw = match match_line(line) {
        Some(raw) => raw,
        None => return Ok(None),
    };
    let start = raw.start.parse::<TimeOfDay>()?;
    let end = raw.end.parse::<TimeOfDay>()?;
    let (description, ticket, assignment) = match Tail::read(raw.tail, &rules.ticket, rules.strict_format)? {
        Tail::Legacy {
            description,
            ticket,
        } => (description.to_string(), ticket, None),
        Tail::Plain {
            project,
            category,
            description,
        } => (description.to_string(), None, Some((project, category))),
        Tail::Ticketed {
            project,
            category,
            ticket,
            description,
        } => (description, Some(ticket), Some((project, category))),
    };
    let mut task = Task {
        start,
        end,
        duration: start.until(end),
        description,
        ticket: ticket.map(String::from),
        assignment: assignment.map(|(project, category)| Assignment {
            project: project.to_string(),
            category: category.to_string(),
        }),
        kind: TaskType::Other,
        date: None,
    };
    task.kind = billable::classify(&task, rules);
    Ok(Some(task))
}
