//! Pretty-printing facility for error messages
//!
//! This is mostly a wrapper around `pest::error::Error::new_from_span`, which handles
//! the difficult part of the formatting. `Report` only adds aggregation of messages
//! as well as colored output.
//!
//! ```txt
//! --> Error: Unknown project
//!  |     --> notes/2026-01-06.md:4:1
//!  |      |
//!  |    4 | - [ ] 10:00 AM - 11:00 AM | Umbrella | Development | Work
//!  |      | ^-------------------------------------------------------^
//!  |      |
//!  |      = provided here
//!  |  unknown project 'Umbrella' (valid projects: Acme, Internal)
//!  |      ? hint: use one of Acme, Internal
//! ```

use std::fmt;

use timesheet::load::{parse::Rule, ParseError};

/// Location of an error: file name and the span of the offending line
pub type Loc<'i> = (&'i str, pest::Span<'i>);

/// Report for a single error or warning
///
/// All messages (`label` passed with `new`, arguments of `hint`
/// and `text`) should fit in a single line.
#[must_use]
#[derive(Debug)]
pub struct Report {
    /// determines the label (warning/error) and the color (yellow/red)
    fatal: bool,
    label: String,
    items: Vec<Item>,
}

/// Kinds of items that can be added to a report
#[derive(Debug)]
enum Item {
    /// code block
    Block(Box<pest::error::Error<Rule>>),
    /// important message
    Text(String),
    /// recommendations for fixes
    Hint(String),
}

impl Report {
    pub fn new<S>(msg: S) -> Self
    where
        S: ToString,
    {
        Self {
            fatal: true,
            label: msg.to_string(),
            items: Vec::new(),
        }
    }

    /// Mark as a warning rather that a fatal error
    pub fn nonfatal(mut self) -> Self {
        self.fatal = false;
        self
    }

    /// Add a code block and its associated message
    pub fn span<S>(mut self, loc: &Loc, msg: S) -> Self
    where
        S: ToString,
    {
        self.items.push(Item::Block(Box::new(
            pest::error::Error::new_from_span(
                pest::error::ErrorVariant::CustomError {
                    message: msg.to_string(),
                },
                loc.1,
            )
            .with_path(loc.0),
        )));
        self
    }

    /// Add an important note
    pub fn text<S>(mut self, msg: S) -> Self
    where
        S: ToString,
    {
        self.items.push(Item::Text(msg.to_string()));
        self
    }

    /// Add a hint on how to fix
    pub fn hint<S>(mut self, msg: S) -> Self
    where
        S: ToString,
    {
        self.items.push(Item::Hint(msg.to_string()));
        self
    }

    /// Describe a failure to read the note at `path`
    pub fn parse_failure(path: &str, contents: &str, err: &ParseError) -> Self {
        let report = Self::new(err.problem.label());
        let report = match line_span(contents, err.line) {
            Some(span) => report.span(&(path, span), "provided here"),
            None => report.text(format!("in {} at line {}", path, err.line)),
        };
        report.text(&err.problem).hint(err.problem.fix_hint())
    }
}

/// Span of the 1-based line `line` of `contents`, without its line ending
fn line_span(contents: &str, line: usize) -> Option<pest::Span<'_>> {
    let mut start = 0;
    for (idx, text) in contents.split_inclusive('\n').enumerate() {
        if idx + 1 == line {
            let body = text.trim_end_matches(&['\n', '\r'][..]);
            return pest::Span::new(contents, start, start + body.len());
        }
        start += text.len();
    }
    None
}

const RED: &str = "\x1b[0;91;1m";
const YELLOW: &str = "\x1b[0;93;1m";
const BLUE: &str = "\x1b[0;96;1m";
const WHITE: &str = "\x1b[0;1m";
const NONE: &str = "\x1b[0m";

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (color, header) = if self.fatal {
            (RED, "--> Error")
        } else {
            (YELLOW, "--> Warning")
        };
        writeln!(f, "{}{}:{} {}{}", color, header, WHITE, self.label, NONE)?;
        for item in &self.items {
            match item {
                Item::Block(err) => {
                    let mut align = "   ".to_string();
                    let mut align_found = false;
                    for line in format!("{}", err).split('\n') {
                        write!(
                            f,
                            " {}|{}  {}",
                            color,
                            if align_found { align.as_str() } else { "" },
                            BLUE
                        )?;
                        for c in line.chars() {
                            match c {
                                '-' if !align_found => {
                                    align_found = true;
                                    write!(f, "{}-", align)?;
                                }
                                ' ' if !align_found => {
                                    align.pop();
                                    write!(f, " ")?;
                                }
                                '|' => write!(f, "|{}", NONE)?,
                                '=' => write!(f, "={}", NONE)?,
                                '^' => write!(f, "{}^", color)?,
                                '␊' => (), // pest renders line endings visibly
                                _ => write!(f, "{}", c)?,
                            }
                        }
                        writeln!(f)?;
                    }
                }
                Item::Text(txt) => {
                    writeln!(f, " {}|  {}{}{}", color, WHITE, txt, NONE)?;
                }
                Item::Hint(txt) => {
                    writeln!(f, " {}|      {}? hint: {}{}", color, BLUE, NONE, txt)?;
                }
            }
        }
        Ok(())
    }
}
