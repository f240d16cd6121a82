//! Tunable constants of the extraction pipeline
//!
//! Nothing here is global: a `Rules` value is built once (usually with
//! `Rules::default()`) and passed down to whatever needs it.

use regex::Regex;

use crate::task::Minutes;

/// Recognizes ticket identifiers of the form `PREFIX-1234`
#[derive(Debug, Clone)]
pub struct TicketPattern {
    prefix: String,
    exact: Regex,
    anywhere: Regex,
}

impl TicketPattern {
    pub fn new(prefix: &str) -> Result<Self, regex::Error> {
        let body = format!(r"{}-[0-9]+", regex::escape(prefix));
        Ok(Self {
            prefix: prefix.to_string(),
            exact: Regex::new(&format!("^{}$", body))?,
            anywhere: Regex::new(&body)?,
        })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The whole of `s` is a ticket
    pub fn is_exact(&self, s: &str) -> bool {
        self.exact.is_match(s)
    }

    /// First ticket mentioned somewhere in `s`
    pub fn find<'s>(&self, s: &'s str) -> Option<&'s str> {
        self.anywhere.find(s).map(|m| m.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct Rules {
    /// billable time expected for one day
    pub target: Minutes,
    /// granularity of the gap shares
    pub quantum: Minutes,
    /// case-insensitive substrings of a description that denote a meeting
    pub meeting_keywords: Vec<String>,
    /// category that denotes a meeting, compared case-insensitively
    pub meeting_category: String,
    /// case-insensitive substrings of a description that make it non-billable
    pub exclusion_keywords: Vec<String>,
    pub ticket: TicketPattern,
    /// reject lines that are not in the `project | category | ...` format
    pub strict_format: bool,
}

pub const DEFAULT_TICKET_PREFIX: &str = "ENTELECT";

impl Default for Rules {
    fn default() -> Self {
        let words = |ws: &[&str]| ws.iter().map(|w| w.to_string()).collect();
        Self {
            target: Minutes::from_hours(8),
            quantum: Minutes(15),
            meeting_keywords: words(&["MEETING", "zoom", "call", "DSU", "standup", "sync"]),
            meeting_category: "meetings".to_string(),
            exclusion_keywords: words(&["lunch", "break"]),
            ticket: TicketPattern::new(DEFAULT_TICKET_PREFIX).expect("valid ticket regex"),
            strict_format: false,
        }
    }
}

impl Rules {
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict_format = strict;
        self
    }

    pub fn with_target(mut self, target: Minutes) -> Self {
        self.target = target;
        self
    }

    pub fn with_ticket_prefix(mut self, prefix: &str) -> Result<Self, regex::Error> {
        self.ticket = TicketPattern::new(prefix)?;
        Ok(self)
    }

    pub fn with_meeting_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        self.meeting_keywords = keywords.into_iter().map(|k| k.to_string()).collect();
        self
    }

    pub fn with_exclusion_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        self.exclusion_keywords = keywords.into_iter().map(|k| k.to_string()).collect();
        self
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn ticket_matching() {
        let t = TicketPattern::new("ENTELECT").unwrap();
        assert!(t.is_exact("ENTELECT-1834"));
        assert!(!t.is_exact("ENTELECT-"));
        assert!(!t.is_exact("entelect-1834"));
        assert!(!t.is_exact("ENTELECT-1834 - Test"));
        assert!(!t.is_exact("INVALID-123"));
        assert_eq!(t.find("ENTELECT-1834 - Test Harness"), Some("ENTELECT-1834"));
        assert_eq!(t.find("Review ENTELECT-77 feedback"), Some("ENTELECT-77"));
        assert_eq!(t.find("Fix POC build"), None);
        assert!(!t.is_exact("ENTELECT-١٢٣"));
        assert!(!t.is_exact("ENTELECT-１２"));
        assert_eq!(t.find("Review ENTELECT-١٢٣"), None);
    }

    #[test]
    fn prefix_is_literal() {
        let t = TicketPattern::new("A.B").unwrap();
        assert!(t.is_exact("A.B-1"));
        assert!(!t.is_exact("AxB-1"));
    }

    #[test]
    fn defaults() {
        let rules = Rules::default();
        assert_eq!(rules.target, Minutes(480));
        assert_eq!(rules.quantum, Minutes(15));
        assert!(!rules.strict_format);
        assert_eq!(rules.ticket.prefix(), "ENTELECT");
        assert_eq!(rules.exclusion_keywords, vec!["lunch", "break"]);
    }
}
