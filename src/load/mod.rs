//! Read the contents of a daily note into tasks

pub mod error;
pub mod parse;
pub mod validate;

use crate::{rules::Rules, task::Task, taxonomy::Taxonomy};

pub use error::{ParseError, Problem};
pub use parse::parse_line;
pub use validate::validate;

/// Extract every task of a note, in order of appearance
///
/// Lines that are not tasks are ignored. The first malformed or invalid task
/// aborts the whole note.
pub fn parse_notes(contents: &str, taxonomy: &Taxonomy, rules: &Rules) -> Result<Vec<Task>, ParseError> {
    let mut tasks = Vec::new();
    for (idx, text) in contents.lines().enumerate() {
        let line = idx + 1;
        let task = match parse_line(text, rules).map_err(|p| p.at(line))? {
            Some(task) => task,
            None => continue,
        };
        validate(&task, line, taxonomy)?;
        tasks.push(task);
    }
    Ok(tasks)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::task::{Field, Minutes, TaskType};

    fn taxonomy() -> Taxonomy {
        Taxonomy::from_pairs(vec![("Acme", vec!["Development", "Meetings"])]).unwrap()
    }

    #[test]
    fn extract_task_lines_from_markdown() {
        let content = "## TODAY\n\
            - [ ] 9:00 AM - 10:00 AM | ENTELECT-1834 - Test Harness\n\
            - [ ] 10:00 AM - 11:00 AM | Fix POC build\n\
            - [ ] 12:00 PM - 1:00 PM | Lunch break";
        let tasks = parse_notes(content, &taxonomy(), &Rules::default()).unwrap();
        assert_eq!(tasks.len(), 3);
        assert_eq!(tasks[0].description, "ENTELECT-1834 - Test Harness");
        assert_eq!(tasks[0].kind, TaskType::Ticket);
        assert_eq!(tasks[2].description, "Lunch break");
    }

    #[test]
    fn calculate_duration_in_hours() {
        let content = "- [ ] 9:00 AM - 10:00 AM | Task A\n- [ ] 1:00 PM - 3:00 PM | Task B";
        let tasks = parse_notes(content, &taxonomy(), &Rules::default()).unwrap();
        assert_eq!(tasks[0].duration, Minutes(60));
        assert_eq!(tasks[1].duration, Minutes(120));
        assert_eq!(tasks[1].duration.hours(), 2.0);
    }

    #[test]
    fn first_error_wins_with_line_number() {
        let content = "# Notes\n\
            - [ ] 9:00 AM - 10:00 AM | Acme | Development | Fine\n\
            \n\
            - [ ] 10:00 AM - 11:00 AM | Acme |  | Missing category\n\
            - [ ] 11:00 AM - 12:00 PM | Nope | Development | Unknown project";
        let err = parse_notes(content, &taxonomy(), &Rules::default()).unwrap_err();
        assert_eq!(err, Problem::EmptyField(Field::Category).at(4));
    }

    #[test]
    fn strict_reports_line() {
        let content = "- [ ] 9:00 AM - 10:00 AM | Acme | Development | Fine\n\
            - [ ] 10:00 AM - 11:00 AM | Legacy line";
        let rules = Rules::default().strict(true);
        let err = parse_notes(content, &taxonomy(), &rules).unwrap_err();
        assert_eq!(err, Problem::InvalidTaskFormat { segments: 1 }.at(2));
        assert_eq!(parse_notes(content, &taxonomy(), &Rules::default()).unwrap().len(), 2);
    }

    #[test]
    fn nothing_to_extract() {
        let tasks = parse_notes("# Empty day\n\nsome prose", &taxonomy(), &Rules::default()).unwrap();
        assert!(tasks.is_empty());
    }
}
