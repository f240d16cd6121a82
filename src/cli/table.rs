//! Boxed summary of one day of billable tasks
//!
//! Tasks are grouped by project then category, in order of first appearance.

use std::fmt;

use timesheet::{adjust::Summary, Minutes, Task};

/// Longest description shown before truncation
const DESCRIPTION_WIDTH: usize = 60;

pub struct Table<'d> {
    title: Option<String>,
    data: &'d [Task],
    summary: Summary,
}

struct BoxFmt {
    width: usize,
    text: String,
}

struct ColFmt {
    width: usize,
    right: bool,
    label: BoxFmt,
    boxes: Vec<BoxFmt>,
}

struct GridFmt {
    labels: ColFmt,
    columns: Vec<ColFmt>,
    /// (label, boxes) of the line below the final separator
    footer: Option<(BoxFmt, Vec<BoxFmt>)>,
}

impl<'d> Table<'d> {
    pub fn from(data: &'d [Task], target: Minutes) -> Self {
        Self {
            title: None,
            data,
            summary: Summary::of(data, target),
        }
    }

    pub fn with_title<S: ToString>(mut self, title: S) -> Self {
        self.title = Some(title.to_string());
        self
    }

    fn groups(&self) -> Vec<(String, Vec<&'d Task>)> {
        let mut groups: Vec<(String, Vec<&Task>)> = Vec::new();
        for task in self.data {
            let key = match (task.project(), task.category()) {
                (Some(p), Some(c)) => format!("{} / {}", p, c),
                _ => String::from("(unassigned)"),
            };
            match groups.iter_mut().find(|(k, _)| *k == key) {
                Some((_, tasks)) => tasks.push(task),
                None => groups.push((key, vec![task])),
            }
        }
        groups
    }

    fn to_formatter(&self) -> GridFmt {
        let cols = vec![
            ColFmt::with_label(BoxFmt::from(String::from("Ticket")), false),
            ColFmt::with_label(BoxFmt::from(String::from("Description")), false),
            ColFmt::with_label(BoxFmt::from(String::from("Hours")), true),
            ColFmt::with_label(BoxFmt::from(String::from("Entry")), true),
        ];
        let mut grid = GridFmt::with_columns(cols);
        for (key, tasks) in self.groups() {
            let mut label = Some(key);
            for task in tasks {
                grid.push_line(
                    BoxFmt::from(label.take().unwrap_or_default()),
                    vec![
                        BoxFmt::ticket(task),
                        BoxFmt::description(&task.description),
                        BoxFmt::hours(task.duration),
                        BoxFmt::from(task.duration.clock()),
                    ],
                );
            }
        }
        grid.footer = Some((
            BoxFmt::from(String::from("Total")),
            vec![
                BoxFmt::from(String::new()),
                BoxFmt::from(String::new()),
                BoxFmt::hours(self.summary.total()),
                BoxFmt::from(self.summary.total().clock()),
            ],
        ));
        grid
    }
}

impl BoxFmt {
    fn from(text: String) -> Self {
        let width = text.chars().count();
        Self { text, width }
    }

    fn hours(m: Minutes) -> Self {
        Self::from(format!("{}h", m))
    }

    fn ticket(task: &Task) -> Self {
        match &task.ticket {
            Some(ticket) => Self::from(ticket.clone()),
            None => Self::from(format!("[{}]", task.kind)),
        }
    }

    fn description(d: &str) -> Self {
        if d.chars().count() > DESCRIPTION_WIDTH {
            Self::from(format!("{}...", d.chars().take(DESCRIPTION_WIDTH).collect::<String>()))
        } else {
            Self::from(d.to_string())
        }
    }
}

impl ColFmt {
    fn with_label(label: BoxFmt, right: bool) -> Self {
        Self {
            width: label.width,
            right,
            label,
            boxes: Vec::new(),
        }
    }

    fn push(&mut self, b: BoxFmt) {
        self.width = self.width.max(b.width);
        self.boxes.push(b);
    }
}

impl GridFmt {
    fn with_columns(columns: Vec<ColFmt>) -> Self {
        Self {
            labels: ColFmt::with_label(BoxFmt::from(String::new()), false),
            columns,
            footer: None,
        }
    }

    fn push_line(&mut self, label: BoxFmt, boxes: Vec<BoxFmt>) {
        self.labels.push(label);
        for (i, b) in boxes.into_iter().enumerate() {
            self.columns[i].push(b);
        }
    }

    fn widen_for_footer(&mut self) {
        if let Some((label, boxes)) = &self.footer {
            self.labels.width = self.labels.width.max(label.width);
            for (c, b) in self.columns.iter_mut().zip(boxes) {
                c.width = c.width.max(b.width);
            }
        }
    }

    fn separator(&self, f: &mut fmt::Formatter, left: &str, mid: &str, right: &str) -> fmt::Result {
        write!(f, "{}", left)?;
        self.labels.hline(f)?;
        for c in &self.columns {
            write!(f, "{}", mid)?;
            c.hline(f)?;
        }
        writeln!(f, "{}", right)
    }
}

impl fmt::Display for Table<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(title) = &self.title {
            writeln!(f, "{}=== {} ==={}", YELLOW, title, NONE)?;
        }
        let mut grid = self.to_formatter();
        grid.widen_for_footer();
        write!(f, "{}", grid)?;
        let total = self.summary.total();
        if self.summary.on_target() {
            writeln!(f, "Total: {}h {}✓{}", total, GREEN, NONE)
        } else {
            writeln!(
                f,
                "Total: {}h {}⚠ (expected {}h, gap {}h){}",
                total,
                RED,
                self.summary.target(),
                self.summary.gap(),
                NONE
            )
        }
    }
}

impl fmt::Display for GridFmt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // upper border
        self.separator(f, ULCORNER, LOJOIN, URCORNER)?;
        // title line
        write!(f, "{}", VLINE)?;
        self.labels.write_label(f)?;
        for c in &self.columns {
            write!(f, "{}", VLINE)?;
            c.write_label(f)?;
        }
        writeln!(f, "{}", VLINE)?;
        self.separator(f, RTJOIN, CROSS, LTJOIN)?;
        // main block
        for idx in 0..self.labels.len() {
            write!(f, "{}", VLINE)?;
            self.labels.write_item(f, idx)?;
            for c in &self.columns {
                write!(f, "{}", VLINE)?;
                c.write_item(f, idx)?;
            }
            writeln!(f, "{}", VLINE)?;
        }
        if let Some((label, boxes)) = &self.footer {
            self.separator(f, RTJOIN, CROSS, LTJOIN)?;
            write!(f, "{}", VLINE)?;
            label.write(f, self.labels.width, false)?;
            for (c, b) in self.columns.iter().zip(boxes) {
                write!(f, "{}", VLINE)?;
                b.write(f, c.width, c.right)?;
            }
            writeln!(f, "{}", VLINE)?;
        }
        // lower border
        self.separator(f, DLCORNER, HIJOIN, DRCORNER)
    }
}

impl ColFmt {
    fn write_label(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.label.write(f, self.width, self.right)
    }

    fn write_item(&self, f: &mut fmt::Formatter, idx: usize) -> fmt::Result {
        self.boxes[idx].write(f, self.width, self.right)
    }

    fn len(&self) -> usize {
        self.boxes.len()
    }

    fn hline(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", HLINE.repeat(self.width + 2))
    }
}

impl BoxFmt {
    fn write(&self, f: &mut fmt::Formatter, width: usize, right: bool) -> fmt::Result {
        let pad = " ".repeat(width.saturating_sub(self.width));
        if right {
            write!(f, " {}{} ", pad, self.text)
        } else {
            write!(f, " {}{} ", self.text, pad)
        }
    }
}

const HLINE: &str = "─";
const VLINE: &str = "│";
const ULCORNER: &str = "┌";
const URCORNER: &str = "┐";
const DLCORNER: &str = "└";
const DRCORNER: &str = "┘";
const LTJOIN: &str = "┤";
const RTJOIN: &str = "├";
const HIJOIN: &str = "┴";
const LOJOIN: &str = "┬";
const CROSS: &str = "┼";

const RED: &str = "\x1b[0;91;1m";
const GREEN: &str = "\x1b[0;92;1m";
const YELLOW: &str = "\x1b[0;93;1m";
const NONE: &str = "\x1b[0m";

#[cfg(test)]
mod test {
    use super::*;
    use timesheet::{load::parse_line, Rules};

    fn tasks(lines: &[&str]) -> Vec<Task> {
        lines
            .iter()
            .map(|l| parse_line(l, &Rules::default()).unwrap().unwrap())
            .collect()
    }

    #[test]
    fn groups_in_order_of_appearance() {
        let ts = tasks(&[
            "- [ ] 9:00 AM - 10:00 AM | Acme | Development | ENTELECT-1 | One",
            "- [ ] 10:00 AM - 11:00 AM | Internal | Meetings | Standup",
            "- [ ] 11:00 AM - 11:30 AM | Acme | Development | ENTELECT-2 | Two",
        ]);
        let table = Table::from(&ts, Minutes::from_hours(8));
        let groups = table.groups();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "Acme / Development");
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].0, "Internal / Meetings");
    }

    #[test]
    fn renders_rows_and_total() {
        let ts = tasks(&[
            "- [ ] 9:00 AM - 1:00 PM | Acme | Development | ENTELECT-1 | One",
            "- [ ] 1:00 PM - 5:00 PM | Acme | Meetings | Long workshop call",
        ]);
        let out = Table::from(&ts, Minutes::from_hours(8)).with_title("2026-01-06").to_string();
        assert!(out.contains("2026-01-06"));
        assert!(out.contains("ENTELECT-1"));
        assert!(out.contains("[meeting]"));
        assert!(out.contains(" 4h "));
        assert!(out.contains("Total: 8h"));
        assert!(out.contains('✓'));
        let short = Table::from(&ts[..1], Minutes::from_hours(8)).to_string();
        assert!(short.contains("Total: 4h"));
        assert!(short.contains("expected 8h, gap 4h"));
    }

    #[test]
    fn entry_column() {
        let ts = tasks(&[
            "- [ ] 9:00 AM - 10:30 AM | Acme | Development | ENTELECT-1 | One",
            "- [ ] 10:30 AM - 10:40 AM | Acme | Meetings | Quick sync",
        ]);
        let out = Table::from(&ts, Minutes::from_hours(8)).to_string();
        assert!(out.contains("1.5h"));
        assert!(out.contains("1h30"));
        assert!(out.contains("0h10"));
        assert!(out.contains("1h40"));
    }

    #[test]
    fn truncates_descriptions() {
        let long = "x".repeat(80);
        let b = BoxFmt::description(&long);
        assert_eq!(b.width, DESCRIPTION_WIDTH + 3);
        assert!(b.text.ends_with("..."));
        assert_eq!(BoxFmt::description("short").text, "short");
    }
}
