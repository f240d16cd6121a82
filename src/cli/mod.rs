//! Command-line driver: read the notes of each requested day and print the timesheet

pub mod dates;
pub mod report;
pub mod table;

use chrono::{Local, NaiveDate};
use clap::{App, Arg, ArgGroup, ArgMatches};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

use timesheet::{adjust, billable, load, rules::DEFAULT_TICKET_PREFIX, Error, Result, Rules, Task, Taxonomy};

use report::Report;
use table::Table;

pub fn app<'a, 'b>() -> App<'a, 'b> {
    App::new("timesheet")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Extract billable tasks from daily notes for timesheet entry")
        .arg(
            Arg::with_name("date")
                .short("d")
                .long("date")
                .value_name("YYYY-MM-DD")
                .takes_value(true)
                .help("Single date"),
        )
        .arg(
            Arg::with_name("range")
                .short("r")
                .long("range")
                .value_name("START:END")
                .takes_value(true)
                .help("Date range, both ends included"),
        )
        .arg(
            Arg::with_name("week")
                .short("w")
                .long("week")
                .takes_value(true)
                .possible_values(&["this", "last"])
                .help("Monday to Friday of this or last week"),
        )
        .group(
            ArgGroup::with_name("when")
                .args(&["date", "range", "week"])
                .required(true),
        )
        .arg(
            Arg::with_name("notes-dir")
                .short("n")
                .long("notes-dir")
                .env("NOTES_DIR")
                .default_value(".")
                .help("Directory holding one <YYYY-MM-DD>.md note per day"),
        )
        .arg(
            Arg::with_name("categories")
                .short("c")
                .long("categories")
                .value_name("FILE")
                .default_value("config/projects-categories.json")
                .help("JSON mapping of projects to their categories"),
        )
        .arg(
            Arg::with_name("strict")
                .long("strict")
                .help("Reject task lines without project and category"),
        )
        .arg(
            Arg::with_name("ticket-prefix")
                .long("ticket-prefix")
                .value_name("PREFIX")
                .default_value(DEFAULT_TICKET_PREFIX)
                .help("Tickets look like PREFIX-1234"),
        )
        .arg(
            Arg::with_name("round-up")
                .long("round-up")
                .value_name("IDX")
                .takes_value(true)
                .multiple(true)
                .use_delimiter(true)
                .validator(|s| s.parse::<usize>().map(|_| ()).map_err(|e| e.to_string()))
                .help("Positions (from 0) of each day's tasks that absorb the gap to 8h, days where one is missing are left as is"),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .value_name("FILE")
                .takes_value(true)
                .help("Write the task records there instead of stdout"),
        )
}

/// Everything the driver needs, extracted from the command line
#[derive(Debug)]
pub struct Options {
    pub dates: Vec<NaiveDate>,
    pub notes_dir: PathBuf,
    pub categories: PathBuf,
    pub strict: bool,
    pub ticket_prefix: String,
    pub round_up: Vec<usize>,
    pub output: Option<PathBuf>,
}

impl Options {
    pub fn from_matches(matches: &ArgMatches, today: NaiveDate) -> Result<Self> {
        let dates = if let Some(day) = matches.value_of("date") {
            vec![dates::parse_day(day)?]
        } else if let Some(range) = matches.value_of("range") {
            match range.split_once(':') {
                Some(_) => dates::expand(range, today)?,
                None => return Err(Error::InvalidDate(format!("'{}' is not START:END", range))),
            }
        } else {
            dates::expand(matches.value_of("week").unwrap_or("this"), today)?
        };
        let round_up = matches
            .values_of("round-up")
            .map(|vs| vs.filter_map(|v| v.parse::<usize>().ok()).collect())
            .unwrap_or_default();
        Ok(Self {
            dates,
            notes_dir: PathBuf::from(matches.value_of("notes-dir").unwrap_or(".")),
            categories: PathBuf::from(
                matches
                    .value_of("categories")
                    .unwrap_or("config/projects-categories.json"),
            ),
            strict: matches.is_present("strict"),
            ticket_prefix: matches
                .value_of("ticket-prefix")
                .unwrap_or(DEFAULT_TICKET_PREFIX)
                .to_string(),
            round_up,
            output: matches.value_of("output").map(PathBuf::from),
        })
    }
}

pub fn run(matches: &ArgMatches) -> Result<()> {
    let opts = Options::from_matches(matches, Local::now().date_naive())?;
    let rules = Rules::default()
        .strict(opts.strict)
        .with_ticket_prefix(&opts.ticket_prefix)?;
    let taxonomy = Taxonomy::from_json(&fs::read_to_string(&opts.categories)?)?;
    info!(
        dates = opts.dates.len(),
        projects = taxonomy.projects().count(),
        prefix = rules.ticket.prefix(),
        "processing"
    );
    eprintln!("Processing {} date(s)...", opts.dates.len());

    let mut days = Vec::new();
    for date in &opts.dates {
        if let Some(tasks) = read_day(&opts.notes_dir, *date, &taxonomy, &rules)? {
            days.push((*date, tasks));
        }
    }
    if days.is_empty() {
        eprintln!("No billable tasks found in any dates.");
        return Ok(());
    }

    for (date, tasks) in &mut days {
        match fill_day(tasks, &opts.round_up, &rules) {
            Ok(()) => {}
            Err(Error::Selection(e)) => {
                warn!(%date, "{}", e);
                eprintln!(
                    "{}",
                    Report::new("Gap not distributed")
                        .nonfatal()
                        .text(format!("{}: {}", date, e))
                        .hint(format!("tasks of {} are numbered 0 to {}", date, tasks.len() - 1))
                );
            }
            Err(e) => return Err(e),
        }
        eprintln!("{}", Table::from(tasks, rules.target).with_title(date));
    }

    let records = days
        .iter()
        .flat_map(|(_, tasks)| tasks.iter().map(Task::record))
        .collect::<Vec<_>>();
    let json = serde_json::to_string_pretty(&records)?;
    match &opts.output {
        Some(path) => {
            if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                fs::create_dir_all(dir)?;
            }
            fs::write(path, json)?;
            eprintln!("✓ Timesheet data saved to {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

/// Stretch the selected tasks of one day up to the target
///
/// A day already on target is left alone whatever the selection.
fn fill_day(tasks: &mut [Task], selected: &[usize], rules: &Rules) -> Result<()> {
    let gap = adjust::calculate_gap(tasks, rules.target);
    if selected.is_empty() || !gap.is_positive() {
        return Ok(());
    }
    adjust::distribute(tasks, selected, gap, rules.quantum)?;
    debug!(gap = %gap, "distributed gap");
    Ok(())
}

/// Billable tasks of the note for `date`, `None` if there is nothing to bill that day
fn read_day(dir: &Path, date: NaiveDate, taxonomy: &Taxonomy, rules: &Rules) -> Result<Option<Vec<Task>>> {
    let path = dir.join(format!("{}.md", date.format("%Y-%m-%d")));
    let name = path.display().to_string();
    let contents = match fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            warn!(%date, path = %name, "note not found");
            eprintln!(
                "{}",
                Report::new("No daily note")
                    .nonfatal()
                    .text(format!("{} does not exist, skipping {}", name, date))
            );
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };
    let tasks = match load::parse_notes(&contents, taxonomy, rules) {
        Ok(tasks) => tasks,
        Err(e) => {
            eprintln!("{}", Report::parse_failure(&name, &contents, &e));
            return Err(e.into());
        }
    };
    let parsed = tasks.len();
    let mut tasks = billable::filter_billable(tasks, rules);
    debug!(%date, parsed, billable = tasks.len(), "note parsed");
    if tasks.is_empty() {
        warn!(%date, "no billable tasks");
        eprintln!(
            "{}",
            Report::new("No billable tasks")
                .nonfatal()
                .text(format!("nothing to bill on {}", date))
                .hint("billable tasks need a ticket or a meeting keyword")
        );
        return Ok(None);
    }
    for task in &mut tasks {
        task.date = Some(date);
    }
    eprintln!("✓ Found {} billable task(s) for {}", tasks.len(), date);
    Ok(Some(tasks))
}
