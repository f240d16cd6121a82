//! Expand a date argument into the list of days to process
//!
//! Accepted forms:
//! - `2026-01-06`: a single day
//! - `2026-01-05:2026-01-09`: every day in between, both ends included
//! - `this` or `last`: Monday to Friday of the current or previous week

use chrono::{Datelike, Days, NaiveDate};

use timesheet::{Error, Result};

const FORMAT: &str = "%Y-%m-%d";

pub fn parse_day(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), FORMAT)
        .map_err(|e| Error::InvalidDate(format!("'{}' is not a YYYY-MM-DD date ({})", s, e)))
}

pub fn range(start: NaiveDate, end: NaiveDate) -> Result<Vec<NaiveDate>> {
    if end < start {
        return Err(Error::InvalidDate(format!(
            "range ends on {} before it starts on {}",
            end, start
        )));
    }
    Ok(start.iter_days().take_while(|d| *d <= end).collect())
}

/// Working days of the week containing `today`, shifted by `weeks_back`
pub fn work_week(today: NaiveDate, weeks_back: u64) -> Result<Vec<NaiveDate>> {
    let since_monday = today.weekday().num_days_from_monday() as u64;
    let monday = today
        .checked_sub_days(Days::new(since_monday + 7 * weeks_back))
        .ok_or_else(|| Error::InvalidDate(format!("no week before {}", today)))?;
    Ok(monday.iter_days().take(5).collect())
}

pub fn expand(input: &str, today: NaiveDate) -> Result<Vec<NaiveDate>> {
    match input.trim() {
        "this" => work_week(today, 0),
        "last" => work_week(today, 1),
        s => match s.split_once(':') {
            Some((start, end)) => range(parse_day(start)?, parse_day(end)?),
            None => Ok(vec![parse_day(s)?]),
        },
    }
}

#[cfg(test)]
mod test {
    use super::*;

    macro_rules! d {
        ( $y:tt - $m:tt - $d:tt ) => {
            NaiveDate::from_ymd_opt($y, $m, $d).unwrap()
        };
    }

    fn today() -> NaiveDate {
        // a Wednesday
        d!(2026 - 1 - 7)
    }

    #[test]
    fn single_date() {
        assert_eq!(expand("2026-01-06", today()).unwrap(), vec![d!(2026 - 1 - 6)]);
    }

    #[test]
    fn inclusive_range() {
        let days = expand("2026-01-30:2026-02-02", today()).unwrap();
        assert_eq!(
            days,
            vec![d!(2026 - 1 - 30), d!(2026 - 1 - 31), d!(2026 - 2 - 1), d!(2026 - 2 - 2)]
        );
        assert_eq!(expand("2026-01-06:2026-01-06", today()).unwrap().len(), 1);
    }

    #[test]
    fn weeks() {
        let this = expand("this", today()).unwrap();
        assert_eq!(this.first(), Some(&d!(2026 - 1 - 5)));
        assert_eq!(this.last(), Some(&d!(2026 - 1 - 9)));
        let last = expand("last", today()).unwrap();
        assert_eq!(last.first(), Some(&d!(2025 - 12 - 29)));
        assert_eq!(last.len(), 5);
        let monday = work_week(d!(2026 - 1 - 5), 0).unwrap();
        assert_eq!(monday[0], d!(2026 - 1 - 5));
    }

    #[test]
    fn rejects() {
        assert!(matches!(expand("2026-02-30", today()), Err(Error::InvalidDate(_))));
        assert!(matches!(expand("yesterday", today()), Err(Error::InvalidDate(_))));
        assert!(matches!(expand("2026-01-09:2026-01-05", today()), Err(Error::InvalidDate(_))));
    }
}
