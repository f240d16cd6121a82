//! Minute-precise time management for a single nominal day
//!
//! Times are `H:MM AM/PM`, not timestamps: there is no date and no timezone
//! attached, so only the ordering within one day matters.
//!
//! Durations are whole `Minutes` rather than fractional hours, so that
//! repeated additions stay exact. Hours only appear when displaying.

use num_traits::Zero;
use std::{fmt, iter, ops, str::FromStr};

/// A duration, possibly negative, with minute precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Minutes(pub i64);

impl Minutes {
    pub const HOUR: Self = Self(60);

    pub fn from_hours(h: i64) -> Self {
        Self(h * 60)
    }

    /// Fractional hours, for display and serialization only
    pub fn hours(self) -> f64 {
        self.0 as f64 / 60.0
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Portal notation: `1h30`, `2h`, `0h15`
    pub fn clock(self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.abs();
        let (h, m) = (abs / 60, abs % 60);
        if m == 0 {
            format!("{}{}h", sign, h)
        } else {
            format!("{}{}h{:02}", sign, h, m)
        }
    }
}

impl fmt::Display for Minutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // exact when whole or on a hundredth of an hour (1, 1.5, 2.25), otherwise rounded to 0.01
        let hours = self.hours();
        if self.0 % 60 == 0 {
            write!(f, "{}", self.0 / 60)
        } else if (self.0 * 100) % 60 == 0 {
            write!(f, "{}", hours)
        } else {
            write!(f, "{:.2}", hours)
        }
    }
}

impl ops::Add for Minutes {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl ops::AddAssign for Minutes {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl ops::Sub for Minutes {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl ops::Mul<i64> for Minutes {
    type Output = Self;
    fn mul(self, n: i64) -> Self {
        Self(self.0 * n)
    }
}

impl Zero for Minutes {
    fn zero() -> Self {
        Self(0)
    }

    fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl iter::Sum for Minutes {
    fn sum<I: Iterator<Item = Self>>(it: I) -> Self {
        it.fold(Self::zero(), |acc, m| acc + m)
    }
}

impl<'a> iter::Sum<&'a Minutes> for Minutes {
    fn sum<I: Iterator<Item = &'a Self>>(it: I) -> Self {
        it.copied().sum()
    }
}

/// Morning or afternoon
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Meridiem {
    Am,
    Pm,
}

impl fmt::Display for Meridiem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Meridiem::Am => write!(f, "AM"),
            Meridiem::Pm => write!(f, "PM"),
        }
    }
}

/// A time of day on the 12-hour clock
///
/// Comparisons follow the chronological order within the nominal day,
/// `12:xx AM` being the earliest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    /// minutes since midnight, in 0..24*60
    since_midnight: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimeError {
    #[error("'{0}' is not of the form H:MM AM/PM")]
    Shape(String),
    #[error("hour {0} is not on the 12-hour clock")]
    Hour(u8),
    #[error("minute {0} does not exist")]
    Minute(u8),
}

impl TimeError {
    /// What message to show to help fix the time
    pub fn fix_hint(&self) -> String {
        use TimeError::*;
        match self {
            Shape(_) => "write times as e.g. '9:00 AM' or '12:30 PM'".to_string(),
            Hour(h) => format!("{} is not in the range 1 ..= 12", h),
            Minute(m) => format!("{} is not in the range 0 ..= 59", m),
        }
    }
}

impl TimeOfDay {
    pub fn from(hour: u8, minute: u8, meridiem: Meridiem) -> Result<Self, TimeError> {
        if !(1..=12).contains(&hour) {
            return Err(TimeError::Hour(hour));
        }
        if minute > 59 {
            return Err(TimeError::Minute(minute));
        }
        let hour = (hour % 12) as u16 + if meridiem == Meridiem::Pm { 12 } else { 0 };
        Ok(Self {
            since_midnight: hour * 60 + minute as u16,
        })
    }

    pub fn hour(self) -> u8 {
        match (self.since_midnight / 60) % 12 {
            0 => 12,
            h => h as u8,
        }
    }

    pub fn minute(self) -> u8 {
        (self.since_midnight % 60) as u8
    }

    pub fn meridiem(self) -> Meridiem {
        if self.since_midnight < 12 * 60 {
            Meridiem::Am
        } else {
            Meridiem::Pm
        }
    }

    /// Signed distance from `self` to `later`
    ///
    /// Not clamped: if `later` is actually earlier in the day the result is negative.
    pub fn until(self, later: Self) -> Minutes {
        Minutes(later.since_midnight as i64 - self.since_midnight as i64)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02} {}", self.hour(), self.minute(), self.meridiem())
    }
}

impl FromStr for TimeOfDay {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let shape = || TimeError::Shape(s.to_string());
        let (clock, meridiem) = s.split_once(' ').ok_or_else(shape)?;
        let meridiem = match meridiem {
            "AM" => Meridiem::Am,
            "PM" => Meridiem::Pm,
            _ => return Err(shape()),
        };
        let (hour, minute) = clock.split_once(':').ok_or_else(shape)?;
        let digits = |t: &str| !t.is_empty() && t.bytes().all(|b| b.is_ascii_digit());
        if !(digits(hour) && hour.len() <= 2 && digits(minute) && minute.len() == 2) {
            return Err(shape());
        }
        // both fit in a u8 after the length checks above
        let hour = hour.parse::<u8>().map_err(|_| shape())?;
        let minute = minute.parse::<u8>().map_err(|_| shape())?;
        Self::from(hour, minute, meridiem)
    }
}

/// Duration between two `H:MM AM/PM` times on the same nominal day
pub fn compute_duration(start: &str, end: &str) -> Result<Minutes, TimeError> {
    let start = start.parse::<TimeOfDay>()?;
    let end = end.parse::<TimeOfDay>()?;
    Ok(start.until(end))
}
