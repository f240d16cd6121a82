//! Bring a day up to its target by stretching selected tasks
//!
//! All arithmetic is done on whole minutes, so the total after distribution is
//! exactly the total before plus the gap.

use num_traits::Zero;
use std::ops;

use crate::task::{Minutes, Task};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("Selected task #{index} does not exist, there are only {len} tasks")]
    OutOfRange { index: usize, len: usize },
}

/// Sum of all durations
pub fn calculate_total(tasks: &[Task]) -> Minutes {
    tasks.iter().map(|t| t.duration).sum()
}

/// How much is missing to reach `target`, never negative
pub fn calculate_gap(tasks: &[Task], target: Minutes) -> Minutes {
    Summary::of(tasks, target).gap()
}

/// Spread `gap` over the tasks at `selected`
///
/// Each selected task receives the same share, rounded down to a multiple of `quantum`.
/// What rounding leaves over goes entirely to the selected task with the lowest index.
/// Nothing happens if the selection is empty or the gap is not positive.
pub fn distribute(
    tasks: &mut [Task],
    selected: &[usize],
    gap: Minutes,
    quantum: Minutes,
) -> Result<(), SelectionError> {
    if selected.is_empty() || !gap.is_positive() {
        return Ok(());
    }
    let mut selected = selected.to_vec();
    selected.sort_unstable();
    selected.dedup();
    if let Some(&index) = selected.iter().find(|&&i| i >= tasks.len()) {
        return Err(SelectionError::OutOfRange {
            index,
            len: tasks.len(),
        });
    }
    let count = selected.len() as i64;
    let share = if quantum.is_positive() {
        Minutes(gap.0 / (count * quantum.0) * quantum.0)
    } else {
        Minutes(gap.0 / count)
    };
    let remainder = gap - share * count;
    for (rank, &index) in selected.iter().enumerate() {
        tasks[index].duration += share;
        if rank == 0 {
            tasks[index].duration += remainder;
        }
    }
    Ok(())
}

/// Running total of a day against its target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    total: Minutes,
    target: Minutes,
}

impl Summary {
    pub fn new(target: Minutes) -> Self {
        Self {
            total: Minutes::zero(),
            target,
        }
    }

    pub fn of(tasks: &[Task], target: Minutes) -> Self {
        let mut sum = Self::new(target);
        for task in tasks {
            sum += task;
        }
        sum
    }

    pub fn total(&self) -> Minutes {
        self.total
    }

    pub fn target(&self) -> Minutes {
        self.target
    }

    pub fn gap(&self) -> Minutes {
        if self.total < self.target {
            self.target - self.total
        } else {
            Minutes::zero()
        }
    }

    pub fn on_target(&self) -> bool {
        self.total == self.target
    }
}

impl ops::AddAssign<&Task> for Summary {
    fn add_assign(&mut self, task: &Task) {
        self.total += task.duration;
    }
}

#[cfg(test)]
#[rustfmt::skip]
mod test {
    use super::*;
    use crate::task::TaskType;

    const QUARTER: Minutes = Minutes(15);

    fn tasks(minutes: &[i64]) -> Vec<Task> {
        minutes
            .iter()
            .map(|&m| Task {
                start: "9:00 AM".parse().unwrap(),
                end: "9:00 AM".parse().unwrap(),
                duration: Minutes(m),
                description: "work".to_string(),
                ticket: None,
                assignment: None,
                kind: TaskType::Other,
                date: None,
            })
            .collect()
    }

    fn durations(tasks: &[Task]) -> Vec<i64> {
        tasks.iter().map(|t| t.duration.0).collect()
    }

    macro_rules! gap {
        ( $minutes:expr => $gap:expr ) => {
            assert_eq!(calculate_gap(&tasks(&$minutes), Minutes::from_hours(8)), Minutes($gap));
        };
    }

    macro_rules! spread {
        ( $minutes:expr, $selected:expr, $gap:expr => $expected:expr ) => {{
            let mut ts = tasks(&$minutes);
            let selected: &[usize] = &$selected;
            let expected: Vec<i64> = $expected.to_vec();
            let before = calculate_total(&ts);
            distribute(&mut ts, selected, Minutes($gap), QUARTER).unwrap();
            assert_eq!(durations(&ts), expected);
            if !selected.is_empty() && $gap > 0 {
                assert_eq!(calculate_total(&ts), before + Minutes($gap));
            }
        }};
    }

    #[test]
    fn gap_to_target() {
        gap!([120, 30, 150] => 180);
        gap!([300, 180] => 0);
        gap!([300, 240] => 0);
        gap!([] => 480);
    }

    #[test]
    fn total() {
        assert_eq!(calculate_total(&tasks(&[120, 30, 150])), Minutes(300));
        assert_eq!(calculate_total(&[]), Minutes(0));
        assert_eq!(calculate_total(&tasks(&[120, -60])), Minutes(60));
    }

    #[test]
    fn even_split() {
        spread!([120, 120, 120], [0, 1, 2], 60 => [150, 135, 135]);
        spread!([60, 60], [0, 1], 120 => [120, 120]);
        spread!([60, 60, 60], [1], 45 => [60, 105, 60]);
    }

    #[test]
    fn remainder_goes_to_lowest_index() {
        spread!([60, 60, 60], [2, 0], 50 => [95, 60, 75]);
        spread!([60, 60, 60], [2, 1], 10 => [60, 70, 60]);
        spread!([60, 60, 60, 60, 60], [0, 1, 2, 3, 4], 60 => [120, 60, 60, 60, 60]);
        spread!([60, 60], [1, 1, 0], 37 => [82, 75]);
    }

    #[test]
    fn untouched() {
        spread!([120, 120], [], 60 => [120, 120]);
        spread!([120, 120], [0, 1], 0 => [120, 120]);
        spread!([120, 120], [0, 1], -30 => [120, 120]);
        // nothing to fill, so a stale selection is not looked at
        spread!([480], [3], 0 => [480]);
        spread!([300, 180], [0, 7], -15 => [300, 180]);
    }

    #[test]
    fn out_of_range() {
        let mut ts = tasks(&[60, 60]);
        assert_eq!(
            distribute(&mut ts, &[0, 2], Minutes(60), QUARTER),
            Err(SelectionError::OutOfRange { index: 2, len: 2 })
        );
        assert_eq!(durations(&ts), vec![60, 60]);
    }

    #[test]
    fn summary() {
        let ts = tasks(&[240, 240]);
        let sum = Summary::of(&ts, Minutes::from_hours(8));
        assert!(sum.on_target());
        assert_eq!(sum.gap(), Minutes(0));
        let sum = Summary::of(&ts[..1], Minutes::from_hours(8));
        assert_eq!(sum.total(), Minutes(240));
        assert_eq!(sum.gap(), Minutes(240));
    }
}
