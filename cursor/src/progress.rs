//! Whole-percent progress reporting.

use std::fmt;

/// Turns a growing position into whole-percent callbacks.
///
/// The callback fires once for every 1% of `total` crossed and never
/// reports more than 100.
pub struct Progress<'a> {
    step: usize,
    next: usize,
    percent: u8,
    callback: &'a mut dyn FnMut(u8),
}

impl<'a> Progress<'a> {
    /// Creates a meter over `total` units.
    pub fn new(total: usize, callback: &'a mut dyn FnMut(u8)) -> Self {
        let step = (total / 100).max(1);
        Self {
            step,
            next: step,
            percent: 0,
            callback,
        }
    }

    /// Records that `position` units are done.
    pub fn update(&mut self, position: usize) {
        while position >= self.next && self.percent < 100 {
            self.percent += 1;
            self.next = self.next.saturating_add(self.step);
            (self.callback)(self.percent);
        }
    }

    /// Returns the last reported percentage.
    #[must_use]
    pub const fn percent(&self) -> u8 {
        self.percent
    }
}

impl fmt::Debug for Progress<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Progress")
            .field("step", &self.step)
            .field("next", &self.next)
            .field("percent", &self.percent)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_each_percent_once() {
        let mut seen = Vec::new();
        let mut record = |percent: u8| seen.push(percent);
        let mut progress = Progress::new(1000, &mut record);
        progress.update(5);
        progress.update(10);
        progress.update(19);
        progress.update(35);
        drop(progress);
        assert_eq!(seen, vec![1, 2, 3]);
    }

    #[test]
    fn never_exceeds_one_hundred() {
        let mut last = 0u8;
        let mut record = |percent: u8| last = percent;
        let mut progress = Progress::new(10, &mut record);
        progress.update(10_000);
        assert_eq!(progress.percent(), 100);
        drop(progress);
        assert_eq!(last, 100);
    }

    #[test]
    fn backwards_moves_are_silent() {
        let mut calls = 0;
        let mut record = |_: u8| calls += 1;
        let mut progress = Progress::new(200, &mut record);
        progress.update(100);
        progress.update(3);
        drop(progress);
        assert_eq!(calls, 50);
    }
}
