use std::ops::Range;

use crate::hierarchy::Level;

/// Lazy Cartesian product of generalization level ranges.
///
/// Tuples are produced in lexicographic order with the last position varying
/// fastest. No ranges yields a single empty tuple; any empty range yields
/// nothing.
#[derive(Debug, Clone)]
pub struct LevelProduct {
    ranges: Vec<Range<Level>>,
    next: Option<Vec<Level>>,
}

impl LevelProduct {
    pub fn new(ranges: Vec<Range<Level>>) -> Self {
        let next = if ranges.iter().any(Range::is_empty) {
            None
        } else {
            Some(ranges.iter().map(|range| range.start).collect())
        };
        Self { ranges, next }
    }

    /// Total number of tuples, `None` when it overflows `usize`.
    pub fn total(&self) -> Option<usize> {
        self.ranges
            .iter()
            .try_fold(1usize, |acc, range| acc.checked_mul(range.len()))
    }

    pub fn restart(&mut self) {
        *self = Self::new(std::mem::take(&mut self.ranges));
    }

    fn remaining(&self, current: &[Level]) -> Option<usize> {
        // Tuples strictly after `current`, counted like an odometer reading.
        let mut after = 0usize;
        let mut place = 1usize;
        for (range, level) in self.ranges.iter().zip(current).rev() {
            let digits = range.end - 1 - level;
            after = after.checked_add(digits.checked_mul(place)?)?;
            place = place.checked_mul(range.len())?;
        }
        after.checked_add(1)
    }
}

impl Iterator for LevelProduct {
    type Item = Vec<Level>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        let mut successor = current.clone();
        for position in (0..successor.len()).rev() {
            successor[position] += 1;
            if successor[position] < self.ranges[position].end {
                self.next = Some(successor);
                return Some(current);
            }
            successor[position] = self.ranges[position].start;
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.next {
            None => (0, Some(0)),
            Some(current) => match self.remaining(current) {
                Some(count) => (count, Some(count)),
                None => (usize::MAX, None),
            },
        }
    }
}
