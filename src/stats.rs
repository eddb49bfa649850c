//! Summary statistics over per-record statistics.
//!
//! [`StatsAccumulator`] folds records one at a time, so a summary can be
//! computed while streaming through a file without holding its records.

use serde::Serialize;

/// Round to two decimal places.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Summary statistics over a set of records.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StatsSummary {
    pub total_sequences: usize,
    pub total_bases: usize,
    pub average_length: f64,
    pub average_gc_content: f64,
}

/// A single-pass accumulator of per-record `(length, GC%)` statistics.
#[derive(Clone, Debug, Default)]
pub struct StatsAccumulator {
    count: usize,
    total_bases: usize,
    gc_sum: f64,
}

impl StatsAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one record's length and GC percentage.
    pub fn push(&mut self, length: usize, gc_content: f64) {
        self.count += 1;
        self.total_bases += length;
        self.gc_sum += gc_content;
    }

    /// The number of records seen so far.
    pub fn count(&self) -> usize {
        self.count
    }

    /// The total number of bases seen so far.
    pub fn total_bases(&self) -> usize {
        self.total_bases
    }

    /// Compute the [`StatsSummary`]; averages are `0.0` when no records were seen.
    pub fn summary(&self) -> StatsSummary {
        let (average_length, average_gc_content) = if self.count == 0 {
            (0.0, 0.0)
        } else {
            let n = self.count as f64;
            (
                round2(self.total_bases as f64 / n),
                round2(self.gc_sum / n),
            )
        };
        StatsSummary {
            total_sequences: self.count,
            total_bases: self.total_bases,
            average_length,
            average_gc_content,
        }
    }
}

impl Extend<(usize, f64)> for StatsAccumulator {
    fn extend<I: IntoIterator<Item = (usize, f64)>>(&mut self, iter: I) {
        for (length, gc_content) in iter {
            self.push(length, gc_content);
        }
    }
}

impl FromIterator<(usize, f64)> for StatsAccumulator {
    fn from_iter<I: IntoIterator<Item = (usize, f64)>>(iter: I) -> Self {
        let mut acc = StatsAccumulator::new();
        acc.extend(iter);
        acc
    }
}
