//! X-sorted index over the shared x-axis, used for hit-testing.
//!
//! Built by the chart's draw hook from the current `VizData`. Entries are
//! `(x, data_idx)` pairs sorted by `x`, so a nearest lookup is a single
//! binary search regardless of whether the input was monotonic.

/// Sorted lookup table from x value to data index
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HitIndex {
    entries: Vec<(f64, usize)>,
}

impl HitIndex {
    /// Build from x-axis values; non-finite values are not indexed
    pub fn build(xs: &[f64]) -> Self {
        let mut entries: Vec<(f64, usize)> = xs
            .iter()
            .enumerate()
            .filter(|(_, x)| x.is_finite())
            .map(|(idx, &x)| (x, idx))
            .collect();
        entries.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Data index whose x value is nearest to `x`; ties go to the lower x
    pub fn nearest(&self, x: f64) -> Option<usize> {
        if self.entries.is_empty() || !x.is_finite() {
            return None;
        }

        let lower = self.entries.partition_point(|&(ex, _)| ex < x);
        if lower == 0 {
            return Some(self.entries[0].1);
        }
        if lower >= self.entries.len() {
            return self.entries.last().map(|&(_, idx)| idx);
        }

        let (left_x, left_idx) = self.entries[lower - 1];
        let (right_x, right_idx) = self.entries[lower];
        if (x - left_x).abs() <= (right_x - x).abs() {
            Some(left_idx)
        } else {
            Some(right_idx)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearest_on_sorted_axis() {
        let index = HitIndex::build(&[1.0, 2.0, 3.0, 7.0, 9.0]);
        assert_eq!(index.nearest(0.0), Some(0));
        assert_eq!(index.nearest(2.4), Some(1));
        assert_eq!(index.nearest(5.0), Some(2));
        assert_eq!(index.nearest(6.0), Some(3));
        assert_eq!(index.nearest(100.0), Some(4));
    }

    #[test]
    fn test_unsorted_input_and_gaps() {
        let index = HitIndex::build(&[9.0, f64::NAN, 1.0, 4.0]);
        assert_eq!(index.len(), 3);
        assert_eq!(index.nearest(1.2), Some(2));
        assert_eq!(index.nearest(8.0), Some(0));
    }

    #[test]
    fn test_empty_and_non_finite_query() {
        assert_eq!(HitIndex::default().nearest(1.0), None);
        assert_eq!(HitIndex::build(&[1.0]).nearest(f64::NAN), None);
    }
}
