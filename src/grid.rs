//! Cartesian-product enumeration of the design space.
//!
//! The search space is the product of six independent axes: the two module
//! option lists and the four nominal diameter ranges. Enumeration order is
//! lexicographic over (m1, m2, d1, d2, d3, d4) with d4 varying fastest, and
//! every candidate has a stable index in that order so a parallel scan can
//! break weight ties deterministically.

use crate::config::GearConfig;

/// One raw grid point: the independent design variables only.
///
/// Nominal diameters are grid coordinates in whole millimetres; the evaluator
/// replaces them with integer-teeth-consistent realized diameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawCandidate {
    pub m1: f64,
    pub m2: f64,
    pub d1: u32,
    pub d2: u32,
    pub d3: u32,
    pub d4: u32,
}

/// Finite, deterministic candidate grid over a configuration.
#[derive(Debug, Clone)]
pub struct CandidateGrid {
    m1_options: Vec<f64>,
    m2_options: Vec<f64>,
    axes: [AxisSpec; 4],
    step: u32,
    len: usize,
}

#[derive(Debug, Clone, Copy)]
struct AxisSpec {
    min: u32,
    count: usize,
}

impl CandidateGrid {
    pub fn new(config: &GearConfig) -> Self {
        let ranges = [
            config.d1_range,
            config.d2_range,
            config.d3_range,
            config.d4_range,
        ];
        let axes = ranges.map(|r| AxisSpec {
            min: r.min,
            count: r.count(config.step),
        });

        let len = config.m1_options.len()
            * config.m2_options.len()
            * axes.iter().map(|a| a.count).product::<usize>();

        Self {
            m1_options: config.m1_options.clone(),
            m2_options: config.m2_options.clone(),
            axes,
            step: config.step,
            len,
        }
    }

    /// Total number of candidates. Zero when any axis is degenerate.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Decode a lexicographic index into its grid point.
    ///
    /// Index 0 is (first m1, first m2, all range minima); the d4 axis varies
    /// fastest.
    ///
    /// # Panics
    ///
    /// Panics when `index >= self.len()`; in particular every index is out of
    /// bounds on an empty grid.
    pub fn candidate_at(&self, index: usize) -> RawCandidate {
        assert!(
            index < self.len,
            "candidate index {index} out of bounds for grid of {}",
            self.len
        );

        let mut rem = index;
        let mut diameters = [0u32; 4];
        for (slot, axis) in diameters.iter_mut().zip(self.axes.iter()).rev() {
            *slot = axis.min + (rem % axis.count) as u32 * self.step;
            rem /= axis.count;
        }

        let m2 = self.m2_options[rem % self.m2_options.len()];
        rem /= self.m2_options.len();
        let m1 = self.m1_options[rem];

        RawCandidate {
            m1,
            m2,
            d1: diameters[0],
            d2: diameters[1],
            d3: diameters[2],
            d4: diameters[3],
        }
    }

    /// Lazy iterator over all candidates in index order.
    pub fn iter(&self) -> GridIter<'_> {
        GridIter {
            grid: self,
            next: 0,
        }
    }
}

/// Iterator yielding `(index, candidate)` pairs in lexicographic order.
pub struct GridIter<'a> {
    grid: &'a CandidateGrid,
    next: usize,
}

impl Iterator for GridIter<'_> {
    type Item = (usize, RawCandidate);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.grid.len {
            return None;
        }
        let item = (self.next, self.grid.candidate_at(self.next));
        self.next += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.grid.len - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for GridIter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DiameterRange;

    fn small_config() -> GearConfig {
        GearConfig {
            m1_options: vec![0.5, 0.8],
            m2_options: vec![1.0],
            d1_range: DiameterRange::new(20, 24),
            d2_range: DiameterRange::new(50, 54),
            d3_range: DiameterRange::new(18, 20),
            d4_range: DiameterRange::new(40, 42),
            step: 2,
            ..GearConfig::default()
        }
    }

    #[test]
    fn len_is_axis_product() {
        let grid = CandidateGrid::new(&small_config());
        // 2 × 1 × 3 × 3 × 2 × 2
        assert_eq!(grid.len(), 72);
    }

    #[test]
    fn first_candidate_sits_at_all_minima() {
        let grid = CandidateGrid::new(&small_config());
        let first = grid.candidate_at(0);
        assert_eq!(first.m1, 0.5);
        assert_eq!(first.m2, 1.0);
        assert_eq!((first.d1, first.d2, first.d3, first.d4), (20, 50, 18, 40));
    }

    #[test]
    fn d4_axis_varies_fastest() {
        let grid = CandidateGrid::new(&small_config());
        let a = grid.candidate_at(0);
        let b = grid.candidate_at(1);
        assert_eq!(b.d4, a.d4 + 2);
        assert_eq!((b.m1, b.d1, b.d2, b.d3), (a.m1, a.d1, a.d2, a.d3));
    }

    #[test]
    fn iterator_matches_index_decoding() {
        let grid = CandidateGrid::new(&small_config());
        let mut seen = 0;
        for (idx, candidate) in grid.iter() {
            assert_eq!(candidate, grid.candidate_at(idx));
            seen += 1;
        }
        assert_eq!(seen, grid.len());
    }

    #[test]
    fn last_candidate_sits_at_all_maxima() {
        let grid = CandidateGrid::new(&small_config());
        let last = grid.candidate_at(grid.len() - 1);
        assert_eq!(last.m1, 0.8);
        assert_eq!((last.d1, last.d2, last.d3, last.d4), (24, 54, 20, 42));
    }

    #[test]
    fn degenerate_range_empties_the_grid() {
        let config = GearConfig {
            d3_range: DiameterRange::new(40, 18),
            ..small_config()
        };
        let grid = CandidateGrid::new(&config);
        assert!(grid.is_empty());
        assert_eq!(grid.iter().count(), 0);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn index_past_the_end_panics() {
        let grid = CandidateGrid::new(&small_config());
        grid.candidate_at(grid.len());
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn empty_grid_rejects_any_index() {
        let config = GearConfig {
            d3_range: DiameterRange::new(40, 18),
            ..small_config()
        };
        CandidateGrid::new(&config).candidate_at(0);
    }

    #[test]
    fn enumeration_is_deterministic() {
        let config = small_config();
        let a: Vec<_> = CandidateGrid::new(&config).iter().collect();
        let b: Vec<_> = CandidateGrid::new(&config).iter().collect();
        assert_eq!(a, b);
    }
}
