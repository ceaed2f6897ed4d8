//! Candidate-color domains for forward checking.

use crate::coloring::Color;

/// A set of candidate colors backed by `u64` words.
///
/// Each search worker keeps one `ColorSet` per vertex; forward checking
/// removes a just-assigned color from neighboring domains and restores the
/// exact bits on backtrack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorSet {
    words: Vec<u64>,
}

impl ColorSet {
    /// The full domain `{0, 1, …, k−1}`.
    pub fn full(k: usize) -> Self {
        let mut words = vec![!0u64; k.div_ceil(64)];
        let rem = k % 64;
        if rem != 0
            && let Some(last) = words.last_mut()
        {
            *last = (1u64 << rem) - 1;
        }
        Self { words }
    }

    /// Membership test. Colors beyond the construction width are absent.
    #[inline]
    pub fn contains(&self, c: Color) -> bool {
        let w = c as usize / 64;
        self.words.get(w).is_some_and(|&word| (word >> (c % 64)) & 1 == 1)
    }

    /// Removes `c`, reporting whether it was present.
    #[inline]
    pub fn remove(&mut self, c: Color) -> bool {
        let w = c as usize / 64;
        let bit = 1u64 << (c % 64);
        match self.words.get_mut(w) {
            Some(word) if *word & bit != 0 => {
                *word &= !bit;
                true
            }
            _ => false,
        }
    }

    /// Reinserts `c`. Only colors below the construction width may be
    /// inserted; forward-check undo never goes wider.
    #[inline]
    pub fn insert(&mut self, c: Color) {
        let w = c as usize / 64;
        debug_assert!(w < self.words.len(), "insert beyond domain width");
        if let Some(word) = self.words.get_mut(w) {
            *word |= 1u64 << (c % 64);
        }
    }

    /// Number of remaining candidates.
    #[inline]
    pub fn cardinality(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// True when no candidate remains (domain wipeout).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Iterates remaining colors in increasing order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            words: &self.words,
            index: 0,
            current: self.words.first().copied().unwrap_or(0),
        }
    }
}

/// Iterator over the colors of a [`ColorSet`].
pub struct Iter<'a> {
    words: &'a [u64],
    index: usize,
    current: u64,
}

impl Iterator for Iter<'_> {
    type Item = Color;

    fn next(&mut self) -> Option<Color> {
        loop {
            if self.current != 0 {
                let bit = self.current.trailing_zeros();
                self.current &= self.current - 1;
                return Some(self.index as Color * 64 + bit);
            }
            self.index += 1;
            if self.index >= self.words.len() {
                return None;
            }
            self.current = self.words[self.index];
        }
    }
}

impl<'a> IntoIterator for &'a ColorSet {
    type Item = Color;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_domain_has_exactly_k_colors() {
        for k in [0, 1, 5, 63, 64, 65, 130] {
            let set = ColorSet::full(k);
            assert_eq!(set.cardinality(), k);
            assert_eq!(set.is_empty(), k == 0);
            for c in 0..k {
                assert!(set.contains(c as Color), "k={k} missing {c}");
            }
            assert!(!set.contains(k as Color));
        }
    }

    #[test]
    fn remove_reports_presence() {
        let mut set = ColorSet::full(5);
        assert!(set.remove(3));
        assert!(!set.remove(3));
        assert!(!set.contains(3));
        assert_eq!(set.cardinality(), 4);
        // Out-of-width colors were never present.
        assert!(!set.remove(100));
    }

    #[test]
    fn insert_restores_removed_color() {
        let mut set = ColorSet::full(10);
        set.remove(7);
        set.insert(7);
        assert!(set.contains(7));
        assert_eq!(set.cardinality(), 10);
    }

    #[test]
    fn wipeout_is_detected() {
        let mut set = ColorSet::full(3);
        for c in 0..3 {
            set.remove(c);
        }
        assert!(set.is_empty());
        assert_eq!(set.cardinality(), 0);
    }

    #[test]
    fn iter_yields_ascending_colors() {
        let mut set = ColorSet::full(70);
        set.remove(0);
        set.remove(64);
        set.remove(31);
        let colors: Vec<Color> = set.iter().collect();
        assert_eq!(colors.len(), 67);
        assert!(colors.windows(2).all(|w| w[0] < w[1]));
        assert!(!colors.contains(&0));
        assert!(!colors.contains(&31));
        assert!(!colors.contains(&64));
        assert!(colors.contains(&65));
    }

    #[test]
    fn iter_on_empty_set() {
        let set = ColorSet::full(0);
        assert_eq!(set.iter().count(), 0);
    }

    #[test]
    fn remove_insert_round_trip_across_word_boundary() {
        let mut set = ColorSet::full(128);
        let order: Vec<Color> = vec![63, 64, 127, 1];
        for &c in &order {
            assert!(set.remove(c));
        }
        for &c in order.iter().rev() {
            set.insert(c);
        }
        assert_eq!(set, ColorSet::full(128));
    }
}
