//! Linear and band scales for the ASN chart

use std::collections::HashMap;
use std::hash::Hash;

/// Round half toward positive infinity, the way browser layout code does
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Continuous mapping from a numeric domain onto an output range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn scale(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let t = if d1 == d0 {
            // Collapsed domain maps everything to the middle of the range
            0.5
        } else {
            (value - d0) / (d1 - d0)
        };
        r0 + t * (r1 - r0)
    }
}

/// Discrete mapping from ordered categories onto evenly spaced bands
#[derive(Debug, Clone)]
pub struct BandScale<K> {
    domain: Vec<K>,
    index: HashMap<K, usize>,
    range: (f64, f64),
    padding_inner: f64,
    padding_outer: f64,
    round: bool,
    start: f64,
    step: f64,
    bandwidth: f64,
}

impl<K: Eq + Hash + Clone> BandScale<K> {
    pub fn new(domain: Vec<K>, range: (f64, f64)) -> Self {
        let mut index = HashMap::with_capacity(domain.len());
        for (i, key) in domain.iter().enumerate() {
            index.entry(key.clone()).or_insert(i);
        }
        let mut scale = Self {
            domain,
            index,
            range,
            padding_inner: 0.0,
            padding_outer: 0.0,
            round: false,
            start: range.0,
            step: 0.0,
            bandwidth: 0.0,
        };
        scale.rescale();
        scale
    }

    /// Set inner and outer padding to the same fraction of the step
    pub fn padding(mut self, padding: f64) -> Self {
        let padding = padding.clamp(0.0, 1.0);
        self.padding_inner = padding;
        self.padding_outer = padding;
        self.rescale();
        self
    }

    /// Snap band start and width to whole units
    pub fn round(mut self, round: bool) -> Self {
        self.round = round;
        self.rescale();
        self
    }

    fn rescale(&mut self) {
        let n = self.domain.len() as f64;
        let (mut start, mut stop) = self.range;
        let reverse = stop < start;
        if reverse {
            std::mem::swap(&mut start, &mut stop);
        }

        let mut step = (stop - start) / (n - self.padding_inner + self.padding_outer * 2.0).max(1.0);
        if self.round {
            step = step.floor();
        }
        // Leftover space is split evenly on both ends.
        start += (stop - start - step * (n - self.padding_inner)) * 0.5;
        let mut bandwidth = step * (1.0 - self.padding_inner);
        if self.round {
            start = round_half_up(start);
            bandwidth = round_half_up(bandwidth);
        }

        if reverse {
            // Bands run from the far end back toward the start
            let last = start + step * (n - 1.0).max(0.0);
            self.start = last;
            self.step = -step;
        } else {
            self.start = start;
            self.step = step;
        }
        self.bandwidth = bandwidth;
    }

    pub fn domain(&self) -> &[K] {
        &self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    pub fn step(&self) -> f64 {
        self.step.abs()
    }

    /// Start position of the band for `key`, `None` for unknown categories
    pub fn position(&self, key: &K) -> Option<f64> {
        self.index
            .get(key)
            .map(|&i| self.start + self.step * i as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_maps_domain_to_range() {
        let x = LinearScale::new((0.0, 2.0), (0.0, 600.0));
        assert_eq!(x.scale(0.0), 0.0);
        assert_eq!(x.scale(1.0), 300.0);
        assert_eq!(x.scale(2.0), 600.0);
    }

    #[test]
    fn test_linear_collapsed_domain() {
        let x = LinearScale::new((0.0, 0.0), (0.0, 600.0));
        assert_eq!(x.scale(0.0), 300.0);
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(22.5), 23.0);
        assert_eq!(round_half_up(2.75), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
    }

    #[test]
    fn test_band_two_categories_rounded() {
        let y = BandScale::new(vec!["A1", "A2"], (0.0, 53.0)).round(true).padding(0.1);
        // step = floor(53 / 2.1) = 25, start = round((53 - 47.5) / 2), width = round(22.5)
        assert_eq!(y.step(), 25.0);
        assert_eq!(y.bandwidth(), 23.0);
        assert_eq!(y.position(&"A1"), Some(3.0));
        assert_eq!(y.position(&"A2"), Some(28.0));
        assert_eq!(y.position(&"A3"), None);
    }

    #[test]
    fn test_band_unrounded_no_padding() {
        let y = BandScale::new(vec![1, 2, 3, 4], (0.0, 100.0));
        assert_eq!(y.step(), 25.0);
        assert_eq!(y.bandwidth(), 25.0);
        assert_eq!(y.position(&1), Some(0.0));
        assert_eq!(y.position(&4), Some(75.0));
    }

    #[test]
    fn test_band_reversed_range() {
        let y = BandScale::new(vec!["a", "b"], (100.0, 0.0));
        assert_eq!(y.position(&"a"), Some(50.0));
        assert_eq!(y.position(&"b"), Some(0.0));
    }

    #[test]
    fn test_band_empty_domain() {
        let y: BandScale<&str> = BandScale::new(Vec::new(), (0.0, 10.0)).padding(0.1).round(true);
        assert_eq!(y.position(&"x"), None);
        assert!(y.domain().is_empty());
    }
}
