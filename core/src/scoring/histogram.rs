use std::collections::HashMap;

/// Type-frequency histogram: article type label -> number of articles.
///
/// Labels borrow from the graph's interned type table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeHistogram<'g> {
    counts: HashMap<&'g str, u64>,
}

impl<'g> TypeHistogram<'g> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, label: &'g str) {
        *self.counts.entry(label).or_insert(0) += 1;
    }

    pub fn add(&mut self, label: &'g str, count: u64) {
        if count > 0 {
            *self.counts.entry(label).or_insert(0) += count;
        }
    }

    pub fn get(&self, label: &str) -> u64 {
        self.counts.get(label).copied().unwrap_or(0)
    }

    /// Number of distinct types.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn counts(&self) -> impl Iterator<Item = u64> + '_ {
        self.counts.values().copied()
    }
}

impl<'g> FromIterator<(&'g str, u64)> for TypeHistogram<'g> {
    fn from_iter<I: IntoIterator<Item = (&'g str, u64)>>(iter: I) -> Self {
        let mut histogram = Self::new();
        for (label, count) in iter {
            histogram.add(label, count);
        }
        histogram
    }
}
