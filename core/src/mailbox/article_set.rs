use std::collections::HashSet;

use fixedbitset::FixedBitSet;

use crate::graph::ArticleId;

/// Default explicit-set capacity before switching to a bit-vector.
pub const DEFAULT_SET_CAPACITY: usize = (5_000_000 / 8) / 4;

/// Article-id set that starts as a hash set and switches, irreversibly, to a
/// bit-vector over the whole article id space once its cardinality exceeds
/// `capacity`.
///
/// Both representations answer membership, union and iteration identically;
/// only memory use differs. Merging a dense operand always yields a dense
/// result.
#[derive(Debug, Clone)]
pub struct ArticleSet {
    repr: Repr,
    capacity: usize,
    universe: usize,
}

#[derive(Debug, Clone)]
enum Repr {
    Sparse(HashSet<ArticleId>),
    Dense { bits: FixedBitSet, len: usize },
}

impl ArticleSet {
    /// `universe` is the article count of the graph and sizes the bit-vector.
    pub fn new(universe: usize, capacity: usize) -> Self {
        Self {
            repr: Repr::Sparse(HashSet::new()),
            capacity,
            universe,
        }
    }

    /// Empty set that never converts; what impure categories propagate.
    pub fn empty() -> Self {
        Self::new(0, usize::MAX)
    }

    pub fn len(&self) -> usize {
        match &self.repr {
            Repr::Sparse(ids) => ids.len(),
            Repr::Dense { len, .. } => *len,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_dense(&self) -> bool {
        matches!(self.repr, Repr::Dense { .. })
    }

    pub fn contains(&self, id: ArticleId) -> bool {
        match &self.repr {
            Repr::Sparse(ids) => ids.contains(&id),
            Repr::Dense { bits, .. } => bits.contains(id as usize),
        }
    }

    pub fn insert(&mut self, id: ArticleId) -> bool {
        let added = match &mut self.repr {
            Repr::Sparse(ids) => ids.insert(id),
            Repr::Dense { bits, len } => set_bit(bits, len, id),
        };
        self.promote_if_full();
        added
    }

    pub fn extend<I: IntoIterator<Item = ArticleId>>(&mut self, ids: I) {
        match &mut self.repr {
            Repr::Sparse(set) => set.extend(ids),
            Repr::Dense { bits, len } => {
                for id in ids {
                    set_bit(bits, len, id);
                }
            }
        }
        self.promote_if_full();
    }

    /// Union `other` into `self`, accepting either representation.
    pub fn merge(&mut self, other: &ArticleSet) {
        if other.is_empty() {
            return;
        }
        if other.is_dense() {
            self.promote();
        }

        match (&mut self.repr, &other.repr) {
            (Repr::Sparse(ids), Repr::Sparse(more)) => ids.extend(more.iter().copied()),
            (Repr::Dense { bits, len }, Repr::Sparse(more)) => {
                for &id in more {
                    set_bit(bits, len, id);
                }
            }
            (Repr::Dense { bits, len }, Repr::Dense { bits: more, .. }) => {
                bits.union_with(more);
                *len = bits.count_ones(..);
            }
            (Repr::Sparse(ids), Repr::Dense { bits: more, .. }) => {
                ids.extend(more.ones().map(|i| i as ArticleId))
            }
        }

        self.promote_if_full();
    }

    pub fn iter(&self) -> Iter<'_> {
        match &self.repr {
            Repr::Sparse(ids) => Iter::Sparse(ids.iter()),
            Repr::Dense { bits, .. } => Iter::Dense(bits.ones()),
        }
    }

    /// Materialize the members in ascending order.
    pub fn to_sorted_vec(&self) -> Vec<ArticleId> {
        let mut ids: Vec<ArticleId> = self.iter().collect();
        if !self.is_dense() {
            ids.sort_unstable();
        }
        ids
    }

    /// Drop every member and the memory holding them. The set stays usable
    /// (empty, explicit) afterwards.
    pub fn release(&mut self) {
        self.repr = Repr::Sparse(HashSet::new());
    }

    fn promote_if_full(&mut self) {
        if !self.is_dense() && self.len() > self.capacity {
            self.promote();
        }
    }

    fn promote(&mut self) {
        let Repr::Sparse(ids) = &self.repr else {
            return;
        };
        let width = ids
            .iter()
            .map(|&id| id as usize + 1)
            .max()
            .unwrap_or(0)
            .max(self.universe);
        let mut bits = FixedBitSet::with_capacity(width);
        for &id in ids {
            bits.insert(id as usize);
        }
        let len = ids.len();
        self.repr = Repr::Dense { bits, len };
    }
}

fn set_bit(bits: &mut FixedBitSet, len: &mut usize, id: ArticleId) -> bool {
    let index = id as usize;
    if index >= bits.len() {
        bits.grow(index + 1);
    }
    let was_set = bits.put(index);
    if !was_set {
        *len += 1;
    }
    !was_set
}

impl<'a> IntoIterator for &'a ArticleSet {
    type Item = ArticleId;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub enum Iter<'a> {
    Sparse(std::collections::hash_set::Iter<'a, ArticleId>),
    Dense(fixedbitset::Ones<'a>),
}

impl Iterator for Iter<'_> {
    type Item = ArticleId;

    fn next(&mut self) -> Option<ArticleId> {
        match self {
            Iter::Sparse(it) => it.next().copied(),
            Iter::Dense(it) => it.next().map(|i| i as ArticleId),
        }
    }
}
