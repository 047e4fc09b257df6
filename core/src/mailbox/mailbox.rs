use std::collections::HashSet;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;

use crate::graph::CategoryId;

use super::article_set::ArticleSet;

/// Classification outcome of a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Purity {
    Unknown,
    Pure,
    Impure,
}

impl Purity {
    fn to_u8(self) -> u8 {
        match self {
            Purity::Unknown => 0,
            Purity::Pure => 1,
            Purity::Impure => 2,
        }
    }

    fn from_u8(v: u8) -> Self {
        match v {
            1 => Purity::Pure,
            2 => Purity::Impure,
            _ => Purity::Unknown,
        }
    }
}

/// Result of reporting a child to its parent's mailbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Recorded; the parent still waits for `expected - reported` children.
    Pending { reported: usize, expected: usize },
    /// This report completed the parent. Returned exactly once per mailbox.
    Ready,
    /// The child had already reported; nothing changed.
    Duplicate,
    /// The mailbox was already taken for evaluation.
    Released,
}

struct Inbox {
    reported: HashSet<CategoryId>,
    /// Union of the sets propagated by reporting children.
    aggregate: ArticleSet,
}

/// Per-category aggregation state.
///
/// Each mailbox is locked independently. The inbox is taken when the
/// category is evaluated, after which further deliveries are rejected; the
/// purity flag outlives the inbox.
pub struct Mailbox {
    expected: usize,
    purity: AtomicU8,
    inbox: Mutex<Option<Inbox>>,
}

impl Mailbox {
    pub fn new(expected_children: usize, universe: usize, set_capacity: usize) -> Self {
        Self {
            expected: expected_children,
            purity: AtomicU8::new(Purity::Unknown.to_u8()),
            inbox: Mutex::new(Some(Inbox {
                reported: HashSet::new(),
                aggregate: ArticleSet::new(universe, set_capacity),
            })),
        }
    }

    /// Record that `child` finished and merge what it propagated.
    ///
    /// The duplicate check, merge, and readiness test happen under one lock,
    /// so when several children complete at once exactly one of them sees
    /// [`Delivery::Ready`].
    pub fn deliver(&self, child: CategoryId, articles: &ArticleSet) -> Delivery {
        let mut guard = self.lock();
        let Some(inbox) = guard.as_mut() else {
            return Delivery::Released;
        };

        if !inbox.reported.insert(child) {
            return Delivery::Duplicate;
        }
        inbox.aggregate.merge(articles);

        let reported = inbox.reported.len();
        if reported == self.expected {
            Delivery::Ready
        } else {
            Delivery::Pending {
                reported,
                expected: self.expected,
            }
        }
    }

    /// Take the merged child sets and release the inbox.
    ///
    /// Returns `None` if the inbox was already taken.
    pub fn take(&self) -> Option<ArticleSet> {
        self.lock().take().map(|inbox| inbox.aggregate)
    }

    pub fn is_released(&self) -> bool {
        self.lock().is_none()
    }

    pub fn purity(&self) -> Purity {
        Purity::from_u8(self.purity.load(Ordering::Acquire))
    }

    pub fn set_purity(&self, purity: Purity) {
        self.purity.store(purity.to_u8(), Ordering::Release);
    }

    fn lock(&self) -> MutexGuard<'_, Option<Inbox>> {
        self.inbox.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Barrier};

    use super::*;

    fn ids(values: &[u32]) -> ArticleSet {
        let mut set = ArticleSet::new(16, usize::MAX);
        set.extend(values.iter().copied());
        set
    }

    #[test]
    fn test_ready_after_last_distinct_child() {
        let mailbox = Mailbox::new(2, 16, usize::MAX);

        assert_eq!(
            mailbox.deliver(10, &ids(&[1])),
            Delivery::Pending {
                reported: 1,
                expected: 2
            }
        );
        assert_eq!(mailbox.deliver(10, &ids(&[2])), Delivery::Duplicate);
        assert_eq!(mailbox.deliver(11, &ArticleSet::empty()), Delivery::Ready);

        let merged = mailbox.take().unwrap();
        assert_eq!(merged.to_sorted_vec(), vec![1]);
        assert!(mailbox.is_released());
        assert_eq!(mailbox.deliver(12, &ids(&[4])), Delivery::Released);
        assert!(mailbox.take().is_none());
    }

    #[test]
    fn test_purity_outlives_inbox() {
        let mailbox = Mailbox::new(0, 0, usize::MAX);
        assert_eq!(mailbox.purity(), Purity::Unknown);
        mailbox.set_purity(Purity::Impure);
        mailbox.take();
        assert_eq!(mailbox.purity(), Purity::Impure);
    }

    #[test]
    fn test_concurrent_children_yield_single_ready() {
        const CHILDREN: u32 = 32;
        for _ in 0..20 {
            let mailbox = Arc::new(Mailbox::new(CHILDREN as usize, 64, 4));
            let barrier = Arc::new(Barrier::new(CHILDREN as usize));

            let handles: Vec<_> = (0..CHILDREN)
                .map(|child| {
                    let mailbox = mailbox.clone();
                    let barrier = barrier.clone();
                    std::thread::spawn(move || {
                        barrier.wait();
                        mailbox.deliver(child, &ids(&[child]))
                    })
                })
                .collect();

            let ready = handles
                .into_iter()
                .map(|h| h.join().unwrap())
                .filter(|d| *d == Delivery::Ready)
                .count();
            assert_eq!(ready, 1);

            let merged = mailbox.take().unwrap();
            assert_eq!(merged.len(), CHILDREN as usize);
            assert!(merged.is_dense());
        }
    }
}
