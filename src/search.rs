//! k-nearest-neighbor search over a built [`VpTree`].
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::ops::Deref;

use log::trace;

use crate::error::{measure, Result};
use crate::metric::{Float, Metric, Scalar};
use crate::vptree::VpTree;

/// One search result.
#[derive(Debug, PartialEq)]
pub struct Neighbor<'a, T, D> {
    pub item: &'a T,
    /// Position of the item in the sequence the tree was built from.
    pub index: usize,
    pub distance: D,
}

impl<'a, T, D: Copy> Clone for Neighbor<'a, T, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T, D: Copy> Copy for Neighbor<'a, T, D> {}

impl<'a, T, D> Deref for Neighbor<'a, T, D> {
    type Target = T;

    fn deref(&self) -> &T {
        self.item
    }
}

/// Work done by one search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes whose vantage point was measured against the target.
    pub visited: usize,
    /// Subtrees skipped by the triangle inequality.
    pub pruned: usize,
}

struct HeapElem<F> {
    dist: F,
    item: usize,
}

impl<F: Scalar> PartialEq for HeapElem<F> {
    fn eq(&self, other: &Self) -> bool {
        self.dist == other.dist
    }
}

impl<F: Scalar> Eq for HeapElem<F> {}

impl<F: Scalar> PartialOrd for HeapElem<F> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<F: Scalar> Ord for HeapElem<F> {
    fn cmp(&self, other: &Self) -> Ordering {
        // distances are checked to be finite before they get here
        self.dist.partial_cmp(&other.dist).unwrap_or(Ordering::Equal)
    }
}

#[derive(Clone, Copy)]
enum Side {
    Inner,
    Outer,
}

/// Condition under which a child subtree can still hold a candidate,
/// checked against `tau` when the child comes off the stack.
#[derive(Clone, Copy)]
struct Guard<F> {
    side: Side,
    dist: F,
    threshold: F,
}

impl<F: Scalar> Guard<F> {
    fn new(side: Side, dist: F, threshold: F) -> Self {
        Guard {
            side: side,
            dist: dist,
            threshold: threshold,
        }
    }

    fn admits(&self, tau: F) -> bool {
        match self.side {
            Side::Inner => self.dist - tau <= self.threshold,
            Side::Outer => self.dist + tau >= self.threshold,
        }
    }
}

/// Private state of one search: the best `k` so far, worst on top, and
/// `tau`, the distance of the k-th best once there are `k` of them.
struct Searcher<'a, 'q, T, M: Metric<T>> {
    tree: &'a VpTree<T, M>,
    target: &'q T,
    k: usize,
    tau: M::Distance,
    heap: BinaryHeap<HeapElem<M::Distance>>,
    stats: SearchStats,
}

impl<'a, 'q, T, M: Metric<T>> Searcher<'a, 'q, T, M> {
    fn new(tree: &'a VpTree<T, M>, target: &'q T, k: usize) -> Self {
        Searcher {
            tree: tree,
            target: target,
            k: k,
            tau: M::Distance::infinity(),
            heap: BinaryHeap::with_capacity(k.min(tree.len()) + 1),
            stats: SearchStats::default(),
        }
    }

    fn admit(&mut self, item: usize, dist: M::Distance) {
        if dist < self.tau {
            self.heap.push(HeapElem {
                dist: dist,
                item: item,
            });
            if self.heap.len() > self.k {
                self.heap.pop();
            }
            if self.heap.len() == self.k {
                if let Some(worst) = self.heap.peek() {
                    self.tau = worst.dist;
                }
            }
        }
    }

    fn traverse(&mut self) -> Result<(), M::Error> {
        let tree = self.tree;
        let mut pending: Vec<(usize, Option<Guard<M::Distance>>)> = vec![(0, None)];

        while let Some((id, guard)) = pending.pop() {
            if let Some(guard) = guard {
                if !guard.admits(self.tau) {
                    self.stats.pruned += 1;
                    continue;
                }
            }

            let node = &tree.nodes[id];
            let dist = measure(&tree.metric, &tree.items[node.item], self.target)?;
            self.stats.visited += 1;
            self.admit(node.item, dist);

            let threshold = node.threshold;
            let inner = node.left.map(|c| (c, Some(Guard::new(Side::Inner, dist, threshold))));
            let outer = node.right.map(|c| (c, Some(Guard::new(Side::Outer, dist, threshold))));

            // Nearer side goes on top, so it is exhausted before the
            // farther side's guard is checked.
            let (near, far) = if dist < threshold {
                (inner, outer)
            } else {
                (outer, inner)
            };
            pending.extend(far);
            pending.extend(near);
        }
        Ok(())
    }

    fn run(mut self) -> Result<(Vec<Neighbor<'a, T, M::Distance>>, SearchStats), M::Error> {
        if self.k > 0 && !self.tree.nodes.is_empty() {
            self.traverse()?;
        }

        let tree = self.tree;
        let found = self
            .heap
            .into_sorted_vec()
            .into_iter()
            .map(|e| Neighbor {
                item: &tree.items[e.item],
                index: e.item,
                distance: e.dist,
            })
            .collect();
        Ok((found, self.stats))
    }
}

impl<T, M: Metric<T>> VpTree<T, M> {
    /// Find the `k` items nearest to `target`, nearest first.
    ///
    /// Returns fewer than `k` items only when the tree holds fewer. Items
    /// at equal distance come back in no particular order.
    pub fn search(
        &self,
        target: &T,
        k: usize,
    ) -> Result<Vec<Neighbor<'_, T, M::Distance>>, M::Error> {
        self.search_with_stats(target, k).map(|(found, _)| found)
    }

    /// Like [`search`](VpTree::search), also reporting how much of the
    /// tree was looked at.
    pub fn search_with_stats(
        &self,
        target: &T,
        k: usize,
    ) -> Result<(Vec<Neighbor<'_, T, M::Distance>>, SearchStats), M::Error> {
        let (found, stats) = Searcher::new(self, target, k).run()?;
        trace!(
            "k={}: visited {} nodes, pruned {} subtrees, {} results",
            k,
            stats.visited,
            stats.pruned,
            found.len()
        );
        Ok((found, stats))
    }

    /// Find the nearest neighbor; `None` only for an empty tree.
    pub fn nearest_neighbor(
        &self,
        target: &T,
    ) -> Result<Option<Neighbor<'_, T, M::Distance>>, M::Error> {
        Ok(self.search(target, 1)?.into_iter().next())
    }
}
