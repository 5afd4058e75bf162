//! Vantage-Point Trees are a data structure for fast
//! k-nearest-neighbor searches.
//!
//! Each node holds a vantage point and a threshold distance. Items no
//! farther than the threshold from the vantage point live in the left
//! subtree, items no nearer live in the right one. Nodes are kept in a
//! flat arena, root first, and refer to their children by index.
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{measure, Result};
use crate::median::{partition_at, Slot};
use crate::metric::Metric;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Node<F> {
    /// Index of the vantage point in the item sequence.
    pub item: usize,
    pub threshold: F,
    pub left: Option<usize>,
    pub right: Option<usize>,
}

impl<F: num::Zero> Node<F> {
    fn leaf(item: usize) -> Self {
        Node {
            item: item,
            threshold: F::zero(),
            left: None,
            right: None,
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Side {
    Left,
    Right,
}

/// A slot range still waiting for its node.
struct Pending {
    lower: usize,
    upper: usize,
    depth: usize,
    parent: Option<(usize, Side)>,
}

/// Build the node arena over `items`, in the order a recursive
/// pre-order construction would produce it.
///
/// Returns the nodes and the number of levels.
fn build<T, M, R>(
    items: &[T],
    metric: &M,
    rng: &mut R,
) -> Result<(Vec<Node<M::Distance>>, usize), M::Error>
where
    M: Metric<T>,
    R: Rng,
{
    let n = items.len();
    let mut nodes = Vec::with_capacity(n);
    let mut slots: Vec<Slot<M::Distance>> = (0..n).map(Slot::new).collect();
    let mut levels = 0;

    let mut pending = Vec::new();
    if n > 0 {
        pending.push(Pending {
            lower: 0,
            upper: n,
            depth: 1,
            parent: None,
        });
    }

    while let Some(task) = pending.pop() {
        let id = nodes.len();
        levels = levels.max(task.depth);

        let range = &mut slots[task.lower..task.upper];
        let node = if range.len() == 1 {
            Node::leaf(range[0].item)
        } else {
            range.swap(0, rng.gen_range(0..range.len()));
            let vantage = range[0].item;
            let rest = &mut range[1..];
            for slot in rest.iter_mut() {
                slot.dist = measure(metric, &items[vantage], &items[slot.item])?;
            }

            let median = (task.lower + task.upper) / 2;
            let threshold = partition_at(rest, median - task.lower - 1);

            // Right is pushed first so the left subtree is numbered first.
            pending.push(Pending {
                lower: median,
                upper: task.upper,
                depth: task.depth + 1,
                parent: Some((id, Side::Right)),
            });
            if task.lower + 1 < median {
                pending.push(Pending {
                    lower: task.lower + 1,
                    upper: median,
                    depth: task.depth + 1,
                    parent: Some((id, Side::Left)),
                });
            }

            Node {
                item: vantage,
                threshold: threshold,
                left: None,
                right: None,
            }
        };
        nodes.push(node);

        match task.parent {
            Some((parent, Side::Left)) => nodes[parent].left = Some(id),
            Some((parent, Side::Right)) => nodes[parent].right = Some(id),
            None => {}
        }
    }

    Ok((nodes, levels))
}

/// An immutable vantage point tree over items of type `T`, measured
/// with metric `M`.
///
/// Items keep their insertion order, so an item's position in
/// [`items`](VpTree::items) is the index reported by searches.
pub struct VpTree<T, M: Metric<T>> {
    pub(crate) items: Vec<T>,
    pub(crate) nodes: Vec<Node<M::Distance>>,
    pub(crate) metric: M,
    depth: usize,
}

impl<T, M: Metric<T>> VpTree<T, M> {
    /// Construct a new vantage point tree from a set of items, picking
    /// vantage points with an entropy-seeded generator.
    pub fn new<I>(items: I, metric: M) -> Result<Self, M::Error>
    where
        I: IntoIterator<Item = T>,
    {
        Self::with_rng(items, metric, &mut StdRng::from_entropy())
    }

    /// Like [`new`](VpTree::new), but reproducible: the same seed and items
    /// always give the same tree.
    pub fn with_seed<I>(items: I, metric: M, seed: u64) -> Result<Self, M::Error>
    where
        I: IntoIterator<Item = T>,
    {
        Self::with_rng(items, metric, &mut StdRng::seed_from_u64(seed))
    }

    /// Construct a tree drawing vantage points from `rng`.
    ///
    /// The generator is only used during construction. If the metric
    /// fails on any pair, construction is abandoned and the error returned.
    pub fn with_rng<I, R>(items: I, metric: M, rng: &mut R) -> Result<Self, M::Error>
    where
        I: IntoIterator<Item = T>,
        R: Rng,
    {
        let items: Vec<T> = items.into_iter().collect();
        let (nodes, depth) = build(&items, &metric, rng)?;
        debug!("built vantage point tree over {} items, {} levels", items.len(), depth);

        Ok(VpTree {
            items: items,
            nodes: nodes,
            metric: metric,
            depth: depth,
        })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of node levels; 0 for an empty tree.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// All items, in insertion order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn metric(&self) -> &M {
        &self.metric
    }

    /// Give back the items, in insertion order.
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Render the tree structure, one node per line, children indented
    /// under their parent.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        let mut stack = Vec::new();
        if !self.nodes.is_empty() {
            stack.push((0, 0, "root"));
        }
        while let Some((id, indent, label)) = stack.pop() {
            let node = &self.nodes[id];
            out.push_str(&format!(
                "{:width$}{} #{}: item {}, threshold {}\n",
                "",
                label,
                id,
                node.item,
                node.threshold,
                width = indent * 2
            ));
            if let Some(right) = node.right {
                stack.push((right, indent + 1, "outer"));
            }
            if let Some(left) = node.left {
                stack.push((left, indent + 1, "inner"));
            }
        }
        out
    }
}
