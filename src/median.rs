//! Median partitioning of a construction range.
use std::cmp::Ordering;

use crate::metric::Scalar;

/// An item index paired with its distance to the current vantage point.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Slot<F> {
    pub item: usize,
    pub dist: F,
}

impl<F: Scalar> Slot<F> {
    pub fn new(item: usize) -> Self {
        Slot {
            item: item,
            dist: F::zero(),
        }
    }
}

/// Compare by cached distance.
///
/// Distances are validated as finite before they are cached, so the
/// fallback never fires.
fn by_distance<F: Scalar>(a: &Slot<F>, b: &Slot<F>) -> Ordering {
    a.dist.partial_cmp(&b.dist).unwrap_or(Ordering::Equal)
}

/// Partially order `slots` so that position `k` holds the k-th nearest
/// slot, every slot before it is no farther and every slot after it is
/// no nearer. Returns the distance at `k`.
///
/// Panics if `k` is out of bounds.
pub(crate) fn partition_at<F: Scalar>(slots: &mut [Slot<F>], k: usize) -> F {
    order_stat::kth_by(slots, k, by_distance).dist
}

#[cfg(test)]
mod tests {
    use super::{partition_at, Slot};

    fn slots(dists: &[f64]) -> Vec<Slot<f64>> {
        dists
            .iter()
            .enumerate()
            .map(|(i, &d)| Slot { item: i, dist: d })
            .collect()
    }

    #[test]
    fn test_partition_at() {
        let dists = [2.0, 0.0, 4.0, 6.0, 5.0, 1.0, 3.0, 9.0, 7.0, 8.0, 2.0];
        for k in 0..dists.len() {
            let mut v = slots(&dists);
            let pivot = partition_at(&mut v, k);
            assert_eq!(pivot, v[k].dist);
            for x in 0..k {
                assert!(v[x].dist <= pivot);
            }
            for x in k + 1..v.len() {
                assert!(pivot <= v[x].dist);
            }
        }
    }

    #[test]
    fn test_partition_keeps_items() {
        let mut v = slots(&[3.0, 1.0, 2.0, 1.0, 0.5]);
        partition_at(&mut v, 2);
        let mut items: Vec<usize> = v.iter().map(|s| s.item).collect();
        items.sort();
        assert_eq!(items, vec![0, 1, 2, 3, 4]);
        assert_eq!(v[2].dist, 1.0);
    }

    #[test]
    fn test_single() {
        let mut v = slots(&[4.0]);
        assert_eq!(partition_at(&mut v, 0), 4.0);
    }
}
