//! Exact k-nearest-neighbor search in any metric space.
//!
//! A [`VpTree`] is built once over a set of items and a distance
//! function, then answers nearest-neighbor queries without ever needing
//! coordinates.
//!
//! ```
//! use vptree::{Euclidean, VpTree};
//!
//! let points = vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [5.0, 5.0], [5.0, 6.0]];
//! let tree = VpTree::with_seed(points, Euclidean, 7).unwrap();
//!
//! let found = tree.search(&[5.0, 5.2], 2).unwrap();
//! assert_eq!(found[0].index, 3);
//! assert_eq!(found[1].index, 4);
//! ```
//!
//! Any closure over a pair of items works as a metric, here Hamming
//! distance between words of equal length:
//!
//! ```
//! use vptree::VpTree;
//!
//! let words = vec!["apple", "maple", "ample", "apply"];
//! let tree = VpTree::new(words, |a: &&str, b: &&str| {
//!     a.chars().zip(b.chars()).filter(|(x, y)| x != y).count() as f32
//! })
//! .unwrap();
//!
//! let nearest = tree.nearest_neighbor(&"ampla").unwrap().unwrap();
//! assert_eq!(*nearest, "ample");
//! assert_eq!(nearest.distance, 1.0);
//! ```
pub mod error;
mod median;
pub mod metric;
pub mod search;
pub mod vptree;

pub use error::{Error, Result};
pub use metric::{
    DimensionMismatch, Euclidean, Float, ItemMetric, Metric, MetricItem, Scalar, TryFn,
};
pub use search::{Neighbor, SearchStats};
pub use vptree::VpTree;
