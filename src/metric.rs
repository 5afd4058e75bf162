//! Distance functions the tree is built over.
//!
//! A tree only ever sees its items through a [`Metric`]. Any
//! `Fn(&T, &T) -> D` closure is a metric; fallible closures go through
//! [`TryFn`], item types that know their own distance through
//! [`ItemMetric`].
use std::convert::Infallible;
use std::fmt::{Debug, Display};

pub use num::Float;

/// Numeric type a distance is measured in.
pub trait Scalar: Float + Debug + Display {}
impl<T: Float + Debug + Display> Scalar for T {}

/// A distance function over `T`.
///
/// Implementations must be a true metric: non-negative, symmetric, and
/// satisfying the triangle inequality. Search pruning is only correct
/// under those assumptions.
pub trait Metric<T: ?Sized> {
    type Distance: Scalar;
    type Error;

    fn distance(&self, a: &T, b: &T) -> Result<Self::Distance, Self::Error>;
}

impl<T: ?Sized, D: Scalar, C> Metric<T> for C
where
    C: Fn(&T, &T) -> D,
{
    type Distance = D;
    type Error = Infallible;

    fn distance(&self, a: &T, b: &T) -> Result<D, Infallible> {
        Ok(self(a, b))
    }
}

/// Adapts a closure returning `Result` into a [`Metric`] whose errors
/// abort construction or search.
#[derive(Clone, Copy, Debug)]
pub struct TryFn<C>(pub C);

impl<T: ?Sized, D: Scalar, E, C> Metric<T> for TryFn<C>
where
    C: Fn(&T, &T) -> Result<D, E>,
{
    type Distance = D;
    type Error = E;

    fn distance(&self, a: &T, b: &T) -> Result<D, E> {
        (self.0)(a, b)
    }
}

/// An item type with an intrinsic distance to other items of its type.
pub trait MetricItem {
    type Distance: Scalar;

    fn distance(&self, other: &Self) -> Self::Distance;
}

/// Metric that defers to [`MetricItem::distance`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ItemMetric;

impl<T: MetricItem> Metric<T> for ItemMetric {
    type Distance = T::Distance;
    type Error = Infallible;

    fn distance(&self, a: &T, b: &T) -> Result<T::Distance, Infallible> {
        Ok(MetricItem::distance(a, b))
    }
}

/// Raised by [`Euclidean`] when two vectors differ in length.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("dimension mismatch: expected {expected}, got {got}")]
pub struct DimensionMismatch {
    pub expected: usize,
    pub got: usize,
}

/// Straight-line distance between numeric vectors.
#[derive(Clone, Copy, Debug, Default)]
pub struct Euclidean;

fn euclidean<F: Scalar>(a: &[F], b: &[F]) -> F {
    a.iter()
        .zip(b)
        .fold(F::zero(), |acc, (&x, &y)| acc + (x - y) * (x - y))
        .sqrt()
}

impl<F: Scalar> Metric<[F]> for Euclidean {
    type Distance = F;
    type Error = DimensionMismatch;

    fn distance(&self, a: &[F], b: &[F]) -> Result<F, DimensionMismatch> {
        if a.len() != b.len() {
            return Err(DimensionMismatch {
                expected: a.len(),
                got: b.len(),
            });
        }
        Ok(euclidean(a, b))
    }
}

impl<F: Scalar> Metric<Vec<F>> for Euclidean {
    type Distance = F;
    type Error = DimensionMismatch;

    fn distance(&self, a: &Vec<F>, b: &Vec<F>) -> Result<F, DimensionMismatch> {
        Metric::<[F]>::distance(self, a.as_slice(), b.as_slice())
    }
}

impl<F: Scalar, const N: usize> Metric<[F; N]> for Euclidean {
    type Distance = F;
    type Error = Infallible;

    fn distance(&self, a: &[F; N], b: &[F; N]) -> Result<F, Infallible> {
        Ok(euclidean(a, b))
    }
}
