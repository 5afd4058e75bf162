use num::{Float, ToPrimitive, Zero};

use crate::metric::Metric;

/// Error raised while building or searching a tree.
///
/// `E` is the error type of the metric in use; it is
/// [`Infallible`](std::convert::Infallible) for plain closures.
#[derive(Debug, thiserror::Error)]
pub enum Error<E> {
    /// The metric itself failed. The operation was abandoned.
    #[error("distance metric failed")]
    Metric(#[source] E),

    /// The metric produced something that is not a distance.
    #[error("distance metric returned {0}, expected a finite non-negative number")]
    InvalidDistance(f64),
}

pub type Result<T, E> = std::result::Result<T, Error<E>>;

/// Evaluate `metric` on a pair, rejecting values no metric may return.
pub(crate) fn measure<T, M>(metric: &M, a: &T, b: &T) -> Result<M::Distance, M::Error>
where
    T: ?Sized,
    M: Metric<T>,
{
    let d = metric.distance(a, b).map_err(Error::Metric)?;
    if !d.is_finite() || d < M::Distance::zero() {
        return Err(Error::InvalidDistance(d.to_f64().unwrap_or(f64::NAN)));
    }
    Ok(d)
}
