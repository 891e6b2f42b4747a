use std::marker::PhantomData;

use nalgebra::DimName;

use crate::error::TreeError;

/// Selects one of the 2^D half-spaces of a box: one lower/upper choice per
/// axis. Identifies a child of a split node.
///
/// Orthants enumerate in a fixed order with axis 0 varying slowest, and the
/// same convention is used everywhere an orthant is produced: child layout,
/// box bisection, corner enumeration and traversal.
///
/// # Examples
/// ```
/// use nalgebra::U2;
/// use orthant::prelude::Orthant;
///
/// let quadrants: Vec<_> = Orthant::<U2>::all().collect();
/// assert_eq!(quadrants.len(), 4);
/// // (lower, lower), (lower, upper), (upper, lower), (upper, upper)
/// assert!(!quadrants[0].upper(0) && !quadrants[0].upper(1));
/// assert!(!quadrants[1].upper(0) && quadrants[1].upper(1));
/// assert!(quadrants[3].upper(0) && quadrants[3].upper(1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Orthant<D: DimName> {
    bits: usize,
    marker: PhantomData<D>,
}

impl<D: DimName> Orthant<D> {
    /// Number of distinct orthants, `2^D`.
    pub fn count() -> usize {
        1 << D::dim()
    }

    /// All orthants in enumeration order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..Self::count()).map(Self::from_index)
    }

    /// The orthant at `index` in enumeration order.
    pub fn from_index(index: usize) -> Self {
        debug_assert!(index < Self::count());
        Self {
            bits: index,
            marker: PhantomData,
        }
    }

    /// Position in enumeration order; also the child slot of a split node.
    pub fn index(&self) -> usize {
        self.bits
    }

    /// Whether this orthant selects the upper half of `axis`.
    pub fn upper(&self, axis: usize) -> bool {
        debug_assert!(axis < D::dim());
        (self.bits >> (D::dim() - 1 - axis)) & 1 == 1
    }

    /// Build an orthant from one upper-half flag per axis.
    ///
    /// Fails with [`TreeError::DimensionMismatch`] unless exactly `D` flags
    /// are given.
    pub fn try_from_halves(halves: &[bool]) -> Result<Self, TreeError> {
        if halves.len() != D::dim() {
            return Err(TreeError::DimensionMismatch {
                expected: D::dim(),
                actual: halves.len(),
            });
        }
        let bits = halves
            .iter()
            .fold(0, |acc, &upper| (acc << 1) | usize::from(upper));
        Ok(Self {
            bits,
            marker: PhantomData,
        })
    }
}
