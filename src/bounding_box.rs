use nalgebra::{allocator::Allocator, DefaultAllocator, DimName, OPoint, OVector};

use crate::{error::TreeError, interval::Interval, misc::FloatingPoint, orthant::Orthant};

/// An axis-aligned box in D space: one closed interval per axis, every
/// interval with strictly positive width.
///
/// # Examples
/// ```
/// use nalgebra::{Point2, Vector2};
/// use orthant::prelude::BoundingBox;
///
/// let b = BoundingBox::try_new(Vector2::new(0., 0.), Vector2::new(1., 2.)).unwrap();
/// assert!(b.contains(&Point2::new(0.5, 2.)));
/// assert!(!b.contains(&Point2::new(1.5, 1.)));
///
/// // Distance is the Euclidean norm of the per-axis gaps.
/// assert_eq!(b.distance_to(&Point2::new(1., 3.)), 1.);
/// assert_eq!(b.distance_to(&Point2::new(2., 3.)), 2f64.sqrt());
///
/// // Degenerate axes are rejected.
/// assert!(BoundingBox::try_new(Vector2::new(0., 1.), Vector2::new(1., 1.)).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BoundingBox<T: FloatingPoint, D: DimName>
where
    DefaultAllocator: Allocator<D>,
{
    min: OVector<T, D>,
    max: OVector<T, D>,
}

impl<T: FloatingPoint, D: DimName> BoundingBox<T, D>
where
    DefaultAllocator: Allocator<D>,
{
    /// Create a bounding box from a minimum and maximum corner.
    ///
    /// Fails with [`TreeError::InvalidGeometry`] on the first axis whose
    /// extent is not strictly positive.
    pub fn try_new(min: OVector<T, D>, max: OVector<T, D>) -> Result<Self, TreeError> {
        for axis in 0..D::dim() {
            if max[axis] <= min[axis] {
                return Err(TreeError::InvalidGeometry { axis });
            }
        }
        Ok(Self { min, max })
    }

    /// Create a bounding box from coordinate slices, checking their lengths
    /// against `D` at runtime.
    pub fn try_from_slices(min: &[T], max: &[T]) -> Result<Self, TreeError> {
        for coords in [min, max] {
            if coords.len() != D::dim() {
                return Err(TreeError::DimensionMismatch {
                    expected: D::dim(),
                    actual: coords.len(),
                });
            }
        }
        Self::try_new(
            OVector::from_fn(|i, _| min[i]),
            OVector::from_fn(|i, _| max[i]),
        )
    }

    /// The tight per-axis bounds of a point set.
    ///
    /// Fails with [`TreeError::EmptyPointSet`] on empty input and with
    /// [`TreeError::InvalidGeometry`] if all points share a coordinate on
    /// some axis.
    pub fn try_from_points<'a, I>(points: I) -> Result<Self, TreeError>
    where
        I: IntoIterator<Item = &'a OPoint<T, D>>,
        T: 'a,
    {
        let mut iter = points.into_iter();
        let first = iter.next().ok_or(TreeError::EmptyPointSet)?;
        let mut min = first.coords.clone();
        let mut max = first.coords.clone();
        for point in iter {
            for i in 0..D::dim() {
                min[i] = min[i].min(point[i]);
                max[i] = max[i].max(point[i]);
            }
        }
        Self::try_new(min, max)
    }

    pub fn min(&self) -> &OVector<T, D> {
        &self.min
    }

    pub fn max(&self) -> &OVector<T, D> {
        &self.max
    }

    /// The interval covered on `axis`.
    pub fn interval(&self, axis: usize) -> Interval<T> {
        Interval::new(self.min[axis], self.max[axis])
    }

    /// The smallest box covering both operands. Widens, never narrows.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: OVector::from_fn(|i, _| self.min[i].min(other.min[i])),
            max: OVector::from_fn(|i, _| self.max[i].max(other.max[i])),
        }
    }

    /// Closed containment on every axis; boundary points are inside.
    pub fn contains(&self, point: &OPoint<T, D>) -> bool {
        (0..D::dim()).all(|i| self.interval(i).contains(point[i]))
    }

    /// Euclidean distance from `point` to the nearest point of the box;
    /// zero for contained points.
    ///
    /// This is an exact lower bound on the distance to anything inside the
    /// box, which is what makes it a sound pruning bound for sphere
    /// intersection and nearest-neighbor search.
    pub fn distance_to(&self, point: &OPoint<T, D>) -> T {
        let gaps: OVector<T, D> = OVector::from_fn(|i, _| self.interval(i).distance_to(point[i]));
        gaps.norm()
    }

    /// The 2^D corner points, lazily, in [`Orthant`] enumeration order: a
    /// corner takes the low endpoint on every axis whose orthant half is
    /// lower and the high endpoint otherwise.
    pub fn corners(&self) -> impl Iterator<Item = OPoint<T, D>> + '_ {
        Orthant::<D>::all().map(move |o| {
            OPoint::from(OVector::from_fn(|i, _| {
                if o.upper(i) {
                    self.max[i]
                } else {
                    self.min[i]
                }
            }))
        })
    }

    /// Per-axis clamp of `point` into the box. The result is always
    /// contained, and contained points come back unchanged.
    pub fn project(&self, point: &OPoint<T, D>) -> OPoint<T, D> {
        OPoint::from(OVector::from_fn(|i, _| self.interval(i).clamp(point[i])))
    }

    /// The half-box selected by `orthant`: every axis bisected at its
    /// midpoint, keeping the addressed half.
    pub fn orthant_box(&self, orthant: Orthant<D>) -> Self {
        let halves: Vec<Interval<T>> = (0..D::dim())
            .map(|i| {
                if orthant.upper(i) {
                    self.interval(i).upper_half()
                } else {
                    self.interval(i).lower_half()
                }
            })
            .collect();
        Self {
            min: OVector::from_fn(|i, _| halves[i].lo()),
            max: OVector::from_fn(|i, _| halves[i].hi()),
        }
    }
}
