use nalgebra::{allocator::Allocator, DefaultAllocator, DimName, OPoint};

use super::{Region, RegionObjects};
use crate::{
    bounding_box::BoundingBox,
    misc::{FloatingPoint, Positioned},
    tree::OrthantTree,
};

/// A D-dimensional ball: the canonical [`Region`].
///
/// Membership is strict (`distance < radius`), so objects exactly on the
/// boundary are excluded. Box intersection uses the Euclidean point-to-box
/// distance, which is exact, and box containment checks all 2^D corners.
///
/// # Examples
/// ```
/// use nalgebra::{Point2, Vector2};
/// use orthant::prelude::*;
///
/// let sphere = Sphere::new(Point2::new(0., 0.), 1.);
/// assert!(sphere.contains(&Point2::new(0.5, 0.5)));
/// assert!(!sphere.contains(&Point2::new(1., 0.)));
///
/// let near = BoundingBox::try_new(Vector2::new(0.5, 0.5), Vector2::new(2., 2.)).unwrap();
/// assert!(sphere.intersects(&near));
/// let far = BoundingBox::try_new(Vector2::new(2., 2.), Vector2::new(3., 3.)).unwrap();
/// assert!(!sphere.intersects(&far));
/// ```
#[derive(Debug, Clone)]
pub struct Sphere<T: FloatingPoint, D: DimName>
where
    DefaultAllocator: Allocator<D>,
{
    center: OPoint<T, D>,
    radius: T,
}

impl<T: FloatingPoint, D: DimName> Sphere<T, D>
where
    DefaultAllocator: Allocator<D>,
{
    pub fn new(center: OPoint<T, D>, radius: T) -> Self {
        Self { center, radius }
    }

    pub fn center(&self) -> &OPoint<T, D> {
        &self.center
    }

    pub fn radius(&self) -> T {
        self.radius
    }

    /// Strict Euclidean membership.
    pub fn contains(&self, point: &OPoint<T, D>) -> bool {
        (point - &self.center).norm() < self.radius
    }
}

impl<T: FloatingPoint, D: DimName> Region<T, D> for Sphere<T, D>
where
    DefaultAllocator: Allocator<D>,
{
    fn intersects(&self, bounds: &BoundingBox<T, D>) -> bool {
        bounds.distance_to(&self.center) <= self.radius
    }

    fn contains_box(&self, bounds: &BoundingBox<T, D>) -> Option<bool> {
        Some(bounds.corners().all(|corner| self.contains(&corner)))
    }

    fn contains_point(&self, point: &OPoint<T, D>) -> Option<bool> {
        Some(self.contains(point))
    }

    fn convex(&self) -> bool {
        true
    }
}

impl<T: FloatingPoint, D: DimName, O: Positioned<T, D>> OrthantTree<T, D, O>
where
    DefaultAllocator: Allocator<D>,
{
    /// Enumerate the stored objects strictly within `radius` of `center`.
    pub fn objects_in_sphere(
        &self,
        center: OPoint<T, D>,
        radius: T,
    ) -> RegionObjects<'_, T, D, O, Sphere<T, D>> {
        self.objects_in_region(Sphere::new(center, radius))
    }
}
