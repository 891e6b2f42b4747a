use nalgebra::{allocator::Allocator, DefaultAllocator, DimName, OPoint};

use super::{Node, OrthantTree};
use crate::{
    error::TreeError,
    misc::{FloatingPoint, Positioned},
};

impl<T: FloatingPoint, D: DimName, O: Positioned<T, D>> OrthantTree<T, D, O>
where
    DefaultAllocator: Allocator<D>,
{
    /// The stored object nearest to `point` by Euclidean distance, or
    /// `Ok(None)` for an empty tree.
    ///
    /// Query points outside the root box are handled by projecting onto the
    /// box for descent routing only; candidate and pruning distances are
    /// always measured from `point` itself, so the result matches an
    /// exhaustive scan of all stored objects. A projection that fails the
    /// containment check is a fatal [`TreeError::InternalConsistency`] —
    /// aborting beats recursing forever on inconsistent geometry.
    ///
    /// # Examples
    /// ```
    /// use nalgebra::{Point1, Vector1};
    /// use orthant::prelude::*;
    ///
    /// let bounds = BoundingBox::try_new(Vector1::new(0.), Vector1::new(1.)).unwrap();
    /// let mut tree = OrthantTree::new(bounds, 2).unwrap();
    /// assert!(tree.nearest(&Point1::new(0.5)).unwrap().is_none());
    ///
    /// for x in [0.1, 0.9, 0.5, 0.2, 0.8] {
    ///     tree.insert(Point1::new(x)).unwrap();
    /// }
    /// assert_eq!(tree.nearest(&Point1::new(0.15)).unwrap(), Some(&Point1::new(0.1)));
    /// // Outside the box, the answer is still the true nearest object.
    /// assert_eq!(tree.nearest(&Point1::new(7.)).unwrap(), Some(&Point1::new(0.9)));
    /// ```
    pub fn nearest(&self, point: &OPoint<T, D>) -> Result<Option<&O>, TreeError> {
        if self.is_empty() {
            return Ok(None);
        }
        let route = if self.bounds.contains(point) {
            point.clone()
        } else {
            let projected = self.bounds.project(point);
            if !self.bounds.contains(&projected) {
                return Err(TreeError::InternalConsistency);
            }
            projected
        };
        Ok(self.nearest_in_subtree(point, &route).map(|(object, _)| object))
    }

    /// Branch-and-bound search. `route` is an in-box stand-in for `query`
    /// used only to pick the natural child; distances use `query`.
    fn nearest_in_subtree(&self, query: &OPoint<T, D>, route: &OPoint<T, D>) -> Option<(&O, T)> {
        match &self.node {
            Node::Leaf(objects) => {
                let mut best: Option<(&O, T)> = None;
                for object in objects {
                    let distance = (object.position() - query).norm();
                    // Strict comparison: the first minimal object wins ties.
                    if best.as_ref().is_none_or(|(_, d)| distance < *d) {
                        best = Some((object, distance));
                    }
                }
                best
            }
            Node::Internal(children) => {
                // The natural child first, to establish a tight bound early.
                let natural = self.orthant_unchecked(route).index();
                let mut best = if children[natural].is_empty() {
                    None
                } else {
                    children[natural].nearest_in_subtree(query, route)
                };

                for (index, child) in children.iter().enumerate() {
                    if index == natural || child.is_empty() {
                        continue;
                    }
                    // A child is never descended into when the lower bound
                    // on its distance already reaches the best candidate.
                    let lower_bound = child.bounds.distance_to(query);
                    if let Some((_, d)) = &best {
                        if lower_bound >= *d {
                            continue;
                        }
                    }
                    let child_route = child.bounds.project(route);
                    if let Some((object, distance)) = child.nearest_in_subtree(query, &child_route)
                    {
                        if best.as_ref().is_none_or(|(_, d)| distance < *d) {
                            best = Some((object, distance));
                        }
                    }
                }
                best
            }
        }
    }
}
