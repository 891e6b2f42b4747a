use itertools::Itertools;
use nalgebra::{allocator::Allocator, DefaultAllocator, DimName, OPoint};

use crate::{
    bounding_box::BoundingBox,
    misc::{FloatingPoint, Positioned},
    tree::{coordinate_cmp, Node, OrthantTree},
};

mod sphere;

pub use sphere::*;

/// A spatial region described by up to three box/point predicates.
///
/// Only [`Region::intersects`] is mandatory, and it must never report
/// `false` for a box that truly intersects the region — intersection
/// failures prune whole subtrees. The optional predicates answer `None`
/// when the region cannot decide, and queries degrade gracefully:
///
/// - without [`Region::contains_point`], all objects in intersecting leaves
///   are yielded (false positives possible, never false negatives);
/// - without [`Region::contains_box`], a convex region with a point
///   predicate still gets the containment shortcut derived from its box
///   corners; otherwise every leaf is filtered individually.
pub trait Region<T: FloatingPoint, D: DimName>
where
    DefaultAllocator: Allocator<D>,
{
    /// Whether `bounds` intersects the region. No false negatives allowed.
    fn intersects(&self, bounds: &BoundingBox<T, D>) -> bool;

    /// Whether the region contains all of `bounds`, if decidable.
    fn contains_box(&self, bounds: &BoundingBox<T, D>) -> Option<bool> {
        let _ = bounds;
        None
    }

    /// Whether the region contains `point`, if decidable.
    fn contains_point(&self, point: &OPoint<T, D>) -> Option<bool> {
        let _ = point;
        None
    }

    /// Asserting convexity lets box containment be derived from the 2^D
    /// corners: a box lies inside a convex region iff all its corners do.
    fn convex(&self) -> bool {
        false
    }
}

impl<T: FloatingPoint, D: DimName, R: Region<T, D>> Region<T, D> for &R
where
    DefaultAllocator: Allocator<D>,
{
    fn intersects(&self, bounds: &BoundingBox<T, D>) -> bool {
        (*self).intersects(bounds)
    }

    fn contains_box(&self, bounds: &BoundingBox<T, D>) -> Option<bool> {
        (*self).contains_box(bounds)
    }

    fn contains_point(&self, point: &OPoint<T, D>) -> Option<bool> {
        (*self).contains_point(point)
    }

    fn convex(&self) -> bool {
        (*self).convex()
    }
}

/// Box containment with the convexity fallback.
fn box_fully_contained<T: FloatingPoint, D: DimName, R: Region<T, D>>(
    region: &R,
    bounds: &BoundingBox<T, D>,
) -> Option<bool>
where
    DefaultAllocator: Allocator<D>,
{
    if let Some(answer) = region.contains_box(bounds) {
        return Some(answer);
    }
    if !region.convex() {
        return None;
    }
    for corner in bounds.corners() {
        if !region.contains_point(&corner)? {
            return Some(false);
        }
    }
    Some(true)
}

impl<T: FloatingPoint, D: DimName, O: Positioned<T, D>> OrthantTree<T, D, O>
where
    DefaultAllocator: Allocator<D>,
{
    /// Enumerate, lazily, the leaf nodes whose box satisfies `predicate`.
    /// Recursion stops at the first failing node, pruning its subtree.
    pub fn leaves_intersecting<P>(&self, predicate: P) -> LeavesIntersecting<'_, T, D, O, P>
    where
        P: FnMut(&BoundingBox<T, D>) -> bool,
    {
        LeavesIntersecting {
            stack: vec![self],
            predicate,
        }
    }

    /// Enumerate, lazily, the stored objects inside `region`.
    ///
    /// Subtrees whose box fails [`Region::intersects`] are pruned. Subtrees
    /// whose box is known to be fully contained are yielded through
    /// traversal with no further predicate evaluation. Remaining leaves are
    /// filtered by [`Region::contains_point`] when it answers; otherwise
    /// their objects are yielded wholesale.
    pub fn objects_in_region<R>(&self, region: R) -> RegionObjects<'_, T, D, O, R>
    where
        R: Region<T, D>,
    {
        RegionObjects {
            stack: vec![(self, false)],
            leaf: Vec::new().into_iter(),
            region,
        }
    }
}

/// Lazy leaf enumeration. Created by [`OrthantTree::leaves_intersecting`].
pub struct LeavesIntersecting<'a, T: FloatingPoint, D: DimName, O, P>
where
    DefaultAllocator: Allocator<D>,
{
    stack: Vec<&'a OrthantTree<T, D, O>>,
    predicate: P,
}

impl<'a, T: FloatingPoint, D: DimName, O, P> Iterator for LeavesIntersecting<'a, T, D, O, P>
where
    DefaultAllocator: Allocator<D>,
    P: FnMut(&BoundingBox<T, D>) -> bool,
{
    type Item = &'a OrthantTree<T, D, O>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let node = self.stack.pop()?;
            if !(self.predicate)(&node.bounds) {
                continue;
            }
            match &node.node {
                Node::Leaf(_) => return Some(node),
                Node::Internal(children) => self.stack.extend(children.iter().rev()),
            }
        }
    }
}

/// Lazy region query. Created by [`OrthantTree::objects_in_region`].
///
/// Stack entries carry a flag marking subtrees already known to be fully
/// contained, which are drained without further predicate evaluation.
pub struct RegionObjects<'a, T: FloatingPoint, D: DimName, O, R>
where
    DefaultAllocator: Allocator<D>,
{
    stack: Vec<(&'a OrthantTree<T, D, O>, bool)>,
    leaf: std::vec::IntoIter<&'a O>,
    region: R,
}

impl<'a, T: FloatingPoint, D: DimName, O: Positioned<T, D>, R: Region<T, D>> Iterator
    for RegionObjects<'a, T, D, O, R>
where
    DefaultAllocator: Allocator<D>,
{
    type Item = &'a O;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(object) = self.leaf.next() {
                return Some(object);
            }
            let (node, contained) = self.stack.pop()?;
            if contained {
                match &node.node {
                    Node::Leaf(objects) => {
                        self.leaf = objects
                            .iter()
                            .sorted_by(|a, b| coordinate_cmp(a.position(), b.position()));
                    }
                    Node::Internal(children) => {
                        self.stack.extend(children.iter().rev().map(|c| (c, true)));
                    }
                }
                continue;
            }
            if !self.region.intersects(&node.bounds) {
                continue;
            }
            if box_fully_contained(&self.region, &node.bounds) == Some(true) {
                self.stack.push((node, true));
                continue;
            }
            match &node.node {
                Node::Leaf(objects) => {
                    self.leaf = objects
                        .iter()
                        .filter(|o| self.region.contains_point(o.position()).unwrap_or(true))
                        .sorted_by(|a, b| coordinate_cmp(a.position(), b.position()));
                }
                Node::Internal(children) => {
                    self.stack.extend(children.iter().rev().map(|c| (c, false)));
                }
            }
        }
    }
}
