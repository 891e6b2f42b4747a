use std::cmp::Ordering;

use itertools::Itertools;
use nalgebra::{allocator::Allocator, DefaultAllocator, DimName, OPoint};

use super::{Node, OrthantTree};
use crate::misc::{FloatingPoint, Positioned};

/// Lexicographic comparison over coordinate sequences: the total order used
/// within leaves during traversal. Incomparable coordinates (NaN) are
/// treated as equal rather than poisoning the sort.
pub fn coordinate_cmp<T: FloatingPoint, D: DimName>(
    a: &OPoint<T, D>,
    b: &OPoint<T, D>,
) -> Ordering
where
    DefaultAllocator: Allocator<D>,
{
    for i in 0..D::dim() {
        match a[i].partial_cmp(&b[i]) {
            Some(Ordering::Equal) | None => continue,
            Some(ordering) => return ordering,
        }
    }
    Ordering::Equal
}

impl<T: FloatingPoint, D: DimName, O: Positioned<T, D>> OrthantTree<T, D, O>
where
    DefaultAllocator: Allocator<D>,
{
    /// Enumerate every stored object: leaves yield their objects in
    /// ascending [`coordinate_cmp`] order and children concatenate in
    /// [`Orthant`](crate::prelude::Orthant) order.
    ///
    /// The iterator is lazy and finite, and the sequence is deterministic:
    /// repeated traversals of an unmodified tree yield identical output.
    /// Dropping a partially consumed traversal is always safe.
    pub fn traverse(&self) -> Traverse<'_, T, D, O> {
        Traverse {
            stack: vec![self],
            leaf: Vec::new().into_iter(),
        }
    }
}

/// Depth-first object traversal. Created by [`OrthantTree::traverse`].
pub struct Traverse<'a, T: FloatingPoint, D: DimName, O>
where
    DefaultAllocator: Allocator<D>,
{
    stack: Vec<&'a OrthantTree<T, D, O>>,
    leaf: std::vec::IntoIter<&'a O>,
}

impl<'a, T: FloatingPoint, D: DimName, O: Positioned<T, D>> Iterator for Traverse<'a, T, D, O>
where
    DefaultAllocator: Allocator<D>,
{
    type Item = &'a O;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(object) = self.leaf.next() {
                return Some(object);
            }
            let node = self.stack.pop()?;
            match &node.node {
                Node::Leaf(objects) => {
                    self.leaf = objects
                        .iter()
                        .sorted_by(|a, b| coordinate_cmp(a.position(), b.position()));
                }
                // Reversed so the lowest orthant is popped first.
                Node::Internal(children) => self.stack.extend(children.iter().rev()),
            }
        }
    }
}
