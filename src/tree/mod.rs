use std::mem;

use nalgebra::{allocator::Allocator, DefaultAllocator, DimName, OPoint};

use crate::{
    bounding_box::BoundingBox,
    error::TreeError,
    misc::{FloatingPoint, Positioned},
    orthant::Orthant,
};

mod nearest;
mod traverse;

pub use traverse::{coordinate_cmp, Traverse};

/// A node of a generalized 2^D-tree: a box, a capacity, and either stored
/// objects (leaf) or exactly 2^D children, one per [`Orthant`].
///
/// Splitting is capacity-driven: a leaf holding more than `capacity` objects
/// bisects its box along every axis and redistributes. The transition is
/// one-way; nodes never merge, and nothing is ever deleted.
///
/// The box is fixed at construction. Inserting coincident points beyond the
/// capacity recurses without bound, since every split routes them to the
/// same child; callers choose capacities and point sets accordingly.
///
/// Not thread-safe: insertion mutates node state without synchronization, so
/// concurrent use must be serialized by the caller.
///
/// # Examples
/// ```
/// use nalgebra::{Point2, Vector2};
/// use orthant::prelude::*;
///
/// let bounds = BoundingBox::try_new(Vector2::new(0., 0.), Vector2::new(1., 1.)).unwrap();
/// let mut tree = OrthantTree::new(bounds, 4).unwrap();
/// tree.insert(Point2::new(0.25, 0.75)).unwrap();
/// assert_eq!(tree.len(), 1);
/// assert!(tree.insert(Point2::new(2., 0.)).is_err());
/// ```
pub struct OrthantTree<T: FloatingPoint, D: DimName, O>
where
    DefaultAllocator: Allocator<D>,
{
    pub(crate) bounds: BoundingBox<T, D>,
    pub(crate) capacity: usize,
    pub(crate) len: usize,
    pub(crate) node: Node<T, D, O>,
}

pub(crate) enum Node<T: FloatingPoint, D: DimName, O>
where
    DefaultAllocator: Allocator<D>,
{
    Leaf(Vec<O>),
    Internal(Vec<OrthantTree<T, D, O>>),
}

impl<T: FloatingPoint, D: DimName, O: Positioned<T, D>> OrthantTree<T, D, O>
where
    DefaultAllocator: Allocator<D>,
{
    /// Create an empty tree over an explicit box.
    ///
    /// Fails with [`TreeError::InvalidCapacity`] unless `capacity >= 1`.
    pub fn new(bounds: BoundingBox<T, D>, capacity: usize) -> Result<Self, TreeError> {
        if capacity == 0 {
            return Err(TreeError::InvalidCapacity);
        }
        Ok(Self {
            bounds,
            capacity,
            len: 0,
            node: Node::Leaf(Vec::new()),
        })
    }

    /// Create a tree covering exactly the bounding box of `objects` and
    /// insert them all.
    pub fn from_objects(objects: Vec<O>, capacity: usize) -> Result<Self, TreeError> {
        let bounds = BoundingBox::try_from_points(objects.iter().map(|o| o.position()))?;
        let mut tree = Self::new(bounds, capacity)?;
        tree.extend(objects)?;
        Ok(tree)
    }

    /// Create a tree over the per-axis union of an explicit box and the
    /// bounding box of `objects`, then insert them all. The box only ever
    /// widens, so no starting object is excluded by tight explicit bounds.
    ///
    /// With no objects this is equivalent to [`OrthantTree::new`].
    pub fn with_bounds(
        bounds: BoundingBox<T, D>,
        objects: Vec<O>,
        capacity: usize,
    ) -> Result<Self, TreeError> {
        if objects.is_empty() {
            return Self::new(bounds, capacity);
        }
        let point_bounds = BoundingBox::try_from_points(objects.iter().map(|o| o.position()))?;
        let mut tree = Self::new(bounds.union(&point_bounds), capacity)?;
        tree.extend(objects)?;
        Ok(tree)
    }

    pub fn bounds(&self) -> &BoundingBox<T, D> {
        &self.bounds
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of objects stored in this subtree.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// A node is a leaf iff it has no children.
    pub fn is_leaf(&self) -> bool {
        matches!(self.node, Node::Leaf(_))
    }

    /// The child in the given orthant, or `None` at a leaf.
    pub fn child(&self, orthant: Orthant<D>) -> Option<&Self> {
        match &self.node {
            Node::Leaf(_) => None,
            Node::Internal(children) => Some(&children[orthant.index()]),
        }
    }

    /// The orthant whose child would accommodate `point`: per axis, the
    /// upper half iff the coordinate is at or above the midpoint (ties go
    /// up).
    ///
    /// Fails with [`TreeError::OutOfBounds`] for points outside this node's
    /// box.
    pub fn orthant_of(&self, point: &OPoint<T, D>) -> Result<Orthant<D>, TreeError> {
        if !self.bounds.contains(point) {
            return Err(TreeError::OutOfBounds);
        }
        Ok(self.orthant_unchecked(point))
    }

    /// Accommodation for a point already known to be inside the box.
    pub(crate) fn orthant_unchecked(&self, point: &OPoint<T, D>) -> Orthant<D> {
        let bits = (0..D::dim()).fold(0, |acc, i| {
            let upper = point[i] >= self.bounds.interval(i).midpoint();
            (acc << 1) | usize::from(upper)
        });
        Orthant::from_index(bits)
    }

    /// Insert one object.
    ///
    /// Fails with [`TreeError::OutOfBounds`] if its position lies outside
    /// the root box; the tree is not self-widening after construction.
    pub fn insert(&mut self, object: O) -> Result<(), TreeError> {
        if !self.bounds.contains(object.position()) {
            return Err(TreeError::OutOfBounds);
        }
        self.insert_contained(object);
        Ok(())
    }

    /// Insert objects one by one. A failure partway through leaves the
    /// earlier objects inserted; there is no rollback.
    pub fn extend<I>(&mut self, objects: I) -> Result<(), TreeError>
    where
        I: IntoIterator<Item = O>,
    {
        for object in objects {
            self.insert(object)?;
        }
        Ok(())
    }

    fn insert_contained(&mut self, object: O) {
        self.len += 1;
        let orthant = self.orthant_unchecked(object.position());
        match &mut self.node {
            Node::Leaf(objects) => {
                objects.push(object);
                // Strictly greater than: a leaf holds up to `capacity`
                // objects and splits on the one after.
                if objects.len() > self.capacity {
                    self.split();
                }
            }
            Node::Internal(children) => children[orthant.index()].insert_contained(object),
        }
    }

    /// One-way leaf-to-internal transition: bisect every axis, create the
    /// 2^D children and redistribute the stored objects by accommodation.
    fn split(&mut self) {
        let objects = match &mut self.node {
            Node::Leaf(objects) => mem::take(objects),
            Node::Internal(_) => return,
        };
        let mut children: Vec<Self> = Orthant::all()
            .map(|o| Self {
                bounds: self.bounds.orthant_box(o),
                capacity: self.capacity,
                len: 0,
                node: Node::Leaf(Vec::new()),
            })
            .collect();
        for object in objects {
            let slot = self.orthant_unchecked(object.position()).index();
            children[slot].insert_contained(object);
        }
        self.node = Node::Internal(children);
    }

    /// The orthant chosen at each level from this node down to the leaf
    /// that would contain `point`; empty if this node is itself a leaf.
    ///
    /// Fails with [`TreeError::OutOfBounds`] for points outside the box.
    pub fn full_address(&self, point: &OPoint<T, D>) -> Result<Vec<Orthant<D>>, TreeError> {
        if !self.bounds.contains(point) {
            return Err(TreeError::OutOfBounds);
        }
        let mut address = Vec::new();
        let mut node = self;
        while let Node::Internal(children) = &node.node {
            let orthant = node.orthant_unchecked(point);
            address.push(orthant);
            node = &children[orthant.index()];
        }
        Ok(address)
    }

    /// Resolve a node by following orthants from this node.
    ///
    /// Fails with [`TreeError::UnknownAddress`] if the path descends past a
    /// leaf.
    pub fn node_for_address(&self, address: &[Orthant<D>]) -> Result<&Self, TreeError> {
        let mut node = self;
        for orthant in address {
            match &node.node {
                Node::Internal(children) => node = &children[orthant.index()],
                Node::Leaf(_) => return Err(TreeError::UnknownAddress),
            }
        }
        Ok(node)
    }

    /// The leaf that would contain `point`.
    pub fn node_for_point(&self, point: &OPoint<T, D>) -> Result<&Self, TreeError> {
        let address = self.full_address(point)?;
        self.node_for_address(&address)
    }
}
