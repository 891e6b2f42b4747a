use nalgebra::{allocator::Allocator, DefaultAllocator, DimName, OPoint};

use super::FloatingPoint;

/// Trait for values stored in a tree: anything exposing a point in D space.
///
/// The position is all the tree ever looks at; any payload carried alongside
/// it (an identifier, an index into another structure) is returned unchanged
/// by queries. Positions are treated as immutable once inserted.
pub trait Positioned<T: FloatingPoint, D: DimName>
where
    DefaultAllocator: Allocator<D>,
{
    fn position(&self) -> &OPoint<T, D>;
}

impl<T: FloatingPoint, D: DimName> Positioned<T, D> for OPoint<T, D>
where
    DefaultAllocator: Allocator<D>,
{
    fn position(&self) -> &OPoint<T, D> {
        self
    }
}
