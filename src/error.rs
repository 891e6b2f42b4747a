use thiserror::Error;

/// Errors surfaced by tree construction and queries.
///
/// All errors are synchronous and reported at the call that triggered them;
/// nothing is retried or logged internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TreeError {
    /// A coordinate count disagrees with the tree's fixed dimension.
    ///
    /// Most dimension checks are discharged at compile time by `DimName`
    /// typing; this survives at the dynamic boundaries that accept slices.
    #[error("dimension mismatch: expected {expected} coordinates, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A box has a non-positive extent on the given axis.
    #[error("invalid geometry: axis {axis} has non-positive extent")]
    InvalidGeometry { axis: usize },

    /// Bounds cannot be inferred from an empty object set.
    #[error("cannot infer bounds from an empty object set")]
    EmptyPointSet,

    /// Node capacity must be at least one.
    #[error("node capacity must be positive")]
    InvalidCapacity,

    /// A point lies outside the node's box. The tree never widens itself
    /// after construction.
    #[error("point lies outside the node bounds")]
    OutOfBounds,

    /// An address path descends past a leaf.
    #[error("no node exists at the given address")]
    UnknownAddress,

    /// A point projected onto a box failed the containment check. Aborting
    /// beats recursing forever on an inconsistent projection.
    #[error("internal consistency violation: projected point escaped its box")]
    InternalConsistency,
}
