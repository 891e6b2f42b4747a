use nalgebra::RealField;
use num_traits::{FromPrimitive, ToPrimitive};

/// Trait for floating point scalars (f32, f64)
/// used as the coordinate field of the tree.
pub trait FloatingPoint: RealField + FromPrimitive + ToPrimitive + Copy {}

impl FloatingPoint for f32 {}
impl FloatingPoint for f64 {}
