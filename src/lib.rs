mod bounding_box;
mod error;
mod interval;
mod misc;
mod orthant;
mod region;
mod surface;
mod tree;

pub mod prelude {
    pub use crate::bounding_box::*;
    pub use crate::error::*;
    pub use crate::interval::*;
    pub use crate::misc::*;
    pub use crate::orthant::*;
    pub use crate::region::*;
    pub use crate::surface::*;
    pub use crate::tree::*;
}
