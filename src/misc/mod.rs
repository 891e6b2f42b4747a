mod floating_point;
mod positioned;

pub use floating_point::*;
pub use positioned::*;
