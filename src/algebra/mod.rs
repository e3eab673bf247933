//! Internal algebra for the refinement solver.
//!
//! All scalar, vector and dense matrix operations used by the solver go
//! through the traits defined here, implemented natively for slices and
//! for the column-major [`Matrix`] type.

mod error_types;
pub use error_types::*;

mod floats;
pub use floats::*;

mod math_traits;
pub use math_traits::*;

mod vecmath;

pub(crate) mod dense;
pub use dense::{LuFactors, Matrix};
