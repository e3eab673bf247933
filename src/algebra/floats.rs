use num_traits::{Float, FloatConst, FromPrimitive, NumAssign};
use std::fmt::{Debug, Display, LowerExp};

/// Main trait for floating point types used throughout the solver.
///
/// All floating point calculations are performed on values implementing
/// `FloatT`, with implementations provided for the f32 and f64 native
/// types.  The accelerator backends are implemented for f64 only, since
/// the device libraries are bound here for double precision.
///
/// `FloatT` relies on [`num_traits`](num_traits) for most of its
/// constituent trait bounds.
pub trait FloatT:
    'static
    + Send
    + Float
    + FloatConst
    + NumAssign
    + Default
    + FromPrimitive
    + Display
    + LowerExp
    + Debug
    + Sized
{
}

impl FloatT for f32 {}
impl FloatT for f64 {}
