mod types;
pub use self::types::*;

mod gemv;
mod lu;
pub use self::lu::LuFactors;
