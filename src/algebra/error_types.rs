use thiserror::Error;

/// Error type returned by dense factorization routines.  The LU variant
/// carries a LAPACK-convention diagnostic: the 1-based index of the first
/// exactly zero pivot.
#[derive(Error, Debug)]
pub enum DenseFactorizationError {
    /// Matrix dimension fields and/or array lengths are incompatible
    #[error("Matrix dimension fields and/or array lengths are incompatible")]
    IncompatibleDimension,
    /// LU factorization detected a singular matrix
    #[error("LU error")]
    LU(i32),
}
