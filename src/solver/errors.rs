use crate::algebra::DenseFactorizationError;
use crate::solver::trace::TerminationReason;
use thiserror::Error;

/// Error type returned by backend operations.
#[derive(Error, Debug)]
pub enum BackendError {
    /// Operand dimensions are incompatible
    #[error("Incompatible operand dimensions")]
    IncompatibleDimension,
    /// Factorization detected a (near-)singular matrix.  Carries the
    /// diagnostic code of the underlying factorization, LAPACK
    /// convention: the 1-based index of the first zero pivot.
    #[error("Matrix is singular (factorization diagnostic {0})")]
    Singular(i32),
    /// Triangular solve against a valid factorization failed
    #[error("Triangular solve failed")]
    Solve,
    /// Device-side failure reported by the accelerator runtime
    #[error("Device error: {0}")]
    Device(String),
}

impl From<DenseFactorizationError> for BackendError {
    fn from(err: DenseFactorizationError) -> Self {
        match err {
            DenseFactorizationError::IncompatibleDimension => BackendError::IncompatibleDimension,
            DenseFactorizationError::LU(info) => BackendError::Singular(info),
        }
    }
}

/// Error type returned by [`RefinementEngine::solve`](crate::solver::RefinementEngine::solve).
///
/// A refinement stall is *not* an error: it is reported through
/// [`TerminationReason::Stalled`] on the returned trace.  Errors here mean
/// the solve was broken, not that it stopped improving.
#[derive(Error, Debug)]
pub enum RefinementError {
    /// The matrix could not be factored.  No solve was attempted and the
    /// caller's solution buffer is left untouched.
    #[error("Matrix is singular (factorization diagnostic {info})")]
    SingularMatrix { info: i32 },
    /// A triangular solve failed.  `iteration` is 0 for the initial
    /// solve and `k + 1` for the correction of refinement step `k`.
    #[error("Solve failed at iteration {iteration}: {source}")]
    SolveFailed {
        iteration: u32,
        source: BackendError,
    },
    /// Problem dimensions are inconsistent or the matrix is empty
    #[error("Incompatible problem dimensions")]
    IncompatibleDimension,
    /// Any other backend failure (transfers, allocation)
    #[error("Backend failure: {0}")]
    Backend(#[from] BackendError),
}

impl RefinementError {
    /// Map the failure onto the four-way termination taxonomy, for
    /// callers that consume a single [`TerminationReason`] for both
    /// successful and failed solves.
    pub fn reason(&self) -> Option<TerminationReason> {
        match self {
            RefinementError::SingularMatrix { .. } => Some(TerminationReason::SingularMatrix),
            _ => None,
        }
    }
}
