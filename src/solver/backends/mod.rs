//! Backend capability interface and its realizations.
//!
//! A backend supplies factorization, triangular solves and the handful
//! of vector operations the refinement loop needs, over backend-resident
//! handles.  Handles let a realization keep operands wherever it likes —
//! host memory, device memory, or a split — for the whole lifetime of a
//! solve: the engine uploads once, iterates on handles, and downloads
//! once.  Per-iteration host/device traffic would dominate the cost of
//! one matrix-vector product plus one triangular solve, so residency is
//! part of the contract, not an optimization.
//!
//! All handles are owned by one in-flight solve and released by drop on
//! every exit path, including factorization failure.

use crate::algebra::{FloatT, Matrix};
use crate::solver::errors::BackendError;

mod host;
pub use host::HostBackend;

cfg_if::cfg_if! {
    if #[cfg(feature = "accelerator")] {
        mod device;
        pub use device::DeviceBackend;
        mod hybrid;
        pub use hybrid::HybridBackend;
    }
}

/// Dense linear algebra capabilities required by the refinement engine.
///
/// All operations are blocking; the engine never observes partial
/// completion.  A realization may execute data-parallel internally, but
/// each call's result must be complete when it returns.
pub trait DenseBackend<T: FloatT> {
    /// Backend-resident matrix handle.
    type Matrix;
    /// Backend-resident vector handle.
    type Vector;
    /// Opaque factorization artifact, valid only with the backend that
    /// produced it.
    type Factorization;

    /// Make `a` resident on the backend.
    fn load_matrix(&self, a: &Matrix<T>) -> Result<Self::Matrix, BackendError>;

    /// Make `v` resident on the backend.
    fn load_vector(&self, v: &[T]) -> Result<Self::Vector, BackendError>;

    /// Allocate an uninitialized-content scratch vector of length `n`.
    fn scratch_vector(&self, n: usize) -> Result<Self::Vector, BackendError>;

    /// Copy a resident vector back into caller memory.
    fn store_vector(&self, v: &Self::Vector, out: &mut [T]) -> Result<(), BackendError>;

    /// Factor a private copy of `a`; `a` itself stays valid for residual
    /// computation.  Fails with [`BackendError::Singular`] when the
    /// factorization detects singularity.
    fn factorize(&self, a: &Self::Matrix) -> Result<Self::Factorization, BackendError>;

    /// Solve in place against the stored factorization.  Never refactors.
    fn solve_in_place(
        &self,
        f: &Self::Factorization,
        v: &mut Self::Vector,
    ) -> Result<(), BackendError>;

    /// Compute `r = b - a*x`, to that sign convention exactly.
    fn residual(
        &self,
        a: &Self::Matrix,
        x: &Self::Vector,
        b: &Self::Vector,
        r: &mut Self::Vector,
    ) -> Result<(), BackendError>;

    /// Euclidean norm of `v`.
    fn norm2(&self, v: &Self::Vector) -> Result<T, BackendError>;

    /// Compute `y += alpha * x`.
    fn axpy(&self, alpha: T, x: &Self::Vector, y: &mut Self::Vector) -> Result<(), BackendError>;

    /// Copy `src` into `dst`.
    fn copy(&self, src: &Self::Vector, dst: &mut Self::Vector) -> Result<(), BackendError>;
}
