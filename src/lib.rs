//! __lurefine__ solves dense linear systems $Ax = b$ in floating point by
//! LU factorization followed by iterative refinement: the matrix is
//! factored once, an initial solution is computed, and the solution is then
//! repeatedly corrected by solving against the residual $r = b - Ax$ until
//! the residual norm stops improving.
//!
//! The refinement loop itself is written once, against a narrow
//! [`DenseBackend`](crate::solver::DenseBackend) capability trait, and runs
//! unchanged over any backend realization:
//!
//! * [`HostBackend`](crate::solver::HostBackend) — everything in host
//!   memory, native Rust kernels.
//! * `DeviceBackend` (feature `accelerator`) — operands and factorization
//!   resident on the accelerator via ArrayFire.
//! * `HybridBackend` (feature `accelerator`) — triangular factors on the
//!   accelerator, pivot bookkeeping and vector orchestration on the host.
//!
//! The engine performs no I/O; it returns an
//! [`IterationTrace`](crate::solver::IterationTrace) of residual norms and
//! a termination reason for the caller to inspect or render.

//Rust hates greek characters
#![allow(confusable_idents)]

pub mod algebra;
pub mod solver;
