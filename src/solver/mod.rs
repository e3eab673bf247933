//! Refinement solver main module.
//!
//! This module contains the [`RefinementEngine`], the
//! [`DenseBackend`] capability trait it is written against, and the
//! concrete backend realizations.  The engine runs the same algorithm
//! over every backend: factor once, initial solve, then a residual /
//! convergence-check / correction loop.
//!
//! The engine performs no printing.  Diagnostics come back as an
//! [`IterationTrace`], which callers can inspect or render (it
//! implements `Display` as a per-iteration table).

pub(crate) mod backends;
mod convergence;
mod engine;
mod errors;
mod settings;
mod trace;

pub use backends::{DenseBackend, HostBackend};
pub use engine::RefinementEngine;
pub use errors::*;
pub use settings::*;
pub use trace::{IterationTrace, TerminationReason, TraceEntry};

#[cfg(feature = "accelerator")]
pub use backends::{DeviceBackend, HybridBackend};
