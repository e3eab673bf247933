use crate::algebra::FloatT;
use itertools::Itertools;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Reason the refinement loop stopped.
#[repr(u32)]
#[derive(PartialEq, Eq, Clone, Debug, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TerminationReason {
    /// The residual was exactly zero; further correction is a no-op.
    ExactResidual,
    /// The residual norm stopped decreasing.  Refinement has reached the
    /// limit of achievable accuracy; this is a successful termination.
    Stalled,
    /// Correction limit reached before either of the above.
    MaxIterations,
    /// The matrix could not be factored.  Reported through the error
    /// path; see [`RefinementError::reason`](crate::solver::RefinementError::reason).
    SingularMatrix,
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// One refinement step: the iteration index and the residual norm
/// `‖b − Ax‖₂` measured at its start.
#[derive(PartialEq, Clone, Debug, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceEntry<T> {
    pub iteration: u32,
    pub residual_norm: T,
}

/// Per-iteration diagnostics of one refinement solve.
///
/// Append-only: the engine pushes one entry per residual evaluation and
/// records the termination reason when the loop exits.  Entry `k` holds
/// the residual norm *before* correction `k` is applied, so entry 0
/// measures the initial solve.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IterationTrace<T> {
    entries: Vec<TraceEntry<T>>,
    reason: TerminationReason,
}

impl<T> IterationTrace<T>
where
    T: FloatT,
{
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
            reason: TerminationReason::MaxIterations,
        }
    }

    pub(crate) fn push(&mut self, iteration: u32, residual_norm: T) {
        self.entries.push(TraceEntry {
            iteration,
            residual_norm,
        });
    }

    pub(crate) fn finish(&mut self, reason: TerminationReason) {
        self.reason = reason;
    }

    pub fn entries(&self) -> &[TraceEntry<T>] {
        &self.entries
    }

    pub fn reason(&self) -> TerminationReason {
        self.reason
    }

    /// Number of residual evaluations performed.
    pub fn iterations(&self) -> usize {
        self.entries.len()
    }

    /// Residual norm of the last recorded iteration.
    pub fn final_norm(&self) -> Option<T> {
        self.entries.last().map(|e| e.residual_norm)
    }

    /// True if the recorded norms never increase.  The entry that
    /// triggered a stall is excluded, since by definition it failed to
    /// improve on its predecessor.
    pub fn is_nonincreasing(&self) -> bool {
        let upto = match self.reason {
            TerminationReason::Stalled => self.entries.len().saturating_sub(1),
            _ => self.entries.len(),
        };
        self.entries[..upto]
            .iter()
            .tuple_windows()
            .all(|(a, b)| b.residual_norm <= a.residual_norm)
    }
}

// Render the trace as the familiar per-iteration table.  This lives
// outside the engine: the solve itself never prints.
impl<T> std::fmt::Display for IterationTrace<T>
where
    T: FloatT,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "{:<5} | {:<15}", "Iter", "||r||")?;
        writeln!(f, "--------------------------")?;
        for e in &self.entries {
            writeln!(f, "{:<5} | {:<1.8e}", e.iteration, e.residual_norm)?;
        }
        writeln!(f, "terminated: {}", self.reason)
    }
}
