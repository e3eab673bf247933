use crate::algebra::FloatT;
use crate::solver::trace::TerminationReason;

/// Outcome of one convergence assessment.
#[derive(PartialEq, Eq, Clone, Debug, Copy)]
pub(crate) enum ConvergenceState {
    Continue,
    Stop(TerminationReason),
}

/// Convergence policy for the refinement loop, consulted once per
/// residual evaluation.  Stateless apart from the previous residual norm.
///
/// Stops on an exactly zero residual, or on the first step whose norm
/// fails to improve on its predecessor (non-strict `>=`, so an equal
/// norm also stops: once rounding error dominates, pressing on risks
/// oscillation rather than accuracy).  The very first assessment can
/// never stall, since there is no predecessor yet; this one-iteration
/// grace period is deliberate.
///
/// NaN norms satisfy neither condition and fall through to `Continue`;
/// guarding against non-finite inputs is the caller's concern, and the
/// iteration limit still bounds the loop.
#[derive(Debug)]
pub(crate) struct ConvergenceCheck<T> {
    prev_norm: Option<T>,
}

impl<T> ConvergenceCheck<T>
where
    T: FloatT,
{
    pub fn new() -> Self {
        Self { prev_norm: None }
    }

    pub fn assess(&mut self, current_norm: T) -> ConvergenceState {
        if current_norm == T::zero() {
            return ConvergenceState::Stop(TerminationReason::ExactResidual);
        }
        if let Some(prev_norm) = self.prev_norm {
            if current_norm >= prev_norm {
                return ConvergenceState::Stop(TerminationReason::Stalled);
            }
        }
        self.prev_norm = Some(current_norm);
        ConvergenceState::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_zero_stops() {
        let mut check = ConvergenceCheck::<f64>::new();
        assert_eq!(
            check.assess(0.0),
            ConvergenceState::Stop(TerminationReason::ExactResidual)
        );
    }

    #[test]
    fn test_first_iteration_grace() {
        // a huge first norm must not stall, whatever came before the solve
        let mut check = ConvergenceCheck::<f64>::new();
        assert_eq!(check.assess(1e30), ConvergenceState::Continue);
        assert_eq!(check.assess(1e-3), ConvergenceState::Continue);
    }

    #[test]
    fn test_stall_is_nonstrict() {
        let mut check = ConvergenceCheck::<f64>::new();
        assert_eq!(check.assess(1.0), ConvergenceState::Continue);
        // equality counts as a stall
        assert_eq!(
            check.assess(1.0),
            ConvergenceState::Stop(TerminationReason::Stalled)
        );
    }

    #[test]
    fn test_stall_after_improvement() {
        let mut check = ConvergenceCheck::<f64>::new();
        assert_eq!(check.assess(1.0), ConvergenceState::Continue);
        assert_eq!(check.assess(0.25), ConvergenceState::Continue);
        assert_eq!(
            check.assess(0.5),
            ConvergenceState::Stop(TerminationReason::Stalled)
        );
    }

    #[test]
    fn test_nan_does_not_stop() {
        let mut check = ConvergenceCheck::<f64>::new();
        assert_eq!(check.assess(1.0), ConvergenceState::Continue);
        assert_eq!(check.assess(f64::NAN), ConvergenceState::Continue);
    }
}
