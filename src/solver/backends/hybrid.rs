use arrayfire as af;

use crate::algebra::{Matrix, MultiplyGEMV, VectorMath};
use crate::solver::backends::device::{ensure_lapack, zero_pivot_diagnostic};
use crate::solver::backends::DenseBackend;
use crate::solver::errors::BackendError;

/// Hybrid backend: triangular factors live on the accelerator, pivot
/// bookkeeping and all vector orchestration stay host-resident.
///
/// Each solve permutes the right-hand side on the host, ships it to the
/// device for the two triangular solves, and ships the result back.
/// Residuals, norms and updates run on the host against a retained host
/// copy of the matrix, so the per-iteration traffic is one vector each
/// way — the coupled host/device execution model of hybrid LU libraries.
#[derive(Default, Debug, Clone)]
pub struct HybridBackend;

impl HybridBackend {
    pub fn new() -> Self {
        Self
    }
}

/// Matrix handle keeping both residencies alive: the device copy feeds
/// the factorization, the host copy feeds residual computation.
pub struct HybridMatrix {
    host: Matrix<f64>,
    device: af::Array<f64>,
}

/// Explicit triangular factors on the device, permutation on the host.
pub struct HybridFactors {
    lower: af::Array<f64>,
    upper: af::Array<f64>,
    perm: Vec<i32>,
}

impl DenseBackend<f64> for HybridBackend {
    type Matrix = HybridMatrix;
    type Vector = Vec<f64>;
    type Factorization = HybridFactors;

    fn load_matrix(&self, a: &Matrix<f64>) -> Result<Self::Matrix, BackendError> {
        let (m, n) = a.size();
        let device = af::Array::new(a.data(), af::Dim4::new(&[m as u64, n as u64, 1, 1]));
        Ok(HybridMatrix {
            host: a.clone(),
            device,
        })
    }

    fn load_vector(&self, v: &[f64]) -> Result<Self::Vector, BackendError> {
        Ok(v.to_vec())
    }

    fn scratch_vector(&self, n: usize) -> Result<Self::Vector, BackendError> {
        Ok(vec![0.0; n])
    }

    fn store_vector(&self, v: &Self::Vector, out: &mut [f64]) -> Result<(), BackendError> {
        if v.len() != out.len() {
            return Err(BackendError::IncompatibleDimension);
        }
        out.copy_from(v);
        Ok(())
    }

    fn factorize(&self, a: &Self::Matrix) -> Result<Self::Factorization, BackendError> {
        ensure_lapack()?;

        if !a.host.is_square() {
            return Err(BackendError::IncompatibleDimension);
        }
        let n = a.host.nrows();

        // explicit factors on the device, permutation brought home
        let (lower, upper, pivot) = af::lu(&a.device);

        if let Some(info) = zero_pivot_diagnostic(&upper) {
            return Err(BackendError::Singular(info));
        }

        let mut perm = vec![0i32; n];
        pivot.host(&mut perm);

        Ok(HybridFactors { lower, upper, perm })
    }

    fn solve_in_place(
        &self,
        f: &Self::Factorization,
        v: &mut Self::Vector,
    ) -> Result<(), BackendError> {
        let n = f.perm.len();
        if v.len() != n {
            return Err(BackendError::IncompatibleDimension);
        }

        // host-side pivot application, then the triangular pair on device
        let permuted: Vec<f64> = f.perm.iter().map(|&p| v[p as usize]).collect();
        let rhs = af::Array::new(&permuted, af::Dim4::new(&[n as u64, 1, 1, 1]));

        let y = af::solve(&f.lower, &rhs, af::MatProp::LOWER);
        let solution = af::solve(&f.upper, &y, af::MatProp::UPPER);

        solution.host(v);
        Ok(())
    }

    fn residual(
        &self,
        a: &Self::Matrix,
        x: &Self::Vector,
        b: &Self::Vector,
        r: &mut Self::Vector,
    ) -> Result<(), BackendError> {
        if r.len() != b.len() {
            return Err(BackendError::IncompatibleDimension);
        }
        r.copy_from(b);
        a.host.gemv(x, r, -1.0, 1.0);
        Ok(())
    }

    fn norm2(&self, v: &Self::Vector) -> Result<f64, BackendError> {
        Ok(v.norm())
    }

    fn axpy(&self, alpha: f64, x: &Self::Vector, y: &mut Self::Vector) -> Result<(), BackendError> {
        y.axpby(alpha, x, 1.0);
        Ok(())
    }

    fn copy(&self, src: &Self::Vector, dst: &mut Self::Vector) -> Result<(), BackendError> {
        if src.len() != dst.len() {
            return Err(BackendError::IncompatibleDimension);
        }
        dst.copy_from(src);
        Ok(())
    }
}
