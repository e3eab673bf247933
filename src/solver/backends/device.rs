use arrayfire as af;

use crate::algebra::Matrix;
use crate::solver::backends::DenseBackend;
use crate::solver::errors::BackendError;

/// Accelerator-resident backend.  Every operand — the matrix, the
/// factorization and all vectors — lives in device memory for the whole
/// solve; the only transfers are the initial uploads and the final
/// download of the solution.
///
/// Requires the ArrayFire runtime with LAPACK support; the active
/// compute backend (CUDA, OpenCL or CPU) is whatever ArrayFire selects
/// or the caller has set via `arrayfire::set_backend`.
#[derive(Default, Debug, Clone)]
pub struct DeviceBackend;

impl DeviceBackend {
    pub fn new() -> Self {
        Self
    }
}

/// Packed LU factors and pivot vector, both device-resident.
pub struct DeviceFactors {
    lu: af::Array<f64>,
    pivot: af::Array<i32>,
    n: usize,
}

pub(crate) fn ensure_lapack() -> Result<(), BackendError> {
    if af::is_lapack_available() {
        Ok(())
    } else {
        Err(BackendError::Device(
            "ArrayFire runtime was built without LAPACK support".into(),
        ))
    }
}

fn vector_dims(n: usize) -> af::Dim4 {
    af::Dim4::new(&[n as u64, 1, 1, 1])
}

/// 1-based index of the first exactly zero diagonal entry of the
/// factored upper triangle, or None when the factorization is usable.
/// The packed-storage equivalent of a nonzero getrf diagnostic.
pub(crate) fn zero_pivot_diagnostic(factored: &af::Array<f64>) -> Option<i32> {
    let diag = af::diag_extract(factored, 0);
    let (dmin, _, idx) = af::imin_all(&af::abs(&diag));
    if dmin == 0.0 {
        Some(idx as i32 + 1)
    } else {
        None
    }
}

impl DenseBackend<f64> for DeviceBackend {
    type Matrix = af::Array<f64>;
    type Vector = af::Array<f64>;
    type Factorization = DeviceFactors;

    fn load_matrix(&self, a: &Matrix<f64>) -> Result<Self::Matrix, BackendError> {
        let (m, n) = a.size();
        // column major on both sides, no reordering on upload
        Ok(af::Array::new(
            a.data(),
            af::Dim4::new(&[m as u64, n as u64, 1, 1]),
        ))
    }

    fn load_vector(&self, v: &[f64]) -> Result<Self::Vector, BackendError> {
        Ok(af::Array::new(v, vector_dims(v.len())))
    }

    fn scratch_vector(&self, n: usize) -> Result<Self::Vector, BackendError> {
        Ok(af::constant(0.0f64, vector_dims(n)))
    }

    fn store_vector(&self, v: &Self::Vector, out: &mut [f64]) -> Result<(), BackendError> {
        if v.elements() != out.len() {
            return Err(BackendError::IncompatibleDimension);
        }
        v.host(out);
        Ok(())
    }

    fn factorize(&self, a: &Self::Matrix) -> Result<Self::Factorization, BackendError> {
        ensure_lapack()?;

        let dims = a.dims();
        let n = dims[0] as usize;
        if dims[1] as usize != n {
            return Err(BackendError::IncompatibleDimension);
        }

        // factor a device-side copy; `a` stays pristine for residuals.
        // pivot in permutation form, as solve_lu consumes it
        let mut lu = a.copy();
        let pivot = af::lu_inplace(&mut lu, false);

        if let Some(info) = zero_pivot_diagnostic(&lu) {
            return Err(BackendError::Singular(info));
        }

        Ok(DeviceFactors { lu, pivot, n })
    }

    fn solve_in_place(
        &self,
        f: &Self::Factorization,
        v: &mut Self::Vector,
    ) -> Result<(), BackendError> {
        if v.elements() != f.n {
            return Err(BackendError::IncompatibleDimension);
        }
        *v = af::solve_lu(&f.lu, &f.pivot, v, af::MatProp::NONE);
        Ok(())
    }

    fn residual(
        &self,
        a: &Self::Matrix,
        x: &Self::Vector,
        b: &Self::Vector,
        r: &mut Self::Vector,
    ) -> Result<(), BackendError> {
        let ax = af::matmul(a, x, af::MatProp::NONE, af::MatProp::NONE);
        *r = af::sub(b, &ax, false);
        Ok(())
    }

    fn norm2(&self, v: &Self::Vector) -> Result<f64, BackendError> {
        Ok(af::norm(v, af::NormType::VECTOR_2, 1.0, 1.0))
    }

    fn axpy(
        &self,
        alpha: f64,
        x: &Self::Vector,
        y: &mut Self::Vector,
    ) -> Result<(), BackendError> {
        let scaled = af::mul(x, &alpha, false);
        *y = af::add(y, &scaled, false);
        Ok(())
    }

    fn copy(&self, src: &Self::Vector, dst: &mut Self::Vector) -> Result<(), BackendError> {
        *dst = src.copy();
        Ok(())
    }
}
