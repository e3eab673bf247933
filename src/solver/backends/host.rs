use crate::algebra::{FloatT, LuFactors, Matrix, MultiplyGEMV, VectorMath};
use crate::solver::backends::DenseBackend;
use crate::solver::errors::BackendError;

/// Host-resident backend: all operands stay in host memory and every
/// operation runs on the native algebra kernels.
#[derive(Default, Debug, Clone)]
pub struct HostBackend;

impl HostBackend {
    pub fn new() -> Self {
        Self
    }
}

impl<T> DenseBackend<T> for HostBackend
where
    T: FloatT,
{
    type Matrix = Matrix<T>;
    type Vector = Vec<T>;
    type Factorization = LuFactors<T>;

    fn load_matrix(&self, a: &Matrix<T>) -> Result<Self::Matrix, BackendError> {
        Ok(a.clone())
    }

    fn load_vector(&self, v: &[T]) -> Result<Self::Vector, BackendError> {
        Ok(v.to_vec())
    }

    fn scratch_vector(&self, n: usize) -> Result<Self::Vector, BackendError> {
        Ok(vec![T::zero(); n])
    }

    fn store_vector(&self, v: &Self::Vector, out: &mut [T]) -> Result<(), BackendError> {
        if v.len() != out.len() {
            return Err(BackendError::IncompatibleDimension);
        }
        out.copy_from(v);
        Ok(())
    }

    fn factorize(&self, a: &Self::Matrix) -> Result<Self::Factorization, BackendError> {
        LuFactors::factor(a).map_err(BackendError::from)
    }

    fn solve_in_place(
        &self,
        f: &Self::Factorization,
        v: &mut Self::Vector,
    ) -> Result<(), BackendError> {
        if v.len() != f.nrows() {
            return Err(BackendError::IncompatibleDimension);
        }
        f.solve_in_place(v);
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
        // r = b, then r = -A*x + r
        r.copy_from(b);
        a.gemv(x, r, -T::one(), T::one());
        Ok(())
    }

    fn norm2(&self, v: &Self::Vector) -> Result<T, BackendError> {
        Ok(v.norm())
    }

    fn axpy(&self, alpha: T, x: &Self::Vector, y: &mut Self::Vector) -> Result<(), BackendError> {
        y.axpby(alpha, x, T::one());
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_residual_sign() {
        let backend = HostBackend::new();
        let a = Matrix::<f64>::from(&[
            [2., 0.], //
            [0., 2.], //
        ]);
        let a = backend.load_matrix(&a).unwrap();
        let x = backend.load_vector(&[1., 1.]).unwrap();
        let b = backend.load_vector(&[3., 3.]).unwrap();
        let mut r = backend.scratch_vector(2).unwrap();

        backend.residual(&a, &x, &b, &mut r).unwrap();

        // r = b - A*x, not A*x - b
        assert_eq!(r, vec![1., 1.]);
    }

    #[test]
    fn test_host_factor_and_solve() {
        let backend = HostBackend::new();
        let a = Matrix::<f64>::from(&[
            [4., 3.], //
            [6., 3.], //
        ]);
        let a = backend.load_matrix(&a).unwrap();
        let f = backend.factorize(&a).unwrap();

        let mut v = backend.load_vector(&[10., 12.]).unwrap();
        backend.solve_in_place(&f, &mut v).unwrap();

        assert!(v.norm_inf_diff(&[1., 2.]) < 1e-12);
    }
}
