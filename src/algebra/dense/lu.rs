#![allow(non_snake_case)]

use crate::algebra::{DenseFactorizationError, FloatT, Matrix};

/// LU factorization with partial pivoting of a square dense matrix.
///
/// Stores the combined L/U factors (L unit lower triangular, implicit
/// unit diagonal) and the pivot sequence, LAPACK getrf style.  The
/// factorization is computed once and then reused for any number of
/// [`solve_in_place`](LuFactors::solve_in_place) calls; the input matrix
/// is left untouched.
#[derive(Debug, Clone)]
pub struct LuFactors<T> {
    lu: Matrix<T>,
    ipiv: Vec<usize>,
}

impl<T> LuFactors<T>
where
    T: FloatT,
{
    /// Factor `A`, working on a private copy.
    ///
    /// Fails with [`DenseFactorizationError::LU`] carrying the 1-based
    /// column index of the first exactly zero pivot when the matrix is
    /// singular.
    pub fn factor(A: &Matrix<T>) -> Result<Self, DenseFactorizationError> {
        if !A.is_square() {
            return Err(DenseFactorizationError::IncompatibleDimension);
        }

        let n = A.nrows();
        let mut lu = A.clone();
        let mut ipiv = vec![0usize; n];

        for j in 0..n {
            // pivot row for column j
            let mut p = j;
            let mut pmax = T::abs(lu[(j, j)]);
            for i in (j + 1)..n {
                let v = T::abs(lu[(i, j)]);
                if v > pmax {
                    pmax = v;
                    p = i;
                }
            }
            ipiv[j] = p;

            if lu[(p, j)] == T::zero() {
                return Err(DenseFactorizationError::LU((j + 1) as i32));
            }
            lu.swap_rows(j, p);

            // scale multipliers and eliminate below the diagonal
            let pivot = lu[(j, j)];
            for i in (j + 1)..n {
                lu[(i, j)] = lu[(i, j)] / pivot;
            }
            for c in (j + 1)..n {
                let ujc = lu[(j, c)];
                if ujc == T::zero() {
                    continue;
                }
                for i in (j + 1)..n {
                    let lij = lu[(i, j)];
                    lu[(i, c)] = lu[(i, c)] - lij * ujc;
                }
            }
        }

        Ok(Self { lu, ipiv })
    }

    pub fn nrows(&self) -> usize {
        self.lu.nrows()
    }

    /// Solve `Ax = b` in place, with `x` holding `b` on entry and the
    /// solution on exit.  Does not refactor.
    pub fn solve_in_place(&self, x: &mut [T]) {
        let n = self.nrows();
        assert_eq!(x.len(), n);

        // apply the pivot sequence to the right hand side
        for (j, &p) in self.ipiv.iter().enumerate() {
            if p != j {
                x.swap(j, p);
            }
        }

        // forward substitution, unit lower triangle
        for j in 0..n {
            let xj = x[j];
            if xj != T::zero() {
                for i in (j + 1)..n {
                    x[i] = x[i] - self.lu[(i, j)] * xj;
                }
            }
        }

        // back substitution
        for j in (0..n).rev() {
            x[j] = x[j] / self.lu[(j, j)];
            let xj = x[j];
            if xj != T::zero() {
                for i in 0..j {
                    x[i] = x[i] - self.lu[(i, j)] * xj;
                }
            }
        }
    }
}

macro_rules! generate_test_lu {
    ($fxx:ty, $test_name:ident, $tol:expr) => {
        #[test]
        fn $test_name() {
            use crate::algebra::VectorMath;

            let A = Matrix::<$fxx>::from(&[
                [3., 2., 4.], //
                [2., 0., 2.], //
                [4., 2., 3.], //
            ]);

            let lu = LuFactors::factor(&A).unwrap();

            let mut x = vec![-5., -2., -2.];
            lu.solve_in_place(&mut x);
            assert!(x.norm_inf_diff(&[1., 0., -2.]) < $tol);

            // same factorization, second right hand side
            let mut x = vec![13., 4., 9.];
            lu.solve_in_place(&mut x);
            assert!(x.norm_inf_diff(&[-1., 2., 3.]) < $tol);
        }
    };
}

generate_test_lu!(f32, test_lu_f32, 1e-5);
generate_test_lu!(f64, test_lu_f64, 1e-12);

#[test]
fn test_lu_singular() {
    // second row exactly zero
    let A = Matrix::<f64>::from(&[
        [1., 2., 3.], //
        [0., 0., 0.], //
        [4., 5., 6.], //
    ]);

    match LuFactors::factor(&A) {
        Err(DenseFactorizationError::LU(info)) => assert!(info > 0),
        _ => panic!("expected singular factorization failure"),
    }
}

#[test]
fn test_lu_not_square() {
    let A = Matrix::<f64>::zeros((3, 2));
    assert!(matches!(
        LuFactors::factor(&A),
        Err(DenseFactorizationError::IncompatibleDimension)
    ));
}
