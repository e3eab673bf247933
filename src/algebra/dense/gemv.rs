#![allow(non_snake_case)]

use crate::algebra::{FloatT, Matrix, MultiplyGEMV, VectorMath};

impl<T> MultiplyGEMV for Matrix<T>
where
    T: FloatT,
{
    type T = T;
    // implements y = αA*x + βy with column major traversal
    fn gemv(&self, x: &[Self::T], y: &mut [Self::T], α: Self::T, β: Self::T) {
        let (m, n) = self.size();
        assert!(n == x.len() && m == y.len());

        if β == T::zero() {
            y.set(T::zero());
        } else if β != T::one() {
            y.scale(β);
        }

        for (j, &xj) in x.iter().enumerate() {
            let αxj = α * xj;
            if αxj == T::zero() {
                continue;
            }
            for (yi, &aij) in y.iter_mut().zip(self.col_slice(j)) {
                *yi += αxj * aij;
            }
        }
    }
}

macro_rules! generate_test_gemv {
    ($fxx:ty, $test_name:ident) => {
        #[test]
        fn $test_name() {
            let (m, n) = (2, 3);
            let a = vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0];
            let A = Matrix::<$fxx>::new_from_slice((m, n), &a);

            let x = vec![1., 2., 3.];
            let mut y = vec![-1., -2.];
            A.gemv(&x, &mut y, 2.0, 3.0);
            assert!(y == [25.0, 58.0]);
        }
    };
}

generate_test_gemv!(f32, test_gemv_f32);
generate_test_gemv!(f64, test_gemv_f64);
