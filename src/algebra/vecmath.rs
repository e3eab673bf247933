use super::{FloatT, VectorMath};
use std::iter::zip;

impl<T: FloatT> VectorMath for [T] {
    type T = T;

    fn copy_from(&mut self, src: &[T]) -> &mut Self {
        self.copy_from_slice(src);
        self
    }

    fn set(&mut self, c: T) -> &mut Self {
        for x in &mut *self {
            *x = c;
        }
        self
    }

    fn scale(&mut self, c: T) -> &mut Self {
        for x in &mut *self {
            *x *= c;
        }
        self
    }

    fn dot(&self, y: &[T]) -> T {
        let iter = zip(self, y);
        let op = |(&x, &y): (&T, &T)| x * y;
        accumulate_pairwise(iter, op)
    }

    fn sumsq(&self) -> T {
        self.dot(self)
    }

    // 2-norm
    fn norm(&self) -> T {
        T::sqrt(self.sumsq())
    }

    fn norm_inf_diff(&self, b: &[T]) -> T {
        zip(self, b).fold(T::zero(), |acc, (x, y)| T::max(acc, T::abs(*x - *y)))
    }

    fn is_finite(&self) -> bool {
        self.iter().all(|&x| T::is_finite(x))
    }

    fn axpby(&mut self, a: T, x: &[T], b: T) -> &mut Self {
        assert_eq!(self.len(), x.len());

        zip(&mut *self, x).for_each(|(y, x)| *y = a * (*x) + b * (*y));
        self
    }
}

// ---------------------------------------------------------------------
// generic pairwise accumulator utility for sums, dot products etc

fn accumulate_pairwise<T, I, A, F>(x: I, op: F) -> T
where
    T: FloatT,
    I: IntoIterator<Item = A> + Clone,
    I::IntoIter: ExactSizeIterator,
    F: Fn(A) -> T,
{
    const BASE_CASE_DIM: usize = 16;

    let n = x.clone().into_iter().len();
    return if n == 0 {
        T::zero()
    } else {
        accumulate_pairwise_inner(x, &op, 0, n)
    };

    fn accumulate_pairwise_inner<T, I, A, F>(x: I, op: &F, i1: usize, n: usize) -> T
    where
        T: FloatT,
        I: IntoIterator<Item = A> + Clone,
        I::IntoIter: ExactSizeIterator,
        F: Fn(A) -> T,
    {
        if n < BASE_CASE_DIM {
            x.into_iter()
                .skip(i1)
                .take(n)
                .fold(T::zero(), |acc, x| acc + op(x))
        } else {
            let n2 = n / 2;
            accumulate_pairwise_inner(x.clone(), op, i1, n2)
                + accumulate_pairwise_inner(x, op, i1 + n2, n - n2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_and_norm() {
        let x: Vec<f64> = (1..=20).map(|v| v as f64).collect();
        let y = vec![1.0; 20];

        assert_eq!(x.dot(&y), 210.0);
        assert_eq!(y.sumsq(), 20.0);
        assert_eq!(vec![3.0, 4.0].norm(), 5.0);
    }

    #[test]
    fn test_axpby() {
        let x = vec![1.0, 2.0, 3.0];
        let mut y = vec![10.0, 20.0, 30.0];
        y.axpby(2.0, &x, 1.0);
        assert_eq!(y, vec![12.0, 24.0, 36.0]);
    }

    #[test]
    fn test_is_finite() {
        assert!(vec![1.0, 2.0].is_finite());
        assert!(!vec![1.0, f64::NAN].is_finite());
        assert!(!vec![1.0, f64::INFINITY].is_finite());
    }
}
