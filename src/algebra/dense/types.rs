use crate::algebra::FloatT;
use std::ops::{Index, IndexMut};

/// Dense matrix with owned storage in column major format.
///
/// The matrix is never reshaped after construction.  Callers supplying
/// row-major data should construct via the `From` implementation on
/// nested row arrays, which performs the transposition, or transpose
/// before calling [`new_from_slice`](Matrix::new_from_slice).
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    /// dimensions
    size: (usize, usize),
    /// vector of data in column major format
    data: Vec<T>,
}

impl<T: FloatT> Matrix<T> {
    pub fn zeros(size: (usize, usize)) -> Self {
        let (m, n) = size;
        let data = vec![T::zero(); m * n];
        Self { size, data }
    }

    /// New matrix from column-major ordered data.
    pub fn new_from_slice(size: (usize, usize), src: &[T]) -> Self {
        let (m, n) = size;
        assert_eq!(m * n, src.len());
        Self {
            size,
            data: src.to_vec(),
        }
    }

    pub fn size(&self) -> (usize, usize) {
        self.size
    }

    pub fn nrows(&self) -> usize {
        self.size.0
    }

    pub fn ncols(&self) -> usize {
        self.size.1
    }

    pub fn is_square(&self) -> bool {
        self.size.0 == self.size.1
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    #[inline]
    fn index_linear(&self, idx: (usize, usize)) -> usize {
        idx.0 + self.nrows() * idx.1
    }

    pub(crate) fn col_slice(&self, col: usize) -> &[T] {
        let (m, n) = self.size;
        assert!(col < n);
        &self.data[(col * m)..(col + 1) * m]
    }

    pub(crate) fn swap_rows(&mut self, r1: usize, r2: usize) {
        let (m, n) = self.size;
        assert!(r1 < m && r2 < m);
        if r1 == r2 {
            return;
        }
        for col in 0..n {
            self.data.swap(r1 + m * col, r2 + m * col);
        }
    }
}

impl<T> Index<(usize, usize)> for Matrix<T>
where
    T: FloatT,
{
    type Output = T;
    fn index(&self, idx: (usize, usize)) -> &T {
        let lidx = self.index_linear(idx);
        &self.data[lidx]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T>
where
    T: FloatT,
{
    fn index_mut(&mut self, idx: (usize, usize)) -> &mut Self::Output {
        let lidx = self.index_linear(idx);
        &mut self.data[lidx]
    }
}

// Construction from nested arrays written row-wise, i.e. as humans
// read a matrix.  Transposition into column major happens here.
impl<T, const M: usize, const N: usize> From<&[[T; N]; M]> for Matrix<T>
where
    T: FloatT,
{
    fn from(rows: &[[T; N]; M]) -> Self {
        let mut out = Self::zeros((M, N));
        for (i, row) in rows.iter().enumerate() {
            for (j, &v) in row.iter().enumerate() {
                out[(i, j)] = v;
            }
        }
        out
    }
}
