//! Block operations for dense matrices.
//!
//! The MNA assembler builds its system matrix from G/B/C/D blocks and the
//! excitation vector from I/E blocks. nalgebra does not expose fallible
//! concatenation directly, so these helpers provide sub-matrix overwrite
//! and horizontal/vertical joins with dimension checking.

use nalgebra::{DMatrix, Scalar};
use num_traits::Zero;

use crate::error::{Error, Result};

/// Overwrite a sub-rectangle of `dest` with `src`, top-left at `(row, col)`.
pub fn replace<T: Scalar + Zero>(
    dest: &mut DMatrix<T>,
    row: usize,
    col: usize,
    src: &DMatrix<T>,
) -> Result<()> {
    if row + src.nrows() > dest.nrows() {
        return Err(Error::OutOfBounds {
            index: row + src.nrows(),
            len: dest.nrows(),
        });
    }
    if col + src.ncols() > dest.ncols() {
        return Err(Error::OutOfBounds {
            index: col + src.ncols(),
            len: dest.ncols(),
        });
    }

    dest.view_mut((row, col), (src.nrows(), src.ncols()))
        .copy_from(src);
    Ok(())
}

/// Concatenate two matrices of equal height side by side.
pub fn join_horizontal<T: Scalar + Zero>(
    left: &DMatrix<T>,
    right: &DMatrix<T>,
) -> Result<DMatrix<T>> {
    if left.nrows() != right.nrows() {
        return Err(Error::DimensionMismatch {
            expected: left.nrows(),
            actual: right.nrows(),
        });
    }

    let mut joined = DMatrix::from_element(left.nrows(), left.ncols() + right.ncols(), T::zero());
    replace(&mut joined, 0, 0, left)?;
    replace(&mut joined, 0, left.ncols(), right)?;
    Ok(joined)
}

/// Stack two matrices of equal width on top of each other.
pub fn join_vertical<T: Scalar + Zero>(upper: &DMatrix<T>, lower: &DMatrix<T>) -> Result<DMatrix<T>> {
    if upper.ncols() != lower.ncols() {
        return Err(Error::DimensionMismatch {
            expected: upper.ncols(),
            actual: lower.ncols(),
        });
    }

    let mut joined = DMatrix::from_element(upper.nrows() + lower.nrows(), upper.ncols(), T::zero());
    replace(&mut joined, 0, 0, upper)?;
    replace(&mut joined, upper.nrows(), 0, lower)?;
    Ok(joined)
}
