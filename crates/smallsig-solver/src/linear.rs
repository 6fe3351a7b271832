//! Complex linear system solver: Gaussian elimination with partial pivoting.

use nalgebra::{DMatrix, DVector};
use num_complex::Complex;

use crate::error::{Error, Result};

/// Solve a complex linear system given as an augmented `[A | b]` matrix.
///
/// The input must be `N x (N+1)`; the returned vector `x` satisfies
/// `A x = b`.
///
/// Pivoting selects the row with the largest modulus in the current column;
/// with complex coefficients, modulus is the only meaningful ordering. A
/// pivot of exactly zero means no remaining equation constrains the
/// variable, so the system has no unique solution.
pub fn gaussian_elimination(
    mut system: DMatrix<Complex<f64>>,
) -> Result<DVector<Complex<f64>>> {
    let n = system.nrows();
    if system.ncols() != n + 1 {
        return Err(Error::DimensionMismatch {
            expected: n + 1,
            actual: system.ncols(),
        });
    }

    // Reduce to row echelon form.
    for k in 0..n {
        // Partial pivot: the row with the largest |A[i,k]| among i >= k.
        let mut row_max = k;
        let mut max = system[(k, k)].norm();
        for i in (k + 1)..n {
            let x = system[(i, k)].norm();
            if x > max {
                max = x;
                row_max = i;
            }
        }

        if max == 0.0 {
            return Err(Error::SingularSystem);
        }

        system.swap_rows(k, row_max);

        // Eliminate the k-th coefficient from every row below. The target
        // row is scaled by -A[k,k] / A[i,k] and the pivot row added to it,
        // which leaves the pivot row itself untouched.
        let pivot = system[(k, k)];
        for i in (k + 1)..n {
            let lead = system[(i, k)];
            if lead == Complex::new(0.0, 0.0) {
                continue;
            }
            let factor = -pivot / lead;
            for j in 0..=n {
                let updated = system[(i, j)] * factor + system[(k, j)];
                system[(i, j)] = updated;
            }
        }
    }

    // Back substitution.
    let mut solution = DVector::from_element(n, Complex::new(0.0, 0.0));
    for i in (0..n).rev() {
        let mut sum = system[(i, n)];
        for j in (i + 1)..n {
            sum -= system[(i, j)] * solution[j];
        }
        solution[i] = sum / system[(i, i)];
    }

    Ok(solution)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn real(re: f64) -> Complex<f64> {
        Complex::new(re, 0.0)
    }

    fn augmented(rows: &[&[f64]]) -> DMatrix<Complex<f64>> {
        DMatrix::from_fn(rows.len(), rows[0].len(), |i, j| real(rows[i][j]))
    }

    #[test]
    fn test_solve_simple() {
        // 2x + y = 5
        // x + 3y = 6
        // Solution: x = 1.8, y = 1.4
        let system = augmented(&[&[2.0, 1.0, 5.0], &[1.0, 3.0, 6.0]]);
        let x = gaussian_elimination(system).unwrap();

        assert!((x[0].re - 1.8).abs() < 1e-12);
        assert!((x[1].re - 1.4).abs() < 1e-12);
        assert!(x[0].im.abs() < 1e-12);
    }

    #[test]
    fn test_solve_requires_pivoting() {
        // Zero in the top-left corner forces a row swap.
        // 0x + 2y = 4
        // 3x + 1y = 5
        let system = augmented(&[&[0.0, 2.0, 4.0], &[3.0, 1.0, 5.0]]);
        let x = gaussian_elimination(system).unwrap();

        assert!((x[0].re - 1.0).abs() < 1e-12);
        assert!((x[1].re - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_solve_complex_coefficients() {
        // (1+j) x = 2  =>  x = 2/(1+j) = 1 - j
        let system = DMatrix::from_row_slice(
            1,
            2,
            &[Complex::new(1.0, 1.0), Complex::new(2.0, 0.0)],
        );
        let x = gaussian_elimination(system).unwrap();

        assert!((x[0].re - 1.0).abs() < 1e-12);
        assert!((x[0].im + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_singular_system() {
        // Row 2 = 2 * row 1: rank deficient.
        let system = augmented(&[&[1.0, 2.0, 1.0], &[2.0, 4.0, 2.0]]);
        assert!(matches!(
            gaussian_elimination(system),
            Err(Error::SingularSystem)
        ));
    }

    #[test]
    fn test_dimension_mismatch() {
        let system = DMatrix::from_element(2, 2, real(1.0));
        assert!(matches!(
            gaussian_elimination(system),
            Err(Error::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_empty_system() {
        let system = DMatrix::from_element(0, 1, real(0.0));
        let x = gaussian_elimination(system).unwrap();
        assert_eq!(x.len(), 0);
    }
}
