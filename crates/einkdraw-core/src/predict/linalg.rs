//! Small dense solvers.

/// Relative pivot tolerance. A pivot at or below this fraction of the largest
/// entry of its column is treated as zero.
const PIVOT_EPSILON: f64 = 1e-12;

/// Solves `m · x = rhs` by Gaussian elimination with partial pivoting.
///
/// Returns `None` for singular or non-finite systems.
pub fn solve3(mut m: [[f64; 3]; 3], mut rhs: [f64; 3]) -> Option<[f64; 3]> {
    if !m.iter().flatten().all(|v| v.is_finite()) {
        return None;
    }
    // Per-column scale: power-sum rows range from x^4 down to n.
    let tolerance: [f64; 3] = std::array::from_fn(|col| {
        (0..3).fold(0.0_f64, |acc, row| acc.max(m[row][col].abs())) * PIVOT_EPSILON
    });

    for col in 0..3 {
        let pivot = (col..3)
            .max_by(|&a, &b| m[a][col].abs().total_cmp(&m[b][col].abs()))
            .unwrap_or(col);
        if m[pivot][col].abs() <= tolerance[col] {
            return None;
        }
        m.swap(col, pivot);
        rhs.swap(col, pivot);

        for row in col + 1..3 {
            let factor = m[row][col] / m[col][col];
            for k in col..3 {
                m[row][k] -= factor * m[col][k];
            }
            rhs[row] -= factor * rhs[col];
        }
    }

    let mut x = [0.0; 3];
    for row in (0..3).rev() {
        let tail: f64 = (row + 1..3).map(|k| m[row][k] * x[k]).sum();
        x[row] = (rhs[row] - tail) / m[row][row];
    }

    x.iter().all(|v| v.is_finite()).then_some(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solves_regular_system() {
        // x=1, y=2, z=3
        let m = [[2.0, 1.0, -1.0], [-3.0, -1.0, 2.0], [-2.0, 1.0, 2.0]];
        let rhs = [1.0, 1.0, 6.0];
        let x = solve3(m, rhs).unwrap();
        assert!((x[0] - 1.0).abs() < 1e-9);
        assert!((x[1] - 2.0).abs() < 1e-9);
        assert!((x[2] - 3.0).abs() < 1e-9);
    }

    #[test]
    fn needs_row_swap() {
        let m = [[0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]];
        let x = solve3(m, [5.0, 7.0, 9.0]).unwrap();
        assert_eq!(x, [7.0, 5.0, 9.0]);
    }

    #[test]
    fn singular_is_none() {
        let m = [[1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [1.0, 1.0, 1.0]];
        assert!(solve3(m, [1.0, 2.0, 3.0]).is_none());
        assert!(solve3([[0.0; 3]; 3], [0.0; 3]).is_none());
    }

    #[test]
    fn non_finite_is_none() {
        let m = [[f64::NAN, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
        assert!(solve3(m, [1.0, 1.0, 1.0]).is_none());
    }
}
