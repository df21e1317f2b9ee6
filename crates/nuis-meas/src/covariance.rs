use nalgebra::{DMatrix, DVector};
use nuis_core::{ErrorInfo, NuisError};

fn covariance_error(code: &str, message: impl Into<String>) -> NuisError {
    NuisError::Data(ErrorInfo::new(code, message))
}

/// Covariance matrix of a measurement together with its inverse.
///
/// Construction fails unless the matrix is square, finite, symmetric and
/// positive definite; the inverse comes from a Cholesky factorisation.
#[derive(Debug, Clone, PartialEq)]
pub struct Covariance {
    matrix: DMatrix<f64>,
    inverse: DMatrix<f64>,
}

impl Covariance {
    /// Wraps an explicit covariance matrix.
    pub fn from_matrix(matrix: DMatrix<f64>) -> Result<Self, NuisError> {
        if matrix.nrows() != matrix.ncols() || matrix.nrows() == 0 {
            return Err(NuisError::Data(
                ErrorInfo::new("covariance-shape", "covariance must be a non-empty square matrix")
                    .with_context("rows", matrix.nrows().to_string())
                    .with_context("cols", matrix.ncols().to_string()),
            ));
        }
        if matrix.iter().any(|value| !value.is_finite()) {
            return Err(covariance_error(
                "covariance-non-finite",
                "covariance contains non-finite entries",
            ));
        }
        let n = matrix.nrows();
        for i in 0..n {
            for j in (i + 1)..n {
                let (a, b) = (matrix[(i, j)], matrix[(j, i)]);
                let scale = a.abs().max(b.abs()).max(f64::MIN_POSITIVE);
                if (a - b).abs() > 1e-9 * scale {
                    return Err(NuisError::Data(
                        ErrorInfo::new("covariance-asymmetric", "covariance must be symmetric")
                            .with_context("row", i.to_string())
                            .with_context("col", j.to_string()),
                    ));
                }
            }
        }
        let inverse = matrix
            .clone()
            .cholesky()
            .map(|factor| factor.inverse())
            .ok_or_else(|| {
                NuisError::Data(
                    ErrorInfo::new("covariance-not-spd", "covariance is not positive definite")
                        .with_context("dim", n.to_string())
                        .with_hint("check for bins with zero uncertainty"),
                )
            })?;
        Ok(Self { matrix, inverse })
    }

    /// Builds a covariance from row-major nested rows.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, NuisError> {
        let n = rows.len();
        if rows.iter().any(|row| row.len() != n) {
            return Err(NuisError::Data(
                ErrorInfo::new("covariance-shape", "covariance rows must all have length n")
                    .with_context("rows", n.to_string()),
            ));
        }
        let flat: Vec<f64> = rows.iter().flatten().copied().collect();
        Self::from_matrix(DMatrix::from_row_slice(n, n, &flat))
    }

    /// Diagonal covariance from per-bin uncertainties.
    pub fn from_errors(errors: &[f64]) -> Result<Self, NuisError> {
        let diag = DVector::from_iterator(errors.len(), errors.iter().map(|err| err * err));
        Self::from_matrix(DMatrix::from_diagonal(&diag))
    }

    /// Covariance from a correlation matrix scaled by per-bin uncertainties.
    pub fn from_correlation(correlation: &[Vec<f64>], errors: &[f64]) -> Result<Self, NuisError> {
        if correlation.len() != errors.len() {
            return Err(NuisError::Data(
                ErrorInfo::new("correlation-shape", "correlation size differs from bin count")
                    .with_context("matrix", correlation.len().to_string())
                    .with_context("bins", errors.len().to_string()),
            ));
        }
        let scaled: Vec<Vec<f64>> = correlation
            .iter()
            .enumerate()
            .map(|(i, row)| {
                row.iter()
                    .enumerate()
                    .map(|(j, rho)| rho * errors[i] * errors.get(j).copied().unwrap_or(0.0))
                    .collect()
            })
            .collect();
        Self::from_rows(&scaled)
    }

    /// Drops every off-diagonal term.
    pub fn diagonal_only(&self) -> Result<Self, NuisError> {
        Self::from_matrix(DMatrix::from_diagonal(&self.matrix.diagonal()))
    }

    /// Number of bins.
    pub fn dim(&self) -> usize {
        self.matrix.nrows()
    }

    /// The covariance matrix.
    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    /// The inverse covariance matrix.
    pub fn inverse(&self) -> &DMatrix<f64> {
        &self.inverse
    }

    /// Square roots of the diagonal.
    pub fn errors(&self) -> Vec<f64> {
        self.matrix.diagonal().iter().map(|var| var.sqrt()).collect()
    }

    /// `(d - m)^T C^-1 (d - m)`.
    pub fn chi2(&self, data: &[f64], prediction: &[f64]) -> Result<f64, NuisError> {
        if data.len() != self.dim() || prediction.len() != self.dim() {
            return Err(NuisError::Data(
                ErrorInfo::new("chi2-shape", "data and prediction must match the covariance")
                    .with_context("dim", self.dim().to_string())
                    .with_context("data", data.len().to_string())
                    .with_context("prediction", prediction.len().to_string()),
            ));
        }
        let residual = DVector::from_iterator(
            data.len(),
            data.iter().zip(prediction).map(|(d, m)| d - m),
        );
        Ok(residual.dot(&(&self.inverse * &residual)))
    }
}
