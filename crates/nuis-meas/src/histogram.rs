use nuis_core::{ErrorInfo, NuisError};
use serde::{Deserialize, Serialize};

fn histogram_error(code: &str, message: impl Into<String>) -> NuisError {
    NuisError::Data(ErrorInfo::new(code, message))
}

/// Weighted one-dimensional histogram with variable bin edges.
///
/// Values below the first edge land in `underflow`, values at or above the
/// last edge in `overflow`. Non-finite values count as underflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram1D {
    /// Bin edges, strictly increasing; one more than the number of bins.
    pub edges: Vec<f64>,
    /// Sum of weights per bin.
    pub contents: Vec<f64>,
    /// Sum of squared weights per bin.
    pub sumw2: Vec<f64>,
    /// Weight below the first edge.
    pub underflow: f64,
    /// Weight at or above the last edge.
    pub overflow: f64,
}

impl Histogram1D {
    /// Creates an empty histogram after checking the edges.
    pub fn new(edges: Vec<f64>) -> Result<Self, NuisError> {
        validate_edges(&edges)?;
        let bins = edges.len() - 1;
        Ok(Self {
            edges,
            contents: vec![0.0; bins],
            sumw2: vec![0.0; bins],
            underflow: 0.0,
            overflow: 0.0,
        })
    }

    /// Creates `bins` equal-width bins spanning `[low, high)`.
    pub fn uniform(bins: usize, low: f64, high: f64) -> Result<Self, NuisError> {
        if bins == 0 || !(high > low) {
            return Err(histogram_error(
                "invalid-binning",
                "uniform binning needs bins > 0 and high > low",
            )
            .with_context("bins", bins.to_string()));
        }
        let width = (high - low) / bins as f64;
        let edges = (0..=bins).map(|idx| low + width * idx as f64).collect();
        Self::new(edges)
    }

    /// Number of bins.
    pub fn bins(&self) -> usize {
        self.contents.len()
    }

    /// Width of bin `index`.
    pub fn width(&self, index: usize) -> f64 {
        self.edges[index + 1] - self.edges[index]
    }

    /// Index of the bin containing `value`, if any.
    pub fn find_bin(&self, value: f64) -> Option<usize> {
        if !value.is_finite() || value < self.edges[0] {
            return None;
        }
        let upper = self.edges.partition_point(|edge| *edge <= value);
        if upper >= self.edges.len() {
            None
        } else {
            Some(upper - 1)
        }
    }

    /// Adds `weight` at `value`.
    pub fn fill(&mut self, value: f64, weight: f64) {
        match self.find_bin(value) {
            Some(index) => {
                self.contents[index] += weight;
                self.sumw2[index] += weight * weight;
            }
            None if value.is_finite() && value >= self.edges[self.edges.len() - 1] => {
                self.overflow += weight;
            }
            None => self.underflow += weight,
        }
    }

    /// Multiplies contents, errors and flow bins by `factor`.
    pub fn scale(&mut self, factor: f64) {
        for (content, w2) in self.contents.iter_mut().zip(self.sumw2.iter_mut()) {
            *content *= factor;
            *w2 *= factor * factor;
        }
        self.underflow *= factor;
        self.overflow *= factor;
    }

    /// Divides each bin by its width.
    pub fn scale_by_width(&mut self) {
        for index in 0..self.bins() {
            let width = self.width(index);
            self.contents[index] /= width;
            self.sumw2[index] /= width * width;
        }
    }

    /// Sum of in-range contents.
    pub fn integral(&self) -> f64 {
        self.contents.iter().sum()
    }
}

/// Checks that `edges` describes at least one bin with finite, strictly
/// increasing boundaries.
pub fn validate_edges(edges: &[f64]) -> Result<(), NuisError> {
    if edges.len() < 2 {
        return Err(
            histogram_error("too-few-edges", "at least two bin edges are required")
                .with_context("edges", edges.len().to_string()),
        );
    }
    for (index, pair) in edges.windows(2).enumerate() {
        if !pair[0].is_finite() || !pair[1].is_finite() || pair[1] <= pair[0] {
            return Err(histogram_error(
                "unordered-edges",
                "bin edges must be finite and strictly increasing",
            )
            .with_context("index", index.to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_routes_flow_and_edges() {
        let mut hist = Histogram1D::new(vec![0.0, 1.0, 3.0]).unwrap();
        hist.fill(-0.5, 1.0);
        hist.fill(0.0, 1.0);
        hist.fill(1.0, 2.0);
        hist.fill(3.0, 1.0);
        hist.fill(f64::NAN, 1.0);
        assert_eq!(hist.contents, vec![1.0, 2.0]);
        assert_eq!(hist.sumw2, vec![1.0, 4.0]);
        assert_eq!(hist.underflow, 2.0);
        assert_eq!(hist.overflow, 1.0);
    }

    #[test]
    fn width_scaling_preserves_width_integral() {
        let mut hist = Histogram1D::new(vec![0.0, 1.0, 3.0]).unwrap();
        hist.fill(0.5, 4.0);
        hist.fill(2.0, 6.0);
        hist.scale_by_width();
        assert_eq!(hist.contents, vec![4.0, 3.0]);
        let width_integral: f64 = (0..hist.bins())
            .map(|index| hist.contents[index] * hist.width(index))
            .sum();
        assert!((width_integral - 10.0).abs() < 1e-12);
    }

    #[test]
    fn rejects_bad_edges() {
        assert!(Histogram1D::new(vec![1.0]).is_err());
        assert!(Histogram1D::new(vec![0.0, 2.0, 1.0]).is_err());
        assert!(Histogram1D::uniform(0, 0.0, 1.0).is_err());
    }
}
