//! Z-score standardization with a defined zero-variance fallback.

/// A standardized feature column.
#[derive(Debug, Clone, PartialEq)]
pub struct ZScores {
    pub values: Vec<f64>,
    /// The column had (numerically) zero variance and every value was set
    /// to `0.0` instead of being divided by zero.
    pub degenerate: bool,
}

/// Standardize `values` to mean 0 and population standard deviation 1.
///
/// A column is degenerate when its population standard deviation is at most
/// `f64::EPSILON * max(1, |mean|)`, which also covers single-element
/// columns and constant columns whose mean picked up rounding error.
/// Degenerate columns normalize to all zeros, so they contribute nothing to
/// a weighted sum. Non-finite inputs are treated the same way.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn z_score(values: &[f64]) -> ZScores {
    if values.is_empty() {
        return ZScores {
            values: Vec::new(),
            degenerate: false,
        };
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let std = variance.sqrt();

    let tolerance = f64::EPSILON * mean.abs().max(1.0);
    if !std.is_finite() || std <= tolerance {
        return ZScores {
            values: vec![0.0; values.len()],
            degenerate: true,
        };
    }

    ZScores {
        values: values.iter().map(|v| (v - mean) / std).collect(),
        degenerate: false,
    }
}
