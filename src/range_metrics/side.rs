//! Metric side tag shared by the weighting functions.
//!
//! Every pluggable weighting function is evaluated per side, because
//! precision and recall may use different positional biases.

/// Which metric a weighting function is being evaluated for.
///
/// - `Precision`: predicted ranges are scored against the real ranges.
/// - `Recall`: real ranges are scored against the predicted ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricSide {
    Precision,
    Recall,
}

impl MetricSide {
    /// Lower-case name used in log lines and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            MetricSide::Precision => "precision",
            MetricSide::Recall => "recall",
        }
    }
}

impl std::fmt::Display for MetricSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
