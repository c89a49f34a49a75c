//! labels::reader — label text/files and metric modes.
//!
//! Purpose
//! -------
//! Read the plain-text label format (one integer per line) and pair a real
//! and a predicted series into range sets according to a [`MetricMode`].
//!
//! Key behaviors
//! -------------
//! - [`parse_labels`] reads the first integer of each non-blank line and
//!   ignores anything after it on the same line.
//! - [`read_label_file`] does the same for a file on disk.
//! - [`build_range_sets`] checks that both series have the same, non-zero
//!   length and extracts ranges with the extraction mode implied by the
//!   metric mode.
//!
//! Conventions
//! -----------
//! - Label values are validated by [`LabelSeries`]; this module only handles
//!   text and pairing.
//! - Metric modes are parsed from names or the short flags `-c`, `-t`, `-n`.

use std::{path::Path, str::FromStr};

use crate::{
    labels::{
        errors::{LabelError, LabelResult},
        extract::{ExtractionMode, LabelSeries, extract_ranges},
    },
    range_metrics::ranges::RangeSet,
};

/// How label series are turned into ranges for scoring.
///
/// - `Classical`: every anomalous point is its own range on both sides
///   (point-wise precision / recall).
/// - `TimeSeries`: maximal runs on both sides.
/// - `NumentaLike`: runs for real labels, single points for predictions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MetricMode {
    Classical,
    #[default]
    TimeSeries,
    NumentaLike,
}

impl MetricMode {
    /// Extraction modes for `(real, predicted)`.
    pub fn extraction_modes(&self) -> (ExtractionMode, ExtractionMode) {
        match self {
            MetricMode::Classical => (ExtractionMode::UnitSize, ExtractionMode::UnitSize),
            MetricMode::TimeSeries => (ExtractionMode::Interval, ExtractionMode::Interval),
            MetricMode::NumentaLike => (ExtractionMode::Interval, ExtractionMode::UnitSize),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MetricMode::Classical => "classical",
            MetricMode::TimeSeries => "time_series",
            MetricMode::NumentaLike => "numenta",
        }
    }
}

impl FromStr for MetricMode {
    type Err = LabelError;

    /// Parse a metric mode (case-insensitive). Any other value returns
    /// `LabelError::InvalidMetricMode`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "classical" | "c" | "-c" => Ok(MetricMode::Classical),
            "time_series" | "t" | "-t" => Ok(MetricMode::TimeSeries),
            "numenta" | "n" | "-n" => Ok(MetricMode::NumentaLike),
            _ => Err(LabelError::InvalidMetricMode { name: s.to_string() }),
        }
    }
}

impl std::fmt::Display for MetricMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Parse labels from text, one integer per line.
///
/// Blank lines are skipped. Anything after the leading integer on a line is
/// ignored, so `"1,extra"` and `"1 # note"` both read as `1`.
///
/// Errors
/// ------
/// - `LabelError::Parse` when a non-blank line does not start with an
///   integer.
/// - `LabelError::InvalidLabel` when an integer is not 0 or 1.
///
/// Examples
/// --------
/// ```rust
/// # use rust_tsad::labels::reader::parse_labels;
/// let series = parse_labels("0\n1 anomaly\n\n1\n").unwrap();
/// assert_eq!(series.len(), 3);
/// ```
pub fn parse_labels(text: &str) -> LabelResult<LabelSeries> {
    let mut values = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let trimmed = line.trim_start();
        if trimmed.is_empty() {
            continue;
        }
        let value = leading_integer(trimmed)
            .ok_or_else(|| LabelError::Parse { line: idx + 1, content: line.to_string() })?;
        values.push(value);
    }
    LabelSeries::new(&values)
}

/// Read and parse a label file.
///
/// Errors
/// ------
/// - `LabelError::Io` when the file cannot be read.
/// - Anything [`parse_labels`] reports.
pub fn read_label_file<P: AsRef<Path>>(path: P) -> LabelResult<LabelSeries> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|err| LabelError::Io {
        path: path.display().to_string(),
        message: err.to_string(),
    })?;
    parse_labels(&text)
}

/// Pair two series into `(real, predicted)` range sets.
///
/// Errors
/// ------
/// - `LabelError::LengthMismatch` when the series differ in length.
/// - `LabelError::EmptySeries` when both are empty.
///
/// Examples
/// --------
/// ```rust
/// # use rust_tsad::labels::{extract::LabelSeries, reader::{MetricMode, build_range_sets}};
/// let real = LabelSeries::new(&[0, 1, 1, 0]).unwrap();
/// let predicted = LabelSeries::new(&[0, 1, 1, 0]).unwrap();
/// let (r, p) = build_range_sets(&real, &predicted, MetricMode::NumentaLike).unwrap();
/// assert_eq!((r.len(), p.len()), (1, 2));
/// ```
pub fn build_range_sets(
    real: &LabelSeries, predicted: &LabelSeries, mode: MetricMode,
) -> LabelResult<(RangeSet, RangeSet)> {
    if real.len() != predicted.len() {
        return Err(LabelError::LengthMismatch { real: real.len(), predicted: predicted.len() });
    }
    if real.is_empty() {
        return Err(LabelError::EmptySeries);
    }

    let (real_mode, predicted_mode) = mode.extraction_modes();
    log::debug!(
        "extracting ranges from {} labels in {mode} mode ({} real / {} predicted anomalies)",
        real.len(),
        real.anomaly_count(),
        predicted.anomaly_count()
    );
    Ok((extract_ranges(real, real_mode), extract_ranges(predicted, predicted_mode)))
}

fn leading_integer(s: &str) -> Option<i64> {
    let sign_len = usize::from(s.starts_with(['-', '+']));
    let digits = s[sign_len..].bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    s[..sign_len + digits].parse().ok()
}
