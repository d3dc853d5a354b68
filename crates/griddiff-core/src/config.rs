//! Comparison tolerances and report filtering.
//!
//! [`DiffConfig`] is an explicit value handed to [`NetworkDiff`]: there is no
//! process-wide default configuration to look up. Construction validates the
//! invariants once, so a `DiffConfig` in hand is always usable.
//!
//! [`NetworkDiff`]: crate::diff::NetworkDiff

use crate::error::{DiffError, DiffResult};

/// Default value for both thresholds (strict comparison).
pub const THRESHOLD_DEFAULT: f64 = 0.0;
/// Default for the report filter flag.
pub const FILTER_DIFF_DEFAULT: bool = true;

/// Tolerances and filtering policy for a network comparison.
///
/// * `generic_threshold`: absolute tolerance for power/current quantities
///   (branch terminal p/q/i).
/// * `voltage_threshold`: absolute tolerance for voltage quantities
///   (bus min/max voltage, busbar section voltage).
/// * `filter_different`: when false, no record is surfaced as different in
///   the report, whatever the raw comparison said.
///
/// Thresholds are never negative; the constructor rejects such values.
#[derive(Debug, Clone, PartialEq)]
pub struct DiffConfig {
    generic_threshold: f64,
    voltage_threshold: f64,
    filter_different: bool,
}

impl DiffConfig {
    /// Build a configuration, validating that both thresholds are >= 0.
    pub fn new(
        generic_threshold: f64,
        voltage_threshold: f64,
        filter_different: bool,
    ) -> DiffResult<Self> {
        if generic_threshold < 0.0 {
            return Err(DiffError::Config(format!(
                "negative values for generic-threshold not permitted (got {generic_threshold})"
            )));
        }
        if voltage_threshold < 0.0 {
            return Err(DiffError::Config(format!(
                "negative values for voltage-threshold not permitted (got {voltage_threshold})"
            )));
        }
        Ok(Self {
            generic_threshold,
            voltage_threshold,
            filter_different,
        })
    }

    /// Tolerance applied to branch terminal quantities (p, q, i).
    pub fn generic_threshold(&self) -> f64 {
        self.generic_threshold
    }

    /// Tolerance applied to voltage quantities.
    pub fn voltage_threshold(&self) -> f64 {
        self.voltage_threshold
    }

    /// Whether differing records are surfaced in the report.
    pub fn filter_different(&self) -> bool {
        self.filter_different
    }
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            generic_threshold: THRESHOLD_DEFAULT,
            voltage_threshold: THRESHOLD_DEFAULT,
            filter_different: FILTER_DIFF_DEFAULT,
        }
    }
}
