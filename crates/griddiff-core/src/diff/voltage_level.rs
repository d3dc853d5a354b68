//! Voltage-level comparison: bus voltage envelope, switch positions and
//! busbar-section voltages under the voltage threshold.

use std::collections::BTreeMap;

use crate::comparator::{fuzzy_equals, map_difference, nan_fuzzy_equals, normalize_nan};
use crate::config::DiffConfig;
use crate::{TopologyKind, VoltageLevel};

/// Immutable snapshot of one voltage level from one network.
#[derive(Debug, Clone, PartialEq)]
pub struct VoltageLevelValues {
    pub vl_id: String,
    /// Number of buses, energized or not
    pub bus_count: usize,
    /// Min bus voltage over energized buses (kV), 0.0 if none
    pub min_v: f64,
    /// Max bus voltage over energized buses (kV), 0.0 if none
    pub max_v: f64,
    pub low_voltage_limit: f64,
    pub high_voltage_limit: f64,
    pub nominal_v: f64,
    /// switch id -> open flag, over every switch of the voltage level
    pub switch_status: BTreeMap<String, bool>,
    /// busbar-section id -> measured voltage; empty unless node/breaker
    pub busbar_voltage: BTreeMap<String, f64>,
}

impl VoltageLevelValues {
    /// Read a snapshot off a live voltage level.
    pub fn from_voltage_level(vl: &VoltageLevel) -> Self {
        let energized = || vl.buses.iter().map(|b| b.v).filter(|v| !v.is_nan());
        let min_v = energized().fold(f64::INFINITY, f64::min);
        let max_v = energized().fold(f64::NEG_INFINITY, f64::max);

        let switch_status = vl
            .switches
            .iter()
            .map(|s| (s.id.clone(), s.open))
            .collect();
        let busbar_voltage = match vl.topology {
            TopologyKind::NodeBreaker => vl
                .busbar_sections
                .iter()
                .map(|b| (b.id.clone(), b.v))
                .collect(),
            TopologyKind::BusBreaker => BTreeMap::new(),
        };

        Self {
            vl_id: vl.id.clone(),
            bus_count: vl.buses.len(),
            min_v: if min_v.is_finite() { min_v } else { 0.0 },
            max_v: if max_v.is_finite() { max_v } else { 0.0 },
            low_voltage_limit: vl.low_voltage_limit,
            high_voltage_limit: vl.high_voltage_limit,
            nominal_v: vl.nominal_v,
            switch_status,
            busbar_voltage,
        }
    }
}

/// Comparison outcome for one voltage level. Delta collections are computed
/// at construction; nothing is mutated afterwards.
#[derive(Debug, Clone)]
pub struct VoltageLevelDiff {
    pub values1: VoltageLevelValues,
    pub values2: VoltageLevelValues,
    /// Raw outcome, before any report-filter gating.
    pub is_different: bool,
    /// Switch ids present in both snapshots with differing open flags.
    pub switches_delta: Vec<String>,
    /// Busbar-section voltage deltas (NaN-normalized `v2 - v1`) for entries
    /// differing under the voltage threshold; populated only when both
    /// snapshots expose busbar voltages.
    pub busbars_delta: Option<BTreeMap<String, f64>>,
    /// Same entries as percent of |nominal voltage| of the first snapshot,
    /// clamped to [-100, 100].
    pub busbars_delta_percent: Option<BTreeMap<String, f64>>,
}

/// Compare two voltage levels sharing one identifier, one from each network.
pub fn diff_voltage_levels(
    config: &DiffConfig,
    vl1: &VoltageLevel,
    vl2: &VoltageLevel,
) -> VoltageLevelDiff {
    let tol = config.voltage_threshold();
    let values1 = VoltageLevelValues::from_voltage_level(vl1);
    let values2 = VoltageLevelValues::from_voltage_level(vl2);

    let switches_diff =
        map_difference(&values1.switch_status, &values2.switch_status, |a, b| a == b);
    let busbars_diff = map_difference(&values1.busbar_voltage, &values2.busbar_voltage, |a, b| {
        nan_fuzzy_equals(*a, *b, tol)
    });

    let is_equal = fuzzy_equals(values1.min_v, values2.min_v, tol)
        && fuzzy_equals(values1.max_v, values2.max_v, tol)
        && values1.bus_count == values2.bus_count
        && switches_diff.are_equal()
        && busbars_diff.are_equal();

    let both_busbars = !values1.busbar_voltage.is_empty() && !values2.busbar_voltage.is_empty();
    let (busbars_delta, busbars_delta_percent) = if both_busbars {
        let mut delta = BTreeMap::new();
        let mut percent = BTreeMap::new();
        for (id, (v1, v2)) in &busbars_diff.differing {
            let d = normalize_nan(*v2) - normalize_nan(*v1);
            delta.insert(id.clone(), d);
            let p = d / values1.nominal_v.abs() * 100.0;
            percent.insert(id.clone(), p.clamp(-100.0, 100.0));
        }
        (Some(delta), Some(percent))
    } else {
        (None, None)
    };

    VoltageLevelDiff {
        values1,
        values2,
        is_different: !is_equal,
        switches_delta: switches_diff.differing_keys(),
        busbars_delta,
        busbars_delta_percent,
    }
}
