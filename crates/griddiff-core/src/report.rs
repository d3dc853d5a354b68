//! Report aggregation and JSON serialization.
//!
//! The serialized shape is a compatibility contract with the legacy report
//! consumers: flat records with `branch.`/`vl.` prefixed field names, in a
//! fixed order, under `diff.VoltageLevels` / `diff.Branches` arrays. The
//! `Serialize` impls write field by field to keep that order explicit.
//!
//! JSON has no literal for non-finite doubles; serde_json renders NaN and
//! infinity as `null`. The in-memory records keep the exact f64 values.

use std::io::Write;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::diff::{BranchDiff, TerminalValues, VoltageLevelDiff};
use crate::error::DiffResult;

/// All comparison records for one network pair.
#[derive(Debug, Clone)]
pub struct DiffReport {
    pub network1: String,
    pub network2: String,
    /// Voltage-level records, ordered lexicographically by id.
    pub voltage_level_diffs: Vec<VoltageLevelDiff>,
    /// Branch records, ordered lexicographically by id.
    pub branch_diffs: Vec<BranchDiff>,
}

impl DiffReport {
    /// True iff any contained record is different.
    pub fn is_different(&self) -> bool {
        self.voltage_level_diffs.iter().any(|d| d.is_different)
            || self.branch_diffs.iter().any(|d| d.is_different)
    }

    /// Render the report as pretty-printed JSON.
    pub fn to_json(&self) -> DiffResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the report as pretty-printed JSON.
    pub fn write_json<W: Write>(&self, writer: W) -> DiffResult<()> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}

impl Serialize for DiffReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("network1", &self.network1)?;
        map.serialize_entry("network2", &self.network2)?;
        map.serialize_entry("diff.VoltageLevels", &self.voltage_level_diffs)?;
        map.serialize_entry("diff.Branches", &self.branch_diffs)?;
        map.end()
    }
}

fn serialize_terminal<M: SerializeMap>(
    map: &mut M,
    terminal: &str,
    t1: &TerminalValues,
    t2: &TerminalValues,
) -> Result<(), M::Error> {
    map.serialize_entry(&format!("branch.{terminal}.isConnected1"), &t1.connected)?;
    map.serialize_entry(&format!("branch.{terminal}.isConnected2"), &t2.connected)?;
    for (name, v1, v2) in [("p", t1.p, t2.p), ("q", t1.q, t2.q), ("i", t1.i, t2.i)] {
        let delta = (v1 - v2).abs();
        map.serialize_entry(&format!("branch.{terminal}.{name}1"), &v1)?;
        map.serialize_entry(&format!("branch.{terminal}.{name}2"), &v2)?;
        map.serialize_entry(&format!("branch.{terminal}.{name}-delta"), &delta)?;
        // denominator is the first snapshot's magnitude; a zero baseline
        // yields infinity, preserved as-is (legacy contract)
        map.serialize_entry(
            &format!("branch.{terminal}.{name}-delta-percent"),
            &(delta / v1.abs() * 100.0),
        )?;
    }
    Ok(())
}

impl Serialize for BranchDiff {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("branch.branchId1", &self.values1.branch_id)?;
        map.serialize_entry("branch.branchId2", &self.values2.branch_id)?;
        serialize_terminal(&mut map, "terminal1", &self.values1.side1, &self.values2.side1)?;
        serialize_terminal(&mut map, "terminal2", &self.values1.side2, &self.values2.side2)?;
        map.serialize_entry("branch.connectionStatus-delta", &self.connection_status_delta())?;
        map.serialize_entry("branch.terminalStatus-delta", &self.terminal_status_delta())?;
        map.serialize_entry("branch.isDifferent", &self.is_different)?;
        map.end()
    }
}

impl Serialize for VoltageLevelDiff {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let (v1, v2) = (&self.values1, &self.values2);
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("vl.vlId1", &v1.vl_id)?;
        map.serialize_entry("vl.vlId2", &v2.vl_id)?;
        map.serialize_entry("vl.noBus1", &v1.bus_count)?;
        map.serialize_entry("vl.noBus2", &v2.bus_count)?;
        map.serialize_entry("vl.minV1", &v1.min_v)?;
        map.serialize_entry("vl.minV2", &v2.min_v)?;
        map.serialize_entry("vl.minV-delta", &(v2.min_v - v1.min_v))?;
        map.serialize_entry(
            "vl.minV-delta-percent",
            &((v2.min_v - v1.min_v) / v1.low_voltage_limit.abs() * 100.0),
        )?;
        map.serialize_entry("vl.maxV1", &v1.max_v)?;
        map.serialize_entry("vl.maxV2", &v2.max_v)?;
        map.serialize_entry("vl.maxV-delta", &(v2.max_v - v1.max_v))?;
        map.serialize_entry(
            "vl.maxV-delta-percent",
            &((v2.max_v - v1.max_v) / v1.high_voltage_limit.abs() * 100.0),
        )?;
        map.serialize_entry("vl.switchesStatusV1", &v1.switch_status)?;
        map.serialize_entry("vl.switchesStatusV2", &v2.switch_status)?;
        map.serialize_entry("vl.switchesStatus-delta", &self.switches_delta)?;
        if !v1.busbar_voltage.is_empty() {
            map.serialize_entry("vl.busbarsVoltage1", &v1.busbar_voltage)?;
        }
        if !v2.busbar_voltage.is_empty() {
            map.serialize_entry("vl.busbarsVoltage2", &v2.busbar_voltage)?;
        }
        if let (Some(delta), Some(percent)) = (&self.busbars_delta, &self.busbars_delta_percent) {
            map.serialize_entry("vl.busbarsVoltage-delta", delta)?;
            map.serialize_entry("vl.busbarsVoltage-delta-percent", percent)?;
        }
        map.serialize_entry("vl.isDifferent", &self.is_different)?;
        map.end()
    }
}
