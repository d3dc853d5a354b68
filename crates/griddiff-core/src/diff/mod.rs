//! Per-equipment differs and the comparison orchestrator.
//!
//! [`NetworkDiff`] resolves which entities to compare (explicit id lists or
//! the intersection of both catalogs), runs the matching differ per
//! equipment kind and assembles the surviving records into a
//! [`DiffReport`](crate::report::DiffReport). The report-filter gate lives
//! here: records always carry their raw `is_different` flag, and the
//! orchestrator decides which ones are surfaced.

mod branch;
mod voltage_level;

pub use branch::{diff_branches, BranchDiff, BranchValues, TerminalValues};
pub use voltage_level::{diff_voltage_levels, VoltageLevelDiff, VoltageLevelValues};

use std::collections::BTreeSet;
use std::str::FromStr;
use std::time::Instant;

use tracing::debug;

use crate::config::DiffConfig;
use crate::error::DiffError;
use crate::report::DiffReport;
use crate::Network;

/// Equipment kinds a comparison can be restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquipmentType {
    VoltageLevels,
    Branches,
    All,
}

impl FromStr for EquipmentType {
    type Err = DiffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().replace('-', "_").as_str() {
            "VOLTAGE_LEVELS" => Ok(EquipmentType::VoltageLevels),
            "BRANCHES" => Ok(EquipmentType::Branches),
            "ALL" => Ok(EquipmentType::All),
            _ => Err(DiffError::Parse(format!(
                "unknown equipment type '{s}' (expected VOLTAGE_LEVELS, BRANCHES or ALL)"
            ))),
        }
    }
}

/// Which equipment to compare, and optional explicit id lists per kind.
///
/// `None` id lists mean "every id present in both networks". Explicit ids
/// missing from either network are silently excluded.
#[derive(Debug, Clone)]
pub struct EquipmentSelection {
    pub equipment_types: Vec<EquipmentType>,
    pub voltage_levels: Option<Vec<String>>,
    pub branches: Option<Vec<String>>,
}

impl Default for EquipmentSelection {
    fn default() -> Self {
        Self {
            equipment_types: vec![EquipmentType::All],
            voltage_levels: None,
            branches: None,
        }
    }
}

impl EquipmentSelection {
    pub fn new(equipment_types: Vec<EquipmentType>) -> Self {
        Self {
            equipment_types,
            voltage_levels: None,
            branches: None,
        }
    }

    pub fn with_voltage_levels(mut self, ids: Vec<String>) -> Self {
        self.voltage_levels = Some(ids);
        self
    }

    pub fn with_branches(mut self, ids: Vec<String>) -> Self {
        self.branches = Some(ids);
        self
    }

    fn wants(&self, kind: EquipmentType) -> bool {
        self.equipment_types
            .iter()
            .any(|t| *t == kind || *t == EquipmentType::All)
    }
}

/// The comparison orchestrator: holds the policy, reads two networks,
/// produces a report. Pure given its inputs; no caching, no retries.
#[derive(Debug, Clone)]
pub struct NetworkDiff {
    config: DiffConfig,
}

impl NetworkDiff {
    pub fn new(config: DiffConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DiffConfig {
        &self.config
    }

    /// Compare every equipment kind of both networks.
    pub fn diff(&self, network1: &Network, network2: &Network) -> DiffReport {
        self.diff_selected(network1, network2, &EquipmentSelection::default())
    }

    /// Compare the selected equipment of both networks.
    pub fn diff_selected(
        &self,
        network1: &Network,
        network2: &Network,
        selection: &EquipmentSelection,
    ) -> DiffReport {
        let start = Instant::now();

        let voltage_level_diffs = if selection.wants(EquipmentType::VoltageLevels) {
            let ids = resolve_ids(
                network1.voltage_level_ids(),
                |id| network2.voltage_level(id).is_some(),
                selection.voltage_levels.as_deref(),
                |id| network1.voltage_level(id).is_some(),
            );
            ids.iter()
                .map(|id| {
                    diff_voltage_levels(
                        &self.config,
                        network1.voltage_level(id).expect("id resolved from both"),
                        network2.voltage_level(id).expect("id resolved from both"),
                    )
                })
                .filter(|d| self.surfaced(d.is_different))
                .collect()
        } else {
            Vec::new()
        };

        let branch_diffs = if selection.wants(EquipmentType::Branches) {
            let ids = resolve_ids(
                network1.branch_ids(),
                |id| network2.branch(id).is_some(),
                selection.branches.as_deref(),
                |id| network1.branch(id).is_some(),
            );
            ids.iter()
                .map(|id| {
                    diff_branches(
                        &self.config,
                        network1.branch(id).expect("id resolved from both"),
                        network2.branch(id).expect("id resolved from both"),
                    )
                })
                .filter(|d| self.surfaced(d.is_different))
                .collect()
        } else {
            Vec::new()
        };

        let report = DiffReport {
            network1: network1.id.clone(),
            network2: network2.id.clone(),
            voltage_level_diffs,
            branch_diffs,
        };
        debug!(
            "diff of '{}' and '{}' generated in {:?}",
            network1.id,
            network2.id,
            start.elapsed()
        );
        report
    }

    // The raw flag stays honest on the records; surfacing is a policy call.
    fn surfaced(&self, raw_different: bool) -> bool {
        self.config.filter_different() && raw_different
    }
}

/// Resolve the comparison id set: the explicit list restricted to ids present
/// in both networks, or the full intersection when no list is given.
fn resolve_ids<'a>(
    ids1: impl Iterator<Item = &'a String>,
    in_network2: impl Fn(&str) -> bool,
    explicit: Option<&[String]>,
    in_network1: impl Fn(&str) -> bool,
) -> BTreeSet<String> {
    match explicit {
        Some(ids) => ids
            .iter()
            .filter(|id| in_network1(id) && in_network2(id))
            .cloned()
            .collect(),
        None => ids1.filter(|id| in_network2(id)).cloned().collect(),
    }
}
