//! # griddiff-core: Network Snapshot Comparison Engine
//!
//! Compares two snapshots of the same electrical network model (before/after
//! a power-flow run, an import, a topology change) and produces a structured
//! report of the quantitative and topological differences between pieces of
//! equipment sharing the same identifier.
//!
//! ## Design Philosophy
//!
//! The engine is a pure, synchronous computation: given two in-memory
//! [`Network`] values it reads, compares and reports. It never mutates
//! either network, caches nothing and holds no global state. Comparison
//! policy (tolerances, report filtering) lives in an explicit [`DiffConfig`]
//! handed to the [`NetworkDiff`] orchestrator.
//!
//! Entity catalogs are `BTreeMap`s keyed by identifier, so iteration order
//! (and therefore record order and serialized output) is deterministic.
//!
//! ## Quick Start
//!
//! ```rust
//! use griddiff_core::*;
//!
//! let mut before = Network::new("sim-before");
//! before.add_voltage_level(
//!     VoltageLevel::new("VLHV1", 380.0)
//!         .with_voltage_limits(300.0, 420.0)
//!         .with_bus(Bus::new("VLHV1_0", 402.14)),
//! );
//! let mut after = before.clone();
//! after.id = "sim-after".to_string();
//!
//! let report = NetworkDiff::new(DiffConfig::default()).diff(&before, &after);
//! assert!(!report.is_different());
//! ```
//!
//! ## Modules
//!
//! - [`comparator`] - fuzzy scalar equality and map difference primitives
//! - [`config`] - tolerance/filter configuration
//! - [`diff`] - per-equipment differs and the comparison orchestrator
//! - [`report`] - report aggregation and JSON serialization

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub mod comparator;
pub mod config;
pub mod diff;
pub mod error;
pub mod report;

pub use config::DiffConfig;
pub use diff::{
    diff_branches, diff_voltage_levels, BranchDiff, EquipmentSelection, EquipmentType, NetworkDiff,
    VoltageLevelDiff,
};
pub use error::{DiffError, DiffResult};
pub use report::DiffReport;

/// The two sides of a branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Side {
    One,
    Two,
}

impl Side {
    /// Name used in `<branchId>_<side>` delta tokens.
    pub fn token(self) -> &'static str {
        match self {
            Side::One => "ONE",
            Side::Two => "TWO",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

/// How a voltage level describes its internal topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TopologyKind {
    /// Pre-resolved buses only.
    #[default]
    BusBreaker,
    /// Individual breakers and busbar sections are exposed.
    NodeBreaker,
}

/// An electrical node. `v` is the voltage magnitude in kV; NaN when the bus
/// is not energized.
#[derive(Debug, Clone, PartialEq)]
pub struct Bus {
    pub id: String,
    pub v: f64,
}

impl Bus {
    pub fn new(id: impl Into<String>, v: f64) -> Self {
        Self { id: id.into(), v }
    }
}

/// A breaker or disconnector owned by a voltage level.
#[derive(Debug, Clone, PartialEq)]
pub struct Switch {
    pub id: String,
    pub open: bool,
}

impl Switch {
    pub fn new(id: impl Into<String>, open: bool) -> Self {
        Self {
            id: id.into(),
            open,
        }
    }
}

/// A node/breaker-topology busbar segment with its own measured voltage (kV,
/// NaN allowed).
#[derive(Debug, Clone, PartialEq)]
pub struct BusbarSection {
    pub id: String,
    pub v: f64,
}

impl BusbarSection {
    pub fn new(id: impl Into<String>, v: f64) -> Self {
        Self { id: id.into(), v }
    }
}

/// A substation-level grouping of buses/busbars and switches operating at a
/// common nominal voltage.
#[derive(Debug, Clone, PartialEq)]
pub struct VoltageLevel {
    pub id: String,
    /// Nominal voltage in kV
    pub nominal_v: f64,
    /// Lower operating voltage limit in kV
    pub low_voltage_limit: f64,
    /// Upper operating voltage limit in kV
    pub high_voltage_limit: f64,
    pub topology: TopologyKind,
    pub buses: Vec<Bus>,
    pub switches: Vec<Switch>,
    /// Populated only for node/breaker voltage levels
    pub busbar_sections: Vec<BusbarSection>,
}

impl VoltageLevel {
    pub fn new(id: impl Into<String>, nominal_v: f64) -> Self {
        Self {
            id: id.into(),
            nominal_v,
            low_voltage_limit: f64::NAN,
            high_voltage_limit: f64::NAN,
            topology: TopologyKind::BusBreaker,
            buses: Vec::new(),
            switches: Vec::new(),
            busbar_sections: Vec::new(),
        }
    }

    /// Set the operating voltage limits (kV).
    pub fn with_voltage_limits(mut self, low: f64, high: f64) -> Self {
        self.low_voltage_limit = low;
        self.high_voltage_limit = high;
        self
    }

    pub fn with_topology(mut self, topology: TopologyKind) -> Self {
        self.topology = topology;
        self
    }

    pub fn with_bus(mut self, bus: Bus) -> Self {
        self.buses.push(bus);
        self
    }

    pub fn with_switch(mut self, sw: Switch) -> Self {
        self.switches.push(sw);
        self
    }

    pub fn with_busbar_section(mut self, bbs: BusbarSection) -> Self {
        self.busbar_sections.push(bbs);
        self
    }

    /// Mutable access to a switch by id.
    pub fn switch_mut(&mut self, id: &str) -> Option<&mut Switch> {
        self.switches.iter_mut().find(|s| s.id == id)
    }

    /// Mutable access to a bus by id.
    pub fn bus_mut(&mut self, id: &str) -> Option<&mut Bus> {
        self.buses.iter_mut().find(|b| b.id == id)
    }
}

/// Measured state of one end of a branch.
#[derive(Debug, Clone, PartialEq)]
pub struct Terminal {
    /// Connection status of the terminal
    pub connected: bool,
    /// Active power in MW (NaN when not computed)
    pub p: f64,
    /// Reactive power in Mvar (NaN when not computed)
    pub q: f64,
    /// Current in A (NaN when not computed)
    pub i: f64,
    /// Permanent current limit in A
    pub current_limit: f64,
    /// Nominal voltage of the connected voltage level in kV
    pub nominal_v: f64,
}

impl Default for Terminal {
    fn default() -> Self {
        Self {
            connected: true,
            p: f64::NAN,
            q: f64::NAN,
            i: f64::NAN,
            current_limit: f64::NAN,
            nominal_v: f64::NAN,
        }
    }
}

impl Terminal {
    pub fn new(p: f64, q: f64) -> Self {
        Self {
            p,
            q,
            ..Self::default()
        }
    }

    pub fn with_current(mut self, i: f64) -> Self {
        self.i = i;
        self
    }

    pub fn with_current_limit(mut self, limit: f64) -> Self {
        self.current_limit = limit;
        self
    }

    pub fn with_nominal_v(mut self, nominal_v: f64) -> Self {
        self.nominal_v = nominal_v;
        self
    }

    pub fn disconnected(mut self) -> Self {
        self.connected = false;
        self
    }
}

/// A two-terminal equipment item (line or transformer) with independent
/// measurements at each side.
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    pub id: String,
    pub terminal1: Terminal,
    pub terminal2: Terminal,
}

impl Branch {
    pub fn new(id: impl Into<String>, terminal1: Terminal, terminal2: Terminal) -> Self {
        Self {
            id: id.into(),
            terminal1,
            terminal2,
        }
    }

    pub fn terminal(&self, side: Side) -> &Terminal {
        match side {
            Side::One => &self.terminal1,
            Side::Two => &self.terminal2,
        }
    }

    pub fn terminal_mut(&mut self, side: Side) -> &mut Terminal {
        match side {
            Side::One => &mut self.terminal1,
            Side::Two => &mut self.terminal2,
        }
    }
}

/// An identified network snapshot: catalogs of voltage levels and branches
/// keyed by their stable string identifiers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Network {
    pub id: String,
    pub voltage_levels: BTreeMap<String, VoltageLevel>,
    pub branches: BTreeMap<String, Branch>,
}

impl Network {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            voltage_levels: BTreeMap::new(),
            branches: BTreeMap::new(),
        }
    }

    pub fn add_voltage_level(&mut self, vl: VoltageLevel) {
        self.voltage_levels.insert(vl.id.clone(), vl);
    }

    pub fn add_branch(&mut self, branch: Branch) {
        self.branches.insert(branch.id.clone(), branch);
    }

    pub fn voltage_level(&self, id: &str) -> Option<&VoltageLevel> {
        self.voltage_levels.get(id)
    }

    pub fn voltage_level_mut(&mut self, id: &str) -> Option<&mut VoltageLevel> {
        self.voltage_levels.get_mut(id)
    }

    pub fn branch(&self, id: &str) -> Option<&Branch> {
        self.branches.get(id)
    }

    pub fn branch_mut(&mut self, id: &str) -> Option<&mut Branch> {
        self.branches.get_mut(id)
    }

    /// Voltage level ids in lexicographic order.
    pub fn voltage_level_ids(&self) -> impl Iterator<Item = &String> {
        self.voltage_levels.keys()
    }

    /// Branch ids in lexicographic order.
    pub fn branch_ids(&self) -> impl Iterator<Item = &String> {
        self.branches.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_construction() {
        let mut network = Network::new("n1");
        network.add_voltage_level(
            VoltageLevel::new("VLHV1", 380.0)
                .with_voltage_limits(300.0, 420.0)
                .with_bus(Bus::new("VLHV1_0", 402.14)),
        );
        network.add_branch(Branch::new(
            "NHV1_NHV2_1",
            Terminal::new(302.4, 98.7).with_current_limit(600.0),
            Terminal::new(-300.4, -137.1).with_current_limit(600.0),
        ));

        assert_eq!(network.voltage_levels.len(), 1);
        assert_eq!(network.branches.len(), 1);
        let vl = network.voltage_level("VLHV1").unwrap();
        assert_eq!(vl.buses[0].v, 402.14);
        assert!(network.voltage_level("VLXX").is_none());
    }

    #[test]
    fn test_branch_terminal_access() {
        let branch = Branch::new(
            "b1",
            Terminal::new(1.0, 2.0),
            Terminal::new(3.0, 4.0).disconnected(),
        );
        assert_eq!(branch.terminal(Side::One).p, 1.0);
        assert_eq!(branch.terminal(Side::Two).q, 4.0);
        assert!(branch.terminal(Side::One).connected);
        assert!(!branch.terminal(Side::Two).connected);
    }

    #[test]
    fn test_terminal_defaults_are_nan() {
        let t = Terminal::default();
        assert!(t.connected);
        assert!(t.p.is_nan());
        assert!(t.q.is_nan());
        assert!(t.i.is_nan());
    }

    #[test]
    fn test_id_iteration_is_sorted() {
        let mut network = Network::new("n1");
        network.add_voltage_level(VoltageLevel::new("VLB", 380.0));
        network.add_voltage_level(VoltageLevel::new("VLA", 380.0));
        let ids: Vec<_> = network.voltage_level_ids().cloned().collect();
        assert_eq!(ids, vec!["VLA".to_string(), "VLB".to_string()]);
    }

    #[test]
    fn test_side_token() {
        assert_eq!(Side::One.token(), "ONE");
        assert_eq!(format!("{}", Side::Two), "TWO");
    }
}
