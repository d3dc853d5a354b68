//! Branch comparison: per-side terminal telemetry under the generic
//! threshold.
//!
//! Snapshots are free-standing immutable values built by [`diff_branches`];
//! they carry everything the report needs and can be tested and serialized
//! independently of the differ that created them.

use crate::comparator::fuzzy_equals;
use crate::config::DiffConfig;
use crate::{Branch, Side, Terminal};

/// Measured state of one branch side at comparison time.
#[derive(Debug, Clone, PartialEq)]
pub struct TerminalValues {
    pub connected: bool,
    pub p: f64,
    pub q: f64,
    pub i: f64,
    pub current_limit: f64,
    pub nominal_v: f64,
}

impl TerminalValues {
    fn from_terminal(terminal: &Terminal) -> Self {
        Self {
            connected: terminal.connected,
            p: terminal.p,
            q: terminal.q,
            i: terminal.i,
            current_limit: terminal.current_limit,
            nominal_v: terminal.nominal_v,
        }
    }
}

/// Immutable snapshot of one branch from one network.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchValues {
    pub branch_id: String,
    pub side1: TerminalValues,
    pub side2: TerminalValues,
}

impl BranchValues {
    /// Read a snapshot off a live branch.
    pub fn from_branch(branch: &Branch) -> Self {
        Self {
            branch_id: branch.id.clone(),
            side1: TerminalValues::from_terminal(&branch.terminal1),
            side2: TerminalValues::from_terminal(&branch.terminal2),
        }
    }

    pub fn side(&self, side: Side) -> &TerminalValues {
        match side {
            Side::One => &self.side1,
            Side::Two => &self.side2,
        }
    }
}

/// Comparison outcome for one branch: the two snapshots, per-side difference
/// flags and the raw overall flag. Never mutated after construction.
#[derive(Debug, Clone)]
pub struct BranchDiff {
    pub values1: BranchValues,
    pub values2: BranchValues,
    pub side1_different: bool,
    pub side2_different: bool,
    /// Raw outcome, before any report-filter gating.
    pub is_different: bool,
}

impl BranchDiff {
    fn side_different(&self, side: Side) -> bool {
        match side {
            Side::One => self.side1_different,
            Side::Two => self.side2_different,
        }
    }

    /// `<branchId>_<side>` tokens for the sides whose connection status
    /// differs.
    pub fn connection_status_delta(&self) -> Vec<String> {
        [Side::One, Side::Two]
            .into_iter()
            .filter(|&side| self.values1.side(side).connected != self.values2.side(side).connected)
            .map(|side| format!("{}_{}", self.values1.branch_id, side.token()))
            .collect()
    }

    /// `<branchId>_<side>` tokens for the sides whose fuzzy comparison
    /// differs.
    pub fn terminal_status_delta(&self) -> Vec<String> {
        [Side::One, Side::Two]
            .into_iter()
            .filter(|&side| self.side_different(side))
            .map(|side| format!("{}_{}", self.values1.branch_id, side.token()))
            .collect()
    }
}

fn sides_equal(config: &DiffConfig, t1: &TerminalValues, t2: &TerminalValues) -> bool {
    let tol = config.generic_threshold();
    t1.connected == t2.connected
        && fuzzy_equals(t1.p, t2.p, tol)
        && fuzzy_equals(t1.q, t2.q, tol)
        && fuzzy_equals(t1.i, t2.i, tol)
}

/// Compare two branches sharing one identifier, one from each network.
pub fn diff_branches(config: &DiffConfig, branch1: &Branch, branch2: &Branch) -> BranchDiff {
    let values1 = BranchValues::from_branch(branch1);
    let values2 = BranchValues::from_branch(branch2);
    let side1_different = !sides_equal(config, &values1.side1, &values2.side1);
    let side2_different = !sides_equal(config, &values1.side2, &values2.side2);
    BranchDiff {
        values1,
        values2,
        side1_different,
        side2_different,
        is_different: side1_different || side2_different,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Terminal;

    fn line() -> Branch {
        Branch::new(
            "NHV1_NHV2_1",
            Terminal::new(302.4, 98.7).with_current_limit(600.0),
            Terminal::new(-300.4, -137.1).with_current_limit(600.0),
        )
    }

    #[test]
    fn test_no_differences() {
        let diff = diff_branches(&DiffConfig::default(), &line(), &line());
        assert!(!diff.is_different);
        assert!(!diff.side1_different);
        assert!(!diff.side2_different);
        assert!(diff.connection_status_delta().is_empty());
        assert!(diff.terminal_status_delta().is_empty());
    }

    #[test]
    fn test_one_terminal_disconnected() {
        let mut other = line();
        other.terminal1.connected = false;
        let diff = diff_branches(&DiffConfig::default(), &line(), &other);
        assert!(diff.is_different);
        assert!(diff.side1_different);
        assert!(!diff.side2_different);
        assert_eq!(
            diff.connection_status_delta(),
            vec!["NHV1_NHV2_1_ONE".to_string()]
        );
        assert_eq!(
            diff.terminal_status_delta(),
            vec!["NHV1_NHV2_1_ONE".to_string()]
        );
    }

    #[test]
    fn test_disconnection_ignores_threshold() {
        let mut other = line();
        other.terminal2.connected = false;
        let config = DiffConfig::new(1e9, 1e9, true).unwrap();
        let diff = diff_branches(&config, &line(), &other);
        assert!(diff.is_different);
        assert!(diff.side2_different);
    }

    #[test]
    fn test_different_flows() {
        let mut other = line();
        other.terminal2.p = -302.8;
        other.terminal2.q = -15.3;
        let diff = diff_branches(&DiffConfig::default(), &line(), &other);
        assert!(diff.is_different);
        assert!(!diff.side1_different);
        assert!(diff.side2_different);
        assert_eq!(
            diff.terminal_status_delta(),
            vec!["NHV1_NHV2_1_TWO".to_string()]
        );
    }

    #[test]
    fn test_threshold_absorbs_flow_change() {
        let mut other = line();
        other.terminal2.p = -302.8;
        other.terminal2.q = -135.3;
        let config = DiffConfig::new(100.0, 0.0, true).unwrap();
        let diff = diff_branches(&config, &line(), &other);
        assert!(!diff.is_different);
    }

    #[test]
    fn test_nan_currents_on_both_sides_are_equal() {
        // i is NaN by default on both branches: never-computed telemetry
        let diff = diff_branches(&DiffConfig::default(), &line(), &line());
        assert!(diff.values1.side1.i.is_nan());
        assert!(!diff.is_different);
    }

    #[test]
    fn test_nan_vs_value_differs() {
        let mut other = line();
        other.terminal1.i = 450.0;
        let diff = diff_branches(&DiffConfig::new(1e6, 0.0, true).unwrap(), &line(), &other);
        assert!(diff.side1_different);
    }

    #[test]
    fn test_snapshot_carries_static_data() {
        let diff = diff_branches(&DiffConfig::default(), &line(), &line());
        assert_eq!(diff.values1.side1.current_limit, 600.0);
        assert_eq!(diff.values1.branch_id, "NHV1_NHV2_1");
    }
}
