//! JSON snapshot documents for network models.
//!
//! The document structs mirror the core model but keep optional telemetry as
//! `Option<f64>`: JSON has no NaN literal, so absent measurements round-trip
//! as `null`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use griddiff_core::{
    Branch, Bus, BusbarSection, DiffError, DiffResult, Network, Switch, Terminal, TopologyKind,
    VoltageLevel,
};

fn to_opt(v: f64) -> Option<f64> {
    if v.is_nan() {
        None
    } else {
        Some(v)
    }
}

fn from_opt(v: Option<f64>) -> f64 {
    v.unwrap_or(f64::NAN)
}

#[derive(Debug, Serialize, Deserialize)]
struct NetworkDoc {
    id: String,
    #[serde(default)]
    voltage_levels: Vec<VoltageLevelDoc>,
    #[serde(default)]
    branches: Vec<BranchDoc>,
}

#[derive(Debug, Serialize, Deserialize)]
struct VoltageLevelDoc {
    id: String,
    nominal_v: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    low_voltage_limit: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    high_voltage_limit: Option<f64>,
    #[serde(default)]
    topology: TopologyKind,
    #[serde(default)]
    buses: Vec<BusDoc>,
    #[serde(default)]
    switches: Vec<SwitchDoc>,
    #[serde(default)]
    busbar_sections: Vec<BusbarSectionDoc>,
}

#[derive(Debug, Serialize, Deserialize)]
struct BusDoc {
    id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    v: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SwitchDoc {
    id: String,
    open: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct BusbarSectionDoc {
    id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    v: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
struct BranchDoc {
    id: String,
    terminal1: TerminalDoc,
    terminal2: TerminalDoc,
}

#[derive(Debug, Serialize, Deserialize)]
struct TerminalDoc {
    #[serde(default = "default_connected")]
    connected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    p: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    q: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    i: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    current_limit: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    nominal_v: Option<f64>,
}

fn default_connected() -> bool {
    true
}

impl From<&Network> for NetworkDoc {
    fn from(network: &Network) -> Self {
        NetworkDoc {
            id: network.id.clone(),
            voltage_levels: network
                .voltage_levels
                .values()
                .map(|vl| VoltageLevelDoc {
                    id: vl.id.clone(),
                    nominal_v: vl.nominal_v,
                    low_voltage_limit: to_opt(vl.low_voltage_limit),
                    high_voltage_limit: to_opt(vl.high_voltage_limit),
                    topology: vl.topology,
                    buses: vl
                        .buses
                        .iter()
                        .map(|b| BusDoc {
                            id: b.id.clone(),
                            v: to_opt(b.v),
                        })
                        .collect(),
                    switches: vl
                        .switches
                        .iter()
                        .map(|s| SwitchDoc {
                            id: s.id.clone(),
                            open: s.open,
                        })
                        .collect(),
                    busbar_sections: vl
                        .busbar_sections
                        .iter()
                        .map(|b| BusbarSectionDoc {
                            id: b.id.clone(),
                            v: to_opt(b.v),
                        })
                        .collect(),
                })
                .collect(),
            branches: network
                .branches
                .values()
                .map(|b| BranchDoc {
                    id: b.id.clone(),
                    terminal1: terminal_doc(&b.terminal1),
                    terminal2: terminal_doc(&b.terminal2),
                })
                .collect(),
        }
    }
}

fn terminal_doc(t: &Terminal) -> TerminalDoc {
    TerminalDoc {
        connected: t.connected,
        p: to_opt(t.p),
        q: to_opt(t.q),
        i: to_opt(t.i),
        current_limit: to_opt(t.current_limit),
        nominal_v: to_opt(t.nominal_v),
    }
}

fn terminal_from_doc(doc: TerminalDoc) -> Terminal {
    Terminal {
        connected: doc.connected,
        p: from_opt(doc.p),
        q: from_opt(doc.q),
        i: from_opt(doc.i),
        current_limit: from_opt(doc.current_limit),
        nominal_v: from_opt(doc.nominal_v),
    }
}

impl From<NetworkDoc> for Network {
    fn from(doc: NetworkDoc) -> Self {
        let mut network = Network::new(doc.id);
        for vl_doc in doc.voltage_levels {
            let mut vl = VoltageLevel::new(vl_doc.id, vl_doc.nominal_v)
                .with_voltage_limits(
                    from_opt(vl_doc.low_voltage_limit),
                    from_opt(vl_doc.high_voltage_limit),
                )
                .with_topology(vl_doc.topology);
            vl.buses = vl_doc
                .buses
                .into_iter()
                .map(|b| Bus::new(b.id, from_opt(b.v)))
                .collect();
            vl.switches = vl_doc
                .switches
                .into_iter()
                .map(|s| Switch::new(s.id, s.open))
                .collect();
            vl.busbar_sections = vl_doc
                .busbar_sections
                .into_iter()
                .map(|b| BusbarSection::new(b.id, from_opt(b.v)))
                .collect();
            network.add_voltage_level(vl);
        }
        for branch_doc in doc.branches {
            network.add_branch(Branch::new(
                branch_doc.id,
                terminal_from_doc(branch_doc.terminal1),
                terminal_from_doc(branch_doc.terminal2),
            ));
        }
        network
    }
}

/// Parse a network snapshot from JSON text.
pub fn parse_network(json: &str) -> DiffResult<Network> {
    let doc: NetworkDoc = serde_json::from_str(json)?;
    Ok(doc.into())
}

/// Read a network snapshot from a JSON file.
pub fn read_network(path: impl AsRef<Path>) -> DiffResult<Network> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .map_err(|e| DiffError::Io(std::io::Error::new(e.kind(), format!("{}: {e}", path.display()))))?;
    let network = parse_network(&text)?;
    debug!(
        "loaded network '{}' from {} ({} voltage levels, {} branches)",
        network.id,
        path.display(),
        network.voltage_levels.len(),
        network.branches.len()
    );
    Ok(network)
}

/// Write a network snapshot to a JSON file.
pub fn write_network(path: impl AsRef<Path>, network: &Network) -> DiffResult<()> {
    let doc = NetworkDoc::from(network);
    let json = serde_json::to_string_pretty(&doc)?;
    fs::write(path.as_ref(), json)?;
    Ok(())
}
