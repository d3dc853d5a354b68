//! # griddiff-io: Network Snapshot & Configuration I/O
//!
//! File-level glue for the comparison engine: a JSON document format for
//! [`Network`](griddiff_core::Network) snapshots and TOML configuration
//! loading for [`DiffConfig`](griddiff_core::DiffConfig).
//!
//! The JSON snapshot format exists so the tool is usable end to end; it is
//! not a grid interchange format. Voltages that may legitimately be absent
//! (de-energized buses, unmeasured busbar sections, uncomputed flows) are
//! `null` in the documents and NaN in the model.

pub mod config_file;
pub mod network_json;

pub use config_file::{load_config, parse_config};
pub use network_json::{parse_network, read_network, write_network};
