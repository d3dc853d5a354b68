use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use griddiff_core::EquipmentType;

/// Compare two network snapshots and write a JSON difference report.
#[derive(Parser, Debug)]
#[command(name = "griddiff", author, version, about, long_about = None)]
pub struct Cli {
    /// First network snapshot (JSON)
    #[arg(long = "input-file1")]
    pub input_file1: PathBuf,

    /// Second network snapshot (JSON)
    #[arg(long = "input-file2")]
    pub input_file2: PathBuf,

    /// Where to write the JSON report
    #[arg(long = "output-file")]
    pub output_file: PathBuf,

    /// Equipment types to compare, all of them if not specified
    #[arg(long = "equipment-types", value_delimiter = ',', value_enum)]
    pub equipment_types: Vec<EquipmentTypeArg>,

    /// Voltage level ids to compare, all of them if not specified
    #[arg(long = "vl-ids", value_delimiter = ',')]
    pub vl_ids: Option<Vec<String>>,

    /// Branch ids to compare, all of them if not specified
    #[arg(long = "branch-ids", value_delimiter = ',')]
    pub branch_ids: Option<Vec<String>>,

    /// Tolerance configuration file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Set the logging level
    #[arg(long, default_value = "info")]
    pub log_level: tracing::Level,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EquipmentTypeArg {
    VoltageLevels,
    Branches,
    All,
}

impl From<EquipmentTypeArg> for EquipmentType {
    fn from(arg: EquipmentTypeArg) -> Self {
        match arg {
            EquipmentTypeArg::VoltageLevels => EquipmentType::VoltageLevels,
            EquipmentTypeArg::Branches => EquipmentType::Branches,
            EquipmentTypeArg::All => EquipmentType::All,
        }
    }
}
