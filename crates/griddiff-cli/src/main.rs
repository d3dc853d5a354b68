use std::fs::File;
use std::io::BufWriter;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use griddiff_core::{DiffConfig, EquipmentSelection, EquipmentType, NetworkDiff};
use griddiff_io::{load_config, read_network};

mod cli;
use cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default tracing subscriber failed")?;

    run(&cli)
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => DiffConfig::default(),
    };

    let network1 = read_network(&cli.input_file1)
        .with_context(|| format!("loading network from {}", cli.input_file1.display()))?;
    let network2 = read_network(&cli.input_file2)
        .with_context(|| format!("loading network from {}", cli.input_file2.display()))?;

    let selection = build_selection(cli);
    let report = NetworkDiff::new(config).diff_selected(&network1, &network2, &selection);

    let file = File::create(&cli.output_file)
        .with_context(|| format!("creating {}", cli.output_file.display()))?;
    report.write_json(BufWriter::new(file))?;

    info!(
        "compared '{}' and '{}': {} voltage level record(s), {} branch record(s), different = {}",
        report.network1,
        report.network2,
        report.voltage_level_diffs.len(),
        report.branch_diffs.len(),
        report.is_different()
    );
    Ok(())
}

fn build_selection(cli: &Cli) -> EquipmentSelection {
    let equipment_types = if cli.equipment_types.is_empty() {
        vec![EquipmentType::All]
    } else {
        cli.equipment_types
            .iter()
            .map(|&t| EquipmentType::from(t))
            .collect()
    };
    EquipmentSelection {
        equipment_types,
        voltage_levels: cli.vl_ids.clone(),
        branches: cli.branch_ids.clone(),
    }
}
