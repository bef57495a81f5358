use anyhow::{Context, Result};
use std::path::PathBuf;

use pitchchain::metric::{MetricRegistry, Side};
use pitchchain::table::RawTrialTable;

/// Display the layout of a trial file
pub fn run(file: PathBuf) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {}", file.display());
    }

    let table = RawTrialTable::from_path(&file).context("Failed to load trial table")?;

    println!("Trial File Information");
    println!("======================");
    println!("File: {}", file.display());
    println!("Samples: {}", table.row_count());
    println!("Columns: {}", table.columns().len());
    println!();

    println!("Columns (group, axis, unit):");
    for (i, key) in table.columns().iter().enumerate() {
        println!("  {:>3}  {}", i + 1, key);
    }
    println!();

    let registry = MetricRegistry::builtin();
    println!("Built-in metrics:");
    for side in Side::all() {
        let found: Vec<&str> = registry
            .specs()
            .iter()
            .filter(|spec| table.contains(&spec.key(side)))
            .map(|spec| spec.label)
            .collect();
        if found.is_empty() {
            println!("  {}: none", side);
        } else {
            println!("  {}: {}", side, found.join(", "));
        }
    }

    Ok(())
}
