use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use pitchchain::metric::Side;
use pitchchain::synthetic::demo_batch;

/// Write a synthetic batch of three trials
pub fn run(dir: PathBuf, subject: &str, side: Side) -> Result<()> {
    std::fs::create_dir_all(&dir).with_context(|| format!("Failed to create {}", dir.display()))?;

    info!("Generating demo trials in {}", dir.display());

    let mut written = Vec::new();
    for (name, trial) in demo_batch(subject, side) {
        let path = dir.join(name);
        trial
            .write_to_path(&path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("  {} ({} samples)", path.display(), trial.samples());
        written.push(path);
    }

    println!("Wrote {} demo trials to {}", written.len(), dir.display());
    println!();
    println!("Try:");
    println!(
        "  pitchchain analyze --side {} {}",
        side,
        written
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(" ")
    );

    Ok(())
}
