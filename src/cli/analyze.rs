use anyhow::{Context, Result};
use log::{info, warn};
use std::path::PathBuf;

use pitchchain::pipeline::{AnalysisReport, Pipeline, TrialCache, TrialInput};
use pitchchain::report::{write_artifacts, ArtifactOptions, FiringOrderTable, PeakTable};
use pitchchain::subject::subject_from_paths;

use super::config::{Config, Overrides};

/// Analyze one or three trial files
pub fn run(files: Vec<PathBuf>, config: Option<PathBuf>, overrides: Overrides, seconds_axis: bool) -> Result<()> {
    let config = match config {
        Some(path) => Config::from_file(&path)?,
        None => Config::default(),
    };
    let settings = config.resolve(overrides)?;

    // Batch size is checked before any file is touched
    Pipeline::new(settings.analysis.clone()).check_batch(files.len())?;

    for file in &files {
        if !file.exists() {
            anyhow::bail!("Input file does not exist: {}", file.display());
        }
    }

    let subject = subject_from_paths(&files);
    info!("pitchchain analyze");
    info!("==================");
    info!("Subject: {}", subject);
    info!("Trials:  {}", files.len());
    info!("Side:    {}", settings.analysis.side);
    info!("Display: {}", settings.analysis.display);
    info!("Output:  {}", settings.output_dir.display());

    let trials = files
        .iter()
        .map(TrialInput::from_path)
        .collect::<Result<Vec<_>, _>>()?;

    let raw_rate = if seconds_axis && trials.len() == 1 {
        Some(settings.analysis.sampling_rate_hz)
    } else {
        if seconds_axis {
            warn!("--time-axis seconds applies to single-trial runs only; skipping raw export");
        }
        None
    };

    let mut cache = TrialCache::new();
    for mode in &settings.modes {
        let pipeline = Pipeline::new(settings.analysis.clone().with_mode(*mode));
        let report = pipeline
            .run(&trials, &mut cache)
            .with_context(|| format!("{} analysis failed", mode))?;

        print_report(&subject, &report);

        let options = ArtifactOptions {
            raw_sampling_rate_hz: raw_rate,
        };
        let written = write_artifacts(&report, &subject, &settings.output_dir, options)
            .context("Failed to write results")?;
        for path in written {
            println!("  wrote {}", path.display());
        }
        println!();
    }

    info!("Parsed {} table(s), {} cache hit(s)", cache.misses(), cache.hits());
    Ok(())
}

fn print_report(subject: &str, report: &AnalysisReport) {
    let config = report.config();
    println!(
        "{} - {} ({} trial{}, side {}, {})",
        subject,
        config.mode,
        report.trial_count(),
        if report.is_single_trial() { "" } else { "s" },
        config.side,
        config.display
    );
    println!();
    print!("{}", PeakTable(report));
    println!();

    if let Some(table) = FiringOrderTable::new(report) {
        println!("{}", table);
        println!();
    }
}
