use anyhow::Result;
use log::info;
use std::path::PathBuf;

use pitchchain::metric::{MetricRegistry, Side};
use pitchchain::pipeline::{AnalysisMode, Pipeline, AnalysisConfig, TrialCache, TrialInput};
use pitchchain::report::validate_trial;

/// Validate trial files against a mode's metric set
pub fn run(files: Vec<PathBuf>, side: Side, mode: AnalysisMode) -> Result<()> {
    info!("pitchchain validate");
    info!("===================");
    info!("Side: {}, mode: {}", side, mode);

    let registry = MetricRegistry::builtin();
    let mut cache = TrialCache::new();
    let mut failed = false;

    for file in &files {
        let trial = match TrialInput::from_path(file) {
            Ok(trial) => trial,
            Err(e) => {
                eprintln!("{}", e);
                failed = true;
                continue;
            }
        };

        let report = validate_trial(&trial, side, mode, &registry, &mut cache);

        // Use colorized output if available
        #[cfg(feature = "colorized_output")]
        {
            println!("{}", report.format_colored());
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            println!("{}", report);
        }

        failed |= !report.is_valid();
    }

    if let Err(e) = Pipeline::new(AnalysisConfig::default()).check_batch(files.len()) {
        eprintln!("Batch: {}", e);
        failed = true;
    }

    // Exit with error code if validation failed
    if failed {
        println!("Validation FAILED");
        std::process::exit(1);
    }

    println!("Validation PASSED");
    Ok(())
}
