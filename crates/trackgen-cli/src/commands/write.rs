use crate::cli::WriteArgs;
use crate::config::build_run_config;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::info;
use trackgen::core::io::cmake::CmakeRegistry;
use trackgen::engine::error::EngineError;
use trackgen::engine::progress::ProgressReporter;
use trackgen::workflows::write::write_tests;

pub fn run(args: WriteArgs) -> Result<()> {
    let handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(handler.get_callback());
    let written = write_all(&args, &reporter)?;
    println!(
        "Wrote {} deck(s) from {} spec file(s).",
        written,
        args.spec.specs.len()
    );
    Ok(())
}

/// Writes every spec in order, returning the number of decks written.
pub fn write_all(args: &WriteArgs, reporter: &ProgressReporter) -> Result<usize> {
    let mut registries: BTreeMap<PathBuf, CmakeRegistry> = BTreeMap::new();
    let mut written = 0;

    for spec_path in &args.spec.specs {
        let config = build_run_config(spec_path, &args.spec, &args.output, args.split_sections)?;
        info!(
            "Writing '{}' decks from {:?}.",
            config.spec.component.tag(),
            spec_path
        );
        let summary = write_tests(&config.spec, &config.output, reporter)?;
        written += summary.len();

        if args.cmake {
            summary.register_into(registries.entry(config.output.root.clone()).or_default());
        }
    }

    for (root, registry) in &registries {
        let files = registry.write(root).map_err(EngineError::from)?;
        info!(
            "Registered tests in {} CMakeLists.txt file(s) under {:?}.",
            files.len(),
            root
        );
    }
    Ok(written)
}
