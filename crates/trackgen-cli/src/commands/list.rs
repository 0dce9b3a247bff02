use crate::cli::ListArgs;
use crate::config::build_run_config;
use crate::error::Result;
use std::path::PathBuf;
use trackgen::workflows::plan::plan_tests;

pub fn run(args: ListArgs) -> Result<()> {
    for path in planned_paths(&args)? {
        println!("{}", path.display());
    }
    Ok(())
}

/// Deck paths, under each spec's output root, in write order.
pub fn planned_paths(args: &ListArgs) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for spec_path in &args.spec.specs {
        let config = build_run_config(spec_path, &args.spec, &args.output, false)?;
        let planned = plan_tests(&config.spec, &config.output)?;
        paths.extend(
            planned
                .into_iter()
                .map(|deck| config.output.root.join(deck.relative_path)),
        );
    }
    Ok(paths)
}
