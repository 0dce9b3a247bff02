use crate::core::io::gmad::GmadWriter;
use crate::engine::config::{OutputConfig, TestSpec};
use crate::engine::emit::{Emitter, WriteContext};
use crate::engine::error::EngineError;
use crate::engine::shard::ShardPlan;
use crate::engine::sweep::{count_cases, sweep};
use std::path::PathBuf;
use tracing::{debug, instrument};

/// A deck `write_tests` would produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedDeck {
    pub name: String,
    /// Main deck path relative to the output root.
    pub relative_path: PathBuf,
    pub shard: Option<usize>,
}

/// The declared deck count, counted from the sweep itself when the spec gives none.
pub fn declared_count(spec: &TestSpec) -> Result<usize, EngineError> {
    match spec.declared_file_count {
        Some(count) => Ok(count),
        None => {
            let count = count_cases(spec)?;
            debug!(count, "No file count declared; counted the sweep.");
            Ok(count)
        }
    }
}

/// Lists, in write order, every deck `write_tests` would produce. Nothing is written.
#[instrument(skip_all, name = "plan_tests", fields(component = spec.component.tag()))]
pub fn plan_tests(spec: &TestSpec, output: &OutputConfig) -> Result<Vec<PlannedDeck>, EngineError> {
    let component = spec.component.tag();
    let plan = ShardPlan::new(declared_count(spec)?, output.shard_size);
    let writer = GmadWriter::new(output.layout);
    let emitter = Emitter::new(&writer, output, component, plan);

    let mut context = WriteContext::new();
    let mut planned = Vec::new();
    sweep(spec, &mut |case| {
        let index = context.write_index();
        let name = case.name.into_string();
        planned.push(PlannedDeck {
            relative_path: emitter.deck_path(index, &name),
            shard: emitter.locate(index).shard,
            name,
        });
        context = context.advanced();
        Ok(())
    })?;
    Ok(planned)
}
