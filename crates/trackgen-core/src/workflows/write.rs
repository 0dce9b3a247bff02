use super::plan::declared_count;
use crate::core::io::cmake::CmakeRegistry;
use crate::core::io::gmad::GmadWriter;
use crate::core::io::traits::DeckFormat;
use crate::engine::config::{OutputConfig, TestSpec};
use crate::engine::emit::{Emitter, WriteContext, WrittenDeck};
use crate::engine::error::EngineError;
use crate::engine::progress::ProgressReporter;
use crate::engine::shard::ShardPlan;
use crate::engine::sweep::sweep;
use std::fs;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteSummary {
    pub component: &'static str,
    /// The count the shard layout was planned for.
    pub declared: usize,
    pub decks: Vec<WrittenDeck>,
}

impl WriteSummary {
    pub fn len(&self) -> usize {
        self.decks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decks.is_empty()
    }

    /// Registers every written deck as a test of its component.
    pub fn register_into(&self, registry: &mut CmakeRegistry) {
        for deck in &self.decks {
            if let Some(file) = deck.relative_path.file_name() {
                registry.register(self.component, deck.shard, &file.to_string_lossy());
            }
        }
    }
}

/// Writes every deck of `spec` as GMAD under `output.root`.
pub fn write_tests(
    spec: &TestSpec,
    output: &OutputConfig,
    reporter: &ProgressReporter,
) -> Result<WriteSummary, EngineError> {
    let writer = GmadWriter::new(output.layout);
    write_tests_with(spec, output, &writer, reporter)
}

/// Writes every deck of `spec` with a caller-supplied deck format.
///
/// Writing stops at the first error; decks already written stay on disk.
#[instrument(skip_all, name = "write_tests", fields(component = spec.component.tag()))]
pub fn write_tests_with<W: DeckFormat>(
    spec: &TestSpec,
    output: &OutputConfig,
    writer: &W,
    reporter: &ProgressReporter,
) -> Result<WriteSummary, EngineError> {
    let component = spec.component.tag();
    let declared = declared_count(spec)?;
    let plan = ShardPlan::new(declared, output.shard_size);
    prepare_directories(&output.root, component, &plan)?;

    reporter.sweep_started(component, declared);
    info!(
        declared,
        sharded = plan.is_sharded(),
        "Writing {} decks under '{}'.",
        component,
        output.root.display()
    );

    let emitter = Emitter::new(writer, output, component, plan);
    let mut context = WriteContext::new();
    let mut decks = Vec::new();
    sweep(spec, &mut |case| {
        let (next, deck) = emitter.emit(context, case)?;
        context = next;
        decks.push(deck);
        reporter.deck_written();
        Ok(())
    })?;

    if decks.len() != declared {
        warn!(
            declared,
            written = decks.len(),
            "Declared file count does not match the number of decks written."
        );
        reporter.message(format!(
            "{}: declared {} deck(s) but wrote {}",
            component,
            declared,
            decks.len()
        ));
    }
    reporter.sweep_finished(decks.len());
    info!("Wrote {} {} deck(s).", decks.len(), component);

    Ok(WriteSummary {
        component,
        declared,
        decks,
    })
}

fn prepare_directories(root: &Path, component: &str, plan: &ShardPlan) -> Result<(), EngineError> {
    let component_dir = root.join(component);
    create_dir(&component_dir)?;
    for shard in plan.shard_dirs() {
        create_dir(&component_dir.join(shard.to_string()))?;
    }
    debug!(
        shards = plan.shard_dirs().len(),
        "Prepared output directories."
    );
    Ok(())
}

fn create_dir(path: &Path) -> Result<(), EngineError> {
    fs::create_dir_all(path).map_err(|e| EngineError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })
}
