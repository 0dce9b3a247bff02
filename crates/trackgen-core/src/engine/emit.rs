use super::config::OutputConfig;
use super::error::EngineError;
use super::naming::DeckName;
use super::shard::{ShardPlan, relative_reference};
use crate::core::io::traits::DeckFormat;
use crate::core::models::machine::Machine;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::trace;

/// The only state carried from one deck write to the next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteContext {
    write_index: usize,
}

impl WriteContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// 0-based index of the next deck to be written.
    pub fn write_index(&self) -> usize {
        self.write_index
    }

    /// The context for the deck after this one.
    pub fn advanced(self) -> Self {
        Self {
            write_index: self.write_index + 1,
        }
    }
}

/// One leaf of a sweep: a named machine ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct TestCase {
    pub name: DeckName,
    pub machine: Machine,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenDeck {
    pub name: String,
    /// Main deck path relative to the output root.
    pub relative_path: PathBuf,
    pub shard: Option<usize>,
    /// Every file created for the deck, main deck first.
    pub files: Vec<PathBuf>,
}

/// Where a deck lands, without writing anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckLocation {
    pub shard: Option<usize>,
    pub relative_dir: PathBuf,
    pub beam_reference: String,
    pub options_reference: String,
}

/// Writes the test cases of one component under an output root.
pub struct Emitter<'a, W: DeckFormat> {
    writer: &'a W,
    output: &'a OutputConfig,
    component: &'static str,
    plan: ShardPlan,
}

impl<'a, W: DeckFormat> Emitter<'a, W> {
    pub fn new(
        writer: &'a W,
        output: &'a OutputConfig,
        component: &'static str,
        plan: ShardPlan,
    ) -> Self {
        Self {
            writer,
            output,
            component,
            plan,
        }
    }

    pub fn root(&self) -> &Path {
        &self.output.root
    }

    pub fn locate(&self, index: usize) -> DeckLocation {
        let shard = self.plan.shard_for(index);
        DeckLocation {
            shard,
            relative_dir: self.plan.relative_dir(self.component, index),
            beam_reference: relative_reference(shard, &self.output.beam_file),
            options_reference: relative_reference(shard, &self.output.options_file),
        }
    }

    /// Relative path of the main deck `name` at write index `index`.
    pub fn deck_path(&self, index: usize, name: &str) -> PathBuf {
        self.writer
            .deck_path(&self.plan.relative_dir(self.component, index), name)
    }

    /// Writes `case` at the context's index and returns the advanced context.
    pub fn emit(
        &self,
        context: WriteContext,
        case: TestCase,
    ) -> Result<(WriteContext, WrittenDeck), EngineError> {
        let index = context.write_index();
        let location = self.locate(index);
        let name = case.name.into_string();
        let mut machine = case.machine;
        if let Some(beam) = machine.beam_mut() {
            beam.set_distribution_file(location.beam_reference.as_str());
        }

        let dir = self.output.root.join(&location.relative_dir);
        fs::create_dir_all(&dir).map_err(|e| EngineError::Io {
            path: dir.to_string_lossy().to_string(),
            source: e,
        })?;

        let files = self
            .writer
            .write_machine(
                &machine,
                Some(location.options_reference.as_str()),
                &dir,
                &name,
            )
            .map_err(|e| EngineError::Deck {
                name: name.clone(),
                source: Box::new(e),
            })?;
        trace!(index, deck = %name, "Wrote deck");

        let deck = WrittenDeck {
            relative_path: self.writer.deck_path(&location.relative_dir, &name),
            name,
            shard: location.shard,
            files,
        };
        Ok((context.advanced(), deck))
    }
}
