use crate::core::models::machine::Machine;
use std::error::Error;
use std::io;
use std::path::{Path, PathBuf};

/// Defines the interface for serializing a test machine into deck files.
///
/// Implementors decide how many files a deck occupies; the first path returned is the
/// main deck the simulator is pointed at.
pub trait DeckFormat {
    /// The error type for serialization.
    type Error: Error + Send + Sync + From<io::Error> + 'static;

    /// File extension of the main deck, without the dot.
    fn extension(&self) -> &'static str;

    /// Writes `machine` as deck `name` inside `dir`.
    ///
    /// # Arguments
    ///
    /// * `machine` - The assembled machine, beam reference already resolved.
    /// * `options_include` - Path of an external options file to include, relative to `dir`.
    /// * `dir` - Existing directory the deck files are created in.
    /// * `name` - Deck name without extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the machine cannot be rendered or a file cannot be written.
    fn write_machine(
        &self,
        machine: &Machine,
        options_include: Option<&str>,
        dir: &Path,
        name: &str,
    ) -> Result<Vec<PathBuf>, Self::Error>;

    /// Path of the main deck `name` inside `dir`.
    fn deck_path(&self, dir: &Path, name: &str) -> PathBuf {
        dir.join(format!("{}.{}", name, self.extension()))
    }
}
