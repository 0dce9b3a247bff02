use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const LISTS_FILE: &str = "CMakeLists.txt";

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

/// Collects written decks and registers each one as a `simple_testing` CMake test.
///
/// Layout mirrors the deck tree: the output root adds every component directory, a
/// sharded component adds its shard directories, and the directory holding the decks
/// lists the tests.
#[derive(Debug, Clone, Default)]
pub struct CmakeRegistry {
    components: BTreeMap<String, BTreeMap<Option<usize>, Vec<String>>>,
}

impl CmakeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the deck file `file_name` of `component`, optionally inside `shard`.
    pub fn register(&mut self, component: &str, shard: Option<usize>, file_name: &str) {
        self.components
            .entry(component.to_string())
            .or_default()
            .entry(shard)
            .or_default()
            .push(file_name.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Every `CMakeLists.txt` as (path relative to the output root, contents).
    pub fn render(&self) -> Vec<(PathBuf, String)> {
        let mut files = Vec::new();

        let root: String = self
            .components
            .keys()
            .map(|component| format!("add_subdirectory({})\n", component))
            .collect();
        files.push((PathBuf::from(LISTS_FILE), root));

        for (component, shards) in &self.components {
            let component_dir = PathBuf::from(component);
            let mut component_lists = String::new();
            for (shard, decks) in shards {
                match shard {
                    Some(shard) => {
                        component_lists.push_str(&format!("add_subdirectory({})\n", shard));
                        let shard_lists: String = decks.iter().map(|d| test_entry(d)).collect();
                        files.push((
                            component_dir.join(shard.to_string()).join(LISTS_FILE),
                            shard_lists,
                        ));
                    }
                    None => {
                        component_lists.extend(decks.iter().map(|d| test_entry(d)));
                    }
                }
            }
            files.push((component_dir.join(LISTS_FILE), component_lists));
        }
        files
    }

    /// Writes every `CMakeLists.txt` under `root`, returning the paths written.
    pub fn write(&self, root: &Path) -> Result<Vec<PathBuf>, RegistryError> {
        let mut written = Vec::new();
        for (relative, contents) in self.render() {
            let path = root.join(relative);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(|e| RegistryError::Io {
                    path: parent.to_string_lossy().to_string(),
                    source: e,
                })?;
            }
            fs::write(&path, contents).map_err(|e| RegistryError::Io {
                path: path.to_string_lossy().to_string(),
                source: e,
            })?;
            written.push(path);
        }
        Ok(written)
    }
}

fn test_entry(file_name: &str) -> String {
    let stem = file_name
        .rsplit_once('.')
        .map_or(file_name, |(stem, _)| stem);
    format!(
        "simple_testing({} \"--file={}\" ${{OVERLAP_CHECK}})\n",
        stem, file_name
    )
}
