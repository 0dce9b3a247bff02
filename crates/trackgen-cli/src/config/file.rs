use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;
use trackgen::core::kinematics::Particle;
use trackgen::core::models::value::ParamValue;
use trackgen::engine::config::Component;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileOutputConfig {
    pub directory: Option<PathBuf>,
    pub beam_file: Option<String>,
    pub options_file: Option<String>,
    pub split_sections: Option<bool>,
    pub shard_size: Option<usize>,
}

/// One test-spec file as written on disk; every field may be absent.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileConfig {
    pub particle: Option<Particle>,
    pub energy: Option<ParamValue>,
    pub generate_defaults: Option<bool>,
    pub file_count: Option<usize>,
    pub output: Option<FileOutputConfig>,
    pub component: Option<Component>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading test spec from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
