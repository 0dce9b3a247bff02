use std::path::PathBuf;
use trackgen::core::kinematics::Particle;
use trackgen::engine::config::{DEFAULT_BEAM_FILE, DEFAULT_OPTIONS_FILE, DEFAULT_SHARD_SIZE};

pub struct DefaultsConfig {
    pub particle: Particle,
    pub generate_defaults: bool,
    pub output_dir: PathBuf,
    pub beam_file: String,
    pub options_file: String,
    pub split_sections: bool,
    pub shard_size: usize,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            particle: Particle::Electron,
            generate_defaults: false,
            output_dir: PathBuf::from("."),
            beam_file: DEFAULT_BEAM_FILE.to_string(),
            options_file: DEFAULT_OPTIONS_FILE.to_string(),
            split_sections: false,
            shard_size: DEFAULT_SHARD_SIZE,
        }
    }
}
