use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use crate::cli::{OutputArgs, SpecArgs};
use crate::error::{CliError, Result};
use crate::utils::parser;
use std::path::{Path, PathBuf};
use tracing::debug;
use trackgen::core::io::gmad::DeckLayout;
use trackgen::core::kinematics::Particle;
use trackgen::engine::config::{OutputConfig, OutputConfigBuilder, TestSpec, TestSpecBuilder};
use trackgen::engine::error::EngineError;

/// Everything one spec file resolves to after all layers are merged.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub spec_path: PathBuf,
    pub spec: TestSpec,
    pub output: OutputConfig,
}

/// Merges `spec_path` with defaults and overrides.
///
/// Precedence, highest first: explicit flags, `-S KEY=VALUE`, the spec file, defaults.
pub fn build_run_config(
    spec_path: &Path,
    spec_args: &SpecArgs,
    output_args: &OutputArgs,
    split_sections: bool,
) -> Result<RunConfig> {
    let file_config = FileConfig::from_file(spec_path)?;
    merge(
        spec_path,
        file_config,
        spec_args,
        output_args,
        split_sections,
    )
}

fn merge(
    spec_path: &Path,
    file_config: FileConfig,
    spec_args: &SpecArgs,
    output_args: &OutputArgs,
    split_sections: bool,
) -> Result<RunConfig> {
    let defaults = DefaultsConfig::default();
    let mut file_config = apply_set_values(file_config, &spec_args.set_values)?;

    let component = file_config.component.take().ok_or_else(|| {
        CliError::Config(format!(
            "`[component]` section is required in '{}'.",
            spec_path.display()
        ))
    })?;

    let particle = match &spec_args.particle {
        Some(tag) => tag
            .parse::<Particle>()
            .map_err(|e| CliError::Argument(e.to_string()))?,
        None => file_config.particle.unwrap_or(defaults.particle),
    };

    let energy = match &spec_args.energy {
        Some(value) => Some(
            parser::parse_param_value("energy", value)
                .map_err(|e| CliError::Argument(e.to_string()))?,
        ),
        None => file_config.energy,
    }
    .ok_or_else(|| {
        CliError::Config(
            "A value for 'energy' is required either in the spec file or via CLI argument."
                .to_string(),
        )
    })?;

    let generate_defaults = match (
        spec_args.defaults.generate_defaults,
        spec_args.defaults.no_defaults,
    ) {
        (true, false) => true,
        (false, true) => false,
        _ => file_config
            .generate_defaults
            .unwrap_or(defaults.generate_defaults),
    };

    let spec = TestSpecBuilder::new()
        .component(component)
        .particle(particle)
        .energy(energy)
        .generate_defaults(generate_defaults)
        .declared_file_count(spec_args.file_count.or(file_config.file_count))
        .build()
        .map_err(EngineError::from)?;

    let output_file = file_config.output.take().unwrap_or_default();
    let layout = if split_sections
        || output_file
            .split_sections
            .unwrap_or(defaults.split_sections)
    {
        DeckLayout::Split
    } else {
        DeckLayout::Combined
    };

    let output = OutputConfigBuilder::new()
        .root(
            output_args
                .output
                .clone()
                .or(output_file.directory)
                .unwrap_or(defaults.output_dir),
        )
        .beam_file(
            output_args
                .beam_file
                .clone()
                .or(output_file.beam_file)
                .unwrap_or(defaults.beam_file),
        )
        .options_file(
            output_args
                .options_file
                .clone()
                .or(output_file.options_file)
                .unwrap_or(defaults.options_file),
        )
        .layout(layout)
        .shard_size(
            output_args
                .shard_size
                .or(output_file.shard_size)
                .unwrap_or(defaults.shard_size),
        )
        .build()
        .map_err(EngineError::from)?;

    debug!(?spec, ?output, "Resolved configuration for {:?}.", spec_path);
    Ok(RunConfig {
        spec_path: spec_path.to_path_buf(),
        spec,
        output,
    })
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    let argument = |e: parser::ParseError| CliError::Config(e.to_string());
    for pair in set_values {
        let (key, value) = parser::parse_key_value(pair).map_err(argument)?;
        match key {
            "particle" => {
                config.particle = Some(
                    value
                        .parse::<Particle>()
                        .map_err(|e| CliError::Config(e.to_string()))?,
                );
            }
            "energy" => {
                config.energy = Some(parser::parse_param_value(key, value).map_err(argument)?);
            }
            "generate-defaults" => {
                config.generate_defaults = Some(parser::parse_bool(key, value).map_err(argument)?);
            }
            "file-count" => {
                config.file_count = Some(parser::parse_count(key, value).map_err(argument)?);
            }
            "output.directory" => {
                config.output.get_or_insert_with(Default::default).directory =
                    Some(PathBuf::from(value));
            }
            "output.beam-file" => {
                config.output.get_or_insert_with(Default::default).beam_file =
                    Some(value.to_string());
            }
            "output.options-file" => {
                config.output.get_or_insert_with(Default::default).options_file =
                    Some(value.to_string());
            }
            "output.split-sections" => {
                config.output.get_or_insert_with(Default::default).split_sections =
                    Some(parser::parse_bool(key, value).map_err(argument)?);
            }
            "output.shard-size" => {
                config.output.get_or_insert_with(Default::default).shard_size =
                    Some(parser::parse_count(key, value).map_err(argument)?);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use std::fs;
    use tempfile::{TempDir, tempdir};
    use trackgen::core::models::value::ParamValue;
    use trackgen::engine::config::{Component, ConfigError};

    const SBEND_SPEC: &str = r#"
        energy = 1.3

        [output]
        beam-file = "beam"

        [component]
        type = "sbend"
        length = [1.0]
        angle = [0.1]
    "#;

    fn write_spec(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("spec.toml");
        fs::write(&path, content).unwrap();
        path
    }

    fn resolve(path: &Path, extra: &[&str]) -> Result<RunConfig> {
        let mut args = vec!["trackgen", "write", path.to_str().unwrap()];
        args.extend_from_slice(extra);
        match Cli::parse_from(args).command {
            Commands::Write(args) => {
                build_run_config(path, &args.spec, &args.output, args.split_sections)
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn file_values_merge_with_defaults() {
        let dir = tempdir().unwrap();
        let path = write_spec(&dir, SBEND_SPEC);
        let config = resolve(&path, &[]).unwrap();

        assert!(matches!(config.spec.component, Component::Sbend(_)));
        assert_eq!(config.spec.particle, Particle::Electron);
        assert_eq!(config.spec.energy, ParamValue::Float(1.3));
        assert!(!config.spec.generate_defaults);
        assert_eq!(config.spec.declared_file_count, None);

        assert_eq!(config.output.root, PathBuf::from("."));
        assert_eq!(config.output.beam_file, "beam.madx");
        assert_eq!(config.output.options_file, "trackingTestOptions.gmad");
        assert_eq!(config.output.layout, DeckLayout::Combined);
        assert_eq!(config.output.shard_size, 1000);
    }

    #[test]
    fn cli_flags_override_file_values() {
        let dir = tempdir().unwrap();
        let path = write_spec(&dir, SBEND_SPEC);
        let config = resolve(
            &path,
            &[
                "--particle",
                "proton",
                "--energy",
                "10",
                "--generate-defaults",
                "--file-count",
                "2500",
                "-o",
                "out",
                "--beam-file",
                "other.gmad",
                "--split-sections",
            ],
        )
        .unwrap();

        assert_eq!(config.spec.particle, Particle::Proton);
        assert_eq!(config.spec.energy, ParamValue::Int(10));
        assert!(config.spec.generate_defaults);
        assert_eq!(config.spec.declared_file_count, Some(2500));
        assert_eq!(config.output.root, PathBuf::from("out"));
        assert_eq!(config.output.beam_file, "other.gmad");
        assert_eq!(config.output.layout, DeckLayout::Split);
    }

    #[test]
    fn set_values_override_file_but_not_flags() {
        let dir = tempdir().unwrap();
        let path = write_spec(&dir, SBEND_SPEC);
        let config = resolve(
            &path,
            &[
                "-S",
                "energy=2.5",
                "-S",
                "output.options-file=opts",
                "-S",
                "particle=p",
                "--particle",
                "e-",
            ],
        )
        .unwrap();

        assert_eq!(config.spec.energy, ParamValue::Float(2.5));
        assert_eq!(config.output.options_file, "opts.gmad");
        assert_eq!(config.spec.particle, Particle::Electron);
    }

    #[test]
    fn unsupported_set_key_is_an_error() {
        let dir = tempdir().unwrap();
        let path = write_spec(&dir, SBEND_SPEC);
        let result = resolve(&path, &["-S", "component.type=drift"]);
        assert!(matches!(result, Err(CliError::Config(msg)) if msg.contains("component.type")));
    }

    #[test]
    fn missing_energy_is_a_config_error() {
        let dir = tempdir().unwrap();
        let path = write_spec(&dir, "[component]\ntype = \"drift\"\nlength = [1.0]\n");
        let result = resolve(&path, &[]);
        assert!(matches!(result, Err(CliError::Config(msg)) if msg.contains("energy")));
    }

    #[test]
    fn missing_component_is_a_config_error() {
        let dir = tempdir().unwrap();
        let path = write_spec(&dir, "energy = 1.3\n");
        let result = resolve(&path, &[]);
        assert!(matches!(result, Err(CliError::Config(msg)) if msg.contains("[component]")));
    }

    #[test]
    fn empty_beam_filename_is_rejected() {
        let dir = tempdir().unwrap();
        let path = write_spec(&dir, SBEND_SPEC);
        let result = resolve(&path, &["--beam-file", ""]);
        assert!(matches!(
            result,
            Err(CliError::Trackgen(EngineError::Config(
                ConfigError::EmptyFilename { kind: "beam" }
            )))
        ));
    }

    #[test]
    fn zero_shard_size_keeps_its_config_error() {
        let dir = tempdir().unwrap();
        let path = write_spec(&dir, SBEND_SPEC);
        let result = resolve(&path, &["-S", "output.shard-size=0"]);
        assert!(matches!(
            result,
            Err(CliError::Trackgen(EngineError::Config(
                ConfigError::ZeroShardSize
            )))
        ));
    }
}
