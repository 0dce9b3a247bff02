use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "trackgen - Generate GMAD tracking-test decks by sweeping component parameters.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write every deck described by one or more test-spec files.
    Write(WriteArgs),
    /// Print the deck paths a `write` would produce, without writing anything.
    List(ListArgs),
    /// Print relativistic kinematics, and optionally a dipole field, for a beam.
    Kinematics(KinematicsArgs),
}

/// Test-spec files plus the overrides shared by `write` and `list`.
#[derive(Args, Debug, Clone)]
pub struct SpecArgs {
    /// Test-spec TOML files; each describes one component sweep.
    #[arg(required = true, value_name = "SPEC.toml")]
    pub specs: Vec<PathBuf>,

    /// Override the beam particle ('e-' or 'proton').
    #[arg(long, value_name = "PARTICLE")]
    pub particle: Option<String>,

    /// Override the beam total energy in GeV.
    #[arg(long, value_name = "GEV")]
    pub energy: Option<String>,

    /// Override the declared number of decks used to plan shard directories.
    #[arg(long, value_name = "INT")]
    pub file_count: Option<usize>,

    /// Override `generate-defaults` from the spec file.
    #[command(flatten)]
    pub defaults: GenerateDefaults,

    /// Set a specific configuration value, overriding the spec file.
    /// Can be used multiple times. Example: -S energy=2.5
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE")]
    pub set_values: Vec<String>,
}

/// A group to handle mutually exclusive flags for field-equivalent dipole decks.
#[derive(Args, Debug, Clone, Copy)]
#[group(required = false, multiple = false)]
pub struct GenerateDefaults {
    /// Also write field-specified equivalents of angle-specified dipoles.
    #[arg(long)]
    pub generate_defaults: bool,
    /// Never write field-specified equivalents.
    #[arg(long)]
    pub no_defaults: bool,
}

/// Output location and layout overrides shared by `write` and `list`.
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Directory the component directories are created in.
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Shared beam distribution file, relative to the output directory.
    #[arg(long, value_name = "FILE")]
    pub beam_file: Option<String>,

    /// Shared options file, relative to the output directory.
    #[arg(long, value_name = "FILE")]
    pub options_file: Option<String>,

    /// Maximum number of decks per shard directory.
    #[arg(long, value_name = "INT")]
    pub shard_size: Option<usize>,
}

/// Arguments for the `write` subcommand.
#[derive(Args, Debug)]
pub struct WriteArgs {
    #[command(flatten)]
    pub spec: SpecArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Write each deck section into its own file, included from the main deck.
    #[arg(long)]
    pub split_sections: bool,

    /// Register the written decks in CMakeLists.txt files.
    #[arg(long)]
    pub cmake: bool,
}

/// Arguments for the `list` subcommand.
#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub spec: SpecArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Arguments for the `kinematics` subcommand.
#[derive(Args, Debug)]
pub struct KinematicsArgs {
    /// Beam total energy in GeV.
    #[arg(short, long, value_name = "GEV")]
    pub energy: f64,

    /// Beam particle ('e-' or 'proton').
    #[arg(short, long, default_value = "e-", value_name = "PARTICLE")]
    pub particle: String,

    /// Dipole length in metres, for the field calculation.
    #[arg(short, long, value_name = "METRES", requires = "angle")]
    pub length: Option<f64>,

    /// Dipole bending angle in radians, for the field calculation.
    #[arg(short, long, value_name = "RAD", requires = "length")]
    pub angle: Option<f64>,
}
