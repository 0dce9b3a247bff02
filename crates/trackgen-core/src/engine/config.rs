use crate::core::io::gmad::DeckLayout;
use crate::core::kinematics::Particle;
use crate::core::models::value::ParamValue;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_BEAM_FILE: &str = "trackingTestBeam.madx";
pub const DEFAULT_OPTIONS_FILE: &str = "trackingTestOptions.gmad";
pub const DEFAULT_SHARD_SIZE: usize = 1000;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("The {kind} filename must not be empty")]
    EmptyFilename { kind: &'static str },
    #[error("Shard size must be at least 1")]
    ZeroShardSize,
}

/// A named list of sweep values. An empty list sweeps the single default value `0`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct ParamList(Vec<ParamValue>);

impl ParamList {
    pub fn new(values: Vec<ParamValue>) -> Self {
        Self(values)
    }

    /// Whether the list was given any values at all.
    pub fn is_supplied(&self) -> bool {
        !self.0.is_empty()
    }

    pub fn values(&self) -> &[ParamValue] {
        &self.0
    }

    pub fn sweep_values(&self) -> Vec<ParamValue> {
        if self.0.is_empty() {
            vec![ParamValue::default()]
        } else {
            self.0.clone()
        }
    }
}

impl From<Vec<f64>> for ParamList {
    fn from(values: Vec<f64>) -> Self {
        values.into_iter().map(ParamValue::Float).collect()
    }
}

impl FromIterator<ParamValue> for ParamList {
    fn from_iter<I: IntoIterator<Item = ParamValue>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A list of multipole coefficient arrays, one entry per sweep step.
/// An empty list sweeps the single array `[0]`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct CoefficientList(Vec<Vec<ParamValue>>);

impl CoefficientList {
    pub fn new(arrays: Vec<Vec<ParamValue>>) -> Self {
        Self(arrays)
    }

    pub fn sweep_values(&self) -> Vec<Vec<ParamValue>> {
        if self.0.is_empty() {
            vec![vec![ParamValue::default()]]
        } else {
            self.0.clone()
        }
    }
}

impl From<Vec<Vec<f64>>> for CoefficientList {
    fn from(arrays: Vec<Vec<f64>>) -> Self {
        Self(
            arrays
                .into_iter()
                .map(|a| a.into_iter().map(ParamValue::Float).collect())
                .collect(),
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LengthParams {
    pub length: ParamList,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DipoleParams {
    pub length: ParamList,
    pub angle: ParamList,
    pub field: ParamList,
    pub e1: ParamList,
    pub e2: ParamList,
    pub fint: ParamList,
    pub fintx: ParamList,
    pub hgap: ParamList,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QuadrupoleParams {
    pub length: ParamList,
    pub k1: ParamList,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SextupoleParams {
    pub length: ParamList,
    pub k2: ParamList,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OctupoleParams {
    pub length: ParamList,
    pub k3: ParamList,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DecapoleParams {
    pub length: ParamList,
    pub k4: ParamList,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KickerParams {
    pub length: ParamList,
    pub kickangle: ParamList,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CollimatorParams {
    pub length: ParamList,
    #[serde(alias = "x(col)")]
    pub xsize: ParamList,
    #[serde(alias = "y(col)")]
    pub ysize: ParamList,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MultipoleParams {
    pub length: ParamList,
    pub knl: CoefficientList,
    pub ksl: CoefficientList,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThinMultipoleParams {
    pub knl: CoefficientList,
    pub ksl: CoefficientList,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolenoidParams {
    pub length: ParamList,
    pub ks: ParamList,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RfCavityParams {
    pub length: ParamList,
    /// Accelerating gradient in MV/m.
    pub gradient: ParamList,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DegraderParams {
    pub length: ParamList,
    #[serde(rename = "numWedges", alias = "num-wedges")]
    pub num_wedges: ParamList,
    /// Material thickness as a fraction of the element length.
    pub thickness: ParamList,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MuSpoilerParams {
    pub length: ParamList,
    /// Bending angles converted to the spoiler field.
    pub angle: ParamList,
}

/// The component family under test, with the parameter lists that family sweeps.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Component {
    Drift(LengthParams),
    Sbend(DipoleParams),
    Rbend(DipoleParams),
    #[serde(rename = "hkick")]
    HKick(KickerParams),
    #[serde(rename = "vkick")]
    VKick(KickerParams),
    #[serde(rename = "rcol")]
    RCol(CollimatorParams),
    #[serde(rename = "ecol")]
    ECol(CollimatorParams),
    Quadrupole(QuadrupoleParams),
    Sextupole(SextupoleParams),
    Octupole(OctupoleParams),
    Decapole(DecapoleParams),
    Multipole(MultipoleParams),
    #[serde(rename = "thinmultipole")]
    ThinMultipole(ThinMultipoleParams),
    #[serde(rename = "rfcavity")]
    RfCavity(RfCavityParams),
    Degrader(DegraderParams),
    #[serde(rename = "muspoiler")]
    MuSpoiler(MuSpoilerParams),
    Solenoid(SolenoidParams),
    Shield(LengthParams),
    Laser(LengthParams),
}

impl Component {
    /// Tag used for the output directory and as the first token of deck names.
    pub fn tag(&self) -> &'static str {
        match self {
            Component::Drift(_) => "drift",
            Component::Sbend(_) => "sbend",
            Component::Rbend(_) => "rbend",
            Component::HKick(_) => "hkick",
            Component::VKick(_) => "vkick",
            Component::RCol(_) => "rcol",
            Component::ECol(_) => "ecol",
            Component::Quadrupole(_) => "quadrupole",
            Component::Sextupole(_) => "sextupole",
            Component::Octupole(_) => "octupole",
            Component::Decapole(_) => "decapole",
            Component::Multipole(_) => "multipole",
            Component::ThinMultipole(_) => "thinmultipole",
            Component::RfCavity(_) => "rfcavity",
            Component::Degrader(_) => "degrader",
            Component::MuSpoiler(_) => "muspoiler",
            Component::Solenoid(_) => "solenoid",
            Component::Shield(_) => "shield",
            Component::Laser(_) => "laser",
        }
    }
}

/// Everything a sweep needs to know about one component test series.
#[derive(Debug, Clone, PartialEq)]
pub struct TestSpec {
    pub component: Component,
    pub particle: Particle,
    /// Beam total energy in GeV.
    pub energy: ParamValue,
    /// Also emit field-specified equivalents of angle-specified bends.
    pub generate_defaults: bool,
    /// Expected number of decks; counted from the sweep when absent.
    pub declared_file_count: Option<usize>,
}

#[derive(Default)]
pub struct TestSpecBuilder {
    component: Option<Component>,
    particle: Option<Particle>,
    energy: Option<ParamValue>,
    generate_defaults: bool,
    declared_file_count: Option<usize>,
}

impl TestSpecBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn component(mut self, component: Component) -> Self {
        self.component = Some(component);
        self
    }
    pub fn particle(mut self, particle: Particle) -> Self {
        self.particle = Some(particle);
        self
    }
    pub fn energy(mut self, energy: impl Into<ParamValue>) -> Self {
        self.energy = Some(energy.into());
        self
    }
    pub fn generate_defaults(mut self, enabled: bool) -> Self {
        self.generate_defaults = enabled;
        self
    }
    pub fn declared_file_count(mut self, count: Option<usize>) -> Self {
        self.declared_file_count = count;
        self
    }

    pub fn build(self) -> Result<TestSpec, ConfigError> {
        Ok(TestSpec {
            component: self
                .component
                .ok_or(ConfigError::MissingParameter("component"))?,
            particle: self.particle.unwrap_or_default(),
            energy: self.energy.ok_or(ConfigError::MissingParameter("energy"))?,
            generate_defaults: self.generate_defaults,
            declared_file_count: self.declared_file_count,
        })
    }
}

/// Where and how decks are written.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputConfig {
    pub root: PathBuf,
    /// Shared beam distribution file, relative to `root`.
    pub beam_file: String,
    /// Shared options file, relative to `root`.
    pub options_file: String,
    pub layout: DeckLayout,
    pub shard_size: usize,
}

#[derive(Default)]
pub struct OutputConfigBuilder {
    root: Option<PathBuf>,
    beam_file: Option<String>,
    options_file: Option<String>,
    layout: DeckLayout,
    shard_size: Option<usize>,
}

impl OutputConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }
    pub fn beam_file(mut self, name: impl Into<String>) -> Self {
        self.beam_file = Some(name.into());
        self
    }
    pub fn options_file(mut self, name: impl Into<String>) -> Self {
        self.options_file = Some(name.into());
        self
    }
    pub fn layout(mut self, layout: DeckLayout) -> Self {
        self.layout = layout;
        self
    }
    pub fn shard_size(mut self, size: usize) -> Self {
        self.shard_size = Some(size);
        self
    }

    pub fn build(self) -> Result<OutputConfig, ConfigError> {
        let shard_size = self.shard_size.unwrap_or(DEFAULT_SHARD_SIZE);
        if shard_size == 0 {
            return Err(ConfigError::ZeroShardSize);
        }
        Ok(OutputConfig {
            root: self.root.ok_or(ConfigError::MissingParameter("root"))?,
            beam_file: normalize_beam_filename(
                self.beam_file.as_deref().unwrap_or(DEFAULT_BEAM_FILE),
            )?,
            options_file: normalize_options_filename(
                self.options_file.as_deref().unwrap_or(DEFAULT_OPTIONS_FILE),
            )?,
            layout: self.layout,
            shard_size,
        })
    }
}

/// Appends `.madx` unless the name already ends in `.madx` or `.gmad`.
pub fn normalize_beam_filename(name: &str) -> Result<String, ConfigError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ConfigError::EmptyFilename { kind: "beam" });
    }
    if name.ends_with(".madx") || name.ends_with(".gmad") {
        Ok(name.to_string())
    } else {
        Ok(format!("{}.madx", name))
    }
}

/// Appends `.gmad` unless the name already ends in `.gmad`.
pub fn normalize_options_filename(name: &str) -> Result<String, ConfigError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ConfigError::EmptyFilename { kind: "options" });
    }
    if name.ends_with(".gmad") {
        Ok(name.to_string())
    } else {
        Ok(format!("{}.gmad", name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_param_list_sweeps_integer_zero() {
        let list = ParamList::default();
        assert!(!list.is_supplied());
        assert_eq!(list.sweep_values(), vec![ParamValue::Int(0)]);

        let list = ParamList::from(vec![0.5, 1.0]);
        assert!(list.is_supplied());
        assert_eq!(list.sweep_values().len(), 2);
    }

    #[test]
    fn empty_coefficient_list_sweeps_a_single_zero_array() {
        assert_eq!(
            CoefficientList::default().sweep_values(),
            vec![vec![ParamValue::Int(0)]]
        );
    }

    #[test]
    fn component_deserializes_from_tagged_table() {
        let component: Component = toml::from_str(
            r#"
            type = "sbend"
            length = [1.0]
            angle = [0.1, 0.2]
            "#,
        )
        .unwrap();
        match component {
            Component::Sbend(params) => {
                assert_eq!(params.angle.values().len(), 2);
                assert!(!params.field.is_supplied());
            }
            other => panic!("unexpected component {:?}", other),
        }
    }

    #[test]
    fn collimator_accepts_column_aliases() {
        let component: Component = toml::from_str(
            r#"
            type = "rcol"
            length = [1.0]
            "x(col)" = [0.01]
            ysize = [0.02]
            "#,
        )
        .unwrap();
        assert_eq!(component.tag(), "rcol");
        if let Component::RCol(params) = component {
            assert_eq!(params.xsize.values(), &[ParamValue::Float(0.01)]);
            assert_eq!(params.ysize.values(), &[ParamValue::Float(0.02)]);
        }
    }

    #[test]
    fn unknown_parameter_is_rejected() {
        let result: Result<Component, _> = toml::from_str(
            r#"
            type = "quadrupole"
            k2 = [0.1]
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn multi_word_tags_round_trip_through_tag() {
        for tag in ["thinmultipole", "rfcavity", "muspoiler", "hkick", "ecol"] {
            let component: Component = toml::from_str(&format!("type = \"{}\"", tag)).unwrap();
            assert_eq!(component.tag(), tag);
        }
    }

    #[test]
    fn builder_requires_component_and_energy() {
        let missing = TestSpecBuilder::new().energy(1.3).build();
        assert_eq!(missing, Err(ConfigError::MissingParameter("component")));

        let spec = TestSpecBuilder::new()
            .component(Component::Drift(LengthParams::default()))
            .energy(1.3)
            .build()
            .unwrap();
        assert_eq!(spec.particle, Particle::Electron);
        assert!(!spec.generate_defaults);
        assert_eq!(spec.declared_file_count, None);
    }

    #[test]
    fn output_builder_applies_defaults() {
        let output = OutputConfigBuilder::new().root("out").build().unwrap();
        assert_eq!(output.beam_file, DEFAULT_BEAM_FILE);
        assert_eq!(output.options_file, DEFAULT_OPTIONS_FILE);
        assert_eq!(output.layout, DeckLayout::Combined);
        assert_eq!(output.shard_size, DEFAULT_SHARD_SIZE);

        assert_eq!(
            OutputConfigBuilder::new().build(),
            Err(ConfigError::MissingParameter("root"))
        );
        assert_eq!(
            OutputConfigBuilder::new().root("out").shard_size(0).build(),
            Err(ConfigError::ZeroShardSize)
        );
    }

    #[test]
    fn beam_filename_gains_madx_only_when_needed() {
        assert_eq!(normalize_beam_filename("beam").unwrap(), "beam.madx");
        assert_eq!(normalize_beam_filename("beam.madx").unwrap(), "beam.madx");
        assert_eq!(normalize_beam_filename("beam.gmad").unwrap(), "beam.gmad");
        assert_eq!(
            normalize_beam_filename("  "),
            Err(ConfigError::EmptyFilename { kind: "beam" })
        );
    }

    #[test]
    fn options_filename_gains_gmad_only_when_needed() {
        assert_eq!(normalize_options_filename("opts").unwrap(), "opts.gmad");
        assert_eq!(
            normalize_options_filename("opts.gmad").unwrap(),
            "opts.gmad"
        );
        assert_eq!(
            normalize_options_filename("opts.madx").unwrap(),
            "opts.madx.gmad"
        );
    }
}
