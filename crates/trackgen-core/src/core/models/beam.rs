use super::value::ParamValue;
use crate::core::kinematics::Particle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistributionType {
    /// Particle coordinates read from an external tracking-code file.
    #[default]
    Ptc,
}

impl DistributionType {
    pub fn tag(self) -> &'static str {
        match self {
            DistributionType::Ptc => "ptc",
        }
    }
}

/// Beam definition attached to every test machine.
#[derive(Debug, Clone, PartialEq)]
pub struct Beam {
    pub particle: Particle,
    /// Total energy in GeV.
    pub energy: ParamValue,
    pub distribution: DistributionType,
    pub sigma_e: ParamValue,
    distribution_file: Option<String>,
}

impl Beam {
    /// A `ptc` beam with zero energy spread.
    pub fn new(particle: Particle, energy: ParamValue) -> Self {
        Self {
            particle,
            energy,
            distribution: DistributionType::Ptc,
            sigma_e: ParamValue::Int(0),
            distribution_file: None,
        }
    }

    pub fn distribution_file(&self) -> Option<&str> {
        self.distribution_file.as_deref()
    }

    pub fn set_distribution_file(&mut self, path: impl Into<String>) {
        self.distribution_file = Some(path.into());
    }
}
