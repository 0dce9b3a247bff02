use crate::core::kinematics::Particle;
use crate::core::models::value::ParamValue;
use std::fmt;

/// Canonical deck name, grown one swept parameter at a time.
///
/// The base is `<component>_<particle>_energy_<energy>`; each swept parameter appends
/// `_<param>_<value>` in the order the family sweeps it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeckName(String);

impl DeckName {
    pub fn base(component: &str, particle: Particle, energy: ParamValue) -> Self {
        Self(format!("{}_{}_energy_{}", component, particle.tag(), energy))
    }

    pub fn with_param(&self, param: &str, value: ParamValue) -> Self {
        Self(format!("{}_{}_{}", self.0, param, value))
    }

    /// Appends a multipole coefficient block such as `_KNL_K1_0.1K2_0.05`.
    ///
    /// Orders are 1-based and run together after the label; zero coefficients are left
    /// out of the name, so an all-zero block is just `_KNL_`.
    pub fn with_coefficients(&self, label: &str, coefficients: &[ParamValue]) -> Self {
        let mut name = format!("{}_{}_", self.0, label);
        for (order, value) in coefficients.iter().enumerate() {
            if !value.is_zero() {
                name.push_str(&format!("K{}_{}", order + 1, value));
            }
        }
        Self(name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for DeckName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DeckName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
