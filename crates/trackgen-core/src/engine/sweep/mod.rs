//! Parameter sweeps, one per component family.
//!
//! A sweep walks the Cartesian product of its family's parameter lists and hands one
//! [`TestCase`] per leaf to a visitor. Nothing is skipped or deduplicated, so the number
//! of visits is the product of the list lengths (empty lists counting as one).

mod dipole;
mod grid;
mod magnet;
mod multipole;
mod straight;

pub use grid::{Axis, Grid, GridIter, ParameterCombination, axis};

use super::config::{Component, TestSpec};
use super::emit::TestCase;
use super::error::EngineError;
use super::naming::DeckName;
use crate::core::kinematics::{Particle, compute_rigidity_field};
use crate::core::models::beam::Beam;
use crate::core::models::element::{ApertureShape, BendKind, ElementKind, KickPlane};
use crate::core::models::machine::Machine;
use crate::core::models::value::ParamValue;

/// Receives each test case as it is produced; an error aborts the sweep.
pub type Visit<'a> = dyn FnMut(TestCase) -> Result<(), EngineError> + 'a;

/// Per-sweep facts shared by every case: component, species and beam energy.
#[derive(Debug, Clone, Copy)]
pub struct SweepBase {
    component: &'static str,
    particle: Particle,
    energy: ParamValue,
    generate_defaults: bool,
}

impl SweepBase {
    pub fn new(spec: &TestSpec) -> Self {
        Self {
            component: spec.component.tag(),
            particle: spec.particle,
            energy: spec.energy,
            generate_defaults: spec.generate_defaults,
        }
    }

    pub fn component(&self) -> &'static str {
        self.component
    }

    pub fn name(&self) -> DeckName {
        DeckName::base(self.component, self.particle, self.energy)
    }

    pub fn beam(&self) -> Beam {
        Beam::new(self.particle, self.energy)
    }

    /// Adds samplers at every element and the beam, completing the case.
    pub fn finish(&self, name: DeckName, mut machine: Machine) -> TestCase {
        machine.add_sampler_all().add_beam(self.beam());
        TestCase { name, machine }
    }

    /// Machine holding the single element `element`.
    pub fn single(&self, name: DeckName, element: &str, kind: ElementKind) -> TestCase {
        let mut machine = Machine::new();
        machine.add_element(element, kind);
        self.finish(name, machine)
    }

    /// Field in T bending this beam by `angle` over `length`; integer `0` for a zero angle.
    pub fn rigidity_field(
        &self,
        length: ParamValue,
        angle: ParamValue,
    ) -> Result<ParamValue, EngineError> {
        if angle.is_zero() {
            return Ok(ParamValue::Int(0));
        }
        let field = compute_rigidity_field(
            length.as_f64(),
            angle.as_f64(),
            self.energy.as_f64(),
            self.particle,
        )?;
        Ok(ParamValue::Float(field))
    }
}

/// Runs the sweep for `spec.component`, visiting every case in order.
pub fn sweep(spec: &TestSpec, visit: &mut Visit<'_>) -> Result<(), EngineError> {
    let base = SweepBase::new(spec);
    match &spec.component {
        Component::Drift(params) => params.sweep_drift(&base, visit),
        Component::Sbend(params) => params.sweep(BendKind::Sector, &base, visit),
        Component::Rbend(params) => params.sweep(BendKind::Rectangular, &base, visit),
        Component::HKick(params) => params.sweep(KickPlane::Horizontal, &base, visit),
        Component::VKick(params) => params.sweep(KickPlane::Vertical, &base, visit),
        Component::RCol(params) => params.sweep(ApertureShape::Rectangular, &base, visit),
        Component::ECol(params) => params.sweep(ApertureShape::Elliptical, &base, visit),
        Component::Quadrupole(params) => params.sweep(&base, visit),
        Component::Sextupole(params) => params.sweep(&base, visit),
        Component::Octupole(params) => params.sweep(&base, visit),
        Component::Decapole(params) => params.sweep(&base, visit),
        Component::Multipole(params) => params.sweep(&base, visit),
        Component::ThinMultipole(params) => params.sweep(&base, visit),
        Component::RfCavity(params) => params.sweep(&base, visit),
        Component::Degrader(params) => params.sweep(&base, visit),
        Component::MuSpoiler(params) => params.sweep(&base, visit),
        Component::Solenoid(params) => params.sweep(&base, visit),
        Component::Shield(params) => params.sweep_shield(&base, visit),
        Component::Laser(params) => params.sweep_laser(&base, visit),
    }
}

/// Collects every case of the sweep in order.
pub fn collect_cases(spec: &TestSpec) -> Result<Vec<TestCase>, EngineError> {
    let mut cases = Vec::new();
    sweep(spec, &mut |case| {
        cases.push(case);
        Ok(())
    })?;
    Ok(cases)
}

/// Number of decks the sweep produces.
pub fn count_cases(spec: &TestSpec) -> Result<usize, EngineError> {
    let mut count = 0;
    sweep(spec, &mut |_| {
        count += 1;
        Ok(())
    })?;
    Ok(count)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::engine::config::TestSpecBuilder;

    pub fn spec(component: Component) -> TestSpec {
        TestSpecBuilder::new()
            .component(component)
            .energy(1.3)
            .build()
            .unwrap()
    }

    pub fn names(spec: &TestSpec) -> Vec<String> {
        collect_cases(spec)
            .unwrap()
            .into_iter()
            .map(|case| case.name.into_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::core::models::machine::SamplerPlacement;
    use crate::engine::config::{LengthParams, ParamList, QuadrupoleParams};

    #[test]
    fn every_case_carries_samplers_and_a_beam() {
        let spec = spec(Component::Drift(LengthParams {
            length: ParamList::from(vec![1.0, 2.0]),
        }));
        let cases = collect_cases(&spec).unwrap();
        assert_eq!(cases.len(), 2);
        for case in &cases {
            assert_eq!(case.machine.samplers(), SamplerPlacement::All);
            let beam = case.machine.beam().unwrap();
            assert_eq!(beam.particle, Particle::Electron);
            assert_eq!(beam.energy, ParamValue::Float(1.3));
        }
    }

    #[test]
    fn count_matches_product_of_list_lengths() {
        let spec = spec(Component::Quadrupole(QuadrupoleParams {
            length: ParamList::from(vec![1.0, 2.0, 3.0]),
            k1: ParamList::from(vec![0.1, -0.1]),
        }));
        assert_eq!(count_cases(&spec).unwrap(), 6);
    }

    #[test]
    fn visitor_error_aborts_the_sweep() {
        let spec = spec(Component::Drift(LengthParams {
            length: ParamList::from(vec![1.0, 2.0, 3.0]),
        }));
        let mut seen = 0;
        let result = sweep(&spec, &mut |_| {
            seen += 1;
            Err(EngineError::Internal("stop".to_string()))
        });
        assert!(result.is_err());
        assert_eq!(seen, 1);
    }

    #[test]
    fn rigidity_field_is_integer_zero_for_zero_angle() {
        let base = SweepBase::new(&spec(Component::Drift(LengthParams::default())));
        assert_eq!(
            base.rigidity_field(ParamValue::Float(1.0), ParamValue::Int(0))
                .unwrap(),
            ParamValue::Int(0)
        );
        let field = base
            .rigidity_field(ParamValue::Float(1.0), ParamValue::Float(0.1))
            .unwrap();
        assert!(matches!(field, ParamValue::Float(b) if b > 0.0));
    }
}
