use super::{Grid, SweepBase, Visit, axis};
use crate::core::models::element::ElementKind;
use crate::core::models::value::ParamValue;
use crate::engine::config::{DegraderParams, LengthParams, MuSpoilerParams, RfCavityParams};
use crate::engine::error::EngineError;

impl LengthParams {
    fn sweep_lengths(
        &self,
        base: &SweepBase,
        element: &str,
        kind: impl Fn(ParamValue) -> ElementKind,
        visit: &mut Visit<'_>,
    ) -> Result<(), EngineError> {
        for length in self.length.sweep_values() {
            let name = base.name().with_param(axis::LENGTH.name(), length);
            visit(base.single(name, element, kind(length)))?;
        }
        Ok(())
    }

    pub fn sweep_drift(&self, base: &SweepBase, visit: &mut Visit<'_>) -> Result<(), EngineError> {
        self.sweep_lengths(base, "dr", |length| ElementKind::Drift { length }, visit)
    }

    pub fn sweep_laser(&self, base: &SweepBase, visit: &mut Visit<'_>) -> Result<(), EngineError> {
        self.sweep_lengths(base, "las", |length| ElementKind::Laser { length }, visit)
    }

    pub fn sweep_shield(&self, base: &SweepBase, visit: &mut Visit<'_>) -> Result<(), EngineError> {
        self.sweep_lengths(base, "sh", |length| ElementKind::Shield { length }, visit)
    }
}

impl RfCavityParams {
    /// The gradient is named `field` in deck names.
    pub fn sweep(&self, base: &SweepBase, visit: &mut Visit<'_>) -> Result<(), EngineError> {
        let grid = Grid::new()
            .axis(axis::LENGTH, &self.length)
            .axis(axis::FIELD, &self.gradient);
        for point in grid.iter() {
            let kind = ElementKind::RfCavity {
                length: point.require(axis::LENGTH)?,
                gradient: point.require(axis::FIELD)?,
            };
            visit(base.single(point.extend_name(&base.name()), "rc1", kind))?;
        }
        Ok(())
    }
}

impl DegraderParams {
    pub fn sweep(&self, base: &SweepBase, visit: &mut Visit<'_>) -> Result<(), EngineError> {
        let grid = Grid::new()
            .axis(axis::LENGTH, &self.length)
            .axis(axis::NUM_WEDGES, &self.num_wedges)
            .axis(axis::THICKNESS, &self.thickness);
        for point in grid.iter() {
            let length = point.require(axis::LENGTH)?;
            let kind = ElementKind::Degrader {
                length,
                wedges: point.require(axis::NUM_WEDGES)?,
                material_thickness: point.require(axis::THICKNESS)? * length,
            };
            visit(base.single(point.extend_name(&base.name()), "deg1", kind))?;
        }
        Ok(())
    }
}

impl MuSpoilerParams {
    /// Each angle becomes the spoiler field that would bend the beam by it.
    pub fn sweep(&self, base: &SweepBase, visit: &mut Visit<'_>) -> Result<(), EngineError> {
        for length in self.length.sweep_values() {
            let length_name = base.name().with_param(axis::LENGTH.name(), length);
            for angle in self.angle.sweep_values() {
                let field = base.rigidity_field(length, angle)?;
                let kind = ElementKind::MuSpoiler { length, field };
                let name = length_name.with_param(axis::FIELD.name(), field);
                visit(base.single(name, "mu1", kind))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::collect_cases;
    use super::super::test_support::*;
    use super::*;
    use crate::engine::config::{Component, ParamList};

    #[test]
    fn length_only_families_use_their_element_names() {
        let lengths = || LengthParams {
            length: ParamList::from(vec![1.0]),
        };
        for (component, element) in [
            (Component::Drift(lengths()), "dr"),
            (Component::Laser(lengths()), "las"),
            (Component::Shield(lengths()), "sh"),
        ] {
            let tag = component.tag();
            let cases = collect_cases(&spec(component)).unwrap();
            assert_eq!(cases.len(), 1);
            assert_eq!(cases[0].machine.elements()[0].name, element);
            assert_eq!(
                cases[0].name.as_str(),
                format!("{}_e-_energy_1.3_length_1.0", tag)
            );
        }
    }

    #[test]
    fn rf_gradient_is_named_field() {
        let spec = spec(Component::RfCavity(RfCavityParams {
            length: ParamList::from(vec![0.5]),
            gradient: ParamList::from(vec![10.0]),
        }));
        assert_eq!(
            names(&spec),
            vec!["rfcavity_e-_energy_1.3_length_0.5_field_10.0"]
        );
    }

    #[test]
    fn degrader_thickness_is_a_fraction_of_length() {
        let spec = spec(Component::Degrader(DegraderParams {
            length: ParamList::from(vec![2.0]),
            num_wedges: ParamList::new(vec![ParamValue::Int(4)]),
            thickness: ParamList::from(vec![0.25]),
        }));
        let cases = collect_cases(&spec).unwrap();
        assert_eq!(
            cases[0].name.as_str(),
            "degrader_e-_energy_1.3_length_2.0_numWedges_4_thickness_0.25"
        );
        assert_eq!(
            cases[0].machine.elements()[0].kind,
            ElementKind::Degrader {
                length: ParamValue::Float(2.0),
                wedges: ParamValue::Int(4),
                material_thickness: ParamValue::Float(0.5),
            }
        );
    }

    #[test]
    fn muspoiler_converts_angle_to_field() {
        let spec = spec(Component::MuSpoiler(MuSpoilerParams {
            length: ParamList::from(vec![1.0]),
            angle: ParamList::new(vec![ParamValue::Int(0), ParamValue::Float(0.1)]),
        }));
        let cases = collect_cases(&spec).unwrap();
        assert_eq!(cases.len(), 2);
        assert_eq!(
            cases[0].name.as_str(),
            "muspoiler_e-_energy_1.3_length_1.0_field_0"
        );
        assert_eq!(cases[1].machine.elements()[0].name, "mu1");
        assert!(matches!(
            cases[1].machine.elements()[0].kind,
            ElementKind::MuSpoiler { field: ParamValue::Float(b), .. } if b > 0.0
        ));
    }
}
