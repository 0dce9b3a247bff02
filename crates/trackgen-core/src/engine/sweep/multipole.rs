use super::{SweepBase, Visit, axis};
use crate::core::models::element::ElementKind;
use crate::core::models::machine::Machine;
use crate::core::models::value::ParamValue;
use crate::engine::config::{CoefficientList, MultipoleParams, ThinMultipoleParams};
use crate::engine::error::EngineError;
use crate::engine::naming::DeckName;

const ELEMENT: &str = "mp1";
const EDGE_DRIFT: f64 = 0.5;

/// Visits `knl x ksl`, naming each pair with its non-zero coefficient orders.
fn sweep_coefficients(
    name: &DeckName,
    knl: &CoefficientList,
    ksl: &CoefficientList,
    visit: &mut dyn FnMut(DeckName, Vec<ParamValue>, Vec<ParamValue>) -> Result<(), EngineError>,
) -> Result<(), EngineError> {
    let skews = ksl.sweep_values();
    for normal in knl.sweep_values() {
        let normal_name = name.with_coefficients("KNL", &normal);
        for skew in &skews {
            let full_name = normal_name.with_coefficients("KSL", skew);
            visit(full_name, normal.clone(), skew.clone())?;
        }
    }
    Ok(())
}

impl MultipoleParams {
    pub fn sweep(&self, base: &SweepBase, visit: &mut Visit<'_>) -> Result<(), EngineError> {
        for length in self.length.sweep_values() {
            let name = base.name().with_param(axis::LENGTH.name(), length);
            sweep_coefficients(&name, &self.knl, &self.ksl, &mut |name, knl, ksl| {
                visit(base.single(name, ELEMENT, ElementKind::Multipole { length, knl, ksl }))
            })?;
        }
        Ok(())
    }
}

impl ThinMultipoleParams {
    /// The thin element sits between two half-metre drifts.
    pub fn sweep(&self, base: &SweepBase, visit: &mut Visit<'_>) -> Result<(), EngineError> {
        sweep_coefficients(&base.name(), &self.knl, &self.ksl, &mut |name, knl, ksl| {
            let mut machine = Machine::new();
            machine
                .add_drift("dr1", EDGE_DRIFT)
                .add_element(ELEMENT, ElementKind::ThinMultipole { knl, ksl })
                .add_drift("dr2", EDGE_DRIFT);
            visit(base.finish(name, machine))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::collect_cases;
    use super::super::test_support::*;
    use super::*;
    use crate::engine::config::{Component, ParamList};

    #[test]
    fn zero_orders_are_left_out_of_the_name_but_kept_in_the_element() {
        let spec = spec(Component::ThinMultipole(ThinMultipoleParams {
            knl: CoefficientList::new(vec![vec![
                ParamValue::Int(0),
                ParamValue::Float(0.05),
                ParamValue::Int(0),
            ]]),
            ksl: CoefficientList::default(),
        }));
        let cases = collect_cases(&spec).unwrap();
        assert_eq!(cases.len(), 1);
        let name = cases[0].name.as_str();
        assert!(name.contains("K2_0.05"));
        assert!(!name.contains("K1_"));
        assert!(!name.contains("K3_"));

        let elements = cases[0].machine.elements();
        assert_eq!(elements.len(), 3);
        match &elements[1].kind {
            ElementKind::ThinMultipole { knl, ksl } => {
                assert_eq!(knl.len(), 3);
                assert_eq!(ksl, &vec![ParamValue::Int(0)]);
            }
            other => panic!("unexpected element {:?}", other),
        }
    }

    #[test]
    fn multipole_sweeps_the_full_product() {
        let spec = spec(Component::Multipole(MultipoleParams {
            length: ParamList::from(vec![0.5, 1.0]),
            knl: CoefficientList::from(vec![vec![0.1], vec![0.0, 0.2]]),
            ksl: CoefficientList::from(vec![vec![0.3], vec![0.0, 0.0, 0.4]]),
        }));
        let names = names(&spec);
        assert_eq!(names.len(), 8);
        assert_eq!(
            names[0],
            "multipole_e-_energy_1.3_length_0.5_KNL_K1_0.1_KSL_K1_0.3"
        );
        assert_eq!(
            names[7],
            "multipole_e-_energy_1.3_length_1.0_KNL_K2_0.2_KSL_K3_0.4"
        );
    }

    #[test]
    fn several_non_zero_orders_share_one_label() {
        let spec = spec(Component::ThinMultipole(ThinMultipoleParams {
            knl: CoefficientList::from(vec![vec![0.1, 0.2]]),
            ksl: CoefficientList::default(),
        }));
        assert_eq!(
            names(&spec),
            vec!["thinmultipole_e-_energy_1.3_KNL_K1_0.1K2_0.2_KSL_"]
        );
    }

    #[test]
    fn multipole_element_carries_its_length() {
        let spec = spec(Component::Multipole(MultipoleParams {
            length: ParamList::from(vec![0.5]),
            ..Default::default()
        }));
        let cases = collect_cases(&spec).unwrap();
        assert_eq!(cases[0].machine.elements()[0].name, "mp1");
        assert!(matches!(
            cases[0].machine.elements()[0].kind,
            ElementKind::Multipole { length: ParamValue::Float(l), .. } if l == 0.5
        ));
    }
}
