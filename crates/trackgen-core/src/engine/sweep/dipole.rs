use super::{Grid, SweepBase, Visit, axis};
use crate::core::models::element::{BendKind, BendStrength, ElementKind, PoleFaces};
use crate::core::models::machine::Machine;
use crate::core::models::value::ParamValue;
use crate::engine::config::DipoleParams;
use crate::engine::error::EngineError;
use crate::engine::naming::DeckName;

const EDGE_DRIFT: f64 = 0.5;

fn element_name(kind: BendKind) -> &'static str {
    match kind {
        BendKind::Sector => "sb1",
        BendKind::Rectangular => "rb1",
    }
}

/// One dipole sweep: the bend kind and pole-face grid shared by every strength.
struct BendSweep<'a> {
    kind: BendKind,
    base: &'a SweepBase,
    edges: Grid,
}

impl BendSweep<'_> {
    /// Visits the pole-face grid for one length and strength.
    fn sweep_edges(
        &self,
        name: &DeckName,
        length: ParamValue,
        strength: BendStrength,
        visit: &mut Visit<'_>,
    ) -> Result<(), EngineError> {
        for point in self.edges.iter() {
            let faces = PoleFaces {
                e1: point.require(axis::E1)?,
                e2: point.require(axis::E2)?,
                fint: point.require(axis::FINT)?,
                fintx: point.require(axis::FINTX)?,
                hgap: point.require(axis::HGAP)?,
            };
            let mut machine = Machine::new();
            machine
                .add_drift("dr1", EDGE_DRIFT)
                .add_element(element_name(self.kind), ElementKind::Dipole {
                    kind: self.kind,
                    length,
                    strength,
                    faces,
                })
                .add_drift("dr2", EDGE_DRIFT);
            visit(self.base.finish(point.extend_name(name), machine))?;
        }
        Ok(())
    }
}

impl DipoleParams {
    fn edge_grid(&self) -> Grid {
        Grid::new()
            .axis(axis::E1, &self.e1)
            .axis(axis::E2, &self.e2)
            .axis(axis::FINT, &self.fint)
            .axis(axis::FINTX, &self.fintx)
            .axis(axis::HGAP, &self.hgap)
    }

    /// Sweeps lengths, then angles (or fields), then the pole-face grid.
    ///
    /// Angles drive the sweep unless only fields were supplied. With default generation
    /// on, each angle is also converted to the equivalent field and swept again.
    pub fn sweep(
        &self,
        kind: BendKind,
        base: &SweepBase,
        visit: &mut Visit<'_>,
    ) -> Result<(), EngineError> {
        let bend = BendSweep {
            kind,
            base,
            edges: self.edge_grid(),
        };
        let by_angle = self.angle.is_supplied() || !self.field.is_supplied();

        for length in self.length.sweep_values() {
            let length_name = base.name().with_param(axis::LENGTH.name(), length);
            if by_angle {
                for angle in self.angle.sweep_values() {
                    let name = length_name.with_param(axis::ANGLE.name(), angle);
                    bend.sweep_edges(&name, length, BendStrength::Angle(angle), visit)?;

                    if base.generate_defaults {
                        let field = base.rigidity_field(length, angle)?;
                        let name = length_name.with_param(axis::FIELD.name(), field);
                        bend.sweep_edges(&name, length, BendStrength::Field(field), visit)?;
                    }
                }
            } else {
                for field in self.field.sweep_values() {
                    let name = length_name.with_param(axis::FIELD.name(), field);
                    bend.sweep_edges(&name, length, BendStrength::Field(field), visit)?;
                }
            }
        }
        Ok(())
    }
}
