use super::{Grid, SweepBase, Visit, axis};
use crate::core::models::element::{ApertureShape, ElementKind, KickPlane};
use crate::engine::config::{
    CollimatorParams, DecapoleParams, KickerParams, OctupoleParams, QuadrupoleParams,
    SextupoleParams, SolenoidParams,
};
use crate::engine::error::EngineError;

impl QuadrupoleParams {
    pub fn sweep(&self, base: &SweepBase, visit: &mut Visit<'_>) -> Result<(), EngineError> {
        let grid = Grid::new()
            .axis(axis::LENGTH, &self.length)
            .axis(axis::K1, &self.k1);
        for point in grid.iter() {
            let kind = ElementKind::Quadrupole {
                length: point.require(axis::LENGTH)?,
                k1: point.require(axis::K1)?,
            };
            visit(base.single(point.extend_name(&base.name()), "qd", kind))?;
        }
        Ok(())
    }
}

impl SextupoleParams {
    pub fn sweep(&self, base: &SweepBase, visit: &mut Visit<'_>) -> Result<(), EngineError> {
        let grid = Grid::new()
            .axis(axis::LENGTH, &self.length)
            .axis(axis::K2, &self.k2);
        for point in grid.iter() {
            let kind = ElementKind::Sextupole {
                length: point.require(axis::LENGTH)?,
                k2: point.require(axis::K2)?,
            };
            visit(base.single(point.extend_name(&base.name()), "sx", kind))?;
        }
        Ok(())
    }
}

impl OctupoleParams {
    pub fn sweep(&self, base: &SweepBase, visit: &mut Visit<'_>) -> Result<(), EngineError> {
        let grid = Grid::new()
            .axis(axis::LENGTH, &self.length)
            .axis(axis::K3, &self.k3);
        for point in grid.iter() {
            let kind = ElementKind::Octupole {
                length: point.require(axis::LENGTH)?,
                k3: point.require(axis::K3)?,
            };
            visit(base.single(point.extend_name(&base.name()), "oc", kind))?;
        }
        Ok(())
    }
}

impl DecapoleParams {
    pub fn sweep(&self, base: &SweepBase, visit: &mut Visit<'_>) -> Result<(), EngineError> {
        let grid = Grid::new()
            .axis(axis::LENGTH, &self.length)
            .axis(axis::K4, &self.k4);
        for point in grid.iter() {
            let kind = ElementKind::Decapole {
                length: point.require(axis::LENGTH)?,
                k4: point.require(axis::K4)?,
            };
            visit(base.single(point.extend_name(&base.name()), "dc", kind))?;
        }
        Ok(())
    }
}

impl KickerParams {
    pub fn sweep(
        &self,
        plane: KickPlane,
        base: &SweepBase,
        visit: &mut Visit<'_>,
    ) -> Result<(), EngineError> {
        let element = match plane {
            KickPlane::Horizontal => "hk1",
            KickPlane::Vertical => "vk1",
        };
        let grid = Grid::new()
            .axis(axis::LENGTH, &self.length)
            .axis(axis::KICKANGLE, &self.kickangle);
        for point in grid.iter() {
            let kind = ElementKind::Kicker {
                plane,
                length: point.require(axis::LENGTH)?,
                angle: point.require(axis::KICKANGLE)?,
            };
            visit(base.single(point.extend_name(&base.name()), element, kind))?;
        }
        Ok(())
    }
}

impl CollimatorParams {
    /// Sweeps the full `length x xsize x ysize` grid; apertures are named `_x_` and `_y_`.
    pub fn sweep(
        &self,
        shape: ApertureShape,
        base: &SweepBase,
        visit: &mut Visit<'_>,
    ) -> Result<(), EngineError> {
        let element = match shape {
            ApertureShape::Rectangular => "rc1",
            ApertureShape::Elliptical => "ec1",
        };
        let grid = Grid::new()
            .axis(axis::LENGTH, &self.length)
            .axis(axis::X, &self.xsize)
            .axis(axis::Y, &self.ysize);
        for point in grid.iter() {
            let kind = ElementKind::Collimator {
                shape,
                length: point.require(axis::LENGTH)?,
                xsize: point.require(axis::X)?,
                ysize: point.require(axis::Y)?,
            };
            visit(base.single(point.extend_name(&base.name()), element, kind))?;
        }
        Ok(())
    }
}

impl SolenoidParams {
    pub fn sweep(&self, base: &SweepBase, visit: &mut Visit<'_>) -> Result<(), EngineError> {
        let grid = Grid::new()
            .axis(axis::LENGTH, &self.length)
            .axis(axis::KS, &self.ks);
        for point in grid.iter() {
            let kind = ElementKind::Solenoid {
                length: point.require(axis::LENGTH)?,
                ks: point.require(axis::KS)?,
            };
            visit(base.single(point.extend_name(&base.name()), "sn1", kind))?;
        }
        Ok(())
    }
}
