use crate::core::models::value::ParamValue;
use crate::engine::config::ParamList;
use crate::engine::error::EngineError;
use crate::engine::naming::DeckName;

/// A swept parameter, named the way it appears in deck names.
///
/// Only the constants in [`axis`] exist, so an axis that is read back has to be one
/// that some family sweeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Axis(&'static str);

impl Axis {
    pub const fn name(self) -> &'static str {
        self.0
    }
}

pub mod axis {
    use super::Axis;

    pub const LENGTH: Axis = Axis("length");
    pub const ANGLE: Axis = Axis("angle");
    pub const FIELD: Axis = Axis("field");
    pub const E1: Axis = Axis("e1");
    pub const E2: Axis = Axis("e2");
    pub const FINT: Axis = Axis("fint");
    pub const FINTX: Axis = Axis("fintx");
    pub const HGAP: Axis = Axis("hgap");
    pub const K1: Axis = Axis("k1");
    pub const K2: Axis = Axis("k2");
    pub const K3: Axis = Axis("k3");
    pub const K4: Axis = Axis("k4");
    pub const KICKANGLE: Axis = Axis("kickangle");
    pub const X: Axis = Axis("x");
    pub const Y: Axis = Axis("y");
    pub const KS: Axis = Axis("ks");
    pub const NUM_WEDGES: Axis = Axis("numWedges");
    pub const THICKNESS: Axis = Axis("thickness");
}

/// Named parameter axes swept as a Cartesian product, first axis outermost.
#[derive(Debug, Clone, Default)]
pub struct Grid {
    axes: Vec<(Axis, Vec<ParamValue>)>,
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an axis; an unsupplied list contributes the single value `0`.
    pub fn axis(mut self, axis: Axis, list: &ParamList) -> Self {
        self.axes.push((axis, list.sweep_values()));
        self
    }

    pub fn len(&self) -> usize {
        self.axes.iter().map(|(_, values)| values.len()).product()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> GridIter<'_> {
        GridIter {
            grid: self,
            cursor: vec![0; self.axes.len()],
            done: self.is_empty(),
        }
    }
}

/// One point of a [`Grid`].
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterCombination {
    values: Vec<(Axis, ParamValue)>,
}

impl ParameterCombination {
    pub fn get(&self, axis: Axis) -> Option<ParamValue> {
        self.values
            .iter()
            .find(|(swept, _)| *swept == axis)
            .map(|(_, value)| *value)
    }

    pub fn require(&self, axis: Axis) -> Result<ParamValue, EngineError> {
        self.get(axis)
            .ok_or_else(|| EngineError::Internal(format!("grid has no '{}' axis", axis.name())))
    }

    /// `name` with `_<axis>_<value>` appended for every axis in order.
    pub fn extend_name(&self, name: &DeckName) -> DeckName {
        self.values
            .iter()
            .fold(name.clone(), |name, (axis, value)| {
                name.with_param(axis.name(), *value)
            })
    }
}

pub struct GridIter<'a> {
    grid: &'a Grid,
    cursor: Vec<usize>,
    done: bool,
}

impl Iterator for GridIter<'_> {
    type Item = ParameterCombination;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let values = self
            .grid
            .axes
            .iter()
            .zip(&self.cursor)
            .map(|((axis, values), &i)| (*axis, values[i]))
            .collect();

        // Odometer step: the last axis turns fastest.
        self.done = true;
        for slot in (0..self.cursor.len()).rev() {
            self.cursor[slot] += 1;
            if self.cursor[slot] < self.grid.axes[slot].1.len() {
                self.done = false;
                break;
            }
            self.cursor[slot] = 0;
        }

        Some(ParameterCombination { values })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::kinematics::Particle;

    #[test]
    fn first_axis_is_outermost() {
        let grid = Grid::new()
            .axis(axis::LENGTH, &ParamList::from(vec![1.0, 2.0]))
            .axis(axis::K1, &ParamList::from(vec![0.1, -0.1]));
        let points: Vec<(f64, f64)> = grid
            .iter()
            .map(|p| {
                (
                    p.get(axis::LENGTH).unwrap().as_f64(),
                    p.get(axis::K1).unwrap().as_f64(),
                )
            })
            .collect();
        assert_eq!(
            points,
            vec![(1.0, 0.1), (1.0, -0.1), (2.0, 0.1), (2.0, -0.1)]
        );
        assert_eq!(grid.len(), 4);
    }

    #[test]
    fn unsupplied_axes_sweep_a_single_zero() {
        let grid = Grid::new()
            .axis(axis::LENGTH, &ParamList::default())
            .axis(axis::K2, &ParamList::from(vec![0.5]));
        let points: Vec<_> = grid.iter().collect();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].get(axis::LENGTH), Some(ParamValue::Int(0)));
    }

    #[test]
    fn empty_grid_yields_one_empty_point() {
        let grid = Grid::new();
        assert_eq!(grid.iter().count(), 1);
    }

    #[test]
    fn require_reports_missing_axes() {
        let grid = Grid::new().axis(axis::LENGTH, &ParamList::from(vec![1.0]));
        let point = grid.iter().next().unwrap();
        assert!(matches!(point.require(axis::K1), Err(EngineError::Internal(_))));
    }

    #[test]
    fn axis_names_match_deck_tokens() {
        assert_eq!(axis::NUM_WEDGES.name(), "numWedges");
        assert_eq!(axis::KICKANGLE.name(), "kickangle");
        assert_ne!(axis::X, axis::Y);
    }

    #[test]
    fn extend_name_appends_axes_in_order() {
        let grid = Grid::new()
            .axis(axis::LENGTH, &ParamList::from(vec![1.0]))
            .axis(axis::K1, &ParamList::from(vec![0.1]));
        let base = DeckName::base("quadrupole", Particle::Electron, ParamValue::Float(1.3));
        let name = grid.iter().next().unwrap().extend_name(&base);
        assert_eq!(name.as_str(), "quadrupole_e-_energy_1.3_length_1.0_k1_0.1");
    }
}
