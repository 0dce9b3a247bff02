use super::beam::Beam;
use super::element::{Element, ElementKind};
use super::value::ParamValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SamplerPlacement {
    #[default]
    None,
    /// A sampler after every element of the line.
    All,
}

/// An ordered beamline under construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Machine {
    elements: Vec<Element>,
    samplers: SamplerPlacement,
    beam: Option<Beam>,
}

impl Machine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_drift(&mut self, name: &str, length: impl Into<ParamValue>) -> &mut Self {
        self.add_element(name, ElementKind::Drift {
            length: length.into(),
        })
    }

    pub fn add_element(&mut self, name: &str, kind: ElementKind) -> &mut Self {
        self.elements.push(Element::new(name, kind));
        self
    }

    pub fn add_sampler_all(&mut self) -> &mut Self {
        self.samplers = SamplerPlacement::All;
        self
    }

    pub fn add_beam(&mut self, beam: Beam) -> &mut Self {
        self.beam = Some(beam);
        self
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn samplers(&self) -> SamplerPlacement {
        self.samplers
    }

    pub fn beam(&self) -> Option<&Beam> {
        self.beam.as_ref()
    }

    pub fn beam_mut(&mut self) -> Option<&mut Beam> {
        self.beam.as_mut()
    }
}
