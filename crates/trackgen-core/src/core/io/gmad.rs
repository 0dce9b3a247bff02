use super::traits::DeckFormat;
use crate::core::models::beam::Beam;
use crate::core::models::machine::{Machine, SamplerPlacement};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

const LINE_NAME: &str = "lattice";
const EXTENSION: &str = "gmad";

#[derive(Debug, Error)]
pub enum GmadError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Machine for deck '{0}' has no elements")]
    EmptyMachine(String),
}

/// How a deck is spread over files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeckLayout {
    /// Every section inside the main deck.
    #[default]
    Combined,
    /// One file per section, included from the main deck.
    Split,
}

/// The rendered sections of one deck. Empty sections are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GmadSections {
    pub components: String,
    pub sequence: String,
    pub samplers: String,
    pub beam: String,
    pub options: String,
}

impl GmadSections {
    fn named(&self) -> [(&'static str, &str); 5] {
        [
            ("components", self.components.as_str()),
            ("sequence", self.sequence.as_str()),
            ("samplers", self.samplers.as_str()),
            ("beam", self.beam.as_str()),
            ("options", self.options.as_str()),
        ]
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GmadWriter {
    layout: DeckLayout,
}

impl GmadWriter {
    pub fn new(layout: DeckLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> DeckLayout {
        self.layout
    }

    pub fn render(
        &self,
        machine: &Machine,
        options_include: Option<&str>,
        name: &str,
    ) -> Result<GmadSections, GmadError> {
        if machine.elements().is_empty() {
            return Err(GmadError::EmptyMachine(name.to_string()));
        }

        let mut components = String::new();
        for element in machine.elements() {
            components.push_str(&element.name);
            components.push_str(": ");
            components.push_str(element.kind.keyword());
            for (key, value) in element.kind.attributes() {
                components.push_str(&format!(", {}={}", key, value));
            }
            components.push_str(";\n");
        }

        let names: Vec<&str> = machine.elements().iter().map(|e| e.name.as_str()).collect();
        let sequence = format!(
            "{}: line = ({});\nuse, period={};\n",
            LINE_NAME,
            names.join(", "),
            LINE_NAME
        );

        let samplers = match machine.samplers() {
            SamplerPlacement::All => "sample, all;\n".to_string(),
            SamplerPlacement::None => String::new(),
        };

        let beam = machine.beam().map(render_beam).unwrap_or_default();

        let options = options_include
            .map(|path| format!("include {};\n", path))
            .unwrap_or_default();

        Ok(GmadSections {
            components,
            sequence,
            samplers,
            beam,
            options,
        })
    }

    /// The main deck contents for `sections`, including split section files by name.
    pub fn main_deck(&self, sections: &GmadSections, name: &str) -> String {
        let mut out = format!(
            "! {}.{}\n! Tracking test deck generated by trackgen.\n",
            name, EXTENSION
        );
        for (section, body) in sections.named() {
            if body.is_empty() {
                continue;
            }
            out.push('\n');
            match self.layout {
                DeckLayout::Combined => out.push_str(body),
                DeckLayout::Split => {
                    out.push_str(&format!("include {}_{}.{};\n", name, section, EXTENSION))
                }
            }
        }
        out
    }
}

fn render_beam(beam: &Beam) -> String {
    let mut fields = vec![
        format!("particle=\"{}\"", beam.particle.tag()),
        format!("energy={}*GeV", beam.energy),
        format!("distrType=\"{}\"", beam.distribution.tag()),
        format!("sigmaE={}", beam.sigma_e),
    ];
    if let Some(file) = beam.distribution_file() {
        fields.push(format!("distrFile=\"{}\"", file));
    }
    format!("beam, {};\n", fields.join(",\n      "))
}

fn write_file(path: &Path, contents: &str) -> Result<(), GmadError> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(contents.as_bytes())?;
    writer.flush()?;
    Ok(())
}

impl DeckFormat for GmadWriter {
    type Error = GmadError;

    fn extension(&self) -> &'static str {
        EXTENSION
    }

    fn write_machine(
        &self,
        machine: &Machine,
        options_include: Option<&str>,
        dir: &Path,
        name: &str,
    ) -> Result<Vec<PathBuf>, Self::Error> {
        let sections = self.render(machine, options_include, name)?;
        let main_path = self.deck_path(dir, name);
        write_file(&main_path, &self.main_deck(&sections, name))?;

        let mut written = vec![main_path];
        if self.layout == DeckLayout::Split {
            for (section, body) in sections.named() {
                if body.is_empty() {
                    continue;
                }
                let path = dir.join(format!("{}_{}.{}", name, section, EXTENSION));
                write_file(&path, body)?;
                written.push(path);
            }
        }
        Ok(written)
    }
}
