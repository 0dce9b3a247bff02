use super::value::ParamValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BendKind {
    Sector,
    Rectangular,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BendStrength {
    Angle(ParamValue),
    /// Dipole field in T.
    Field(ParamValue),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoleFaces {
    pub e1: ParamValue,
    pub e2: ParamValue,
    pub fint: ParamValue,
    pub fintx: ParamValue,
    pub hgap: ParamValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KickPlane {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApertureShape {
    Rectangular,
    Elliptical,
}

/// The element families a test machine can hold. Lengths are in metres.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    Drift {
        length: ParamValue,
    },
    Dipole {
        kind: BendKind,
        length: ParamValue,
        strength: BendStrength,
        faces: PoleFaces,
    },
    Quadrupole {
        length: ParamValue,
        k1: ParamValue,
    },
    Sextupole {
        length: ParamValue,
        k2: ParamValue,
    },
    Octupole {
        length: ParamValue,
        k3: ParamValue,
    },
    Decapole {
        length: ParamValue,
        k4: ParamValue,
    },
    Multipole {
        length: ParamValue,
        knl: Vec<ParamValue>,
        ksl: Vec<ParamValue>,
    },
    ThinMultipole {
        knl: Vec<ParamValue>,
        ksl: Vec<ParamValue>,
    },
    Kicker {
        plane: KickPlane,
        length: ParamValue,
        angle: ParamValue,
    },
    Collimator {
        shape: ApertureShape,
        length: ParamValue,
        xsize: ParamValue,
        ysize: ParamValue,
    },
    Solenoid {
        length: ParamValue,
        ks: ParamValue,
    },
    RfCavity {
        length: ParamValue,
        gradient: ParamValue,
    },
    Degrader {
        length: ParamValue,
        wedges: ParamValue,
        material_thickness: ParamValue,
    },
    MuSpoiler {
        length: ParamValue,
        field: ParamValue,
    },
    Laser {
        length: ParamValue,
    },
    Shield {
        length: ParamValue,
    },
}

impl ElementKind {
    /// Element keyword in the deck language.
    pub fn keyword(&self) -> &'static str {
        match self {
            ElementKind::Drift { .. } => "drift",
            ElementKind::Dipole {
                kind: BendKind::Sector,
                ..
            } => "sbend",
            ElementKind::Dipole {
                kind: BendKind::Rectangular,
                ..
            } => "rbend",
            ElementKind::Quadrupole { .. } => "quadrupole",
            ElementKind::Sextupole { .. } => "sextupole",
            ElementKind::Octupole { .. } => "octupole",
            ElementKind::Decapole { .. } => "decapole",
            ElementKind::Multipole { .. } => "multipole",
            ElementKind::ThinMultipole { .. } => "thinmultipole",
            ElementKind::Kicker {
                plane: KickPlane::Horizontal,
                ..
            } => "hkicker",
            ElementKind::Kicker {
                plane: KickPlane::Vertical,
                ..
            } => "vkicker",
            ElementKind::Collimator {
                shape: ApertureShape::Rectangular,
                ..
            } => "rcol",
            ElementKind::Collimator {
                shape: ApertureShape::Elliptical,
                ..
            } => "ecol",
            ElementKind::Solenoid { .. } => "solenoid",
            ElementKind::RfCavity { .. } => "rf",
            ElementKind::Degrader { .. } => "degrader",
            ElementKind::MuSpoiler { .. } => "muspoiler",
            ElementKind::Laser { .. } => "laser",
            ElementKind::Shield { .. } => "shield",
        }
    }

    /// Attribute assignments in emission order, values already carrying their units.
    pub fn attributes(&self) -> Vec<(&'static str, String)> {
        let metres = |v: &ParamValue| format!("{}*m", v);
        let plain = |v: &ParamValue| v.to_string();

        match self {
            ElementKind::Drift { length }
            | ElementKind::Laser { length }
            | ElementKind::Shield { length } => vec![("l", metres(length))],
            ElementKind::Dipole {
                length,
                strength,
                faces,
                ..
            } => {
                let mut attrs = vec![("l", metres(length))];
                match strength {
                    BendStrength::Angle(angle) => attrs.push(("angle", plain(angle))),
                    BendStrength::Field(field) => attrs.push(("B", format!("{}*T", field))),
                }
                attrs.extend([
                    ("e1", plain(&faces.e1)),
                    ("e2", plain(&faces.e2)),
                    ("fint", plain(&faces.fint)),
                    ("fintx", plain(&faces.fintx)),
                    ("hgap", metres(&faces.hgap)),
                ]);
                attrs
            }
            ElementKind::Quadrupole { length, k1 } => {
                vec![("l", metres(length)), ("k1", plain(k1))]
            }
            ElementKind::Sextupole { length, k2 } => {
                vec![("l", metres(length)), ("k2", plain(k2))]
            }
            ElementKind::Octupole { length, k3 } => {
                vec![("l", metres(length)), ("k3", plain(k3))]
            }
            ElementKind::Decapole { length, k4 } => {
                vec![("l", metres(length)), ("k4", plain(k4))]
            }
            ElementKind::Multipole { length, knl, ksl } => vec![
                ("l", metres(length)),
                ("knl", coefficient_array(knl)),
                ("ksl", coefficient_array(ksl)),
            ],
            ElementKind::ThinMultipole { knl, ksl } => vec![
                ("knl", coefficient_array(knl)),
                ("ksl", coefficient_array(ksl)),
            ],
            ElementKind::Kicker { length, angle, .. } => {
                vec![("l", metres(length)), ("angle", plain(angle))]
            }
            ElementKind::Collimator {
                length,
                xsize,
                ysize,
                ..
            } => vec![
                ("l", metres(length)),
                ("xsize", metres(xsize)),
                ("ysize", metres(ysize)),
            ],
            ElementKind::Solenoid { length, ks } => {
                vec![("l", metres(length)), ("ks", plain(ks))]
            }
            ElementKind::RfCavity { length, gradient } => vec![
                ("l", metres(length)),
                ("gradient", format!("{}*MV/m", gradient)),
            ],
            ElementKind::Degrader {
                length,
                wedges,
                material_thickness,
            } => vec![
                ("l", metres(length)),
                ("numberWedges", plain(wedges)),
                ("materialThickness", metres(material_thickness)),
            ],
            ElementKind::MuSpoiler { length, field } => {
                vec![("l", metres(length)), ("B", format!("{}*T", field))]
            }
        }
    }
}

fn coefficient_array(values: &[ParamValue]) -> String {
    let joined = values
        .iter()
        .map(ParamValue::to_string)
        .collect::<Vec<_>>()
        .join(",");
    format!("{{{}}}", joined)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub name: String,
    pub kind: ElementKind,
}

impl Element {
    pub fn new(name: impl Into<String>, kind: ElementKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}
