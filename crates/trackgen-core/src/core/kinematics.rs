use phf::{Map, phf_map};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Electron mass in kg (CODATA 2018).
pub const ELECTRON_MASS_KG: f64 = 9.1093837015e-31;
/// Proton mass in kg (CODATA 2018).
pub const PROTON_MASS_KG: f64 = 1.67262192369e-27;
/// Speed of light in m/s.
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;
/// Elementary charge in C.
pub const ELEMENTARY_CHARGE: f64 = 1.602176634e-19;
/// Magnetic rigidity in T·m of a unit-charge particle with 1 GeV/c momentum.
pub const BRHO_PER_GEV: f64 = 3.335640951981521;

static PARTICLE_TAGS: Map<&'static str, Particle> = phf_map! {
    "e-" => Particle::Electron,
    "e" => Particle::Electron,
    "electron" => Particle::Electron,
    "proton" => Particle::Proton,
    "p" => Particle::Proton,
};

/// Rest energy in GeV of a particle of the given mass.
pub fn rest_energy_gev(mass_kg: f64) -> f64 {
    mass_kg * SPEED_OF_LIGHT * SPEED_OF_LIGHT / ELEMENTARY_CHARGE / 1e9
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum Particle {
    #[default]
    Electron,
    Proton,
}

impl Particle {
    /// Canonical tag used in deck names and beam definitions.
    pub fn tag(self) -> &'static str {
        match self {
            Particle::Electron => "e-",
            Particle::Proton => "proton",
        }
    }

    pub fn rest_energy(self) -> f64 {
        match self {
            Particle::Electron => rest_energy_gev(ELECTRON_MASS_KG),
            Particle::Proton => rest_energy_gev(PROTON_MASS_KG),
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        PARTICLE_TAGS.get(tag.trim()).copied()
    }
}

impl fmt::Display for Particle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Particle {
    type Err = KinematicsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Particle::from_tag(s).ok_or_else(|| KinematicsError::UnknownParticle(s.to_string()))
    }
}

impl TryFrom<String> for Particle {
    type Error = KinematicsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum KinematicsError {
    #[error("Unknown particle '{0}'. Expected 'e-' or 'proton'.")]
    UnknownParticle(String),

    #[error(
        "Total energy {total_energy} GeV is below the {particle} rest energy of {rest_energy} GeV"
    )]
    BelowRestEnergy {
        particle: Particle,
        total_energy: f64,
        rest_energy: f64,
    },

    #[error("Cannot bend by {angle} rad over a zero-length element")]
    ZeroLengthBend { angle: f64 },
}

/// Energies (GeV) and momentum (GeV/c) of one species.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleState {
    pub kinetic_energy: f64,
    pub total_energy: f64,
    pub momentum: f64,
}

impl ParticleState {
    fn from_momentum(momentum: f64, rest_energy: f64) -> Self {
        let total_energy = (momentum * momentum + rest_energy * rest_energy).sqrt();
        Self {
            kinetic_energy: total_energy - rest_energy,
            total_energy,
            momentum,
        }
    }
}

/// Electron and proton states sharing one momentum, plus the rigidity of the driving species.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kinematics {
    pub electron: ParticleState,
    pub proton: ParticleState,
    pub brho: f64,
}

impl Kinematics {
    pub fn state(&self, particle: Particle) -> ParticleState {
        match particle {
            Particle::Electron => self.electron,
            Particle::Proton => self.proton,
        }
    }
}

pub fn compute_kinematics(
    total_energy: f64,
    particle: Particle,
) -> Result<Kinematics, KinematicsError> {
    let rest_energy = particle.rest_energy();
    if !total_energy.is_finite() || total_energy < rest_energy {
        return Err(KinematicsError::BelowRestEnergy {
            particle,
            total_energy,
            rest_energy,
        });
    }

    let momentum = (total_energy * total_energy - rest_energy * rest_energy).sqrt();
    let driving = ParticleState {
        kinetic_energy: total_energy - rest_energy,
        total_energy,
        momentum,
    };
    let brho = BRHO_PER_GEV * momentum;

    let (electron, proton) = match particle {
        Particle::Electron => (
            driving,
            ParticleState::from_momentum(momentum, Particle::Proton.rest_energy()),
        ),
        Particle::Proton => (
            ParticleState::from_momentum(momentum, Particle::Electron.rest_energy()),
            driving,
        ),
    };

    Ok(Kinematics {
        electron,
        proton,
        brho,
    })
}

/// Dipole field (T) bending `particle` at `energy` by `angle` over `length`.
pub fn compute_rigidity_field(
    length: f64,
    angle: f64,
    energy: f64,
    particle: Particle,
) -> Result<f64, KinematicsError> {
    if angle == 0.0 {
        return Ok(0.0);
    }
    if length == 0.0 {
        return Err(KinematicsError::ZeroLengthBend { angle });
    }
    let kinematics = compute_kinematics(energy, particle)?;
    let rho = length / angle;
    Ok(kinematics.brho / rho)
}
