use crate::cli::KinematicsArgs;
use crate::error::{CliError, Result};
use std::fmt::Write;
use trackgen::core::kinematics::{Particle, compute_kinematics, compute_rigidity_field};
use trackgen::engine::error::EngineError;

pub fn run(args: KinematicsArgs) -> Result<()> {
    print!("{}", report(&args)?);
    Ok(())
}

/// Human-readable kinematics of both species at the beam's momentum.
pub fn report(args: &KinematicsArgs) -> Result<String> {
    let particle = args
        .particle
        .parse::<Particle>()
        .map_err(|e| CliError::Argument(e.to_string()))?;
    let kinematics = compute_kinematics(args.energy, particle).map_err(EngineError::from)?;

    let mut out = String::new();
    let write_err = |e: std::fmt::Error| CliError::Other(e.into());
    writeln!(
        out,
        "Beam: {} at {} GeV total energy",
        particle, args.energy
    )
    .map_err(write_err)?;
    for species in [Particle::Electron, Particle::Proton] {
        let state = kinematics.state(species);
        writeln!(
            out,
            "  {:<7} E = {:.9} GeV  KE = {:.9} GeV  p = {:.9} GeV/c",
            species.tag(),
            state.total_energy,
            state.kinetic_energy,
            state.momentum
        )
        .map_err(write_err)?;
    }
    writeln!(out, "  Brho = {:.9} T*m", kinematics.brho).map_err(write_err)?;

    if let (Some(length), Some(angle)) = (args.length, args.angle) {
        let field = compute_rigidity_field(length, angle, args.energy, particle)
            .map_err(EngineError::from)?;
        writeln!(
            out,
            "  Dipole: length {} m, angle {} rad -> B = {:.9} T",
            length, angle, field
        )
        .map_err(write_err)?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(
        energy: f64,
        particle: &str,
        length: Option<f64>,
        angle: Option<f64>,
    ) -> KinematicsArgs {
        KinematicsArgs {
            energy,
            particle: particle.to_string(),
            length,
            angle,
        }
    }

    #[test]
    fn report_lists_both_species_and_rigidity() {
        let text = report(&args(1.3, "e-", None, None)).unwrap();
        assert!(text.starts_with("Beam: e- at 1.3 GeV"));
        assert!(text.contains("  e-      E = 1.300000000 GeV"));
        assert!(text.contains("  proton "));
        assert!(text.contains("Brho = "));
        assert!(!text.contains("Dipole"));
    }

    #[test]
    fn report_includes_field_when_geometry_is_given() {
        let text = report(&args(1.3, "electron", Some(1.0), Some(0.0))).unwrap();
        assert!(text.contains("B = 0.000000000 T"));
    }

    #[test]
    fn energy_below_rest_mass_is_reported() {
        let result = report(&args(0.5, "proton", None, None));
        assert!(matches!(result, Err(CliError::Trackgen(EngineError::Kinematics(_)))));
    }

    #[test]
    fn unknown_particle_is_an_argument_error() {
        let result = report(&args(1.3, "muon", None, None));
        assert!(matches!(result, Err(CliError::Argument(_))));
    }
}
