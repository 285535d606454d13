//! Laser pulse injected either natively by the field solver or by a
//! current-driven antenna.

use super::{render_codelet, SimulationObject};
use crate::{
    codelets::{self, Feature},
    constants::SPEED_OF_LIGHT,
    contribution::{Contribution, Slot},
    destination::Destination,
    error::{Error, Result},
    geometry::Dimensionality,
    num,
    template::Substitutions,
};
use std::{fmt, str::FromStr};

#[cfg(feature = "serialization")]
use serde::Deserialize;

/// Polarization of the laser electric field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Polarization {
    LinearX,
    LinearZ,
    Circular,
}

impl Polarization {
    /// Name of the polarization in the native laser profile.
    fn native_name(self) -> &'static str {
        match self {
            Self::LinearX => "LINEAR_X",
            Self::LinearZ => "LINEAR_Z",
            Self::Circular => "CIRCULAR",
        }
    }
}

impl FromStr for Polarization {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "x" => Ok(Self::LinearX),
            "z" => Ok(Self::LinearZ),
            "circular" => Ok(Self::Circular),
            invalid => Err(format!(
                "invalid polarization {}, must be one of x, z, circular",
                invalid
            )),
        }
    }
}

impl fmt::Display for Polarization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::LinearX => "x",
            Self::LinearZ => "z",
            Self::Circular => "circular",
        })
    }
}

/// How the antenna delay is specified.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Deserialize))]
#[cfg_attr(feature = "serialization", serde(rename_all = "snake_case"))]
pub enum AntennaDelay {
    /// Initial position of the pulse centroid along y [m]; the delay is the
    /// distance from the antenna plane to this position.
    CentroidPosition(f64),
    /// Delay between simulation start and the pulse centre, times the speed of light [m].
    CDelay(f64),
}

/// Parameters specific to the native laser.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Deserialize))]
#[cfg_attr(feature = "serialization", serde(deny_unknown_fields))]
pub struct NativeLaser {
    #[cfg_attr(feature = "serialization", serde(default = "default_profile"))]
    pub profile: String,
    /// Position of the focus along y [m].
    pub focus_position: f64,
    /// Time spent injecting the pulse, in units of the pulse duration.
    #[cfg_attr(feature = "serialization", serde(default = "default_injection_duration"))]
    pub injection_duration: f64,
    /// Cell index of the injection plane along y.
    #[cfg_attr(feature = "serialization", serde(default))]
    pub initial_plane: u32,
    /// Coefficients of the Laguerre modes making up the transverse profile.
    #[cfg_attr(feature = "serialization", serde(default = "default_laguerre_modes"))]
    pub laguerre_modes: Vec<f64>,
}

impl NativeLaser {
    pub fn new(focus_position: f64) -> Self {
        Self {
            profile: default_profile(),
            focus_position,
            injection_duration: default_injection_duration(),
            initial_plane: 0,
            laguerre_modes: default_laguerre_modes(),
        }
    }
}

/// Parameters specific to the antenna laser.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Deserialize))]
#[cfg_attr(feature = "serialization", serde(deny_unknown_fields))]
pub struct AntennaLaser {
    /// Longitudinal envelope, `Gaussian` or `Sin2`.
    #[cfg_attr(feature = "serialization", serde(default = "default_profile"))]
    pub profile: String,
    /// Position of the antenna plane along y [m].
    pub position: f64,
    pub delay: AntennaDelay,
    /// Cell index of the antenna centre along x.
    pub center_x: u32,
    /// Cell index of the antenna centre along z, required in 3D.
    pub center_z: Option<u32>,
}

/// The two ways of generating the laser.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Deserialize))]
#[cfg_attr(feature = "serialization", serde(rename_all = "snake_case"))]
pub enum LaserMethod {
    Native(NativeLaser),
    Antenna(AntennaLaser),
}

/// User-facing laser parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Deserialize))]
#[cfg_attr(feature = "serialization", serde(deny_unknown_fields))]
pub struct LaserParameters {
    /// Normalized amplitude.
    pub a0: f64,
    /// Duration as a longitudinal size [m].
    pub ctau: f64,
    /// Waist [m].
    pub waist: f64,
    #[cfg_attr(feature = "serialization", serde(default = "default_wavelength"))]
    pub wavelength: f64,
    /// Carrier envelope phase [rad].
    #[cfg_attr(feature = "serialization", serde(default))]
    pub cep: f64,
    /// `x`, `z` or `circular`.
    #[cfg_attr(feature = "serialization", serde(default = "default_polarization"))]
    pub polarization: String,
    #[cfg_attr(feature = "serialization", serde(default))]
    pub dimensionality: Dimensionality,
    pub method: LaserMethod,
}

fn default_profile() -> String {
    "Gaussian".to_string()
}

fn default_injection_duration() -> f64 {
    3.0
}

fn default_laguerre_modes() -> Vec<f64> {
    vec![1.0]
}

fn default_wavelength() -> f64 {
    0.8e-6
}

fn default_polarization() -> String {
    "x".to_string()
}

impl LaserParameters {
    /// Creates laser parameters with default wavelength, phase, polarization
    /// and dimensionality.
    pub fn new(a0: f64, ctau: f64, waist: f64, method: LaserMethod) -> Self {
        Self {
            a0,
            ctau,
            waist,
            wavelength: default_wavelength(),
            cep: 0.0,
            polarization: default_polarization(),
            dimensionality: Dimensionality::default(),
            method,
        }
    }
}

/// A configured laser pulse.
#[derive(Clone, Debug)]
pub struct Laser {
    polarization: Polarization,
    pulse_duration: f64,
    contributions: Vec<Contribution>,
}

impl Laser {
    const LABEL: &'static str = "laser";

    pub fn new(parameters: LaserParameters) -> Result<Self> {
        let polarization: Polarization = parameters
            .polarization
            .parse()
            .map_err(|reason: String| Error::config(Self::LABEL, reason))?;

        for (name, value) in [
            ("a0", parameters.a0),
            ("ctau", parameters.ctau),
            ("waist", parameters.waist),
            ("wavelength", parameters.wavelength),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::config(
                    Self::LABEL,
                    format!("{} must be positive, got {}", name, value),
                ));
            }
        }

        let pulse_duration = parameters.ctau / SPEED_OF_LIGHT;
        let common = Substitutions::new()
            .with("a0", parameters.a0)
            .with("tau", pulse_duration)
            .with("wavelength", parameters.wavelength)
            .with("CEP", parameters.cep);

        let contribution = match &parameters.method {
            LaserMethod::Native(native) => {
                Self::native_contribution(native, polarization, &parameters, common)?
            }
            LaserMethod::Antenna(antenna) => {
                Self::antenna_contribution(antenna, polarization, &parameters, common)?
            }
        };

        Ok(Self {
            polarization,
            pulse_duration,
            contributions: vec![contribution],
        })
    }

    pub fn polarization(&self) -> Polarization {
        self.polarization
    }

    /// Pulse duration [s].
    pub fn pulse_duration(&self) -> f64 {
        self.pulse_duration
    }

    fn native_contribution(
        native: &NativeLaser,
        polarization: Polarization,
        parameters: &LaserParameters,
        common: Substitutions,
    ) -> Result<Contribution> {
        ensure_known_profile(Feature::LaserProfile, &native.profile)?;
        if native.laguerre_modes.is_empty() {
            return Err(Error::config(
                Self::LABEL,
                "at least one Laguerre mode coefficient is required",
            ));
        }
        let modes = native
            .laguerre_modes
            .iter()
            .map(|&coefficient| num::format_float_literal(coefficient))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| Error::NonFiniteValue {
                name: "LAGUERREMODES".to_string(),
            })?;

        let profile_parameters = common
            .with("w0", parameters.waist)
            .with("y_foc", native.focus_position)
            .with("injection_duration", native.injection_duration)
            .with("iy_antenna", native.initial_plane)
            .with("pol", polarization.native_name())
            .with("MODENUMBER", native.laguerre_modes.len() - 1)
            .with("LAGUERREMODES", modes.join(", "));

        let profile = render_codelet(Feature::LaserProfile, &native.profile, &profile_parameters)?;
        Ok(Contribution::new(Destination::Laser)
            .with_main(Substitutions::new().with("LaserProfile", profile)))
    }

    fn antenna_contribution(
        antenna: &AntennaLaser,
        polarization: Polarization,
        parameters: &LaserParameters,
        common: Substitutions,
    ) -> Result<Contribution> {
        ensure_known_profile(Feature::AntennaLongitudinal, &antenna.profile)?;

        let delay = match antenna.delay {
            AntennaDelay::CentroidPosition(position) => {
                (antenna.position - position) / SPEED_OF_LIGHT
            }
            AntennaDelay::CDelay(cdelay) => cdelay / SPEED_OF_LIGHT,
        };

        let mut geometry = Substitutions::new().with("center_x", antenna.center_x);
        if parameters.dimensionality.is_3d() {
            let center_z = antenna.center_z.ok_or_else(|| {
                Error::config(
                    Self::LABEL,
                    "the antenna centre along z is required in 3d",
                )
            })?;
            geometry.insert("center_z", center_z);
        }

        // Geometry snippets are rendered first and spliced into the pulse as plain text
        let transverse = render_codelet(
            Feature::AntennaTransverse,
            parameters.dimensionality.key(),
            &geometry,
        )?;
        let longitudinal = render_codelet(
            Feature::AntennaLongitudinal,
            &antenna.profile,
            &Substitutions::new(),
        )?;

        let (pulse_variant, pol) = match polarization {
            Polarization::LinearX => ("linear", "x"),
            Polarization::LinearZ => ("linear", "z"),
            Polarization::Circular => ("circular", ""),
        };
        let pulse_parameters = common
            .with("y_antenna", antenna.position)
            .with("delay", delay)
            .with("waist", parameters.waist)
            .with("pol", pol)
            .with("transverse", transverse)
            .with("longitudinal", longitudinal);

        let pulse = render_codelet(Feature::AntennaPulse, pulse_variant, &pulse_parameters)?;
        Ok(Contribution::new(Destination::FieldBackground).with_slot(Slot::Antenna, pulse))
    }
}

fn ensure_known_profile(feature: Feature, profile: &str) -> Result<()> {
    let available = codelets::variants(feature);
    if available.contains(&profile) {
        Ok(())
    } else {
        Err(Error::config(
            Laser::LABEL,
            format!(
                "unknown profile {}, must be one of {}",
                profile,
                available.join(", ")
            ),
        ))
    }
}

impl SimulationObject for Laser {
    fn label(&self) -> &str {
        Self::LABEL
    }

    fn contributions(&self) -> &[Contribution] {
        &self.contributions
    }
}
