//! Particle species with their numerics, initial distribution and density.

use super::{ensure_not_shadowed, is_identifier, render_codelet, SimulationObject};
use crate::{
    codelets::Feature,
    constants::PROTON_TO_ELECTRON_MASS_RATIO,
    contribution::{Contribution, Slot},
    destination::Destination,
    error::{Error, Result},
    geometry::{
        Dim3::{X, Y, Z},
        In3D,
    },
    periodic_table,
    template::Substitutions,
};
use std::{fmt, iter};

#[cfg(feature = "serialization")]
use serde::Deserialize;

/// Kind of particle, selecting the species definition codelet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Deserialize))]
#[cfg_attr(feature = "serialization", serde(rename_all = "snake_case"))]
pub enum SpeciesKind {
    Electron,
    Proton,
    /// Ion of an element from the built-in periodic table.
    Ion,
    /// Ionizable species with user supplied mass and charge ratios.
    GenericIonizable,
    GenericNonionizable,
    Photon,
    Probe,
}

impl SpeciesKind {
    /// Name of the species definition codelet.
    pub fn name(self) -> &'static str {
        match self {
            Self::Electron => "electron",
            Self::Proton => "proton",
            Self::Ion => "ion",
            Self::GenericIonizable => "generic_ionizable",
            Self::GenericNonionizable => "generic_nonionizable",
            Self::Photon => "photon",
            Self::Probe => "probe",
        }
    }

    pub fn is_ionizable(self) -> bool {
        matches!(self, Self::Ion | Self::GenericIonizable)
    }
}

impl fmt::Display for SpeciesKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Scheme for placing macro particles inside each cell.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Deserialize))]
#[cfg_attr(feature = "serialization", serde(rename_all = "snake_case"))]
pub enum StartPosition {
    /// Uniformly random positions.
    Random { per_cell: u32 },
    /// Regular lattice with the given number of particles along each axis.
    Ordered { per_dimension: In3D<u32> },
    /// All particles at the same offset within the cell, in units of the cell size.
    OnePosition { per_cell: u32, offset: In3D<f64> },
}

impl StartPosition {
    fn variant(&self) -> &'static str {
        match self {
            Self::Random { .. } => "Random",
            Self::Ordered { .. } => "Ordered",
            Self::OnePosition { .. } => "OnePosition",
        }
    }

    /// Total number of macro particles created per cell.
    pub fn particles_per_cell(&self) -> u32 {
        match self {
            Self::Random { per_cell } | Self::OnePosition { per_cell, .. } => *per_cell,
            Self::Ordered { per_dimension } => per_dimension.product(),
        }
    }

    fn add_substitutions(&self, parameters: &mut Substitutions) {
        match self {
            Self::Random { per_cell } => {
                parameters.insert("Nppc", *per_cell);
            }
            Self::Ordered { per_dimension } => {
                parameters.insert("NppcX", per_dimension[X]);
                parameters.insert("NppcY", per_dimension[Y]);
                parameters.insert("NppcZ", per_dimension[Z]);
            }
            Self::OnePosition { per_cell, offset } => {
                parameters.insert("Nppc", *per_cell);
                parameters.insert("OffsetX", offset[X]);
                parameters.insert("OffsetY", offset[Y]);
                parameters.insert("OffsetZ", offset[Z]);
            }
        }
    }
}

impl Default for StartPosition {
    fn default() -> Self {
        Self::Random { per_cell: 3 }
    }
}

/// One density profile codelet and its parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Deserialize))]
#[cfg_attr(feature = "serialization", serde(deny_unknown_fields))]
pub struct DensityProfile {
    /// Name of the profile codelet, e.g. `Gaussian`.
    pub profile: String,
    #[cfg_attr(feature = "serialization", serde(default))]
    pub parameters: Substitutions,
}

impl DensityProfile {
    pub fn new<S: Into<String>>(profile: S, parameters: Substitutions) -> Self {
        Self {
            profile: profile.into(),
            parameters,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Deserialize))]
pub enum ParticlePusher {
    Boris,
    /// Relativistic variant of the Boris pusher.
    Vay,
    /// Fourth order Runge-Kutta with classical radiation reaction.
    ReducedLandauLifshitz,
    Free,
    Photon,
    Probe,
    Axel,
}

impl fmt::Display for ParticlePusher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Boris => "Boris",
            Self::Vay => "Vay",
            Self::ReducedLandauLifshitz => "ReducedLandauLifshitz",
            Self::Free => "Free",
            Self::Photon => "Photon",
            Self::Probe => "Probe",
            Self::Axel => "Axel",
        })
    }
}

impl Default for ParticlePusher {
    fn default() -> Self {
        Self::Boris
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Deserialize))]
pub enum CurrentDeposition {
    /// Charge conserving.
    Esirkepov,
    VillaBune,
    EmZ,
    ZigZag,
}

impl fmt::Display for CurrentDeposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Esirkepov => "Esirkepov",
            Self::VillaBune => "VillaBune",
            Self::EmZ => "EmZ",
            Self::ZigZag => "ZigZag",
        })
    }
}

impl Default for CurrentDeposition {
    fn default() -> Self {
        Self::Esirkepov
    }
}

/// Polarization assumed by the tunnel ionization model.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Deserialize))]
pub enum IonizerPolarization {
    Lin,
    Circ,
}

impl fmt::Display for IonizerPolarization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Lin => "Lin",
            Self::Circ => "Circ",
        })
    }
}

impl Default for IonizerPolarization {
    fn default() -> Self {
        Self::Lin
    }
}

/// User-facing species parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Deserialize))]
#[cfg_attr(feature = "serialization", serde(deny_unknown_fields))]
pub struct SpeciesParameters {
    /// Name of the species, used in generated identifiers.
    pub name: String,
    pub kind: SpeciesKind,
    #[cfg_attr(feature = "serialization", serde(default))]
    pub initial_positions: StartPosition,
    /// Particles per cell used for normalizing weightings.
    pub typical_ppc: Option<u32>,
    /// Profiles that are superposed to form the initial density.
    #[cfg_attr(feature = "serialization", serde(default))]
    pub density_profiles: Vec<DensityProfile>,
    /// Density relative to the base density.
    #[cfg_attr(feature = "serialization", serde(default = "default_relative_density"))]
    pub relative_density: f64,
    /// Base number density used for normalization [1/m^3].
    pub base_density: Option<f64>,
    /// Initial temperature [keV].
    pub initial_temperature: Option<f64>,
    #[cfg_attr(feature = "serialization", serde(default = "default_shape_order"))]
    pub shape_order: u32,
    #[cfg_attr(feature = "serialization", serde(default))]
    pub pusher: ParticlePusher,
    #[cfg_attr(feature = "serialization", serde(default))]
    pub current_deposition: CurrentDeposition,
    /// Element name or symbol of ionizable species.
    pub element: Option<String>,
    /// Initial ionization state of ionizable species.
    pub initial_charge: Option<u32>,
    pub mass_ratio: Option<f64>,
    pub charge_ratio: Option<f64>,
    /// Species receiving the electrons liberated by ionization.
    pub target_species: Option<String>,
    #[cfg_attr(feature = "serialization", serde(default))]
    pub ionizer_polarization: IonizerPolarization,
}

fn default_relative_density() -> f64 {
    1.0
}

fn default_shape_order() -> u32 {
    1
}

impl SpeciesParameters {
    /// Creates parameters for a species of the given kind, with default
    /// values for everything else.
    pub fn new<S: Into<String>>(name: S, kind: SpeciesKind) -> Self {
        Self {
            name: name.into(),
            kind,
            initial_positions: StartPosition::default(),
            typical_ppc: None,
            density_profiles: Vec::new(),
            relative_density: default_relative_density(),
            base_density: None,
            initial_temperature: None,
            shape_order: default_shape_order(),
            pusher: ParticlePusher::default(),
            current_deposition: CurrentDeposition::default(),
            element: None,
            initial_charge: None,
            mass_ratio: None,
            charge_ratio: None,
            target_species: None,
            ionizer_polarization: IonizerPolarization::default(),
        }
    }
}

/// Returns the name of the particle shape of the given order.
pub fn particle_shape(order: u32) -> Option<&'static str> {
    match order {
        1 => Some("CIC"),
        2 => Some("TSC"),
        3 => Some("PCS"),
        4 => Some("P4S"),
        _ => None,
    }
}

/// Ionization data resolved for an ionizable species.
#[derive(Clone, Debug, PartialEq)]
struct Ionization {
    element: &'static periodic_table::Element,
    mass_ratio: f64,
    charge_ratio: f64,
    target_species: String,
}

/// A configured particle species.
#[derive(Clone, Debug)]
pub struct Species {
    name: String,
    label: String,
    kind: SpeciesKind,
    target_species: Option<String>,
    contributions: Vec<Contribution>,
}

impl Species {
    pub fn new(parameters: SpeciesParameters) -> Result<Self> {
        let label = format!("species {}", parameters.name);
        if !is_identifier(&parameters.name) {
            return Err(Error::config(
                label,
                "name must be a valid identifier (letters, digits and underscores)",
            ));
        }
        let shape = particle_shape(parameters.shape_order).ok_or_else(|| {
            Error::config(
                &label,
                format!(
                    "shape order must be 1, 2, 3 or 4, got {}",
                    parameters.shape_order
                ),
            )
        })?;
        if !(parameters.relative_density.is_finite() && parameters.relative_density >= 0.0) {
            return Err(Error::config(
                label,
                format!(
                    "relative density must be non-negative, got {}",
                    parameters.relative_density
                ),
            ));
        }

        let ionization = Self::resolve_ionization(&label, &parameters)?;

        let mut substitutions = Substitutions::new()
            .with("name", parameters.name.as_str())
            .with("ParticleShape", shape)
            .with("CurrentSolver", parameters.current_deposition.to_string())
            .with("ParticlePusher", parameters.pusher.to_string())
            .with("DensityRatio", parameters.relative_density);
        parameters
            .initial_positions
            .add_substitutions(&mut substitutions);
        if let Some(temperature) = parameters.initial_temperature {
            substitutions.insert("Temperature", temperature);
        }

        match (parameters.kind, &ionization) {
            (_, Some(ionization)) => {
                substitutions.insert("MassRatio", ionization.mass_ratio);
                substitutions.insert("ChargeRatio", ionization.charge_ratio);
                substitutions.insert("Element", ionization.element.name);
                substitutions.insert("ProtonNumber", ionization.element.atomic_number);
                substitutions.insert("TargetSpeciesName", ionization.target_species.as_str());
                substitutions.insert("IonizerPol", parameters.ionizer_polarization.to_string());
            }
            (SpeciesKind::GenericNonionizable, None) => {
                let (mass_ratio, charge_ratio) = parameters
                    .mass_ratio
                    .zip(parameters.charge_ratio)
                    .ok_or_else(|| {
                        Error::config(
                            &label,
                            "generic non-ionizable species need both a mass and a charge ratio",
                        )
                    })?;
                substitutions.insert("MassRatio", mass_ratio);
                substitutions.insert("ChargeRatio", charge_ratio);
            }
            _ => {}
        }

        let contributions =
            Self::create_contributions(&label, &parameters, ionization.as_ref(), &substitutions)?;

        Ok(Self {
            name: parameters.name,
            label,
            kind: parameters.kind,
            target_species: ionization.map(|ionization| ionization.target_species),
            contributions,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> SpeciesKind {
        self.kind
    }

    fn resolve_ionization(
        label: &str,
        parameters: &SpeciesParameters,
    ) -> Result<Option<Ionization>> {
        if !parameters.kind.is_ionizable() {
            if parameters.initial_charge.is_some() || parameters.target_species.is_some() {
                return Err(Error::config(
                    label,
                    format!(
                        "initial charge and target species only apply to ionizable species, not {}",
                        parameters.kind
                    ),
                ));
            }
            return Ok(None);
        }

        let element_name = parameters.element.as_deref().ok_or_else(|| {
            Error::config(label, "an element is required for ionizable species")
        })?;
        let target_species = parameters.target_species.clone().ok_or_else(|| {
            Error::config(label, "a target species is required for ionizable species")
        })?;
        let element = periodic_table::lookup(element_name)
            .map_err(|err| Error::config(label, err.to_string()))?;

        let (mass_ratio, charge_ratio) = match parameters.kind {
            SpeciesKind::Ion => (
                parameters
                    .mass_ratio
                    .unwrap_or(PROTON_TO_ELECTRON_MASS_RATIO * element.atomic_mass),
                parameters
                    .charge_ratio
                    .unwrap_or(-f64::from(element.atomic_number)),
            ),
            _ => parameters
                .mass_ratio
                .zip(parameters.charge_ratio)
                .ok_or_else(|| {
                    Error::config(
                        label,
                        "generic ionizable species need both a mass and a charge ratio",
                    )
                })?,
        };

        if let Some(initial_charge) = parameters.initial_charge {
            if initial_charge > element.atomic_number {
                return Err(Error::config(
                    label,
                    format!(
                        "initial charge {} exceeds the atomic number {} of {}",
                        initial_charge, element.atomic_number, element.name
                    ),
                ));
            }
        }

        Ok(Some(Ionization {
            element,
            mass_ratio,
            charge_ratio,
            target_species,
        }))
    }

    fn create_contributions(
        label: &str,
        parameters: &SpeciesParameters,
        ionization: Option<&Ionization>,
        substitutions: &Substitutions,
    ) -> Result<Vec<Contribution>> {
        let mut contributions = Vec::with_capacity(5);

        contributions.push(Contribution::new(Destination::Species).with_slot(
            Slot::SpeciesNumerics,
            render_codelet(Feature::SpeciesNumerics, "default", substitutions)?,
        ));

        let mut manipulators = Vec::new();
        let mut init_steps = Vec::new();
        let mut profiles = Vec::with_capacity(parameters.density_profiles.len());

        for (index, profile) in parameters.density_profiles.iter().enumerate() {
            ensure_not_shadowed(
                label,
                &profile.parameters,
                substitutions.names().chain(iter::once("profile_index")),
            )?;
            let mut profile_substitutions = profile.parameters.clone();
            profile_substitutions.extend(substitutions);
            profile_substitutions.insert("profile_index", index);
            profiles.push(render_codelet(
                Feature::DensityProfile,
                &profile.profile,
                &profile_substitutions,
            )?);
            init_steps.push(render_codelet(
                Feature::InitStep,
                "CreateDensity",
                &profile_substitutions,
            )?);
        }

        if parameters.initial_temperature.is_some() {
            manipulators.push(render_codelet(
                Feature::Manipulator,
                "Temperature",
                substitutions,
            )?);
            init_steps.push(render_codelet(
                Feature::InitStep,
                "Temperature",
                substitutions,
            )?);
        }

        if let (Some(initial_charge), Some(_)) = (parameters.initial_charge, ionization) {
            let charge_substitutions = substitutions
                .clone()
                .with("InitialCharge", initial_charge);
            manipulators.push(render_codelet(
                Feature::Manipulator,
                "SetIonCharge",
                &charge_substitutions,
            )?);
            init_steps.push(render_codelet(
                Feature::InitStep,
                "SetIonCharge",
                &charge_substitutions,
            )?);
            init_steps.push(render_codelet(
                Feature::InitStep,
                "Neutralize",
                &charge_substitutions,
            )?);
        }

        let mut particle = Contribution::new(Destination::Particle).with_slot(
            Slot::StartPosition,
            render_codelet(
                Feature::StartPosition,
                parameters.initial_positions.variant(),
                substitutions,
            )?,
        );
        if !manipulators.is_empty() {
            particle.set_slot(
                Slot::Manipulator,
                Slot::Manipulator.separator().join(&manipulators),
            );
        }
        if parameters.typical_ppc.is_some() || parameters.base_density.is_some() {
            let typical_ppc = parameters
                .typical_ppc
                .unwrap_or_else(|| parameters.initial_positions.particles_per_cell());
            particle = particle.with_main(
                Substitutions::new().with("TYPICAL_PARTICLES_PER_CELL", typical_ppc),
            );
        }
        contributions.push(particle);

        contributions.push(
            Contribution::new(Destination::SpeciesDefinition)
                .with_slot(
                    Slot::SpeciesDefinition,
                    render_codelet(
                        Feature::SpeciesDefinition,
                        parameters.kind.name(),
                        substitutions,
                    )?,
                )
                .with_slot(Slot::SpeciesList, format!("        PIC_{}", parameters.name)),
        );

        if !init_steps.is_empty() {
            contributions.push(Contribution::new(Destination::SpeciesInitialization).with_slot(
                Slot::InitPipeline,
                Slot::InitPipeline.separator().join(&init_steps),
            ));
        }

        let mut density = Contribution::new(Destination::Density);
        if !profiles.is_empty() {
            density.set_slot(
                Slot::DensityProfile,
                Slot::DensityProfile.separator().join(&profiles),
            );
        }
        if let Some(base_density) = parameters.base_density {
            density = density.with_main(Substitutions::new().with("BASE_DENSITY", base_density));
        }
        if !density.is_empty() {
            contributions.push(density);
        }

        Ok(contributions)
    }
}

impl SimulationObject for Species {
    fn label(&self) -> &str {
        &self.label
    }

    fn contributions(&self) -> &[Contribution] {
        &self.contributions
    }

    fn defined_species(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn required_species(&self) -> Option<&str> {
        self.target_species.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gaussian_profile() -> DensityProfile {
        DensityProfile::new(
            "Gaussian",
            Substitutions::new()
                .with("gasFactor", -1.0)
                .with("gasPower", 4.0)
                .with("vacuumCellsY", 100)
                .with("gasCenterLeft", 40e-6)
                .with("gasCenterRight", 60e-6)
                .with("gasSigmaLeft", 20e-6)
                .with("gasSigmaRight", 80e-6),
        )
    }

    fn destinations(species: &Species) -> Vec<Destination> {
        species
            .contributions()
            .iter()
            .map(Contribution::destination)
            .collect()
    }

    #[test]
    fn profile_parameters_cannot_shadow_species_values() {
        for reserved in ["name", "profile_index"] {
            let parameters = SpeciesParameters {
                density_profiles: vec![DensityProfile::new(
                    "FormulaXY",
                    Substitutions::new()
                        .with("Formula", "dens = 1.0;")
                        .with(reserved, "Other"),
                )],
                ..SpeciesParameters::new("Electrons", SpeciesKind::Electron)
            };
            match Species::new(parameters) {
                Err(Error::Config { object, reason }) => {
                    assert_eq!(object, "species Electrons");
                    assert!(reason.contains(reserved), "{}", reason);
                }
                other => panic!("Unexpected result {:?}", other),
            }
        }
    }

    #[test]
    fn electrons_with_base_density_touch_all_particle_files() {
        let parameters = SpeciesParameters {
            initial_positions: StartPosition::Random { per_cell: 2 },
            density_profiles: vec![gaussian_profile()],
            base_density: Some(8e24),
            shape_order: 2,
            pusher: ParticlePusher::Vay,
            ..SpeciesParameters::new("Electrons", SpeciesKind::Electron)
        };
        let species = Species::new(parameters).unwrap();
        assert_eq!(
            destinations(&species),
            vec![
                Destination::Species,
                Destination::Particle,
                Destination::SpeciesDefinition,
                Destination::SpeciesInitialization,
                Destination::Density
            ]
        );

        let particle = &species.contributions()[1];
        assert_eq!(
            particle.main().unwrap().get("TYPICAL_PARTICLES_PER_CELL"),
            Some(&2.into())
        );
        assert!(particle
            .slot(Slot::StartPosition)
            .unwrap()
            .contains("numParticlesPerCell = 2;"));
        assert!(particle.slot(Slot::Manipulator).is_none());

        let numerics = species.contributions()[0].slot(Slot::SpeciesNumerics).unwrap();
        assert!(numerics.contains("particles::shapes::TSC;"));
        assert!(numerics.contains("particles::pusher::Vay;"));

        let density = &species.contributions()[4];
        assert!(density
            .slot(Slot::DensityProfile)
            .unwrap()
            .contains("densityProfileElectrons0 = GaussianImpl"));
        assert!(density.main().unwrap().contains("BASE_DENSITY"));
    }

    #[test]
    fn superposed_profiles_get_separate_indices() {
        let parameters = SpeciesParameters {
            density_profiles: vec![gaussian_profile(), gaussian_profile()],
            ..SpeciesParameters::new("Protons", SpeciesKind::Proton)
        };
        let species = Species::new(parameters).unwrap();
        assert_eq!(species.contributions().len(), 5);

        let particle = &species.contributions()[1];
        assert!(particle.main().is_none());

        let pipeline = species.contributions()[3].slot(Slot::InitPipeline).unwrap();
        let first = pipeline.find("densityProfileProtons0").unwrap();
        let second = pipeline.find("densityProfileProtons1").unwrap();
        assert!(first < second);
        assert_eq!(pipeline.matches(">,\n").count(), 1);

        let density = &species.contributions()[4];
        assert!(density.main().is_none());
        let profiles = density.slot(Slot::DensityProfile).unwrap();
        assert!(profiles.contains("DensityParameterProtons0"));
        assert!(profiles.contains("DensityParameterProtons1"));
    }

    #[test]
    fn typical_ppc_defaults_to_ordered_particle_count() {
        let parameters = SpeciesParameters {
            initial_positions: StartPosition::Ordered {
                per_dimension: In3D::new(2, 3, 1),
            },
            base_density: Some(1e24),
            ..SpeciesParameters::new("e", SpeciesKind::Electron)
        };
        let species = Species::new(parameters).unwrap();
        let particle = &species.contributions()[1];
        assert_eq!(
            particle.main().unwrap().get("TYPICAL_PARTICLES_PER_CELL"),
            Some(&6.into())
        );
        assert_eq!(
            destinations(&species),
            vec![
                Destination::Species,
                Destination::Particle,
                Destination::SpeciesDefinition,
                Destination::Density
            ]
        );
    }

    #[test]
    fn ions_use_periodic_table_and_neutralize_into_target() {
        let parameters = SpeciesParameters {
            density_profiles: vec![gaussian_profile()],
            initial_temperature: Some(0.1),
            element: Some("Nitrogen".to_string()),
            initial_charge: Some(5),
            target_species: Some("Electrons".to_string()),
            ..SpeciesParameters::new("Nitrogen", SpeciesKind::Ion)
        };
        let species = Species::new(parameters).unwrap();
        assert_eq!(species.required_species(), Some("Electrons"));
        assert_eq!(species.defined_species(), Some("Nitrogen"));

        let definition = species.contributions()[2]
            .slot(Slot::SpeciesDefinition)
            .unwrap();
        assert!(definition.contains("ChargeRatioNitrogen, -7.000000000000000e+00"));
        assert!(definition.contains("ADKLinPol< PIC_Electrons >"));
        assert!(definition.contains("ionization::energies::AU::Nitrogen_t"));

        let manipulators = species.contributions()[1].slot(Slot::Manipulator).unwrap();
        assert!(manipulators.contains("AddTemperatureNitrogen"));
        assert!(manipulators.contains("float_X( 7 ) - float_X( 5 )"));

        let pipeline = species.contributions()[3].slot(Slot::InitPipeline).unwrap();
        let positions: Vec<_> = [
            "CreateDensity<",
            "manipulators::AddTemperatureNitrogen",
            "manipulators::SetIonChargeNitrogen",
            "UnboundElectronsTimesWeighting",
        ]
        .iter()
        .map(|step| pipeline.find(step).unwrap())
        .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(pipeline.matches(">,\n").count(), 3);
        assert!(pipeline.ends_with("PIC_Electrons\n        >"));
    }

    #[test]
    fn invalid_species_parameters_are_rejected() {
        let invalid = [
            SpeciesParameters {
                shape_order: 5,
                ..SpeciesParameters::new("e", SpeciesKind::Electron)
            },
            SpeciesParameters::new("not valid", SpeciesKind::Electron),
            SpeciesParameters {
                element: Some("Nitrogen".to_string()),
                ..SpeciesParameters::new("N", SpeciesKind::Ion)
            },
            SpeciesParameters {
                element: Some("Unobtainium".to_string()),
                target_species: Some("e".to_string()),
                ..SpeciesParameters::new("U", SpeciesKind::Ion)
            },
            SpeciesParameters {
                element: Some("He".to_string()),
                initial_charge: Some(3),
                target_species: Some("e".to_string()),
                ..SpeciesParameters::new("He", SpeciesKind::Ion)
            },
            SpeciesParameters {
                mass_ratio: Some(10.0),
                ..SpeciesParameters::new("x", SpeciesKind::GenericNonionizable)
            },
        ];
        for parameters in invalid {
            assert!(matches!(
                Species::new(parameters),
                Err(Error::Config { .. })
            ));
        }
    }

    #[test]
    fn unknown_density_profile_is_reported() {
        let parameters = SpeciesParameters {
            density_profiles: vec![DensityProfile::new("Flat", Substitutions::new())],
            ..SpeciesParameters::new("e", SpeciesKind::Electron)
        };
        assert!(matches!(
            Species::new(parameters),
            Err(Error::UnknownVariant { .. })
        ));
    }
}
