//! Library of parameterized code fragments ("codelets").
//!
//! Every codelet implements one physics or numerics choice and is identified by
//! a [`Feature`] and a variant name. The library is built once on first use and
//! never modified afterwards.

mod antenna;
mod density;
mod laser;
mod particle;
mod plugin;
mod species;

use crate::{
    error::{Error, Result},
    template::Template,
};
use lazy_static::lazy_static;
use std::{collections::HashMap, fmt, str::FromStr};

/// A family of interchangeable codelets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Feature {
    /// Density profile functors.
    DensityProfile,
    /// Current-driven antenna pulses, keyed by polarization.
    AntennaPulse,
    /// Transverse antenna geometry, keyed by dimensionality.
    AntennaTransverse,
    /// Longitudinal (temporal) antenna envelopes.
    AntennaLongitudinal,
    /// Laser profiles injected by the field solver itself.
    LaserProfile,
    /// In-cell start position schemes for macroparticles.
    StartPosition,
    /// Definitions of post-initialization particle manipulators.
    Manipulator,
    /// Steps of the species initialization pipeline.
    InitStep,
    /// Numerical schemes (shape, pusher, current solver) of a species.
    SpeciesNumerics,
    /// Species type definitions.
    SpeciesDefinition,
    /// Diagnostic plugin invocations.
    Plugin,
}

impl Feature {
    /// Creates an array for iterating over all features.
    pub fn all() -> [Self; 11] {
        [
            Self::DensityProfile,
            Self::AntennaPulse,
            Self::AntennaTransverse,
            Self::AntennaLongitudinal,
            Self::LaserProfile,
            Self::StartPosition,
            Self::Manipulator,
            Self::InitStep,
            Self::SpeciesNumerics,
            Self::SpeciesDefinition,
            Self::Plugin,
        ]
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::DensityProfile => "density_profile",
            Self::AntennaPulse => "antenna_pulse",
            Self::AntennaTransverse => "antenna_transverse",
            Self::AntennaLongitudinal => "antenna_longitudinal",
            Self::LaserProfile => "laser_profile",
            Self::StartPosition => "start_position",
            Self::Manipulator => "manipulator",
            Self::InitStep => "init_step",
            Self::SpeciesNumerics => "species_numerics",
            Self::SpeciesDefinition => "species_definition",
            Self::Plugin => "plugin",
        }
    }

    fn codelets(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::DensityProfile => density::PROFILES,
            Self::AntennaPulse => antenna::PULSES,
            Self::AntennaTransverse => antenna::TRANSVERSE,
            Self::AntennaLongitudinal => antenna::LONGITUDINAL,
            Self::LaserProfile => laser::PROFILES,
            Self::StartPosition => particle::START_POSITIONS,
            Self::Manipulator => particle::MANIPULATORS,
            Self::InitStep => particle::INIT_STEPS,
            Self::SpeciesNumerics => species::NUMERICS,
            Self::SpeciesDefinition => species::DEFINITIONS,
            Self::Plugin => plugin::PLUGINS,
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Feature {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::all()
            .into_iter()
            .find(|feature| feature.name() == s)
            .ok_or_else(|| Error::UnknownFeature(s.to_string()))
    }
}

lazy_static! {
    static ref LIBRARY: HashMap<Feature, HashMap<&'static str, Template>> = Feature::all()
        .into_iter()
        .map(|feature| {
            let templates = feature
                .codelets()
                .iter()
                .map(|&(variant, text)| {
                    (
                        variant,
                        Template::new(format!("{}/{}", feature, variant), text),
                    )
                })
                .collect();
            (feature, templates)
        })
        .collect();
}

/// Looks up the codelet registered for the given feature and variant.
pub fn lookup(feature: Feature, variant: &str) -> Result<&'static Template> {
    LIBRARY
        .get(&feature)
        .and_then(|templates| templates.get(variant))
        .ok_or_else(|| Error::UnknownVariant {
            feature,
            variant: variant.to_string(),
            available: variants(feature).join(", "),
        })
}

/// Returns the variant names registered for the given feature, in registration order.
pub fn variants(feature: Feature) -> Vec<&'static str> {
    feature
        .codelets()
        .iter()
        .map(|&(variant, _)| variant)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::{RenderMode, Substitutions};

    #[test]
    fn every_feature_has_codelets() {
        for feature in Feature::all() {
            assert!(!variants(feature).is_empty(), "{} is empty", feature);
            for variant in variants(feature) {
                assert!(lookup(feature, variant).is_ok());
            }
        }
    }

    #[test]
    fn lookup_accepts_runtime_variant_names() {
        let variant = String::from("Gaussian");
        let template = lookup(Feature::DensityProfile, &variant).unwrap();
        assert_eq!(template.name(), "density_profile/Gaussian");
    }

    #[test]
    fn variant_names_are_unique_within_feature() {
        for feature in Feature::all() {
            let mut names = variants(feature);
            let count = names.len();
            names.sort_unstable();
            names.dedup();
            assert_eq!(names.len(), count, "Duplicate variant in {}", feature);
        }
    }

    #[test]
    fn unknown_variant_lists_alternatives() {
        match lookup(Feature::DensityProfile, "Parabolic") {
            Err(Error::UnknownVariant {
                feature,
                variant,
                available,
            }) => {
                assert_eq!(feature, Feature::DensityProfile);
                assert_eq!(variant, "Parabolic");
                assert_eq!(available, "Gaussian, FormulaXY, FormulaXYZ");
            }
            other => panic!("Unexpected result {:?}", other),
        }
    }

    #[test]
    fn features_parse_from_names() {
        for feature in Feature::all() {
            assert_eq!(feature.name().parse::<Feature>().unwrap(), feature);
        }
        assert!(matches!(
            "pusher".parse::<Feature>(),
            Err(Error::UnknownFeature(_))
        ));
    }

    #[test]
    fn random_start_position_renders() {
        let substitutions = Substitutions::new().with("name", "e").with("Nppc", 2);
        let text = lookup(Feature::StartPosition, "Random")
            .unwrap()
            .render(&substitutions, RenderMode::Strict)
            .unwrap();
        assert!(text.contains("struct RandomParametere"));
        assert!(text.contains("numParticlesPerCell = 2;"));
        assert!(text.contains("using startPositione = RandomImpl< RandomParametere >;"));
    }
}
