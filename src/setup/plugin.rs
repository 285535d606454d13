//! Diagnostic plugins invoked by the simulation at run time.

use super::{ensure_not_shadowed, is_identifier, render_codelet, SimulationObject};
use crate::{
    codelets::{self, Feature},
    contribution::{Contribution, Slot},
    destination::Destination,
    error::{Error, Result},
    template::Substitutions,
};

#[cfg(feature = "serialization")]
use serde::Deserialize;

/// User-facing plugin parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Deserialize))]
#[cfg_attr(feature = "serialization", serde(deny_unknown_fields))]
pub struct PluginParameters {
    /// Plugin type, `openPMD` or `hdf5`.
    #[cfg_attr(feature = "serialization", serde(default = "default_kind"))]
    pub kind: String,
    /// Number of steps between outputs.
    pub period: u64,
    /// Data sources to dump.
    #[cfg_attr(feature = "serialization", serde(default = "default_source"))]
    pub source: String,
    /// Base name of the output files.
    #[cfg_attr(feature = "serialization", serde(default = "default_name"))]
    pub name: String,
    /// Additional values passed through to the plugin codelet.
    #[cfg_attr(feature = "serialization", serde(default))]
    pub extra: Substitutions,
}

fn default_kind() -> String {
    "openPMD".to_string()
}

fn default_source() -> String {
    "fields_all, species_all".to_string()
}

fn default_name() -> String {
    "raw".to_string()
}

impl PluginParameters {
    pub fn new(period: u64) -> Self {
        Self {
            kind: default_kind(),
            period,
            source: default_source(),
            name: default_name(),
            extra: Substitutions::new(),
        }
    }
}

/// A configured diagnostic plugin.
#[derive(Clone, Debug)]
pub struct Plugin {
    label: String,
    invocation_name: String,
    contributions: Vec<Contribution>,
}

impl Plugin {
    const RESERVED_NAMES: [&'static str; 3] = ["name", "period", "source"];

    pub fn new(parameters: PluginParameters) -> Result<Self> {
        let label = format!("plugin {}", parameters.name);
        if !is_identifier(&parameters.name) {
            return Err(Error::config(
                label,
                "name must be a valid identifier (letters, digits and underscores)",
            ));
        }
        if !codelets::variants(Feature::Plugin).contains(&parameters.kind.as_str()) {
            return Err(Error::config(
                label,
                format!(
                    "unknown plugin type {}, must be one of {}",
                    parameters.kind,
                    codelets::variants(Feature::Plugin).join(", ")
                ),
            ));
        }

        ensure_not_shadowed(&label, &parameters.extra, Self::RESERVED_NAMES)?;
        let mut substitutions = parameters.extra.clone();
        substitutions.insert("name", parameters.name.as_str());
        // The period is part of shell variable names and must not be reformatted
        substitutions.insert("period", parameters.period.to_string());
        substitutions.insert("source", parameters.source.as_str());

        let invocation = render_codelet(Feature::Plugin, &parameters.kind, &substitutions)?;
        let invocation_name = format!("!TBG_{}_{}", parameters.name, parameters.period);

        let contributions = vec![Contribution::new(Destination::Run)
            .with_slot(Slot::Plugin, invocation)
            .with_slot(Slot::PluginName, invocation_name.as_str())];

        Ok(Self {
            label,
            invocation_name,
            contributions,
        })
    }

    /// Reference to the plugin arguments in the run descriptor.
    pub fn invocation_name(&self) -> &str {
        &self.invocation_name
    }
}

impl SimulationObject for Plugin {
    fn label(&self) -> &str {
        &self.label
    }

    fn contributions(&self) -> &[Contribution] {
        &self.contributions
    }
}
