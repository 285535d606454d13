//! Contribution records produced by simulation objects for destination files.

use crate::{destination::Destination, template::Substitutions};
use std::{collections::BTreeMap, fmt};

/// Separator used to join the texts contributed to the same slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Separator {
    Newline,
    CommaNewline,
    Space,
}

impl Separator {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Newline => "\n",
            Self::CommaNewline => ",\n",
            Self::Space => " ",
        }
    }

    /// Joins the given texts with this separator.
    ///
    /// An empty list gives an empty string.
    pub fn join<S: AsRef<str>>(self, texts: &[S]) -> String {
        texts
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(self.as_str())
    }
}

/// Appendable position in a destination template that accumulates
/// contributions from several objects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Slot {
    Antenna,
    StartPosition,
    Manipulator,
    SpeciesNumerics,
    SpeciesDefinition,
    SpeciesList,
    InitPipeline,
    DensityProfile,
    Plugin,
    PluginName,
}

impl Slot {
    /// Name of the placeholder the joined slot text is substituted for.
    pub fn placeholder(self) -> &'static str {
        match self {
            Self::Antenna => "Antenna",
            Self::StartPosition => "StartPosition",
            Self::Manipulator => "Manipulator",
            Self::SpeciesNumerics => "SpeciesNumerics",
            Self::SpeciesDefinition => "SpeciesDefinition",
            Self::SpeciesList => "SpeciesList",
            Self::InitPipeline => "InitPipeline",
            Self::DensityProfile => "DensityProfile",
            Self::Plugin => "Plugin",
            Self::PluginName => "PluginName",
        }
    }

    pub fn separator(self) -> Separator {
        match self {
            Self::SpeciesList | Self::InitPipeline => Separator::CommaNewline,
            Self::PluginName => Separator::Space,
            _ => Separator::Newline,
        }
    }

    /// The destination whose template holds this slot.
    pub fn destination(self) -> Destination {
        match self {
            Self::Antenna => Destination::FieldBackground,
            Self::StartPosition | Self::Manipulator => Destination::Particle,
            Self::SpeciesNumerics => Destination::Species,
            Self::SpeciesDefinition | Self::SpeciesList => Destination::SpeciesDefinition,
            Self::InitPipeline => Destination::SpeciesInitialization,
            Self::DensityProfile => Destination::Density,
            Self::Plugin | Self::PluginName => Destination::Run,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.placeholder())
    }
}

/// What one simulation object offers towards one destination file.
#[derive(Clone, Debug, PartialEq)]
pub struct Contribution {
    destination: Destination,
    main: Option<Substitutions>,
    slots: BTreeMap<Slot, String>,
}

impl Contribution {
    /// Creates an empty contribution to the given destination.
    pub fn new(destination: Destination) -> Self {
        Self {
            destination,
            main: None,
            slots: BTreeMap::new(),
        }
    }

    /// Sets the main substitutions of the destination template.
    pub fn with_main(mut self, main: Substitutions) -> Self {
        self.main = Some(main);
        self
    }

    /// Sets the text this record contributes to the given slot.
    pub fn with_slot<S: Into<String>>(mut self, slot: Slot, text: S) -> Self {
        self.set_slot(slot, text);
        self
    }

    /// Sets the text this record contributes to the given slot, replacing any
    /// earlier text for the same slot.
    pub fn set_slot<S: Into<String>>(&mut self, slot: Slot, text: S) {
        self.slots.insert(slot, text.into());
    }

    pub fn destination(&self) -> Destination {
        self.destination
    }

    pub fn main(&self) -> Option<&Substitutions> {
        self.main.as_ref()
    }

    pub fn slots(&self) -> impl Iterator<Item = (Slot, &str)> {
        self.slots.iter().map(|(&slot, text)| (slot, text.as_str()))
    }

    pub fn slot(&self, slot: Slot) -> Option<&str> {
        self.slots.get(&slot).map(String::as_str)
    }

    /// Whether the record carries neither main substitutions nor slot texts.
    pub fn is_empty(&self) -> bool {
        self.main.is_none() && self.slots.is_empty()
    }
}
