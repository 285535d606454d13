//! The fixed set of generated files and their templates.

use crate::{contribution::Slot, io::utils, template::Template};
use std::{
    collections::HashMap,
    fmt, io,
    path::{Path, PathBuf},
};

/// One of the files consumed by the simulation build.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Destination {
    Dimension,
    Grid,
    FieldSolver,
    Memory,
    FieldBackground,
    Laser,
    Particle,
    Species,
    SpeciesDefinition,
    SpeciesInitialization,
    Density,
    Run,
}

/// Directory a destination file is written to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputDirectory {
    /// Compile-time parameter files.
    Param,
    /// Run-time submission descriptors.
    Submission,
}

impl Destination {
    /// Creates an array for iterating over all destinations.
    pub fn all() -> [Self; 12] {
        [
            Self::Dimension,
            Self::Grid,
            Self::FieldSolver,
            Self::Memory,
            Self::FieldBackground,
            Self::Laser,
            Self::Particle,
            Self::Species,
            Self::SpeciesDefinition,
            Self::SpeciesInitialization,
            Self::Density,
            Self::Run,
        ]
    }

    /// Base name of the file, also used as the template name.
    pub fn stem(self) -> &'static str {
        match self {
            Self::Dimension => "dimension",
            Self::Grid => "grid",
            Self::FieldSolver => "fieldSolver",
            Self::Memory => "memory",
            Self::FieldBackground => "fieldBackground",
            Self::Laser => "laser",
            Self::Particle => "particle",
            Self::Species => "species",
            Self::SpeciesDefinition => "speciesDefinition",
            Self::SpeciesInitialization => "speciesInitialization",
            Self::Density => "density",
            Self::Run => "run",
        }
    }

    pub fn output_directory(self) -> OutputDirectory {
        match self {
            Self::Run => OutputDirectory::Submission,
            _ => OutputDirectory::Param,
        }
    }

    pub fn file_name(self) -> String {
        let extension = match self.output_directory() {
            OutputDirectory::Param => "param",
            OutputDirectory::Submission => "cfg",
        };
        format!("{}.{}", self.stem(), extension)
    }

    /// The appendable slots of the destination template.
    pub fn slots(self) -> &'static [Slot] {
        match self {
            Self::FieldBackground => &[Slot::Antenna],
            Self::Particle => &[Slot::StartPosition, Slot::Manipulator],
            Self::Species => &[Slot::SpeciesNumerics],
            Self::SpeciesDefinition => &[Slot::SpeciesDefinition, Slot::SpeciesList],
            Self::SpeciesInitialization => &[Slot::InitPipeline],
            Self::Density => &[Slot::DensityProfile],
            Self::Run => &[Slot::Plugin, Slot::PluginName],
            Self::Dimension | Self::Grid | Self::FieldSolver | Self::Memory | Self::Laser => &[],
        }
    }

    /// The template shipped with the crate for this destination.
    pub fn builtin_template(self) -> Template {
        let text = match self {
            Self::Dimension => include_str!("destination/templates/dimension.template"),
            Self::Grid => include_str!("destination/templates/grid.template"),
            Self::FieldSolver => include_str!("destination/templates/fieldSolver.template"),
            Self::Memory => include_str!("destination/templates/memory.template"),
            Self::FieldBackground => {
                include_str!("destination/templates/fieldBackground.template")
            }
            Self::Laser => include_str!("destination/templates/laser.template"),
            Self::Particle => include_str!("destination/templates/particle.template"),
            Self::Species => include_str!("destination/templates/species.template"),
            Self::SpeciesDefinition => {
                include_str!("destination/templates/speciesDefinition.template")
            }
            Self::SpeciesInitialization => {
                include_str!("destination/templates/speciesInitialization.template")
            }
            Self::Density => include_str!("destination/templates/density.template"),
            Self::Run => include_str!("destination/templates/run.template"),
        };
        Template::from_static(self.stem(), text)
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.file_name())
    }
}

/// Set of destination templates used for rendering.
///
/// Starts out with the built-in templates; individual templates can be replaced.
#[derive(Clone, Debug)]
pub struct DestinationTemplates {
    templates: HashMap<Destination, Template>,
}

impl DestinationTemplates {
    pub fn builtin() -> Self {
        Self {
            templates: Destination::all()
                .into_iter()
                .map(|destination| (destination, destination.builtin_template()))
                .collect(),
        }
    }

    /// Replaces the template for the given destination.
    pub fn with_template<T: Into<String>>(mut self, destination: Destination, text: T) -> Self {
        self.templates
            .insert(destination, Template::new(destination.stem(), text));
        self
    }

    /// Replaces the templates for which a file `<stem>.template` exists in
    /// the given directory.
    pub fn with_overrides_from_directory<P: AsRef<Path>>(
        mut self,
        dir_path: P,
    ) -> io::Result<Self> {
        for destination in Destination::all() {
            let file_path = dir_path
                .as_ref()
                .join(format!("{}.template", destination.stem()));
            if file_path.is_file() {
                self = self.with_template(destination, utils::read_text_file(file_path)?);
            }
        }
        Ok(self)
    }

    pub fn get(&self, destination: Destination) -> &Template {
        &self.templates[&destination]
    }
}

impl Default for DestinationTemplates {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Root directory of a generated simulation setup and the layout below it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    const PARAM_DIR_PATH_COMPONENTS: [&'static str; 3] = ["include", "picongpu", "param"];
    const SUBMISSION_DIR_PATH_COMPONENTS: [&'static str; 2] = ["etc", "picongpu"];

    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        self.root.as_path()
    }

    pub fn directory(&self, directory: OutputDirectory) -> PathBuf {
        let components: &[&str] = match directory {
            OutputDirectory::Param => &Self::PARAM_DIR_PATH_COMPONENTS,
            OutputDirectory::Submission => &Self::SUBMISSION_DIR_PATH_COMPONENTS,
        };
        components
            .iter()
            .fold(self.root.clone(), |path, component| path.join(component))
    }

    /// Path of the file generated for the given destination.
    pub fn path(&self, destination: Destination) -> PathBuf {
        self.directory(destination.output_directory())
            .join(destination.file_name())
    }
}
