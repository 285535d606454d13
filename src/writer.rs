//! Aggregation of contribution records into rendered destination files.

use crate::{
    contribution::{Contribution, Slot},
    destination::{Destination, DestinationTemplates, OutputDirectory, OutputLayout},
    error::{Error, Result},
    io::{utils, Verbosity},
    setup::SimulationObject,
    template::{RenderMode, Substitutions},
};
use std::{
    collections::{BTreeMap, HashSet},
    path::PathBuf,
};

/// How to handle more than one record supplying main parameters for the
/// same destination.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MainConflictPolicy {
    /// Keep the first main parameters and warn about the rest.
    FirstWins,
    /// Treat it as an error.
    Reject,
}

impl Default for MainConflictPolicy {
    fn default() -> Self {
        Self::FirstWins
    }
}

/// Policies and verbosity for aggregating and writing files.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WriterConfig {
    pub main_conflict: MainConflictPolicy,
    pub render_mode: RenderMode,
    pub verbosity: Verbosity,
}

impl WriterConfig {
    /// Configuration rejecting both main conflicts and unused substitutions.
    pub fn strict() -> Self {
        Self {
            main_conflict: MainConflictPolicy::Reject,
            render_mode: RenderMode::Strict,
            verbosity: Verbosity::Quiet,
        }
    }
}

/// Fully rendered text of every touched destination.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderedSetup {
    files: BTreeMap<Destination, String>,
    warnings: Vec<String>,
}

impl RenderedSetup {
    pub fn get(&self, destination: Destination) -> Option<&str> {
        self.files.get(&destination).map(String::as_str)
    }

    /// The touched destinations in a fixed order.
    pub fn destinations(&self) -> impl Iterator<Item = Destination> + '_ {
        self.files.keys().copied()
    }

    pub fn files(&self) -> impl Iterator<Item = (Destination, &str)> {
        self.files
            .iter()
            .map(|(&destination, text)| (destination, text.as_str()))
    }

    /// Problems that did not prevent rendering.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn print_warnings(&self) {
        for warning in &self.warnings {
            eprintln!("Warning: {}", warning);
        }
    }

    /// Writes every rendered file below the given root, replacing existing
    /// files, and returns the written paths.
    pub fn write(&self, layout: &OutputLayout, verbosity: Verbosity) -> Result<Vec<PathBuf>> {
        for directory in [OutputDirectory::Param, OutputDirectory::Submission] {
            if self
                .destinations()
                .any(|destination| destination.output_directory() == directory)
            {
                utils::create_directory_if_missing(layout.directory(directory))?;
            }
        }

        let mut paths = Vec::with_capacity(self.files.len());
        for (destination, text) in self.files() {
            let path = layout.path(destination);
            if verbosity.print_messages() {
                println!("Writing {}", path.display());
            }
            utils::write_text_file_atomically(&path, text)?;
            paths.push(path);
        }
        Ok(paths)
    }
}

/// Records gathered for one destination.
#[derive(Debug, Default)]
struct Aggregate<'a> {
    main: Option<(&'a str, &'a Substitutions)>,
    slots: BTreeMap<Slot, Vec<&'a str>>,
}

/// Merges the given records, labelled by the object that produced them, and
/// renders the template of every destination they touch.
///
/// Records are processed in the given order, which determines the order of
/// texts within each slot and which main parameters win.
pub fn render_contributions<'a, I>(
    templates: &DestinationTemplates,
    records: I,
    config: &WriterConfig,
) -> Result<RenderedSetup>
where
    I: IntoIterator<Item = (&'a str, &'a Contribution)>,
{
    let mut warnings = Vec::new();
    let mut aggregates: BTreeMap<Destination, Aggregate<'a>> = BTreeMap::new();

    for (label, record) in records {
        let destination = record.destination();
        let aggregate = aggregates.entry(destination).or_default();

        if let Some(main) = record.main() {
            match aggregate.main {
                None => aggregate.main = Some((label, main)),
                Some((first, _)) => match config.main_conflict {
                    MainConflictPolicy::FirstWins => warnings.push(format!(
                        "Ignoring main parameters for {} from {}, already supplied by {}",
                        destination, label, first
                    )),
                    MainConflictPolicy::Reject => {
                        return Err(Error::MainConflict {
                            destination,
                            first: first.to_string(),
                            second: label.to_string(),
                        })
                    }
                },
            }
        }

        for (slot, text) in record.slots() {
            if slot.destination() != destination {
                return Err(Error::ForeignSlot { slot, destination });
            }
            aggregate.slots.entry(slot).or_default().push(text);
        }
    }

    let mut files = BTreeMap::new();
    for (destination, aggregate) in aggregates {
        let mut substitutions = aggregate
            .main
            .map(|(_, main)| main.clone())
            .unwrap_or_default();

        for &slot in destination.slots() {
            if substitutions.contains(slot.placeholder()) {
                return Err(Error::SubstitutionCollision {
                    destination,
                    name: slot.placeholder().to_string(),
                });
            }
            let texts = aggregate
                .slots
                .get(&slot)
                .map(Vec::as_slice)
                .unwrap_or_default();
            substitutions.insert(slot.placeholder(), slot.separator().join(texts));
        }

        let template = templates.get(destination);
        if config.render_mode == RenderMode::Permissive {
            let unused = template.unused_names(&substitutions);
            if !unused.is_empty() {
                warnings.push(format!(
                    "Template {} does not use {}",
                    destination,
                    unused.join(", ")
                ));
            }
        }
        files.insert(
            destination,
            template.render(&substitutions, config.render_mode)?,
        );
    }

    Ok(RenderedSetup { files, warnings })
}

/// Checks that every species referenced by an object is defined by an
/// earlier object, and that no species name is defined twice.
pub fn check_species_order(objects: &[&dyn SimulationObject]) -> Result<()> {
    let mut defined = HashSet::new();
    for object in objects {
        if let Some(dependency) = object.required_species() {
            if !defined.contains(dependency) {
                return Err(Error::DependencyOrder {
                    object: object.label().to_string(),
                    dependency: dependency.to_string(),
                });
            }
        }
        if let Some(name) = object.defined_species() {
            if !defined.insert(name) {
                return Err(Error::config(
                    object.label(),
                    format!("species {} is defined more than once", name),
                ));
            }
        }
    }
    Ok(())
}

/// Validates the objects and renders all files they contribute to, without
/// writing anything.
///
/// Notes recorded by the objects are included among the warnings.
pub fn render_simulation_files(
    objects: &[&dyn SimulationObject],
    templates: &DestinationTemplates,
    config: &WriterConfig,
) -> Result<RenderedSetup> {
    check_species_order(objects)?;

    let records = objects.iter().flat_map(|object| {
        object
            .contributions()
            .iter()
            .map(move |record| (object.label(), record))
    });
    let mut rendered = render_contributions(templates, records, config)?;

    let notes = objects
        .iter()
        .flat_map(|object| {
            object
                .notes()
                .iter()
                .map(move |note| format!("{}: {}", object.label(), note))
        })
        .collect::<Vec<_>>();
    let mut warnings = notes;
    warnings.append(&mut rendered.warnings);
    rendered.warnings = warnings;
    Ok(rendered)
}

/// Renders all files contributed by the objects and writes them below the
/// given root.
///
/// Nothing is written unless every destination renders successfully.
pub fn write_simulation_files(
    objects: &[&dyn SimulationObject],
    templates: &DestinationTemplates,
    layout: &OutputLayout,
    config: &WriterConfig,
) -> Result<RenderedSetup> {
    let rendered = render_simulation_files(objects, templates, config)?;
    rendered.print_warnings();
    rendered.write(layout, config.verbosity)?;
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::destination::Destination::*;

    fn templates() -> DestinationTemplates {
        DestinationTemplates::builtin()
            .with_template(Run, "n=${Nx}\n${Plugin}\nnames=${PluginName}")
            .with_template(Density, "base=${BASE_DENSITY}\n${DensityProfile}")
    }

    fn plugin_record(name: &str) -> Contribution {
        Contribution::new(Run)
            .with_slot(Slot::Plugin, format!("TBG_{}", name))
            .with_slot(Slot::PluginName, format!("!TBG_{}", name))
    }

    fn run_main(nx: usize) -> Contribution {
        Contribution::new(Run).with_main(Substitutions::new().with("Nx", nx))
    }

    fn render(records: &[(&str, &Contribution)], config: &WriterConfig) -> Result<RenderedSetup> {
        render_contributions(&templates(), records.iter().copied(), config)
    }

    #[test]
    fn rendering_is_idempotent() {
        let grid = run_main(128);
        let a = plugin_record("a");
        let records = [("grid", &grid), ("a", &a)];
        let first = render(&records, &WriterConfig::strict()).unwrap();
        let second = render(&records, &WriterConfig::strict()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn slot_texts_follow_record_order() {
        let grid = run_main(128);
        let a = plugin_record("a");
        let b = plugin_record("b");

        let forward = render(
            &[("grid", &grid), ("a", &a), ("b", &b)],
            &WriterConfig::strict(),
        )
        .unwrap();
        assert_eq!(
            forward.get(Run),
            Some("n=128\nTBG_a\nTBG_b\nnames=!TBG_a !TBG_b")
        );

        let backward = render(
            &[("grid", &grid), ("b", &b), ("a", &a)],
            &WriterConfig::strict(),
        )
        .unwrap();
        assert_eq!(
            backward.get(Run),
            Some("n=128\nTBG_b\nTBG_a\nnames=!TBG_b !TBG_a")
        );
    }

    #[test]
    fn slots_join_with_one_separator_less_than_texts() {
        let templates = DestinationTemplates::builtin()
            .with_template(SpeciesInitialization, "[${InitPipeline}]");
        for count in [0, 1, 3] {
            let records: Vec<_> = if count == 0 {
                vec![Contribution::new(SpeciesInitialization)]
            } else {
                (0..count)
                    .map(|i| {
                        Contribution::new(SpeciesInitialization)
                            .with_slot(Slot::InitPipeline, format!("step{}", i))
                    })
                    .collect()
            };
            let rendered = render_contributions(
                &templates,
                records.iter().map(|record| ("species", record)),
                &WriterConfig::strict(),
            )
            .unwrap();
            let text = rendered.get(SpeciesInitialization).unwrap();
            assert_eq!(text.matches(",\n").count(), count.max(1) - 1);
            if count == 0 {
                assert_eq!(text, "[]");
            }
        }
    }

    #[test]
    fn untouched_destinations_are_not_rendered() {
        let grid = run_main(64);
        let rendered = render(&[("grid", &grid)], &WriterConfig::strict()).unwrap();
        assert_eq!(rendered.destinations().collect::<Vec<_>>(), vec![Run]);
        assert!(rendered.get(FieldBackground).is_none());
    }

    #[test]
    fn main_conflicts_follow_policy() {
        let first = run_main(64);
        let second = run_main(128);
        let records = [("first", &first), ("second", &second)];

        let rendered = render(&records, &WriterConfig::default()).unwrap();
        assert!(rendered.get(Run).unwrap().starts_with("n=64\n"));
        assert_eq!(rendered.warnings().len(), 1);
        assert!(rendered.warnings()[0].contains("second"));

        match render(&records, &WriterConfig::strict()) {
            Err(Error::MainConflict {
                destination,
                first,
                second,
            }) => {
                assert_eq!(destination, Run);
                assert_eq!(first, "first");
                assert_eq!(second, "second");
            }
            other => panic!("Expected main conflict, got {:?}", other),
        }
    }

    #[test]
    fn slots_must_belong_to_destination() {
        let record = Contribution::new(Run).with_slot(Slot::Antenna, "antenna");
        assert!(matches!(
            render(&[("laser", &record)], &WriterConfig::default()),
            Err(Error::ForeignSlot {
                slot: Slot::Antenna,
                destination: Run
            })
        ));
    }

    #[test]
    fn main_parameters_must_not_shadow_slots() {
        let record = Contribution::new(Run).with_main(
            Substitutions::new()
                .with("Nx", 1)
                .with("Plugin", "hidden"),
        );
        assert!(matches!(
            render(&[("grid", &record)], &WriterConfig::default()),
            Err(Error::SubstitutionCollision { .. })
        ));
    }

    #[test]
    fn unused_main_parameters_are_warnings_unless_strict() {
        let record = Contribution::new(Density).with_main(
            Substitutions::new()
                .with("BASE_DENSITY", 1e24)
                .with("unused", 1),
        );
        let rendered = render(&[("species", &record)], &WriterConfig::default()).unwrap();
        assert_eq!(
            rendered.get(Density),
            Some("base=1.000000000000000e+24\n")
        );
        assert!(rendered.warnings()[0].contains("unused"));

        assert!(matches!(
            render(&[("species", &record)], &WriterConfig::strict()),
            Err(Error::UnusedSubstitution { .. })
        ));
    }

    struct Fixed {
        label: &'static str,
        contributions: Vec<Contribution>,
        notes: Vec<String>,
        defines: Option<&'static str>,
        requires: Option<&'static str>,
    }

    impl Fixed {
        fn new(label: &'static str, contributions: Vec<Contribution>) -> Self {
            Self {
                label,
                contributions,
                notes: Vec::new(),
                defines: None,
                requires: None,
            }
        }
    }

    impl SimulationObject for Fixed {
        fn label(&self) -> &str {
            self.label
        }
        fn contributions(&self) -> &[Contribution] {
            &self.contributions
        }
        fn notes(&self) -> &[String] {
            &self.notes
        }
        fn defined_species(&self) -> Option<&str> {
            self.defines
        }
        fn required_species(&self) -> Option<&str> {
            self.requires
        }
    }

    #[test]
    fn failed_rendering_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let layout = OutputLayout::new(dir.path());
        let grid = Fixed::new("grid", vec![run_main(64)]);
        let species = Fixed::new("species", vec![Contribution::new(Density)]);
        assert!(matches!(
            write_simulation_files(
                &[&grid, &species],
                &templates(),
                &layout,
                &WriterConfig::default()
            ),
            Err(Error::MissingPlaceholder { .. })
        ));
        assert!(!layout.path(Run).exists());
    }

    #[test]
    fn species_must_be_defined_before_use() {
        let electrons = Fixed {
            defines: Some("e"),
            ..Fixed::new("species e", Vec::new())
        };
        let ions = Fixed {
            defines: Some("N"),
            requires: Some("e"),
            ..Fixed::new("species N", Vec::new())
        };
        assert!(check_species_order(&[&electrons, &ions]).is_ok());
        assert!(matches!(
            check_species_order(&[&ions, &electrons]),
            Err(Error::DependencyOrder { .. })
        ));
        assert!(matches!(
            check_species_order(&[&electrons, &electrons]),
            Err(Error::Config { .. })
        ));
    }

    #[test]
    fn object_notes_come_first_among_warnings() {
        let grid = Fixed {
            notes: vec!["enlarged".to_string()],
            ..Fixed::new("grid", vec![run_main(64), run_main(32)])
        };
        let rendered =
            render_simulation_files(&[&grid], &templates(), &WriterConfig::default()).unwrap();
        assert_eq!(rendered.warnings().len(), 2);
        assert_eq!(rendered.warnings()[0], "grid: enlarged");
    }

    #[test]
    fn written_files_land_in_their_directories() {
        let dir = tempfile::tempdir().unwrap();
        let layout = OutputLayout::new(dir.path());
        let grid = run_main(64);
        let density = Contribution::new(Density)
            .with_main(Substitutions::new().with("BASE_DENSITY", 2.0));
        let rendered = render(
            &[("grid", &grid), ("species", &density)],
            &WriterConfig::strict(),
        )
        .unwrap();

        let paths = rendered.write(&layout, Verbosity::Quiet).unwrap();
        assert_eq!(paths, vec![layout.path(Density), layout.path(Run)]);
        assert_eq!(
            utils::read_text_file(layout.path(Run)).unwrap(),
            "n=64\n\nnames="
        );

        // Writing again replaces the files
        rendered.write(&layout, Verbosity::Quiet).unwrap();
        assert_eq!(
            utils::read_text_file(layout.path(Density)).unwrap(),
            "base=2.000000000000000e+00\n"
        );
    }
}
