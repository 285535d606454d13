//! Command line interface for generating the files of a simulation setup.

use super::utils;
use crate::{
    destination::{DestinationTemplates, OutputLayout},
    exit_on_error, exit_on_none,
    setup::{
        file::{ObjectSetup, SetupFile},
        grid::TimeStepConflictPolicy,
        SimulationObject,
    },
    submission::PicToolchain,
    writer,
};
use clap::{Arg, ArgMatches, Command};
use std::path::PathBuf;

/// Creates a subcommand for generating simulation files from a setup file.
pub fn create_generate_subcommand() -> Command<'static> {
    Command::new("generate")
        .about("Generate simulation parameter files from a setup file")
        .arg(
            Arg::new("setup-file")
                .value_name("SETUP_FILE")
                .required(true)
                .help("Path to the JSON file describing the simulation objects"),
        )
        .arg(
            Arg::new("output-dir")
                .short('o')
                .long("output-dir")
                .require_equals(true)
                .value_name("DIR")
                .takes_value(true)
                .default_value(".")
                .help("Root directory of the generated setup"),
        )
        .arg(
            Arg::new("template-dir")
                .long("template-dir")
                .require_equals(true)
                .value_name("DIR")
                .takes_value(true)
                .help("Directory with <name>.template files replacing the built-in templates"),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .help("Treat values not used by a template as errors"),
        )
        .arg(
            Arg::new("reject-main-conflicts")
                .long("reject-main-conflicts")
                .help("Fail when several objects supply the main parameters of the same file"),
        )
        .arg(
            Arg::new("lenient-time-step")
                .long("lenient-time-step")
                .help("Prefer the explicit time step when a CFL factor is also given"),
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .conflicts_with("submit")
                .help("Render all files and list them without writing anything"),
        )
        .arg(
            Arg::new("submit")
                .long("submit")
                .help("Build the setup and submit it using the settings in the setup file"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Print status messages"),
        )
}

/// Runs the actions for the `generate` subcommand using the given arguments.
pub fn run_generate_subcommand(arguments: &ArgMatches) {
    let setup_file_path = PathBuf::from(
        arguments
            .value_of("setup-file")
            .expect("No value for required argument"),
    );
    let output_dir_path = PathBuf::from(
        arguments
            .value_of("output-dir")
            .expect("No value for argument with default"),
    );
    let config = utils::writer_config_from_arguments(arguments);

    let mut setup = exit_on_error!(
        SetupFile::read(&setup_file_path),
        "Error: Could not read setup file {0}: {1}",
        setup_file_path.display()
    );

    if arguments.is_present("lenient-time-step") {
        for object in setup.objects.iter_mut() {
            if let ObjectSetup::Grid(parameters) = object {
                parameters.time_step_policy = TimeStepConflictPolicy::PreferExplicit;
            }
        }
    }

    let submission = if arguments.is_present("submit") {
        Some(exit_on_none!(
            setup.submission.as_ref(),
            "Error: No submission settings in setup file"
        ))
    } else {
        None
    };

    let objects = exit_on_error!(setup.build_objects(), "Error: Invalid setup: {}");
    let objects: Vec<&dyn SimulationObject> = objects.iter().map(|object| &**object).collect();

    let mut templates = DestinationTemplates::builtin();
    if let Some(template_dir_path) = arguments.value_of("template-dir") {
        templates = exit_on_error!(
            templates.with_overrides_from_directory(template_dir_path),
            "Error: Could not read templates: {}"
        );
    }

    let layout = OutputLayout::new(output_dir_path);

    if arguments.is_present("dry-run") {
        let rendered = exit_on_error!(
            writer::render_simulation_files(&objects, &templates, &config),
            "Error: Could not render simulation files: {}"
        );
        rendered.print_warnings();
        for destination in rendered.destinations() {
            println!("Would write {}", layout.path(destination).display());
        }
        return;
    }

    exit_on_error!(
        writer::write_simulation_files(&objects, &templates, &layout, &config),
        "Error: Could not generate simulation files: {}"
    );

    if let Some(settings) = submission {
        let toolchain = PicToolchain::new(layout.root(), config.verbosity);
        let job = exit_on_error!(
            toolchain.build_and_submit(&layout, settings),
            "Error: Could not submit simulation: {}"
        );
        if config.verbosity.print_messages() {
            println!("Submitted simulation as process {}", job.id());
        }
    }
}
