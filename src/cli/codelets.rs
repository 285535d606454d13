//! Command line interface for inspecting the codelet library.

use crate::{
    codelets::{self, Feature},
    exit_on_error,
};
use clap::{Arg, ArgMatches, Command};

/// Creates a subcommand for listing and printing codelets.
pub fn create_codelets_subcommand() -> Command<'static> {
    Command::new("codelets")
        .about("List the available codelets or print one of them")
        .arg(
            Arg::new("feature")
                .value_name("FEATURE")
                .help("Only list the codelets implementing this feature"),
        )
        .arg(
            Arg::new("variant")
                .value_name("VARIANT")
                .requires("feature")
                .help("Print the codelet with this name and its placeholders"),
        )
}

/// Runs the actions for the `codelets` subcommand using the given arguments.
pub fn run_codelets_subcommand(arguments: &ArgMatches) {
    let feature: Option<Feature> =
        super::utils::get_value_from_parseable_argument(arguments, "feature");

    match (feature, arguments.value_of("variant")) {
        (Some(feature), Some(variant)) => {
            let template = exit_on_error!(
                codelets::lookup(feature, variant),
                "Error: Could not find codelet: {}"
            );
            println!(
                "Placeholders: {}",
                template.placeholders().into_iter().collect::<Vec<_>>().join(", ")
            );
            println!("{}", template.text());
        }
        (Some(feature), None) => {
            for variant in codelets::variants(feature) {
                println!("{}", variant);
            }
        }
        (None, _) => {
            for feature in Feature::all() {
                println!("{}: {}", feature, codelets::variants(feature).join(", "));
            }
        }
    }
}
