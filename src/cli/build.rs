//! Function for building the command line hierarchy.

use super::{
    codelets::create_codelets_subcommand, completions::create_completions_subcommand,
    generate::create_generate_subcommand,
};
use clap::{self, Arg, Command};

/// Build the `pogit` command line hierarchy.
pub fn build() -> Command<'static> {
    Command::new(clap::crate_name!())
        .version(clap::crate_version!())
        .about(clap::crate_description!())
        .disable_help_subcommand(true)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("timing")
                .short('t')
                .long("timing")
                .global(true)
                .help("Display elapsed time when done"),
        )
        .subcommand(create_generate_subcommand())
        .subcommand(create_codelets_subcommand())
        .subcommand(create_completions_subcommand())
}
