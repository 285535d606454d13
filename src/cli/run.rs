//! Function for running the command line program.

use super::{
    build, codelets::run_codelets_subcommand, completions::run_completions_subcommand,
    generate::run_generate_subcommand,
};
use clap::ArgMatches;
use std::time::Instant;

/// Runs the `pogit` command line program.
pub fn run() {
    run_with_args(build::build().get_matches());
}

/// Runs the `pogit` command line program with already parsed arguments.
pub fn run_with_args(arguments: ArgMatches) {
    let start_instant = Instant::now();

    match arguments.subcommand() {
        Some(("generate", generate_arguments)) => run_generate_subcommand(generate_arguments),
        Some(("codelets", codelets_arguments)) => run_codelets_subcommand(codelets_arguments),
        Some(("completions", completions_arguments)) => {
            run_completions_subcommand(completions_arguments)
        }
        _ => {}
    }

    if arguments.is_present("timing") {
        println!("Elapsed time: {} s", start_instant.elapsed().as_secs_f64());
    }
}
