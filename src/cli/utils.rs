//! Utilities for creating the command line interface.

use crate::{
    exit_on_error,
    io::Verbosity,
    template::RenderMode,
    writer::{MainConflictPolicy, WriterConfig},
};
use clap::ArgMatches;
use std::str::FromStr;

pub fn parse_value_string<T>(argument_name: &str, value_string: &str) -> T
where
    T: FromStr,
    <T as FromStr>::Err: std::fmt::Display,
{
    exit_on_error!(
        value_string.parse(),
        "Error: Could not parse value for {0}: {1}",
        argument_name
    )
}

pub fn get_value_from_required_parseable_argument<T>(
    arguments: &ArgMatches,
    argument_name: &str,
) -> T
where
    T: FromStr,
    <T as FromStr>::Err: std::fmt::Display,
{
    parse_value_string(
        argument_name,
        arguments
            .value_of(argument_name)
            .expect("No value for required argument"),
    )
}

pub fn get_value_from_parseable_argument<T>(
    arguments: &ArgMatches,
    argument_name: &str,
) -> Option<T>
where
    T: FromStr,
    <T as FromStr>::Err: std::fmt::Display,
{
    arguments
        .value_of(argument_name)
        .map(|value_string| parse_value_string(argument_name, value_string))
}

pub fn parse_verbosity(arguments: &ArgMatches) -> Verbosity {
    if arguments.is_present("verbose") {
        Verbosity::Messages
    } else {
        Verbosity::Quiet
    }
}

pub fn writer_config_from_arguments(arguments: &ArgMatches) -> WriterConfig {
    WriterConfig {
        main_conflict: if arguments.is_present("reject-main-conflicts") {
            MainConflictPolicy::Reject
        } else {
            MainConflictPolicy::FirstWins
        },
        render_mode: if arguments.is_present("strict") {
            RenderMode::Strict
        } else {
            RenderMode::Permissive
        },
        verbosity: parse_verbosity(arguments),
    }
}
