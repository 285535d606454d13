//! Error types and macros for reporting errors.

use crate::{codelets::Feature, contribution::Slot, destination::Destination};
use std::{io, process};
use thiserror::Error;

/// Errors that can occur while configuring, rendering or writing a simulation setup.
#[derive(Debug, Error)]
pub enum Error {
    /// User-supplied parameters of a simulation object are invalid or mutually exclusive.
    #[error("Invalid configuration for {object}: {reason}")]
    Config { object: String, reason: String },

    #[error("Unknown codelet feature {0}")]
    UnknownFeature(String),

    #[error("No {feature} codelet named {variant} (available: {available})")]
    UnknownVariant {
        feature: Feature,
        variant: String,
        available: String,
    },

    #[error("Template {template} references {placeholder}, which was not supplied")]
    MissingPlaceholder {
        template: String,
        placeholder: String,
    },

    #[error("Template {template} does not reference substitution(s) {names}")]
    UnusedSubstitution { template: String, names: String },

    #[error("Value for {name} is not a finite number")]
    NonFiniteValue { name: String },

    #[error("Both {first} and {second} supply the main parameters for {destination}")]
    MainConflict {
        destination: Destination,
        first: String,
        second: String,
    },

    #[error("Substitution {name} for {destination} is supplied both as a main parameter and as a slot")]
    SubstitutionCollision {
        destination: Destination,
        name: String,
    },

    #[error("Slot {slot} does not belong to {destination}")]
    ForeignSlot {
        slot: Slot,
        destination: Destination,
    },

    #[error("{object} depends on species {dependency}, which is not defined before it")]
    DependencyOrder { object: String, dependency: String },

    #[error("Command {command} failed ({status})")]
    Toolchain {
        command: String,
        status: process::ExitStatus,
    },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[cfg(feature = "serialization")]
    #[error("Could not parse setup file: {0}")]
    Setup(#[from] serde_json::Error),
}

impl Error {
    /// Convenience constructor for configuration errors.
    pub fn config<O, R>(object: O, reason: R) -> Self
    where
        O: Into<String>,
        R: Into<String>,
    {
        Self::Config {
            object: object.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(not(feature = "for-testing"))]
#[macro_export]
macro_rules! exit_with_error {
    ($($print_arg:tt)*) => {{
        eprintln!($($print_arg)*);
        quit::with_code(1);
    }};
}

#[cfg(feature = "for-testing")]
#[macro_export]
macro_rules! exit_with_error {
    ($($print_arg:tt)*) => {{
        panic!($($print_arg)*);
    }};
}

#[macro_export]
macro_rules! exit_on_error {
    ($result:expr, $($print_arg:tt)*) => {
        match $result {
            Ok(value) => value,
            Err(err) => {
                $crate::exit_with_error!($($print_arg)*, err)
            }
        }
    };
}

#[macro_export]
macro_rules! exit_on_false {
    ($logic:expr, $($print_arg:tt)*) => {
        if $logic {
            true
        } else {
            $crate::exit_with_error!($($print_arg)*)
        }
    };
}

#[macro_export]
macro_rules! exit_on_none {
    ($option:expr, $($print_arg:tt)*) => {
        $option.unwrap_or_else(|| $crate::exit_with_error!($($print_arg)*))
    };
}
