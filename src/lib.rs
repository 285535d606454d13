//! The `pogit` crate generates the parameter and run-configuration files of a
//! PIConGPU simulation from a small set of typed simulation objects.
//!
//! Objects (grid, laser, species, plugins) turn user parameters into
//! contribution records, and the [`writer`] aggregates the records of all
//! objects into the templated files of each destination.

pub mod error;
pub mod codelets;
pub mod constants;
pub mod contribution;
pub mod destination;
pub mod geometry;
pub mod io;
pub mod num;
pub mod periodic_table;
pub mod setup;
pub mod submission;
pub mod template;
pub mod writer;

#[cfg(feature = "cli")]
pub mod cli;
