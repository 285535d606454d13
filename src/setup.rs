//! Simulation objects that turn user parameters into contribution records.

pub mod grid;
pub mod laser;
pub mod plugin;
pub mod species;

#[cfg(feature = "serialization")]
pub mod file;

use crate::{
    codelets::{self, Feature},
    contribution::Contribution,
    error::{Error, Result},
    template::{RenderMode, Substitutions},
};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref IDENTIFIER_REGEX: Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap();
}

/// A configured simulation concept (grid, laser, species, diagnostic).
///
/// Objects validate and derive all their parameters on construction and keep
/// the rendered contribution records until the writer consumes them.
pub trait SimulationObject {
    /// Short label identifying the object in messages.
    fn label(&self) -> &str;

    /// The records this object contributes, in a fixed order.
    fn contributions(&self) -> &[Contribution];

    /// Warnings about adjustments made to the user parameters.
    fn notes(&self) -> &[String] {
        &[]
    }

    /// Name of the particle species this object defines, if any.
    fn defined_species(&self) -> Option<&str> {
        None
    }

    /// Name of a species that must be defined before this object.
    fn required_species(&self) -> Option<&str> {
        None
    }
}

/// Renders the given codelet with the parameters of an object.
///
/// Objects keep one parameter set for all their codelets, so parameters a
/// codelet does not use are ignored here.
pub(crate) fn render_codelet(
    feature: Feature,
    variant: &str,
    parameters: &Substitutions,
) -> Result<String> {
    codelets::lookup(feature, variant)?.render(parameters, RenderMode::Permissive)
}

/// Whether the given name can be used in generated C++ and shell identifiers.
pub(crate) fn is_identifier(name: &str) -> bool {
    IDENTIFIER_REGEX.is_match(name)
}

/// Fails if user-supplied values use any of the names the object sets itself.
pub(crate) fn ensure_not_shadowed<'a, I>(
    label: &str,
    user: &Substitutions,
    reserved: I,
) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let shadowed: Vec<_> = reserved
        .into_iter()
        .filter(|&name| user.contains(name))
        .collect();
    if shadowed.is_empty() {
        Ok(())
    } else {
        Err(Error::config(
            label,
            format!(
                "cannot override {}, which is set by the object",
                shadowed.join(", ")
            ),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_are_recognized() {
        assert!(is_identifier("Electrons"));
        assert!(is_identifier("_e2"));
        assert!(!is_identifier("2e"));
        assert!(!is_identifier("raw data"));
        assert!(!is_identifier(""));
    }

    #[test]
    fn shadowed_names_are_listed() {
        let user = Substitutions::new().with("source", "species_all").with("ext", "bp");
        assert!(ensure_not_shadowed("plugin raw", &user, ["name", "period"]).is_ok());
        match ensure_not_shadowed("plugin raw", &user, ["name", "source"]) {
            Err(Error::Config { object, reason }) => {
                assert_eq!(object, "plugin raw");
                assert!(reason.contains("source"));
                assert!(!reason.contains("name"));
            }
            other => panic!("Unexpected result {:?}", other),
        }
    }
}
