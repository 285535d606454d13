//! Rendering of text templates with named `${placeholder}` substitutions.

use crate::{
    error::{Error, Result},
    num,
};
use lazy_static::lazy_static;
use regex::Regex;
use std::{
    borrow::Cow,
    collections::{btree_map, BTreeMap, BTreeSet},
    fmt,
};

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref PLACEHOLDER_REGEX: Regex = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap();
}

/// A value that can be substituted into a template.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialization", serde(untagged))]
pub enum Value {
    Int(i64),
    /// Unsigned integer too large for `Int`.
    UInt(u64),
    Float(f64),
    Text(String),
}

impl Value {
    /// Returns the literal text of the value.
    ///
    /// Floats are written in 15-digit scientific notation and integers as
    /// plain decimal digits. Text is inserted verbatim.
    pub fn render(&self, name: &str) -> Result<Cow<'_, str>> {
        match self {
            Self::Int(value) => Ok(Cow::Owned(num::format_int_literal(*value))),
            Self::UInt(value) => Ok(Cow::Owned(num::format_int_literal(*value))),
            Self::Float(value) => num::format_float_literal(*value)
                .map(Cow::Owned)
                .ok_or_else(|| Error::NonFiniteValue {
                    name: name.to_string(),
                }),
            Self::Text(text) => Ok(Cow::Borrowed(text.as_str())),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

macro_rules! impl_from_int_for_value {
    ($($int:ty),*) => {
        $(
            impl From<$int> for Value {
                fn from(value: $int) -> Self {
                    Self::Int(i64::from(value))
                }
            }
        )*
    };
}

impl_from_int_for_value!(i32, i64, u32);

macro_rules! impl_from_unsigned_for_value {
    ($($int:ty),*) => {
        $(
            impl From<$int> for Value {
                fn from(value: $int) -> Self {
                    match i64::try_from(value) {
                        Ok(value) => Self::Int(value),
                        Err(_) => Self::UInt(value as u64),
                    }
                }
            }
        )*
    };
}

impl_from_unsigned_for_value!(u64, usize);

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// Ordered mapping from placeholder names to values.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialization", serde(transparent))]
pub struct Substitutions(BTreeMap<String, Value>);

impl Substitutions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value for the given name, returning any value it replaces.
    pub fn insert<N, V>(&mut self, name: N, value: V) -> Option<Value>
    where
        N: Into<String>,
        V: Into<Value>,
    {
        self.0.insert(name.into(), value.into())
    }

    /// Builder-style variant of `insert`.
    pub fn with<N, V>(mut self, name: N, value: V) -> Self
    where
        N: Into<String>,
        V: Into<Value>,
    {
        self.insert(name, value);
        self
    }

    /// Copies over the values for the given names from another set.
    ///
    /// Names missing from `other` are skipped.
    pub fn with_subset_of(mut self, other: &Substitutions, names: &[&str]) -> Self {
        for &name in names {
            if let Some(value) = other.get(name) {
                self.0.insert(name.to_string(), value.clone());
            }
        }
        self
    }

    /// Adds all entries of `other`, overwriting entries with the same name.
    pub fn extend(&mut self, other: &Substitutions) {
        self.0
            .extend(other.0.iter().map(|(k, v)| (k.clone(), v.clone())));
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a Substitutions {
    type Item = (&'a String, &'a Value);
    type IntoIter = btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Whether substitutions that the template never references are tolerated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderMode {
    /// Unused substitutions are ignored (the caller may report them as warnings).
    Permissive,
    /// Unused substitutions are an error.
    Strict,
}

impl Default for RenderMode {
    fn default() -> Self {
        Self::Permissive
    }
}

/// Immutable template text with `${name}` placeholders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Template {
    name: Cow<'static, str>,
    text: Cow<'static, str>,
}

impl Template {
    /// Creates a template from static text.
    pub const fn from_static(name: &'static str, text: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            text: Cow::Borrowed(text),
        }
    }

    /// Creates a template from owned text.
    pub fn new<N, T>(name: N, text: T) -> Self
    where
        N: Into<String>,
        T: Into<String>,
    {
        Self {
            name: Cow::Owned(name.into()),
            text: Cow::Owned(text.into()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the set of placeholder names referenced by the template.
    pub fn placeholders(&self) -> BTreeSet<&str> {
        PLACEHOLDER_REGEX
            .captures_iter(&self.text)
            .filter_map(|captures| captures.get(1).map(|m| m.as_str()))
            .collect()
    }

    /// Returns the names in `substitutions` that the template never references.
    pub fn unused_names<'a>(&self, substitutions: &'a Substitutions) -> Vec<&'a str> {
        let placeholders = self.placeholders();
        substitutions
            .names()
            .filter(|name| !placeholders.contains(name))
            .collect()
    }

    /// Substitutes every placeholder with the literal text of its value.
    ///
    /// Fails if a placeholder has no value, or in strict mode if a
    /// substitution is never referenced.
    pub fn render(&self, substitutions: &Substitutions, mode: RenderMode) -> Result<String> {
        if mode == RenderMode::Strict {
            let unused = self.unused_names(substitutions);
            if !unused.is_empty() {
                return Err(Error::UnusedSubstitution {
                    template: self.name().to_string(),
                    names: unused.join(", "),
                });
            }
        }

        let mut rendered = String::with_capacity(self.text.len());
        let mut last_end = 0;
        for captures in PLACEHOLDER_REGEX.captures_iter(&self.text) {
            let whole = captures.get(0).expect("Capture group 0 always exists");
            let name = &captures[1];
            let value = substitutions
                .get(name)
                .ok_or_else(|| Error::MissingPlaceholder {
                    template: self.name().to_string(),
                    placeholder: name.to_string(),
                })?;
            rendered.push_str(&self.text[last_end..whole.start()]);
            rendered.push_str(&value.render(name)?);
            last_end = whole.end();
        }
        rendered.push_str(&self.text[last_end..]);
        Ok(rendered)
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn laser_snippet() -> Template {
        Template::from_static(
            "snippet",
            "constexpr float_64 A0( ${a0} );\nconstexpr int32_t ix( ${ix} ); // ${comment}",
        )
    }

    #[test]
    fn rendering_substitutes_all_placeholders() {
        let substitutions = Substitutions::new()
            .with("a0", 3.0)
            .with("ix", 64_u32)
            .with("comment", "centre");
        let text = laser_snippet()
            .render(&substitutions, RenderMode::Strict)
            .unwrap();
        assert_eq!(
            text,
            "constexpr float_64 A0( 3.000000000000000e+00 );\nconstexpr int32_t ix( 64 ); // centre"
        );
    }

    #[test]
    fn large_unsigned_values_render_exactly() {
        let template = Template::from_static("run", "steps=${Nsteps} cells=${Nx}");
        let substitutions = Substitutions::new()
            .with("Nsteps", u64::MAX)
            .with("Nx", 128_usize);
        assert_eq!(substitutions.get("Nx"), Some(&Value::Int(128)));
        let text = template.render(&substitutions, RenderMode::Strict).unwrap();
        assert_eq!(text, "steps=18446744073709551615 cells=128");
    }

    #[test]
    fn missing_placeholder_is_an_error() {
        let substitutions = Substitutions::new().with("a0", 3.0).with("ix", 1);
        match laser_snippet().render(&substitutions, RenderMode::Permissive) {
            Err(Error::MissingPlaceholder {
                template,
                placeholder,
            }) => {
                assert_eq!(template, "snippet");
                assert_eq!(placeholder, "comment");
            }
            other => panic!("Unexpected result {:?}", other),
        }
    }

    #[test]
    fn unused_substitutions_only_fail_in_strict_mode() {
        let substitutions = Substitutions::new()
            .with("a0", 1.0)
            .with("ix", 0)
            .with("comment", "")
            .with("waist", 5e-6);
        let template = laser_snippet();
        assert!(template
            .render(&substitutions, RenderMode::Permissive)
            .is_ok());
        assert_eq!(template.unused_names(&substitutions), vec!["waist"]);
        assert!(matches!(
            template.render(&substitutions, RenderMode::Strict),
            Err(Error::UnusedSubstitution { .. })
        ));
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let template = Template::from_static("t", "${x}");
        let substitutions = Substitutions::new().with("x", f64::NAN);
        assert!(matches!(
            template.render(&substitutions, RenderMode::Permissive),
            Err(Error::NonFiniteValue { .. })
        ));
    }

    #[test]
    fn text_without_placeholder_syntax_is_left_alone() {
        let template = Template::from_static(
            "run",
            "TBG_tasks=\"$(( TBG_devices_x * TBG_devices_y ))\"\n\"$TBG_cfgPath\"/submitAction.sh",
        );
        assert!(template.placeholders().is_empty());
        assert_eq!(
            template
                .render(&Substitutions::new(), RenderMode::Strict)
                .unwrap(),
            template.text()
        );
    }

    #[test]
    fn repeated_rendering_is_identical() {
        let substitutions = Substitutions::new()
            .with("a0", 2.0)
            .with("ix", 3)
            .with("comment", "x");
        let first = laser_snippet()
            .render(&substitutions, RenderMode::Strict)
            .unwrap();
        let second = laser_snippet()
            .render(&substitutions, RenderMode::Strict)
            .unwrap();
        assert_eq!(first, second);
    }
}
