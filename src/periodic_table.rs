//! Atomic data for the elements commonly used as ionizable species.

use crate::error::{Error, Result};

/// Properties of a chemical element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Element {
    /// Name as used by the ionization data of the simulation code.
    pub name: &'static str,
    pub symbol: &'static str,
    /// Standard atomic weight [u].
    pub atomic_mass: f64,
    pub atomic_number: u32,
}

const fn element(
    name: &'static str,
    symbol: &'static str,
    atomic_mass: f64,
    atomic_number: u32,
) -> Element {
    Element {
        name,
        symbol,
        atomic_mass,
        atomic_number,
    }
}

const ELEMENTS: [Element; 22] = [
    element("Hydrogen", "H", 1.008, 1),
    element("Helium", "He", 4.002_602, 2),
    element("Lithium", "Li", 6.94, 3),
    element("Beryllium", "Be", 9.012_183_1, 4),
    element("Boron", "B", 10.81, 5),
    element("Carbon", "C", 12.011, 6),
    element("Nitrogen", "N", 14.007, 7),
    element("Oxygen", "O", 15.999, 8),
    element("Fluorine", "F", 18.998_403_163, 9),
    element("Neon", "Ne", 20.179_7, 10),
    element("Sodium", "Na", 22.989_769_28, 11),
    element("Magnesium", "Mg", 24.305, 12),
    element("Aluminium", "Al", 26.981_538_5, 13),
    element("Silicon", "Si", 28.085, 14),
    element("Phosphorus", "P", 30.973_761_998, 15),
    element("Sulfur", "S", 32.06, 16),
    element("Chlorine", "Cl", 35.45, 17),
    element("Argon", "Ar", 39.948, 18),
    element("Copper", "Cu", 63.546, 29),
    element("Silver", "Ag", 107.868_2, 47),
    element("Xenon", "Xe", 131.293, 54),
    element("Gold", "Au", 196.966_569, 79),
];

/// Looks up an element by full name (case-insensitive) or chemical symbol.
pub fn lookup(name: &str) -> Result<&'static Element> {
    ELEMENTS
        .iter()
        .find(|element| element.name.eq_ignore_ascii_case(name) || element.symbol == name)
        .ok_or_else(|| {
            Error::config(
                "periodic table",
                format!("unknown element {}", name),
            )
        })
}

/// Returns all elements in the table, ordered by atomic number.
pub fn elements() -> &'static [Element] {
    &ELEMENTS
}
