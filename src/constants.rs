//! Physical constants.

/// Floating-point precision to use for constants.
#[allow(non_camel_case_types)]
pub type fcn = f64;

/// Speed of light in vacuum [m/s].
pub const SPEED_OF_LIGHT: fcn = 2.997_924_58e8;
/// Proton to electron mass ratio.
pub const PROTON_TO_ELECTRON_MASS_RATIO: fcn = 1836.152672;
