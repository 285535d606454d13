//! File input/output.

pub mod utils;

/// Whether or not to print non-critical status messages.
///
/// Warnings are printed regardless of verbosity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Messages,
}

impl Verbosity {
    pub fn print_messages(&self) -> bool {
        match self {
            Self::Quiet => false,
            Self::Messages => true,
        }
    }
}

impl Default for Verbosity {
    fn default() -> Self {
        Self::Quiet
    }
}
