//! Numerical grid and field solver.

use super::SimulationObject;
use crate::{
    constants::SPEED_OF_LIGHT,
    contribution::Contribution,
    destination::Destination,
    error::{Error, Result},
    geometry::{
        Dim3::{self, X, Y, Z},
        Dimensionality, In3D,
    },
    num,
    template::Substitutions,
};
use std::fmt;

#[cfg(feature = "serialization")]
use serde::Deserialize;

/// Time step factor relative to the Courant limit used when nothing else is given.
pub const DEFAULT_CFL_FACTOR: f64 = 0.995;

/// Maxwell solver scheme.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Deserialize))]
pub enum FieldSolverKind {
    Yee,
    /// Scheme suppressing numerical Cherenkov instability.
    Lehe,
    DirSplitting,
    /// Disables the vacuum update of the fields.
    None,
}

impl fmt::Display for FieldSolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Yee => "Yee",
            Self::Lehe => "Lehe",
            Self::DirSplitting => "DirSplitting",
            Self::None => "None",
        })
    }
}

impl Default for FieldSolverKind {
    fn default() -> Self {
        Self::Yee
    }
}

/// Smoothing applied to the currents before the field update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Deserialize))]
pub enum CurrentSmoothing {
    None,
    Binomial,
    NoneDS,
}

impl fmt::Display for CurrentSmoothing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::None => "None",
            Self::Binomial => "Binomial",
            Self::NoneDS => "NoneDS",
        })
    }
}

impl Default for CurrentSmoothing {
    fn default() -> Self {
        Self::None
    }
}

/// How to resolve a time step given both explicitly and as a CFL factor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Deserialize))]
pub enum TimeStepConflictPolicy {
    /// Treat it as a configuration error.
    Reject,
    /// Warn and use the explicit time step.
    PreferExplicit,
}

impl Default for TimeStepConflictPolicy {
    fn default() -> Self {
        Self::Reject
    }
}

/// Thickness (in cells) and strength of the absorbing layer at the lower and
/// upper boundary of each axis.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Deserialize))]
pub struct Absorber {
    pub cells: In3D<[u32; 2]>,
    pub strength: In3D<[f64; 2]>,
}

impl Default for Absorber {
    fn default() -> Self {
        Self {
            cells: In3D::new([32, 32], [64, 64], [32, 32]),
            strength: In3D::new([1e-3, 1e-3], [1e-3, 1e-3], [1e-3, 1e-3]),
        }
    }
}

const ABSORBER_LIMITS: &[&str] = &["min", "max"];

/// User-facing parameters of the grid and solver.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Deserialize))]
#[cfg_attr(feature = "serialization", serde(deny_unknown_fields))]
pub struct GridSolverParameters {
    /// Size of the simulation box [m].
    pub box_size: In3D<f64>,
    /// Requested number of cells along each axis.
    pub cell_counts: In3D<usize>,
    /// Number of time steps to simulate.
    pub steps: u64,
    /// Number of devices along each axis.
    #[cfg_attr(feature = "serialization", serde(default = "default_decomposition"))]
    pub decomposition: In3D<usize>,
    #[cfg_attr(feature = "serialization", serde(default))]
    pub dimensionality: Dimensionality,
    /// Time step as a fraction of the Courant limit.
    pub cfl_factor: Option<f64>,
    /// Explicit time step [s].
    pub time_step: Option<f64>,
    #[cfg_attr(feature = "serialization", serde(default))]
    pub time_step_policy: TimeStepConflictPolicy,
    #[cfg_attr(feature = "serialization", serde(default))]
    pub absorber: Absorber,
    #[cfg_attr(feature = "serialization", serde(default))]
    pub solver: FieldSolverKind,
    #[cfg_attr(feature = "serialization", serde(default))]
    pub current_smoothing: CurrentSmoothing,
    #[cfg_attr(feature = "serialization", serde(default))]
    pub moving_window: bool,
    /// Fraction of the box a virtual photon must cross before the window moves.
    #[cfg_attr(feature = "serialization", serde(default = "default_move_point"))]
    pub move_point: f64,
}

fn default_decomposition() -> In3D<usize> {
    In3D::new(1, 2, 1)
}

fn default_move_point() -> f64 {
    1.0
}

impl GridSolverParameters {
    /// Creates grid parameters with default values for everything except
    /// the box size, cell counts and number of steps.
    pub fn new(box_size: In3D<f64>, cell_counts: In3D<usize>, steps: u64) -> Self {
        Self {
            box_size,
            cell_counts,
            steps,
            decomposition: default_decomposition(),
            dimensionality: Dimensionality::default(),
            cfl_factor: None,
            time_step: None,
            time_step_policy: TimeStepConflictPolicy::default(),
            absorber: Absorber::default(),
            solver: FieldSolverKind::default(),
            current_smoothing: CurrentSmoothing::default(),
            moving_window: false,
            move_point: default_move_point(),
        }
    }
}

/// Returns the super cell shape used for the given dimensionality.
pub fn super_cell_size(dimensionality: Dimensionality) -> In3D<usize> {
    match dimensionality {
        Dimensionality::Three => In3D::new(8, 8, 4),
        Dimensionality::Two => In3D::new(16, 16, 1),
    }
}

/// Self-consistent discretization derived from `GridSolverParameters`.
#[derive(Clone, Debug)]
pub struct GridSolver {
    dimensionality: Dimensionality,
    super_cell: In3D<usize>,
    decomposition: In3D<usize>,
    cell_counts: In3D<usize>,
    box_size: In3D<f64>,
    cell_size: In3D<f64>,
    time_step: f64,
    contributions: Vec<Contribution>,
    notes: Vec<String>,
}

impl GridSolver {
    const LABEL: &'static str = "grid";

    pub fn new(parameters: GridSolverParameters) -> Result<Self> {
        Self::validate(&parameters)?;

        let dimensionality = parameters.dimensionality;
        let super_cell = super_cell_size(dimensionality);
        let decomposition = parameters.decomposition;
        let mut notes = Vec::new();

        let mut cell_counts = In3D::with_each_component(|dim| {
            num::round_up_to_multiple(
                parameters.cell_counts[dim],
                decomposition[dim] * super_cell[dim],
            )
        });
        let mut box_size = parameters.box_size;

        if parameters.moving_window {
            let requested_count = parameters.cell_counts[Y];
            let count = moving_window_cell_count(requested_count, decomposition[Y], super_cell[Y]);
            box_size[Y] *= count as f64 / requested_count as f64;
            cell_counts[Y] = count;
            notes.push(format!(
                "Moving window uses one device along y as hidden buffer: \
                 y-extent enlarged to {} cells and {} m",
                count, box_size[Y]
            ));
        }

        for dim in Dim3::slice() {
            let expanded_by_window = parameters.moving_window && dim == Y;
            if cell_counts[dim] != parameters.cell_counts[dim] && !expanded_by_window {
                notes.push(format!(
                    "Number of cells along {} rounded up from {} to {} \
                     to fill whole super cells on every device",
                    dim, parameters.cell_counts[dim], cell_counts[dim]
                ));
            }
        }

        let cell_size = In3D::with_each_component(|dim| box_size[dim] / cell_counts[dim] as f64);

        let time_step = match (parameters.time_step, parameters.cfl_factor) {
            (Some(time_step), Some(cfl_factor)) => match parameters.time_step_policy {
                TimeStepConflictPolicy::Reject => {
                    return Err(Error::config(
                        Self::LABEL,
                        format!(
                            "either a time step ({}) or a CFL factor ({}) should be given, \
                             not both",
                            time_step, cfl_factor
                        ),
                    ))
                }
                TimeStepConflictPolicy::PreferExplicit => {
                    notes.push(format!(
                        "Both a time step and a CFL factor were given, using the time step {} s",
                        time_step
                    ));
                    time_step
                }
            },
            (Some(time_step), None) => time_step,
            (None, cfl_factor) => courant_time_step(
                cfl_factor.unwrap_or(DEFAULT_CFL_FACTOR),
                &cell_size,
                dimensionality,
            ),
        };

        if !(time_step.is_finite() && time_step > 0.0) {
            return Err(Error::config(
                Self::LABEL,
                format!("time step must be positive, got {}", time_step),
            ));
        }

        let mut grid = Self {
            dimensionality,
            super_cell,
            decomposition,
            cell_counts,
            box_size,
            cell_size,
            time_step,
            contributions: Vec::new(),
            notes,
        };
        grid.contributions = grid.create_contributions(&parameters);
        Ok(grid)
    }

    pub fn dimensionality(&self) -> Dimensionality {
        self.dimensionality
    }

    pub fn super_cell_size(&self) -> &In3D<usize> {
        &self.super_cell
    }

    /// Number of cells along each axis after rounding and moving-window expansion.
    pub fn cell_counts(&self) -> &In3D<usize> {
        &self.cell_counts
    }

    /// Size of the simulation box after any moving-window expansion [m].
    pub fn box_size(&self) -> &In3D<f64> {
        &self.box_size
    }

    pub fn cell_size(&self) -> &In3D<f64> {
        &self.cell_size
    }

    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    fn validate(parameters: &GridSolverParameters) -> Result<()> {
        for dim in Dim3::slice() {
            let extent = parameters.box_size[dim];
            if !(extent.is_finite() && extent > 0.0) {
                return Err(Error::config(
                    Self::LABEL,
                    format!("box size along {} must be positive, got {}", dim, extent),
                ));
            }
            if parameters.cell_counts[dim] == 0 {
                return Err(Error::config(
                    Self::LABEL,
                    format!("number of cells along {} must be positive", dim),
                ));
            }
            if parameters.decomposition[dim] == 0 {
                return Err(Error::config(
                    Self::LABEL,
                    format!("number of devices along {} must be positive", dim),
                ));
            }
        }
        if parameters.dimensionality == Dimensionality::Two && parameters.decomposition[Z] != 1 {
            return Err(Error::config(
                Self::LABEL,
                "2d simulations can only use one device along z",
            ));
        }
        if parameters.moving_window && parameters.decomposition[Y] <= 1 {
            return Err(Error::config(
                Self::LABEL,
                "the moving window needs at least 2 devices along y",
            ));
        }
        if let Some(cfl_factor) = parameters.cfl_factor {
            if !(cfl_factor.is_finite() && cfl_factor > 0.0) {
                return Err(Error::config(
                    Self::LABEL,
                    format!("CFL factor must be positive, got {}", cfl_factor),
                ));
            }
        }
        Ok(())
    }

    fn create_contributions(&self, parameters: &GridSolverParameters) -> Vec<Contribution> {
        let mut all = Substitutions::new()
            .with("simDim", self.dimensionality.num())
            .with("Nsteps", parameters.steps)
            .with("DELTA_T_SI", self.time_step)
            .with("CELL_WIDTH_SI", self.cell_size[X])
            .with("CELL_HEIGHT_SI", self.cell_size[Y])
            .with("CELL_DEPTH_SI", self.cell_size[Z])
            .with("movePoint", parameters.move_point)
            .with(
                "movingWindow",
                if parameters.moving_window { "-m" } else { "" },
            )
            .with("Solver", parameters.solver.to_string())
            .with(
                "CurrentInterpolation",
                parameters.current_smoothing.to_string(),
            );

        for dim in Dim3::slice() {
            all.insert(format!("nGPU{}", dim), self.decomposition[dim]);
            all.insert(format!("N{}", dim), self.cell_counts[dim]);
            all.insert(
                format!("SuperCell{}", dim.to_string().to_uppercase()),
                self.super_cell[dim],
            );
            for (side, limit) in ABSORBER_LIMITS.iter().enumerate() {
                all.insert(
                    format!("ABSORBER_CELLS_{}{}", dim, limit),
                    parameters.absorber.cells[dim][side],
                );
                all.insert(
                    format!("ABSORBER_STRENGTH_{}{}", dim, limit),
                    parameters.absorber.strength[dim][side],
                );
            }
        }

        let absorber_names: Vec<String> = Dim3::slice()
            .iter()
            .flat_map(|dim| {
                ABSORBER_LIMITS.iter().flat_map(move |limit| {
                    [
                        format!("ABSORBER_CELLS_{}{}", dim, limit),
                        format!("ABSORBER_STRENGTH_{}{}", dim, limit),
                    ]
                })
            })
            .collect();
        let mut grid_names = vec![
            "DELTA_T_SI",
            "CELL_WIDTH_SI",
            "CELL_HEIGHT_SI",
            "CELL_DEPTH_SI",
            "movePoint",
        ];
        grid_names.extend(absorber_names.iter().map(String::as_str));

        let main_for = |names: &[&str]| Substitutions::new().with_subset_of(&all, names);

        vec![
            Contribution::new(Destination::Dimension).with_main(main_for(&["simDim"])),
            Contribution::new(Destination::Grid).with_main(main_for(&grid_names)),
            Contribution::new(Destination::FieldSolver)
                .with_main(main_for(&["Solver", "CurrentInterpolation"])),
            Contribution::new(Destination::Memory)
                .with_main(main_for(&["SuperCellX", "SuperCellY", "SuperCellZ"])),
            Contribution::new(Destination::Run).with_main(main_for(&[
                "nGPUx",
                "nGPUy",
                "nGPUz",
                "Nx",
                "Ny",
                "Nz",
                "Nsteps",
                "movingWindow",
            ])),
        ]
    }
}

impl SimulationObject for GridSolver {
    fn label(&self) -> &str {
        Self::LABEL
    }

    fn contributions(&self) -> &[Contribution] {
        &self.contributions
    }

    fn notes(&self) -> &[String] {
        &self.notes
    }
}

/// Computes the number of cells along the moving-window axis when one
/// device's worth of cells is reserved as a hidden buffer.
///
/// The cells requested by the user are spread over all but one device and
/// rounded up to whole super cells per device.
pub fn moving_window_cell_count(
    requested_count: usize,
    device_count: usize,
    super_cell_size: usize,
) -> usize {
    let visible_devices = device_count.saturating_sub(1).max(1);
    let block = visible_devices * super_cell_size;
    let local_count = ((requested_count + block - 1) / block) * super_cell_size;
    local_count * device_count
}

/// Computes the time step from the Courant-Friedrichs-Lewy condition,
/// scaled by the given factor.
pub fn courant_time_step(
    cfl_factor: f64,
    cell_size: &In3D<f64>,
    dimensionality: Dimensionality,
) -> f64 {
    let axes: &[Dim3] = match dimensionality {
        Dimensionality::Three => &[X, Y, Z],
        Dimensionality::Two => &[X, Y],
    };
    let inverse_squares: f64 = axes
        .iter()
        .map(|&dim| cell_size[dim].powi(-2))
        .sum();
    cfl_factor / SPEED_OF_LIGHT / inverse_squares.sqrt()
}
