//! Reading simulation setups from JSON files.

use super::{
    grid::{GridSolver, GridSolverParameters},
    laser::{Laser, LaserParameters},
    plugin::{Plugin, PluginParameters},
    species::{Species, SpeciesParameters},
    SimulationObject,
};
use crate::{error::Result, io::utils, submission::SubmissionSettings};
use serde::Deserialize;
use std::path::Path;

/// Parameters of one simulation object, tagged by object type.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectSetup {
    Grid(GridSolverParameters),
    Laser(LaserParameters),
    Species(SpeciesParameters),
    Plugin(PluginParameters),
}

impl ObjectSetup {
    /// Validates the parameters and creates the simulation object.
    pub fn build(self) -> Result<Box<dyn SimulationObject>> {
        Ok(match self {
            Self::Grid(parameters) => Box::new(GridSolver::new(parameters)?),
            Self::Laser(parameters) => Box::new(Laser::new(parameters)?),
            Self::Species(parameters) => Box::new(Species::new(parameters)?),
            Self::Plugin(parameters) => Box::new(Plugin::new(parameters)?),
        })
    }
}

/// Complete setup as stored in a JSON file.
///
/// The order of the objects is the order in which their contributions are
/// aggregated.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SetupFile {
    pub objects: Vec<ObjectSetup>,
    #[serde(default)]
    pub submission: Option<SubmissionSettings>,
}

impl SetupFile {
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn read<P: AsRef<Path>>(file_path: P) -> Result<Self> {
        Self::from_json_str(&utils::read_text_file(file_path)?)
    }

    /// Creates all objects of the setup in order, failing on the first
    /// invalid one.
    pub fn build_objects(&self) -> Result<Vec<Box<dyn SimulationObject>>> {
        self.objects
            .iter()
            .cloned()
            .map(ObjectSetup::build)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::Error,
        geometry::{Dimensionality, In3D},
        setup::{
            grid::FieldSolverKind,
            laser::LaserMethod,
            species::{SpeciesKind, StartPosition},
        },
    };

    const SETUP: &str = r#"{
        "objects": [
            {"grid": {
                "box_size": [25e-6, 35e-6, 25e-6],
                "cell_counts": [128, 1024, 128],
                "steps": 6000,
                "solver": "Lehe",
                "moving_window": true
            }},
            {"laser": {
                "a0": 3.0, "ctau": 4e-6, "waist": 5e-6,
                "method": {"native": {"focus_position": 20e-6}}
            }},
            {"species": {
                "name": "Electrons",
                "kind": "electron",
                "initial_positions": {"random": {"per_cell": 2}},
                "base_density": 8e24,
                "density_profiles": [
                    {"profile": "Gaussian", "parameters": {
                        "gasFactor": -1.0, "gasPower": 4.0, "vacuumCellsY": 100,
                        "gasCenterLeft": 40e-6, "gasCenterRight": 60e-6,
                        "gasSigmaLeft": 20e-6, "gasSigmaRight": 80e-6
                    }}
                ]
            }},
            {"plugin": {"period": 2000}}
        ],
        "submission": {
            "launch_template": "etc/picongpu/bash/mpiexec.tpl",
            "output_directory": "runs/lwfa"
        }
    }"#;

    #[test]
    fn setup_file_is_parsed_in_order() {
        let setup = SetupFile::from_json_str(SETUP).unwrap();
        assert_eq!(setup.objects.len(), 4);

        match &setup.objects[0] {
            ObjectSetup::Grid(grid) => {
                assert_eq!(grid.cell_counts, In3D::new(128, 1024, 128));
                assert_eq!(grid.decomposition, In3D::new(1, 2, 1));
                assert_eq!(grid.dimensionality, Dimensionality::Three);
                assert_eq!(grid.solver, FieldSolverKind::Lehe);
                assert!(grid.moving_window);
            }
            other => panic!("Expected grid, got {:?}", other),
        }
        match &setup.objects[1] {
            ObjectSetup::Laser(laser) => {
                assert_eq!(laser.polarization, "x");
                match &laser.method {
                    LaserMethod::Native(native) => assert_eq!(native.laguerre_modes, vec![1.0]),
                    other => panic!("Expected native laser, got {:?}", other),
                }
            }
            other => panic!("Expected laser, got {:?}", other),
        }
        match &setup.objects[2] {
            ObjectSetup::Species(species) => {
                assert_eq!(species.kind, SpeciesKind::Electron);
                assert_eq!(
                    species.initial_positions,
                    StartPosition::Random { per_cell: 2 }
                );
                assert_eq!(species.relative_density, 1.0);
            }
            other => panic!("Expected species, got {:?}", other),
        }

        let submission = setup.submission.as_ref().unwrap();
        assert_eq!(submission.scheduler_flavor, "bash");
    }

    #[test]
    fn objects_are_built_from_parsed_parameters() {
        let setup = SetupFile::from_json_str(SETUP).unwrap();
        let objects = setup.build_objects().unwrap();
        let labels: Vec<_> = objects.iter().map(|object| object.label()).collect();
        assert_eq!(labels, ["grid", "laser", "species Electrons", "plugin raw"]);
    }

    #[test]
    fn malformed_setup_is_reported() {
        assert!(matches!(
            SetupFile::from_json_str(r#"{"objects": [{"antenna": {}}]}"#),
            Err(Error::Setup(_))
        ));
    }
}
