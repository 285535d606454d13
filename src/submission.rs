//! Building and submitting a generated setup with the external toolchain.

use crate::{
    destination::{Destination, OutputLayout},
    error::{Error, Result},
    io::Verbosity,
};
use std::{
    path::{Path, PathBuf},
    process::{Child, Command},
};

#[cfg(feature = "serialization")]
use serde::Deserialize;

/// Settings for submitting the simulation to a batch system.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Deserialize))]
#[cfg_attr(feature = "serialization", serde(deny_unknown_fields))]
pub struct SubmissionSettings {
    /// Flavor of the submission script, e.g. `bash` or `slurm`.
    #[cfg_attr(feature = "serialization", serde(default = "default_scheduler_flavor"))]
    pub scheduler_flavor: String,
    /// Launch template used for creating the job script.
    pub launch_template: PathBuf,
    /// Directory the simulation writes its output to.
    pub output_directory: PathBuf,
}

fn default_scheduler_flavor() -> String {
    "bash".to_string()
}

impl SubmissionSettings {
    pub fn new<T, O>(launch_template: T, output_directory: O) -> Self
    where
        T: Into<PathBuf>,
        O: Into<PathBuf>,
    {
        Self {
            scheduler_flavor: default_scheduler_flavor(),
            launch_template: launch_template.into(),
            output_directory: output_directory.into(),
        }
    }
}

/// External programs compiling and launching a generated setup.
pub trait Toolchain {
    /// Compiles the setup, returning when the build has completed.
    fn build(&self) -> Result<()>;

    /// Starts the simulation described by the given run descriptor in the
    /// background and returns the running job without waiting for it.
    fn submit(&self, descriptor: &Path, settings: &SubmissionSettings) -> Result<Child>;
}

/// Toolchain using `pic-build` and `tbg` in the root of a setup directory.
#[derive(Clone, Debug)]
pub struct PicToolchain {
    root: PathBuf,
    verbosity: Verbosity,
}

impl PicToolchain {
    const BUILD_PROGRAM: &'static str = "pic-build";
    const SUBMIT_PROGRAM: &'static str = "tbg";

    pub fn new<P: Into<PathBuf>>(root: P, verbosity: Verbosity) -> Self {
        Self {
            root: root.into(),
            verbosity,
        }
    }

    /// Creates the command compiling the setup.
    pub fn build_command(&self) -> Command {
        let mut command = Command::new(Self::BUILD_PROGRAM);
        command.current_dir(&self.root);
        command
    }

    /// Creates the command submitting the simulation.
    pub fn submit_command(&self, descriptor: &Path, settings: &SubmissionSettings) -> Command {
        let mut command = Command::new(Self::SUBMIT_PROGRAM);
        command
            .current_dir(&self.root)
            .arg("-s")
            .arg(&settings.scheduler_flavor)
            .arg("-c")
            .arg(descriptor)
            .arg("-t")
            .arg(&settings.launch_template)
            .arg(&settings.output_directory);
        command
    }

    /// Builds the setup and submits the run descriptor of the given layout.
    pub fn build_and_submit(
        &self,
        layout: &OutputLayout,
        settings: &SubmissionSettings,
    ) -> Result<Child> {
        self.build()?;
        let descriptor = layout
            .path(Destination::Run)
            .strip_prefix(layout.root())
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| layout.path(Destination::Run));
        self.submit(&descriptor, settings)
    }
}

impl Toolchain for PicToolchain {
    fn build(&self) -> Result<()> {
        if self.verbosity.print_messages() {
            println!("Building setup in {}", self.root.display());
        }
        let status = self.build_command().status()?;
        if status.success() {
            Ok(())
        } else {
            Err(Error::Toolchain {
                command: Self::BUILD_PROGRAM.to_string(),
                status,
            })
        }
    }

    fn submit(&self, descriptor: &Path, settings: &SubmissionSettings) -> Result<Child> {
        if self.verbosity.print_messages() {
            println!(
                "Submitting {} to {}",
                descriptor.display(),
                settings.output_directory.display()
            );
        }
        Ok(self.submit_command(descriptor, settings).spawn()?)
    }
}
