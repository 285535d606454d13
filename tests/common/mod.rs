use lazy_static::lazy_static;
use pogit::{cli, exit_on_error, io::utils as io_utils};
use std::{
    ffi::OsString,
    fs, io,
    path::{Path, PathBuf},
};

#[macro_export]
macro_rules! def_test {
    (
        IN[$($in_ident:ident = $in_str:expr),*]
        OUT[$($out_ident:ident = $out_str:expr),*]
        fn $name:ident $test_body:expr
    ) => {
        #[test]
        fn $name() {
            let test = common::Test::new(stringify!($name));

            $( let $in_ident = test.input_path($in_str); )*
            $( let $out_ident = test.output_path($out_str); )*

            let test_body = |$( $in_ident, )* $( $out_ident, )*| $test_body;

            test_body(
                $( path_str!($in_ident), )* $( path_str!($out_ident), )*
            );
        }
    };
}

#[macro_export]
macro_rules! path_str {
    ($path:expr) => {
        $path.to_string_lossy().as_ref()
    };
}

pub fn run<I, T>(args: I)
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    cli::run::run_with_args(COMMAND.clone().get_matches_from(args));
}

pub fn assert_file_exists<P: AsRef<Path>>(file_path: P) {
    let file_path = file_path.as_ref();
    assert!(
        file_path.exists(),
        "File {} does not exist",
        file_path.to_string_lossy()
    );
}

pub fn assert_file_missing<P: AsRef<Path>>(file_path: P) {
    let file_path = file_path.as_ref();
    assert!(
        !file_path.exists(),
        "File {} should not exist",
        file_path.to_string_lossy()
    );
}

pub fn read_file<P: AsRef<Path>>(file_path: P) -> String {
    let file_path = file_path.as_ref();
    exit_on_error!(
        io_utils::read_text_file(file_path),
        "Error: Could not read {0}: {1}",
        file_path.to_string_lossy()
    )
}

/// Names of all regular files below the given directory, relative to it.
///
/// A missing directory has no files.
pub fn relative_file_paths<P: AsRef<Path>>(dir_path: P) -> Vec<PathBuf> {
    fn collect(base: &Path, dir_path: &Path, paths: &mut Vec<PathBuf>) -> io::Result<()> {
        for entry in fs::read_dir(dir_path)? {
            let path = entry?.path();
            if path.is_dir() {
                collect(base, &path, paths)?;
            } else if let Ok(relative) = path.strip_prefix(base) {
                paths.push(relative.to_path_buf());
            }
        }
        Ok(())
    }
    let dir_path = dir_path.as_ref();
    let mut paths = Vec::new();
    if !dir_path.exists() {
        return paths;
    }
    exit_on_error!(
        collect(dir_path, dir_path, &mut paths),
        "Error: Could not list {0}: {1}",
        dir_path.to_string_lossy()
    );
    paths.sort();
    paths
}

#[derive(Debug, Clone)]
pub struct Test {
    output_dir: PathBuf,
}

impl Test {
    pub fn new<S: AsRef<str>>(name: S) -> Self {
        let name = name.as_ref();
        let output_dir = exit_on_error!(
            CONTEXT.prepared_output_dir(name),
            "Error: Could not prepare output directory for test {}: {}",
            name
        );
        Self { output_dir }
    }

    pub fn input_path<S: AsRef<str>>(&self, file_name: S) -> PathBuf {
        CONTEXT.input_path(file_name)
    }

    pub fn output_path<S: AsRef<str>>(&self, file_name: S) -> PathBuf {
        self.output_dir.join(file_name.as_ref())
    }
}

#[derive(Debug, Clone)]
pub struct TestContext {
    base_input_dir: PathBuf,
    base_output_dir: PathBuf,
}

impl TestContext {
    const BASE_INPUT_DIR_PATH_COMPONENTS: [&'static str; 3] = ["tests", "data", "input"];
    const BASE_OUTPUT_DIR_PATH_COMPONENTS: [&'static str; 3] = ["tests", "data", "output"];

    fn new() -> Self {
        Self {
            base_input_dir: Self::BASE_INPUT_DIR_PATH_COMPONENTS.iter().collect(),
            base_output_dir: Self::BASE_OUTPUT_DIR_PATH_COMPONENTS.iter().collect(),
        }
    }

    pub fn input_path<S: AsRef<str>>(&self, file_name: S) -> PathBuf {
        self.base_input_dir.join(file_name.as_ref())
    }

    pub fn output_dir<S: AsRef<str>>(&self, test_name: S) -> PathBuf {
        self.base_output_dir.join(test_name.as_ref())
    }

    pub fn prepared_output_dir<S: AsRef<str>>(&self, test_name: S) -> io::Result<PathBuf> {
        let output_dir = self.output_dir(test_name);
        if output_dir.exists() {
            fs::remove_dir_all(&output_dir)?;
        }
        fs::create_dir_all(&output_dir)?;
        Ok(output_dir)
    }
}

lazy_static! {
    pub static ref CONTEXT: TestContext = TestContext::new();
    static ref COMMAND: clap::Command<'static> = cli::build::build().no_binary_name(true);
}
