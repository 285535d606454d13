//! Utilities for input/output.

use std::{
    fs,
    io::{self, Read, Write},
    path::Path,
};
use tempfile::NamedTempFile;

/// Reads and returns the content of the specified text file.
pub fn read_text_file<P: AsRef<Path>>(file_path: P) -> io::Result<String> {
    let file = fs::File::open(file_path)?;
    let mut text = String::new();
    let _ = io::BufReader::new(file).read_to_string(&mut text)?;
    Ok(text)
}

/// Creates the given directory and any missing parents.
///
/// Succeeds if the directory already exists.
pub fn create_directory_if_missing<P: AsRef<Path>>(dir_path: P) -> io::Result<()> {
    fs::create_dir_all(dir_path)
}

/// Writes the given text to a temporary file next to the target path and
/// then moves it into place, replacing any existing file.
pub fn write_text_file_atomically<P: AsRef<Path>>(file_path: P, text: &str) -> io::Result<()> {
    let file_path = file_path.as_ref();
    let dir_path = match file_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temporary_file = NamedTempFile::new_in(dir_path)?;
    temporary_file.write_all(text.as_bytes())?;
    temporary_file.flush()?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        temporary_file
            .as_file()
            .set_permissions(fs::Permissions::from_mode(0o644))?;
    }

    temporary_file
        .persist(file_path)
        .map(|_| ())
        .map_err(|err| err.error)
}
