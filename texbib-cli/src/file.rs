use std::{
    fs,
    path::{Path, PathBuf},
};

use eyre::{eyre, WrapErr};
use glob::glob;
use log::trace;

/// The `.tex` files under `path`: the file itself, or a recursive scan when
/// `path` is a directory.
pub fn collect_tex_files(path: &Path) -> eyre::Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.is_dir() {
        return Err(eyre!("'{}' is not a file or a directory", path.display()));
    }

    trace!("Searching '{}' for .tex files", path.display());
    let pattern = format!("{}/**/*.tex", path.to_string_lossy());
    let mut files = Vec::new();
    for entry in glob(&pattern).expect("File pattern should always be valid") {
        let file = entry.wrap_err("Cannot determine a file path - do you have the correct permissions?")?;
        files.push(file);
    }
    files.sort();
    Ok(files)
}

pub fn read_to_string(path: &Path) -> eyre::Result<String> {
    fs::read_to_string(path)
        .wrap_err_with(|| format!("Cannot read contents of '{}'", path.display()))
}

/// Writes the existing content followed by the new entries, separated by
/// blank lines.
pub fn write_output(path: &Path, existing: &str, entries: &[String]) -> eyre::Result<()> {
    let mut content = String::new();
    if !existing.is_empty() {
        content.push_str(existing);
    }
    for entry in entries {
        if !content.is_empty() {
            content.push_str("\n\n");
        }
        content.push_str(entry);
    }

    fs::write(path, content)
        .wrap_err_with(|| format!("Failed to write the output file '{}'", path.display()))
}
