use crate::error::{Error, Result};

use std::{fs::{metadata, read_dir}, path::Path};
use log::warn;

const JPEG_EXTENSIONS: [&str; 2] = ["jpg", "jpeg"];

/// Returns `path` if it names an existing folder.
pub fn validate(path: &Path) -> Result<&Path> {
    match metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(path),
        _ => Err(Error::NotADirectory(path.to_path_buf())),
    }
}

/// Returns `true` if the file name has a JPEG extension, in any case.
pub fn is_jpeg(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| JPEG_EXTENSIONS.iter().any(|jpeg| ext.eq_ignore_ascii_case(jpeg)))
        .unwrap_or(false)
}

/// Lists the names of the JPEG files of `dir`, sorted.
pub fn list_jpegs(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();

    for entry in read_dir(dir)? {
        let entry = entry?;

        match entry.file_name().into_string() {
            Ok(name) if is_jpeg(&name) => names.push(name),
            Ok(_) => {},
            Err(name) if is_jpeg(&name.to_string_lossy()) => {
                warn!("Skipping {:?}: the name is not valid UTF-8.", name)
            },
            Err(_) => {},
        }
    }

    names.sort();

    Ok(names)
}
