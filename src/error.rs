//! Error type shared by the whole crate.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The input path doesn't name an existing folder.
    #[error("{0:?} is not a directory")]
    NotADirectory(PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The EXIF block is missing a required part, or can't be decoded.
    #[error(transparent)]
    Exif(#[from] exif::Error),

    /// A rational component of a DMS triple has a zero denominator.
    #[error("zero denominator in the {component} of a GPS coordinate")]
    ZeroDenominator { component: &'static str },

    /// A GPS tag holds a value of the wrong type or size.
    #[error("malformed GPS coordinate: {0}")]
    MalformedCoordinate(String),
}
