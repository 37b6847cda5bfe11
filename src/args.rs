use clap::Parser;
use std::path::PathBuf;

/// This program prints the GPS position stored in the EXIF metadata
/// of every JPEG picture found in a folder.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct ProgramArgs {
    /// The folder containing the pictures
    #[clap(value_parser)]
    pub folder: Option<PathBuf>,

    /// Use verbose output
    #[clap(short, long, value_parser)]
    pub verbose: bool,

    /// Arguments after the folder are ignored
    #[clap(value_parser, hide = true)]
    pub ignored: Vec<String>,
}
