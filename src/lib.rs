pub mod args;
pub mod dms;
pub mod error;
pub mod folder;
pub mod metadata;
pub mod processor;

pub use error::{Error, Result};
