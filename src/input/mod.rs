use std::path::Path;

use thiserror::Error;

pub mod cache;
pub mod replay;

pub use replay::{ReplayCamera, ReplayPoseModel};

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing input: {0}")]
    MissingInput(String),
}

pub fn require_file(path: &Path) -> Result<(), InputError> {
    if !path.is_file() {
        return Err(InputError::MissingInput(format!(
            "{} does not exist or is not a file",
            path.display()
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
