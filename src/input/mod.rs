use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use flate2::read::MultiGzDecoder;
use thiserror::Error;

pub mod depth_track;
pub mod panel_bed;
pub mod sample_sheet;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing input file: {}", .0.display())]
    MissingInputFile(PathBuf),
    #[error("malformed manifest {}: {reason}", .path.display())]
    MalformedManifest { path: PathBuf, reason: String },
    #[error("parse error in {}: line {line}: {message}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },
}

impl InputError {
    pub(crate) fn parse(path: &Path, line: usize, message: impl Into<String>) -> Self {
        InputError::Parse {
            path: path.to_path_buf(),
            line,
            message: message.into(),
        }
    }
}

pub fn require_file(path: &Path) -> Result<(), InputError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(InputError::MissingInputFile(path.to_path_buf()))
    }
}

pub fn is_gzip(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "gz")
}

pub fn open_maybe_gz(path: &Path) -> Result<Box<dyn BufRead>, InputError> {
    require_file(path)?;
    let file = File::open(path)?;
    if is_gzip(path) {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
