use std::{io, path::PathBuf, process::ExitStatus};

use read_fonts::ReadError;
use thiserror::Error;

/// Everything that can sink a single test case.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("failed to launch '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("'{program}' failed with {status} on {path:?}")]
    ToolFailed {
        program: String,
        status: ExitStatus,
        path: PathBuf,
    },

    #[error("{inputs} input path(s) but {outputs} output path(s)")]
    PathCount { inputs: usize, outputs: usize },

    #[error("error reading font data: {0}")]
    Read(#[from] ReadError),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("{expected:?} and {actual:?} differ:\n{diff}")]
    Mismatch {
        expected: PathBuf,
        actual: PathBuf,
        diff: String,
    },
}
