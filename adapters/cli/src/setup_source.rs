//! Sources of raw world set-up lines.

use std::{fs, io, path::PathBuf};

use thiserror::Error;

/// Set-up compiled into the binary and used when no path is supplied.
const BUNDLED_SETUP: &str = include_str!("../assets/default_world.txt");

/// Location the raw set-up lines are read from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum SetupSource {
    /// The default set-up shipped with the binary.
    Bundled,
    /// A set-up file on disk.
    File(PathBuf),
}

impl SetupSource {
    /// Chooses the file when a path was supplied, the bundled set-up otherwise.
    pub(crate) fn from_path(path: Option<PathBuf>) -> Self {
        path.map_or(Self::Bundled, Self::File)
    }

    /// Reads the set-up and splits it into lines without terminators.
    pub(crate) fn read_lines(&self) -> Result<Vec<String>, LoadError> {
        match self {
            Self::Bundled => Ok(split_lines(BUNDLED_SETUP)),
            Self::File(path) => fs::read_to_string(path)
                .map(|text| split_lines(&text))
                .map_err(|source| LoadError::Read {
                    path: path.clone(),
                    source,
                }),
        }
    }
}

/// Errors that can occur while reading a set-up.
#[derive(Debug, Error)]
pub(crate) enum LoadError {
    /// The set-up file could not be opened or decoded.
    #[error("could not read world set-up from {}: {source}", .path.display())]
    Read {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}

fn split_lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_owned).collect()
}
