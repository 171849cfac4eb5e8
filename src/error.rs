use std::fmt::{self, Display};
use std::io;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors at the edges of the crate. Tokenizing, parsing and validating never fail; only
/// reading input and decoding configuration can.
#[derive(Debug)]
pub enum Error {
    /// A file could not be read.
    Io { path: PathBuf, source: io::Error },
    /// A configuration could not be decoded.
    Config(serde_json::Error),
    /// Diagnostics could not be encoded.
    Output(serde_json::Error),
    /// A check name which does not correspond to any [`Config`](crate::lint::Config) flag.
    UnknownCheck(String),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io { path, source } => {
                write!(f, "could not read '{}': {}", path.display(), source)
            }
            Error::Config(err) => write!(f, "invalid configuration: {}", err),
            Error::Output(err) => write!(f, "could not write diagnostics: {}", err),
            Error::UnknownCheck(name) => write!(f, "unknown check: '{}'", name),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io { source, .. } => Some(source),
            Error::Config(err) | Error::Output(err) => Some(err),
            Error::UnknownCheck(_) => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err)
    }
}
