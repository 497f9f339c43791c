//! Error types.

#[non_exhaustive]
#[derive(Debug)]
pub enum Error {
    /// Filesystem errors while reading configuration.
    Io(std::io::Error),
    /// Malformed configuration file.
    Config(serde_json::Error),
    /// The display connection could not be established.
    Display(&'static str),
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Config(e)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io error: {}", e),
            Self::Config(e) => write!(f, "configuration error: {}", e),
            Self::Display(e) => write!(f, "display error: {}", e),
        }
    }
}

pub type XdumonResult<T> = Result<T, Error>;
