//! CLI error types.

use std::io;
use std::path::PathBuf;

/// Error while building pages or copying the static tree.
#[derive(Debug, thiserror::Error)]
pub(crate) enum SiteError {
    /// The page has no `# ` heading to use as its title.
    #[error("{}: no h1 header", path.display())]
    MissingTitle { path: PathBuf },

    /// The markdown could not be compiled or rendered.
    #[error("{}: {source}", path.display())]
    Compile {
        path: PathBuf,
        #[source]
        source: sitemark_core::Error,
    },

    /// Filesystem failure on a specific path.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SiteError {
    /// Wrap an I/O error with the path it happened on.
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| SiteError::Io { path, source }
    }
}

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Site(#[from] SiteError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),
}
