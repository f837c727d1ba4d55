use std::path::PathBuf;

/// Errors raised while writing report files.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("failed to write report {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to create output directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ReportError {
    pub(crate) fn write(path: &std::path::Path, source: impl Into<csv::Error>) -> Self {
        Self::Write {
            path: path.to_path_buf(),
            source: source.into(),
        }
    }
}
