use std::io;
use std::path::{Path, PathBuf};

/// Errors that can occur while loading or saving a data file.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The file, or the directory it should be written to, does not exist.
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),
    /// The path's extension is not one of the supported formats.
    #[error("unsupported file format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
    /// The file contents are not a valid dataset in the implied format.
    #[error("failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },
    /// The dataset could not be encoded.
    #[error("failed to serialize {}: {message}", path.display())]
    Serialize { path: PathBuf, message: String },
    /// Any other IO failure.
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    /// Wraps an IO error for `path`, turning `NotFound` into
    /// [`StoreError::FileNotFound`].
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            StoreError::FileNotFound(path.to_path_buf())
        } else {
            StoreError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_file_not_found() {
        let err = StoreError::io(
            Path::new("missing.json"),
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, StoreError::FileNotFound(ref p) if p == Path::new("missing.json")));
        assert_eq!(err.to_string(), "file not found: missing.json");
    }

    #[test]
    fn other_io_errors_keep_source() {
        let err = StoreError::io(
            Path::new("locked.yaml"),
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, StoreError::Io { .. }));
        assert!(std::error::Error::source(&err).is_some());
    }
}
