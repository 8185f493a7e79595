use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for link operations.
pub type LinkResult<T> = Result<T, LinkError>;

/// Errors produced while classifying a target or creating a single link.
///
/// `Display` yields the message body printed after the `ln: ` prefix, in the
/// one-path or `source -> destination` form the utility has always used.
#[derive(Debug, Error)]
pub enum LinkError {
    /// Fewer operands than the invocation form requires.
    #[error("missing operand")]
    MissingOperand,
    /// Multiple sources were given but the target is not an openable directory.
    #[error("{}: {source}", .path.display())]
    TargetNotDirectory {
        path: PathBuf,
        source: io::Error,
    },
    /// The destination exists and neither force nor backup was requested.
    #[error("{}: {source}", .destination.display())]
    AlreadyExists {
        destination: PathBuf,
        source: io::Error,
    },
    /// Replacing the destination would have destroyed the file being linked.
    #[error("{} -> {}: same file", .source_path.display(), .destination.display())]
    SameFile {
        source_path: PathBuf,
        destination: PathBuf,
    },
    /// Unlinking the existing destination failed.
    #[error("{}: {source}", .destination.display())]
    RemovalFailed {
        destination: PathBuf,
        source: io::Error,
    },
    /// Renaming the existing destination to its backup name failed.
    #[error("{}: {source}", .destination.display())]
    BackupFailed {
        destination: PathBuf,
        source: io::Error,
    },
    /// The underlying hard-link or symlink call failed.
    #[error("{} -> {}: {source}", .source_path.display(), .destination.display())]
    CreationFailed {
        source_path: PathBuf,
        destination: PathBuf,
        source: io::Error,
    },
}
