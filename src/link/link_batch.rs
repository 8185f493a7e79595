use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use crate::link::error::{LinkError, LinkResult};
use crate::link::link_options::LinkOptions;
use crate::link::link_single::link_single;

/// How the final command-line operand is interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetResolution {
    /// Links are created inside this directory under each source's base name.
    Directory(PathBuf),
    /// The target is the literal link path; a missing target counts here.
    File(PathBuf),
}

/// Classifies the target operand against the number of source operands.
///
/// More than one source requires an existing, openable directory and fails
/// the whole batch otherwise. A single source links into the target when it
/// resolves to a directory and treats it as the link path in every other
/// case, including when it does not exist yet.
pub fn classify_target(target: &Path, source_count: usize) -> LinkResult<TargetResolution> {
    if source_count > 1 {
        open_directory(target)?;
        return Ok(TargetResolution::Directory(target.to_path_buf()));
    }

    match fs::metadata(target) {
        Ok(meta) if meta.is_dir() => Ok(TargetResolution::Directory(target.to_path_buf())),
        _ => Ok(TargetResolution::File(target.to_path_buf())),
    }
}

/// Runs one invocation: classify the target, then the single-link operation
/// once per source. Per-link failures are collected in order and do not stop
/// the remaining sources; only classification errors abort the batch before
/// any link is attempted.
pub fn link_sources(
    sources: &[PathBuf],
    target: &Path,
    opts: &LinkOptions,
) -> LinkResult<Vec<LinkResult<PathBuf>>> {
    if sources.is_empty() {
        return Err(LinkError::MissingOperand);
    }

    match classify_target(target, sources.len())? {
        TargetResolution::Directory(dir) => Ok(link_under_directory(sources, &dir, opts)),
        TargetResolution::File(path) => {
            Ok(vec![link_single(&sources[0], &path, opts).map(|()| path)])
        }
    }
}

/// Links every source into an explicitly named directory, the
/// target-directory flag form. At least one source is required and the
/// directory is validated before any link is attempted.
pub fn link_into_directory(
    sources: &[PathBuf],
    directory: &Path,
    opts: &LinkOptions,
) -> LinkResult<Vec<LinkResult<PathBuf>>> {
    if sources.is_empty() {
        return Err(LinkError::MissingOperand);
    }

    open_directory(directory)?;
    Ok(link_under_directory(sources, directory, opts))
}

fn link_under_directory(
    sources: &[PathBuf],
    directory: &Path,
    opts: &LinkOptions,
) -> Vec<LinkResult<PathBuf>> {
    sources
        .iter()
        .map(|source| {
            let name = source.file_name().ok_or_else(|| LinkError::CreationFailed {
                source_path: source.clone(),
                destination: directory.to_path_buf(),
                source: io::Error::new(io::ErrorKind::InvalidInput, "invalid source file name"),
            })?;
            let destination = directory.join(name);
            link_single(source, &destination, opts).map(|()| destination)
        })
        .collect()
}

/// Verifies that the target can actually be opened as a directory, the same
/// probe `open(O_DIRECTORY)` performs, so permission problems surface before
/// any link is attempted.
fn open_directory(target: &Path) -> LinkResult<File> {
    let meta = fs::metadata(target).map_err(|err| LinkError::TargetNotDirectory {
        path: target.to_path_buf(),
        source: err,
    })?;

    if !meta.is_dir() {
        return Err(LinkError::TargetNotDirectory {
            path: target.to_path_buf(),
            source: io::Error::new(io::ErrorKind::NotADirectory, "Not a directory"),
        });
    }

    File::open(target).map_err(|err| LinkError::TargetNotDirectory {
        path: target.to_path_buf(),
        source: err,
    })
}
