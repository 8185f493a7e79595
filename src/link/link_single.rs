use std::fs;
use std::io;
use std::os::unix::fs as unix_fs;
use std::os::unix::fs::MetadataExt;
use std::path::{Path, PathBuf};

use crate::link::error::{LinkError, LinkResult};
use crate::link::link_options::{FollowMode, LinkOptions};

/// Creates exactly one link (hard or symbolic) at `destination`.
///
/// The destination is probed with a non-following status check, so a symlink
/// sitting there counts as existing even when dangling. An existing
/// destination is only replaced under the force or backup options, and never
/// when it already denotes the same file as the source.
///
/// # Arguments
///
/// * `source` - The path the link will refer to; need not exist for symbolic links
/// * `destination` - The path at which the link is created
/// * `opts` - The options controlling the link behavior
pub fn link_single(source: &Path, destination: &Path, opts: &LinkOptions) -> LinkResult<()> {
    match fs::symlink_metadata(destination) {
        Ok(existing) => replace_existing(source, destination, &existing, opts)?,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(creation_failed(source, destination, err)),
    }

    if opts.symbolic {
        make_symlink(source, destination, opts)
    } else {
        make_hard_link(source, destination, opts)
    }
}

/// Clears an existing destination entry so the new link can be created,
/// rejecting the operation when neither force nor backup allows it or when
/// source and destination share device and inode.
fn replace_existing(
    source: &Path,
    destination: &Path,
    existing: &fs::Metadata,
    opts: &LinkOptions,
) -> LinkResult<()> {
    if !opts.force && !opts.backup {
        return Err(LinkError::AlreadyExists {
            destination: destination.to_path_buf(),
            source: io::Error::new(io::ErrorKind::AlreadyExists, "File exists"),
        });
    }

    // The guard resolves the source the same way the eventual link would;
    // a source that cannot be resolved leaves the decision to the link call.
    if let Ok(resolved) = resolve_source(source, opts) {
        if resolved.dev() == existing.dev() && resolved.ino() == existing.ino() {
            return Err(LinkError::SameFile {
                source_path: source.to_path_buf(),
                destination: destination.to_path_buf(),
            });
        }
    }

    if opts.backup {
        create_backup(destination, &opts.backup_suffix).map_err(|err| LinkError::BackupFailed {
            destination: destination.to_path_buf(),
            source: err,
        })
    } else {
        fs::remove_file(destination).map_err(|err| LinkError::RemovalFailed {
            destination: destination.to_path_buf(),
            source: err,
        })
    }
}

/// Status of the source as the eventual link would resolve it: symbolic links
/// and dereferencing hard links follow the chain, physical hard links inspect
/// the entry itself.
fn resolve_source(source: &Path, opts: &LinkOptions) -> io::Result<fs::Metadata> {
    if opts.symbolic || opts.follow == FollowMode::Dereference {
        fs::metadata(source)
    } else {
        fs::symlink_metadata(source)
    }
}

/// Creates a symbolic link at `destination` storing the literal source path,
/// or a path relative to the link's parent directory when requested.
fn make_symlink(source: &Path, destination: &Path, opts: &LinkOptions) -> LinkResult<()> {
    let contents = if opts.relative {
        make_relative(source, destination).map_err(|err| creation_failed(source, destination, err))?
    } else {
        source.to_path_buf()
    };

    unix_fs::symlink(&contents, destination)
        .map_err(|err| creation_failed(source, destination, err))
}

/// Creates a hard link at `destination`.
///
/// `fs::hard_link` never follows a symbolic-link source on Linux, so
/// dereference mode resolves the chain up front and links the final target.
fn make_hard_link(source: &Path, destination: &Path, opts: &LinkOptions) -> LinkResult<()> {
    let link_source = match opts.follow {
        FollowMode::Dereference => match fs::symlink_metadata(source) {
            Ok(meta) if meta.file_type().is_symlink() => fs::canonicalize(source)
                .map_err(|err| creation_failed(source, destination, err))?,
            _ => source.to_path_buf(),
        },
        FollowMode::Physical => source.to_path_buf(),
    };

    fs::hard_link(&link_source, destination)
        .map_err(|err| creation_failed(source, destination, err))
}

/// Computes the contents of a relative symbolic link: the path from the
/// destination's parent directory to the source.
fn make_relative(source: &Path, destination: &Path) -> io::Result<PathBuf> {
    let parent = destination
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let source_abs = fs::canonicalize(source)?;
    let dest_abs = fs::canonicalize(parent)?;

    pathdiff::diff_paths(&source_abs, &dest_abs)
        .ok_or_else(|| io::Error::other("could not compute relative path"))
}

/// Moves an existing destination aside by renaming it with the backup suffix.
///
/// If a file with the backup name already exists, appends a counter to the
/// backup name until a unique name is found.
fn create_backup(destination: &Path, suffix: &str) -> io::Result<()> {
    let suffix = if suffix.is_empty() { "~" } else { suffix };
    let dest_str = destination.to_string_lossy();
    let mut backup_path = PathBuf::from(format!("{dest_str}{suffix}"));

    let mut counter = 1;
    while backup_path.symlink_metadata().is_ok() {
        backup_path = PathBuf::from(format!("{dest_str}.~{counter}~"));
        counter += 1;
    }

    fs::rename(destination, backup_path)
}

fn creation_failed(source: &Path, destination: &Path, err: io::Error) -> LinkError {
    LinkError::CreationFailed {
        source_path: source.to_path_buf(),
        destination: destination.to_path_buf(),
        source: err,
    }
}
