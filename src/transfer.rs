// Moving tracks into the library

use crate::error::FlacError;
use crate::flac::read_track_metadata;
use crate::library::destination_path;
use crate::track::TrackMetadata;

use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read metadata of {}: {source}", path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: FlacError,
    },

    #[error("{} does not exist", .0.display())]
    SourceMissing(PathBuf),

    #[error("{} is already in place", .0.display())]
    SameLocation(PathBuf),

    #[error("a file already exists at {}", .0.display())]
    TargetExists(PathBuf),

    #[error("failed to create {}: {source}", path.display())]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to move {} to {}: {source}", from.display(), to.display())]
    Move {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} still holds {count} audio file(s)", path.display())]
    AudioFilesRemain { path: PathBuf, count: usize },

    #[error("failed to list {}: {source}", path.display())]
    List {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid file pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("failed to remove {}: {source}", path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type TransferResult<T> = Result<T, TransferError>;

/// A planned move of one track
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    pub source: PathBuf,
    pub target: PathBuf,
    pub metadata: TrackMetadata,
}

/// Read the tags of a FLAC file
///
/// The file handle only lives for the duration of this call.
pub fn read_file_metadata(path: &Path) -> TransferResult<TrackMetadata> {
    let file = File::open(path).map_err(|source| TransferError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = BufReader::new(file);

    read_track_metadata(&mut reader).map_err(|source| TransferError::Metadata {
        path: path.to_path_buf(),
        source,
    })
}

/// Work out where a file belongs in the library
pub fn plan_transfer(source: &Path, library_root: &Path) -> TransferResult<Transfer> {
    let metadata = read_file_metadata(source)?;
    let target = destination_path(&metadata, library_root);

    Ok(Transfer {
        source: source.to_path_buf(),
        target,
        metadata,
    })
}

impl Transfer {
    /// Check a move can go ahead without touching the filesystem
    pub fn validate(&self) -> TransferResult<()> {
        if !self.source.is_file() {
            return Err(TransferError::SourceMissing(self.source.clone()));
        }

        if self.source == self.target {
            return Err(TransferError::SameLocation(self.source.clone()));
        }

        if self.target.exists() {
            return Err(TransferError::TargetExists(self.target.clone()));
        }

        Ok(())
    }

    /// Move the file, creating artist and album directories as needed
    ///
    /// Never overwrites an existing file.
    pub fn execute(&self) -> TransferResult<()> {
        self.validate()?;

        if let Some(parent) = self.target.parent() {
            fs::create_dir_all(parent).map_err(|source| TransferError::CreateDirectory {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        move_file(&self.source, &self.target).map_err(|source| TransferError::Move {
            from: self.source.clone(),
            to: self.target.clone(),
            source,
        })?;

        tracing::info!(
            "\"{}\" moved to \"{}\"",
            self.source.display(),
            self.target.display()
        );
        Ok(())
    }
}

/// Rename, falling back to copy and delete across filesystems
fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            tracing::debug!("Rename crosses devices, copying {}", from.display());
            fs::copy(from, to)?;
            fs::remove_file(from)
        }
        Err(e) => Err(e),
    }
}

/// Files in `directory` matching a glob `pattern`, sorted by path
pub fn list_files(directory: &Path, pattern: &str) -> TransferResult<Vec<PathBuf>> {
    if !directory.is_dir() {
        return Err(TransferError::List {
            path: directory.to_path_buf(),
            source: io::Error::new(io::ErrorKind::NotFound, "not a directory"),
        });
    }

    let escaped = glob::Pattern::escape(&directory.to_string_lossy());
    let full_pattern = format!("{escaped}/{pattern}");
    let entries = glob::glob(&full_pattern).map_err(|source| TransferError::Pattern {
        pattern: pattern.to_string(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(_) => {}
            Err(e) => tracing::warn!("Error reading path: {e}"),
        }
    }

    files.sort();
    Ok(files)
}

/// Subdirectories of `directory`, sorted by path
pub fn list_directories(directory: &Path) -> TransferResult<Vec<PathBuf>> {
    let list_error = |source| TransferError::List {
        path: directory.to_path_buf(),
        source,
    };

    let mut directories = Vec::new();
    for entry in fs::read_dir(directory).map_err(list_error)? {
        let path = entry.map_err(list_error)?.path();
        if path.is_dir() {
            directories.push(path);
        }
    }

    directories.sort();
    Ok(directories)
}

/// Remove a download directory once its audio files have been filed
///
/// Refuses while anything matching `pattern` is still inside.
pub fn cleanup_directory(directory: &Path, pattern: &str) -> TransferResult<()> {
    if !directory.exists() {
        return Ok(());
    }

    let remaining = list_files(directory, pattern)?;
    if !remaining.is_empty() {
        return Err(TransferError::AudioFilesRemain {
            path: directory.to_path_buf(),
            count: remaining.len(),
        });
    }

    fs::remove_dir_all(directory).map_err(|source| TransferError::Remove {
        path: directory.to_path_buf(),
        source,
    })?;

    tracing::info!("Removed {}", directory.display());
    Ok(())
}
