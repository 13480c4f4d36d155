//! Engine error types
//!
//! Every failure the loader, the object graph or the run loop can report is a
//! [`LudiError`]. Callers that need to branch on the failure (the entry point
//! picking an exit code, the browser deciding what to show) match on
//! [`LudiError::kind`] instead of parsing messages.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::object::ObjectId;

/// Errors produced while loading, composing or running a game
#[derive(Debug, Error)]
pub enum LudiError {
    /// A file in the game hierarchy does not exist
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The root file does not carry the game file suffix
    #[error("invalid game file extension (expected `{expected}`): {}", path.display())]
    InvalidExtension {
        path: PathBuf,
        expected: &'static str,
    },

    /// The game file could not be parsed
    #[error("malformed game file {}: {source}", path.display())]
    MalformedGameFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A scene file could not be parsed
    #[error("malformed scene file {}: {source}", path.display())]
    MalformedSceneFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A game object resource file could not be parsed
    #[error("malformed game object file {}: {source}", path.display())]
    MalformedObjectFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A game object file names a type outside the known table
    #[error("unknown game object type `{tag}` in {}", path.display())]
    UnknownObjectType { path: PathBuf, tag: String },

    /// The game file lists no scenes, so none can become active
    #[error("game file {} declares no scenes", path.display())]
    EmptyGame { path: PathBuf },

    /// `Game::run` was called before any scene was made active
    #[error("game has no active scene")]
    NoActiveScene,

    /// The entity is already part of the collection
    #[error("{what} {id} is already a member")]
    DuplicateMembership { what: &'static str, id: u64 },

    /// The entity is not part of the collection it was looked up in
    #[error("{what} {id} belongs to a different {owner}")]
    AbsentMembership {
        what: &'static str,
        id: u64,
        owner: &'static str,
    },

    /// `run_behavior` was called on an object with no behavior
    #[error("game object {object} has no behavior attached")]
    MissingBehavior { object: ObjectId },

    /// A behavior callable returned an error
    #[error("behavior of game object {object} failed: {message}")]
    Behavior { object: ObjectId, message: String },

    /// The load was cancelled before this file was read
    #[error("load cancelled before reading {}", path.display())]
    Cancelled { path: PathBuf },

    /// Any other I/O failure
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Fieldless mirror of [`LudiError`] for matching and exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    InvalidExtension,
    MalformedGameFile,
    MalformedSceneFile,
    MalformedObjectFile,
    UnknownObjectType,
    EmptyGame,
    NoActiveScene,
    DuplicateMembership,
    AbsentMembership,
    MissingBehavior,
    Behavior,
    Cancelled,
    Io,
}

impl ErrorKind {
    /// Process exit status used by the entry point for this kind of failure
    #[must_use]
    pub const fn exit_code(self) -> u8 {
        match self {
            Self::NotFound => 2,
            Self::InvalidExtension => 3,
            Self::MalformedGameFile => 4,
            Self::MalformedSceneFile => 5,
            Self::MalformedObjectFile => 6,
            Self::EmptyGame => 7,
            Self::Cancelled => 8,
            Self::Io => 9,
            _ => 1,
        }
    }

    /// Warning-level kinds leave the target untouched and are safe to ignore
    #[must_use]
    pub const fn is_warning(self) -> bool {
        matches!(
            self,
            Self::UnknownObjectType | Self::DuplicateMembership | Self::AbsentMembership
        )
    }
}

impl LudiError {
    /// The kind of this error
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::InvalidExtension { .. } => ErrorKind::InvalidExtension,
            Self::MalformedGameFile { .. } => ErrorKind::MalformedGameFile,
            Self::MalformedSceneFile { .. } => ErrorKind::MalformedSceneFile,
            Self::MalformedObjectFile { .. } => ErrorKind::MalformedObjectFile,
            Self::UnknownObjectType { .. } => ErrorKind::UnknownObjectType,
            Self::EmptyGame { .. } => ErrorKind::EmptyGame,
            Self::NoActiveScene => ErrorKind::NoActiveScene,
            Self::DuplicateMembership { .. } => ErrorKind::DuplicateMembership,
            Self::AbsentMembership { .. } => ErrorKind::AbsentMembership,
            Self::MissingBehavior { .. } => ErrorKind::MissingBehavior,
            Self::Behavior { .. } => ErrorKind::Behavior,
            Self::Cancelled { .. } => ErrorKind::Cancelled,
            Self::Io { .. } => ErrorKind::Io,
        }
    }

    /// Map a read/write failure, keeping "missing" distinct from other I/O errors
    pub(crate) fn from_io(path: impl Into<PathBuf>, err: io::Error) -> Self {
        let path = path.into();
        if err.kind() == io::ErrorKind::NotFound {
            Self::NotFound { path }
        } else {
            Self::Io { path, source: err }
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T, E = LudiError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct_for_load_failures() {
        let kinds = [
            ErrorKind::NotFound,
            ErrorKind::InvalidExtension,
            ErrorKind::MalformedGameFile,
            ErrorKind::MalformedSceneFile,
            ErrorKind::MalformedObjectFile,
            ErrorKind::EmptyGame,
            ErrorKind::Cancelled,
            ErrorKind::Io,
        ];
        let mut codes: Vec<u8> = kinds.iter().map(|k| k.exit_code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), kinds.len());
        assert!(codes.iter().all(|&c| c != 0));
    }

    #[test]
    fn test_from_io_maps_missing_files_to_not_found() {
        let err = LudiError::from_io(
            "nope.ludi.json",
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err = LudiError::from_io(
            "locked.ludi.json",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_membership_kinds_are_warnings() {
        let err = LudiError::AbsentMembership {
            what: "scene",
            id: 7,
            owner: "game",
        };
        assert!(err.kind().is_warning());
        assert_eq!(err.to_string(), "scene 7 belongs to a different game");
        assert!(!ErrorKind::NoActiveScene.is_warning());
    }
}
