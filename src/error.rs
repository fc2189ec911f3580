//! Error types for integration operations.
//!
//! Every pipeline stage reports failure through [`Error`]; missing-input
//! conditions each get their own variant so the driver can print a distinct
//! diagnostic per failure. The [`Context`] and [`ErrorExt`] traits and the
//! [`bail!`](crate::bail) macro mirror the usual anyhow ergonomics without
//! losing the typed variants.

use std::{
    fmt::Display,
    io,
    path::PathBuf,
};
use thiserror::Error as DeriveError;

/// Errors returned by the integration pipeline.
#[derive(Debug, DeriveError)]
#[non_exhaustive]
pub enum Error {
    /// Error with context. Created by the [`Context`] trait.
    #[error("{0}: {1}")]
    Context(String, Box<Self>),

    /// File system error with path context.
    ///
    /// Created by the [`ErrorExt`] trait's `fs_context` method.
    #[error("{context} {path}: {error}")]
    Fs {
        /// Context describing the operation (e.g., "copying icon")
        context: &'static str,
        /// Path that was being accessed
        path: PathBuf,
        /// The underlying I/O error
        error: io::Error,
    },

    /// The bundle path given on the command line does not exist.
    #[error("AppImage not found at {path}")]
    BundleNotFound {
        /// Path that was given
        path: PathBuf,
    },

    /// The bundle could not be started as a child process.
    #[error("failed to run {command}: {error}")]
    CommandFailed {
        /// Command that failed to start
        command: String,
        /// The underlying error
        error: io::Error,
    },

    /// The bundle's self-extractor exited with a non-zero status.
    #[error("failed to extract AppImage: {stderr}")]
    ExtractionFailed {
        /// Exit code, if the process exited normally
        status: Option<i32>,
        /// Captured stderr of the extractor, or "unknown error" when empty
        stderr: String,
    },

    /// The extracted payload contains no `.desktop` entry.
    #[error("no .desktop file found in AppImage")]
    DesktopFileNotFound,

    /// The desktop entry has no `Icon=` key.
    #[error("no icon specified in desktop entry {path}")]
    IconNameNotFound {
        /// Desktop entry that was parsed
        path: PathBuf,
    },

    /// No icon file matching the entry's `Icon=` name survived the search.
    #[error("no suitable icon found for '{name}'")]
    IconNotFound {
        /// Icon name from the desktop entry
        name: String,
    },

    /// Home directory could not be determined for the default install dir.
    #[error("could not determine home directory; pass --install-dir explicitly")]
    HomeDirNotFound,

    /// Generic I/O error.
    #[error("{0}")]
    Io(#[from] io::Error),

    /// Generic error with custom message.
    #[error("{0}")]
    GenericError(String),
}

/// Convenient type alias for Result.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Get actionable recovery suggestions for this error.
    ///
    /// Returns an empty list when nothing better than the message itself can
    /// be offered.
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            Error::Context(_, inner) => inner.recovery_suggestions(),
            Error::BundleNotFound { path } => vec![
                format!("Check the path: ls -l {}", path.display()),
                "Pass the path to the .AppImage file itself, not its directory".to_string(),
            ],
            Error::CommandFailed { command, .. } => vec![
                format!("Make the bundle executable: chmod +x {command}"),
                "Verify the file is an AppImage and not a plain archive".to_string(),
            ],
            Error::ExtractionFailed { .. } => vec![
                "Only type-2 AppImages support --appimage-extract".to_string(),
                "Try running the bundle with --appimage-extract by hand to see the full output"
                    .to_string(),
            ],
            Error::DesktopFileNotFound | Error::IconNotFound { .. } => vec![
                "Unpack the bundle with --appimage-extract and inspect squashfs-root yourself"
                    .to_string(),
            ],
            Error::HomeDirNotFound => {
                vec!["Set HOME, or pass --install-dir explicitly".to_string()]
            }
            _ => vec![],
        }
    }
}

/// Trait for adding context to errors.
///
/// Works with both `Result<T>` and `Option<T>`.
pub trait Context<T> {
    /// Add context to an error.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static;

    /// Add context to an error using a closure (lazy evaluation).
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T> Context<T> for Result<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.map_err(|e| Error::Context(context.to_string(), Box::new(e)))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| Error::Context(f().to_string(), Box::new(e)))
    }
}

impl<T> Context<T> for Option<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.ok_or_else(|| Error::GenericError(f().to_string()))
    }
}

/// Extension trait for filesystem operations with automatic path context.
pub trait ErrorExt<T> {
    /// Add filesystem context to an I/O error.
    ///
    /// The `context` should be a present-tense verb phrase describing the
    /// operation, e.g., "reading desktop entry", "copying icon".
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.into(),
            error,
        })
    }
}

/// Macro for early return with error.
///
/// Converts the message into a [`Error::GenericError`] and returns
/// immediately.
#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::error::Error::GenericError($msg.into()))
    };
    ($err:expr $(,)?) => {
        return Err($crate::error::Error::GenericError($err.to_string()))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::error::Error::GenericError(format!($fmt, $($arg)*)))
    };
}
