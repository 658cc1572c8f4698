//! Error types for the linepatch crate.

use std::fmt;
use std::path::PathBuf;

/// Pipeline stage that turns an edit script into numbered patches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Edit-script source (line diff folded into runs).
    Script,
    /// Groups raw hunks into draft patches.
    Sequence,
    /// Fuses draft patches whose connecting context is short.
    Merge,
    /// Trims context and computes line numbers.
    Number,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Script => "script",
            Self::Sequence => "sequence",
            Self::Merge => "merge",
            Self::Number => "number",
        };
        f.write_str(name)
    }
}

/// Linepatch error types.
///
/// Structural variants mean an upstream contract was broken (or the engine
/// itself has a bug). They are fatal for the current diff and never recovered.
#[derive(Debug, thiserror::Error)]
pub enum PatchError {
    /// Two Equal runs follow each other in the edit script.
    #[error("sequence: adjacent equal hunks at script positions {previous} and {current}")]
    AdjacentEqual { previous: usize, current: usize },

    /// A draft patch does not start where the accumulated patch ends.
    #[error(
        "merge: patch {index} starts at script position {found}, expected connecting hunk {expected}"
    )]
    DetachedPatch {
        index: usize,
        expected: usize,
        found: usize,
    },

    /// The hunk shared by two draft patches is a change, not context.
    #[error("merge: connecting hunk of patch {index} at script position {position} is not equal")]
    ConnectorNotEqual { index: usize, position: usize },

    /// A patch reached numbering without any hunk.
    #[error("number: patch {index} has no hunks")]
    EmptyPatch { index: usize },

    /// A patch reached numbering with nothing but context.
    #[error("number: patch {index} holds a single equal hunk and no change")]
    ContextOnlyPatch { index: usize },

    /// Invalid caller-supplied argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error with context.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PatchError {
    /// Pipeline stage that raised a structural error, `None` for the rest.
    pub const fn stage(&self) -> Option<Stage> {
        match self {
            Self::AdjacentEqual { .. } => Some(Stage::Sequence),
            Self::DetachedPatch { .. } | Self::ConnectorNotEqual { .. } => Some(Stage::Merge),
            Self::EmptyPatch { .. } | Self::ContextOnlyPatch { .. } => Some(Stage::Number),
            Self::InvalidArgument(_) | Self::Json(_) | Self::Io { .. } => None,
        }
    }

    /// Whether this error reports a broken pipeline invariant.
    pub const fn is_structural(&self) -> bool {
        self.stage().is_some()
    }
}

/// Convenience result type for linepatch operations.
pub type PatchResult<T> = Result<T, PatchError>;
