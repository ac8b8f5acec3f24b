use thiserror::Error;

/// Error types that can occur while operating the kinship reasoning engine.
#[derive(Error, Debug)]
pub enum KinshipError {
    /// A raw token failed name normalization (shape, characters, case).
    #[error("invalid name: {reason}")]
    InvalidName {
        /// Why the name was rejected.
        reason: String,
    },

    /// No template matched the input.
    #[error("I don't understand that. {suggestion}")]
    UnrecognizedInput {
        /// Usage suggestions shown to the user.
        suggestion: String,
    },

    /// The validator rejected a candidate fact as impossible.
    #[error("That's impossible! {0}")]
    Impossible(String),

    /// The fact is already entailed by the store.
    #[error("I already knew that.")]
    Redundant,

    /// A post-commit invariant check failed; indicates an engine bug.
    #[error("internal invariant violated: {0}")]
    Internal(String),

    /// I/O error reading or writing a persisted fact store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The persisted fact-store text could not be parsed.
    #[error("malformed fact store: {0}")]
    PersistenceError(String),
}

/// Convenient Result type alias for kinship engine operations.
pub type Result<T> = std::result::Result<T, KinshipError>;
