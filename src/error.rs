//! Error types for the tic-tac-toe agents crate

use std::fmt;

use thiserror::Error;

/// Why a move was rejected by the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveRejection {
    OutOfBounds,
    Occupied,
}

impl fmt::Display for MoveRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveRejection::OutOfBounds => write!(f, "coordinates out of bounds (must be 0-2)"),
            MoveRejection::Occupied => write!(f, "cell is already occupied"),
        }
    }
}

/// Main error type for the crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid move at ({row}, {col}): {reason}")]
    InvalidMove {
        row: usize,
        col: usize,
        reason: MoveRejection,
    },

    #[error("no available move: the board is full")]
    NoAvailableMove,

    #[error("game already over")]
    GameOver,

    #[error("state encoding {value} is out of range (must be below 19683)")]
    InvalidEncoding { value: u32 },

    #[error("board string must have {expected} cells, got {got} in '{context}'")]
    InvalidBoardLength {
        expected: usize,
        got: usize,
        context: String,
    },

    #[error("invalid character '{character}' at position {position} in '{context}'")]
    InvalidCellCharacter {
        character: char,
        position: usize,
        context: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },

    #[error("shared observer lock was poisoned")]
    ObserverLockPoisoned,
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_move_display_names_the_cell() {
        let err = Error::InvalidMove {
            row: 1,
            col: 2,
            reason: MoveRejection::Occupied,
        };
        assert_eq!(
            err.to_string(),
            "invalid move at (1, 2): cell is already occupied"
        );
    }

    #[test]
    fn encoding_error_display() {
        let err = Error::InvalidEncoding { value: 19683 };
        assert!(err.to_string().contains("19683"));
    }
}
