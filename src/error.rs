//! Error type shared by the engine, the text utilities and the `inspect` binary.

use crate::engine::Direction;

/// Everything that can go wrong when talking to the engine.
///
/// Malformed input coming from text (board rows, keys, direction tokens) and
/// invalid-state calls (spawning on a full board, enumerating an illegal move)
/// are reported here. Out-of-range exponents handed to the unchecked
/// constructors are programming errors and panic instead.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("exponent {value} at ({row}, {col}) is outside 0..=15")]
    ExponentOutOfRange { row: usize, col: usize, value: u8 },
    #[error("unknown direction '{0}' (expected left, right, up or down)")]
    UnknownDirection(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("cannot spawn a tile: the board has no empty cell")]
    BoardFull,
    #[error("moving {0} does not change the board")]
    IllegalMove(Direction),
}

pub type Result<T> = std::result::Result<T, EngineError>;
