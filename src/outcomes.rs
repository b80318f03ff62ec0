//! Probability-weighted successor enumeration for planning agents.
//!
//! After a legal move the game spawns a 2 (probability 0.9) or a 4 (0.1) on one
//! of the `k` empty cells, each cell equally likely. The enumeration here lists
//! every resulting board with its probability, without touching any RNG.
use crate::engine::{apply, Board, Direction, SPAWN_FOUR, SPAWN_TWO, SPAWN_TWO_PROBABILITY};
use crate::error::{EngineError, Result};
use log::trace;
use rustc_hash::FxHashMap;

/// Resulting board -> probability of reaching it.
pub type Distribution = FxHashMap<Board, f64>;

fn spawn_distribution(moved: Board) -> Distribution {
    let empty = moved.empty_positions();
    let mut outcomes = Distribution::default();
    if empty.is_empty() {
        return outcomes;
    }

    let per_cell = 1.0 / empty.len() as f64;
    let weights = [
        (SPAWN_TWO, SPAWN_TWO_PROBABILITY),
        (SPAWN_FOUR, 1.0 - SPAWN_TWO_PROBABILITY),
    ];
    for &(row, col) in &empty {
        for (exponent, weight) in weights {
            *outcomes.entry(moved.with_tile(row, col, exponent)).or_insert(0.0) += weight * per_cell;
        }
    }
    outcomes
}

/// Every board reachable by moving `board` towards `direction` and spawning one tile.
///
/// Returns `None` when `direction` does not change the board. Probabilities of
/// a legal move sum to 1.
///
/// # Examples
/// ```
/// use e2048::engine::Direction;
/// use e2048::outcomes::successors;
/// use e2048::utils::board_from_rows;
///
/// let board = board_from_rows(&["2 _ _ _"]).unwrap();
/// assert!(successors(board, Direction::Left).is_none());
///
/// let outcomes = successors(board, Direction::Right).unwrap();
/// assert_eq!(outcomes.len(), 30); // 15 empty cells, 2 tile values each
/// let total: f64 = outcomes.values().sum();
/// assert!((total - 1.0).abs() < 1e-9);
/// ```
pub fn successors(board: Board, direction: Direction) -> Option<Distribution> {
    let moved = apply(board, direction);
    if moved == board {
        return None;
    }
    let outcomes = spawn_distribution(moved);
    trace!(
        "{} on {:?}: {} empty cells, {} outcomes",
        direction,
        board,
        moved.count_empty(),
        outcomes.len()
    );
    Some(outcomes)
}

/// Like [`successors`], but reports an illegal direction as an error.
///
/// # Errors
/// Returns `EngineError::IllegalMove` if `direction` does not change the board.
pub fn try_successors(board: Board, direction: Direction) -> Result<Distribution> {
    successors(board, direction).ok_or(EngineError::IllegalMove(direction))
}

/// Successor distributions of every legal direction. Illegal directions have no entry.
pub fn all_successors(board: Board) -> FxHashMap<Direction, Distribution> {
    Direction::ALL
        .into_iter()
        .filter_map(|d| successors(board, d).map(|outcomes| (d, outcomes)))
        .collect()
}

/// Outcomes sorted by descending probability, ties broken by packed key.
pub fn sorted_outcomes(outcomes: &Distribution) -> Vec<(Board, f64)> {
    let mut sorted: Vec<(Board, f64)> = outcomes.iter().map(|(&b, &p)| (b, p)).collect();
    sorted.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    sorted
}
