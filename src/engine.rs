//! Core game engine for 2048.
//!
//! This module defines the game's fundamental components:
//! - `Board`: the 4x4 grid packed into a single `u64`, one 4-bit exponent per cell.
//!   It is `Copy`, hashable, and compares by its packed key.
//! - `Direction`: the four sliding moves.
//! - The board codec (`encode` / `decode`), the move engine (`apply`), legality
//!   (`can_move`, `legal_directions`, `game_over`) and the random spawner
//!   (`spawn_one`, `new_game`, `move_and_spawn`).
//!
//! Only `row::merge_left` knows how tiles slide and merge. Right, Up and Down
//! rotate the board so the wanted direction points left, shift left, and rotate back.
use crate::error::{EngineError, Result};
use crate::render::{render, RenderOptions};
use crate::row::{shift_left_line, MAX_EXPONENT};
use log::{debug, trace, warn};
use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// Number of rows (and columns) of the board.
pub const BOARD_SIDE: usize = 4;

/// Number of cells on the board.
pub const CELLS: usize = BOARD_SIDE * BOARD_SIDE;

/// Exponent of a spawned "2" tile.
pub const SPAWN_TWO: u8 = 1;

/// Exponent of a spawned "4" tile.
pub const SPAWN_FOUR: u8 = 2;

/// Probability that a spawned tile is a "2" rather than a "4".
pub const SPAWN_TWO_PROBABILITY: f64 = 0.9;

/// Decoded board: `grid[row][col]` holds the exponent of that cell, 0 for empty.
pub type Grid = [[u8; BOARD_SIDE]; BOARD_SIDE];

/// A direction in which all tiles slide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Every direction, in canonical order.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Counter-clockwise quarter-turns that make this direction point left.
    fn turns(self) -> u32 {
        match self {
            Direction::Left => 0,
            Direction::Up => 1,
            Direction::Right => 2,
            Direction::Down => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Direction {
    type Err = EngineError;

    /// Accepts the full names and their first letters, in any case.
    ///
    /// ```
    /// use e2048::engine::Direction;
    /// assert_eq!("Up".parse::<Direction>().unwrap(), Direction::Up);
    /// assert_eq!("r".parse::<Direction>().unwrap(), Direction::Right);
    /// assert!("north".parse::<Direction>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" | "l" => Ok(Direction::Left),
            "right" | "r" => Ok(Direction::Right),
            "up" | "u" => Ok(Direction::Up),
            "down" | "d" => Ok(Direction::Down),
            _ => Err(EngineError::UnknownDirection(s.to_string())),
        }
    }
}

/// A 2048 board packed into 16 nibbles of a `u64`.
///
/// Cell `(row, col)` lives at linear index `4 * row + col` and occupies bits
/// `4 * index .. 4 * index + 4`, so key `0x03` holds an 8 in the top-left
/// corner. The packed key is the board's whole identity: equality and hashing
/// are those of the `u64`, which makes boards cheap keys for large hash maps.
///
/// Boards are values. Every operation returns a new `Board`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Board(u64);

impl Board {
    /// The board with every cell empty.
    pub const EMPTY: Board = Board(0);

    /// Wraps a packed key. Every `u64` is a valid board.
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Board(raw)
    }

    /// The packed key of this board.
    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Creates a board from a grid of exponents.
    ///
    /// # Panics
    /// Panics if any exponent is greater than 15. Use `Board::try_from` when the
    /// grid comes from untrusted input.
    ///
    /// # Examples
    /// ```
    /// use e2048::engine::Board;
    /// let board = Board::from_grid(&[[3, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
    /// assert_eq!(board.raw(), 0x03);
    /// ```
    pub fn from_grid(grid: &Grid) -> Self {
        Board(encode(grid))
    }

    /// Decodes this board into a grid of exponents.
    pub fn to_grid(self) -> Grid {
        decode(self.0)
    }

    /// Returns the exponent at (`row`, `col`).
    ///
    /// # Panics
    /// Panics if `row` or `col` is outside the board.
    #[inline]
    pub fn tile(self, row: usize, col: usize) -> u8 {
        assert!(row < BOARD_SIDE && col < BOARD_SIDE, "cell ({}, {}) is off the board", row, col);
        nibble(self.0, row * BOARD_SIDE + col)
    }

    /// Returns a copy of this board with (`row`, `col`) set to `exponent`.
    ///
    /// # Panics
    /// Panics if the cell is off the board or `exponent` is greater than 15.
    pub fn with_tile(self, row: usize, col: usize, exponent: u8) -> Self {
        assert!(row < BOARD_SIDE && col < BOARD_SIDE, "cell ({}, {}) is off the board", row, col);
        assert!(exponent <= MAX_EXPONENT, "exponent {} does not fit in a nibble", exponent);
        Board(set_nibble(self.0, row * BOARD_SIDE + col, exponent))
    }

    /// Number of empty cells.
    pub fn count_empty(self) -> usize {
        (0..CELLS).filter(|&idx| nibble(self.0, idx) == 0).count()
    }

    /// Highest exponent on the board, 0 for the empty board.
    pub fn max_exponent(self) -> u8 {
        (0..CELLS).map(|idx| nibble(self.0, idx)).max().unwrap_or(0)
    }

    /// Linear indices (`4 * row + col`) of the empty cells, ascending.
    pub fn empty_cells(self) -> Vec<usize> {
        (0..CELLS).filter(|&idx| nibble(self.0, idx) == 0).collect()
    }

    /// `(row, col)` of the empty cells, in the same order as [`Board::empty_cells`].
    pub fn empty_positions(self) -> Vec<(usize, usize)> {
        self.empty_cells()
            .into_iter()
            .map(|idx| (idx / BOARD_SIDE, idx % BOARD_SIDE))
            .collect()
    }

    /// The board after sliding and merging towards `direction`. No tile is spawned.
    #[inline]
    pub fn shift(self, direction: Direction) -> Self {
        apply(self, direction)
    }

    /// True if moving towards `direction` changes at least one cell.
    #[inline]
    pub fn can_move(self, direction: Direction) -> bool {
        can_move(self, direction)
    }

    /// The directions that change this board, in canonical order.
    pub fn legal_directions(self) -> Vec<Direction> {
        legal_directions(self)
    }

    /// True if no direction changes this board.
    pub fn is_game_over(self) -> bool {
        game_over(self)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({:#018x})", self.0)
    }
}

impl fmt::Display for Board {
    /// Formats the board with the default `RenderOptions`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(*self, &RenderOptions::default()))
    }
}

impl From<u64> for Board {
    fn from(raw: u64) -> Self {
        Board::from_raw(raw)
    }
}

impl From<Board> for u64 {
    fn from(board: Board) -> Self {
        board.raw()
    }
}

impl TryFrom<Grid> for Board {
    type Error = EngineError;

    /// Checked counterpart of [`Board::from_grid`].
    fn try_from(grid: Grid) -> Result<Self> {
        for (row, cells) in grid.iter().enumerate() {
            for (col, &value) in cells.iter().enumerate() {
                if value > MAX_EXPONENT {
                    return Err(EngineError::ExponentOutOfRange { row, col, value });
                }
            }
        }
        Ok(Board::from_grid(&grid))
    }
}

#[inline]
fn nibble(raw: u64, idx: usize) -> u8 {
    ((raw >> (4 * idx)) & 0xf) as u8
}

#[inline]
fn set_nibble(raw: u64, idx: usize, value: u8) -> u64 {
    let shift = 4 * idx;
    (raw & !(0xf << shift)) | (u64::from(value) << shift)
}

/// Unpacks a key into a grid of exponents.
///
/// ```
/// use e2048::engine::decode;
/// let grid = decode(0x12345678);
/// assert_eq!(grid[0], [8, 7, 6, 5]);
/// assert_eq!(grid[1], [4, 3, 2, 1]);
/// ```
pub fn decode(key: u64) -> Grid {
    let mut grid = [[0u8; BOARD_SIDE]; BOARD_SIDE];
    for (row, cells) in grid.iter_mut().enumerate() {
        for (col, cell) in cells.iter_mut().enumerate() {
            *cell = nibble(key, row * BOARD_SIDE + col);
        }
    }
    grid
}

/// Packs a grid of exponents into a key. Inverse of [`decode`].
///
/// # Panics
/// Panics if any exponent is greater than 15.
pub fn encode(grid: &Grid) -> u64 {
    let mut key = 0u64;
    for (row, cells) in grid.iter().enumerate() {
        for (col, &value) in cells.iter().enumerate() {
            assert!(
                value <= MAX_EXPONENT,
                "exponent {} at ({}, {}) does not fit in a nibble",
                value,
                row,
                col
            );
            key |= u64::from(value) << (4 * (row * BOARD_SIDE + col));
        }
    }
    key
}

/// Rotates the board one quarter-turn counter-clockwise: `out[r][c] = in[c][3 - r]`.
pub fn rotate_quarter(board: Board) -> Board {
    let grid = board.to_grid();
    let mut out = [[0u8; BOARD_SIDE]; BOARD_SIDE];
    for (r, cells) in out.iter_mut().enumerate() {
        for (c, cell) in cells.iter_mut().enumerate() {
            *cell = grid[c][BOARD_SIDE - 1 - r];
        }
    }
    Board::from_grid(&out)
}

/// Rotates the board `turns` quarter-turns counter-clockwise.
pub fn rotate(board: Board, turns: u32) -> Board {
    (0..turns % 4).fold(board, |b, _| rotate_quarter(b))
}

fn shift_rows_left(board: Board) -> Board {
    let raw = board.raw();
    let shifted = (0..BOARD_SIDE).fold(0u64, |acc, row| {
        let line = ((raw >> (16 * row)) & 0xffff) as u16;
        acc | (u64::from(shift_left_line(line)) << (16 * row))
    });
    Board(shifted)
}

/// Slides and merges every line of `board` towards `direction`.
///
/// # Examples
/// ```
/// use e2048::engine::{apply, Board, Direction};
/// // 2 2 4 8 in the top row
/// let board = Board::from_grid(&[[1, 1, 2, 3], [0; 4], [0; 4], [0; 4]]);
/// let moved = apply(board, Direction::Left);
/// assert_eq!(moved.to_grid()[0], [2, 2, 3, 0]);
/// ```
pub fn apply(board: Board, direction: Direction) -> Board {
    let turns = direction.turns();
    let rotated = rotate(board, turns);
    rotate(shift_rows_left(rotated), 4 - turns)
}

/// A direction is legal exactly when applying it changes the packed key.
pub fn can_move(board: Board, direction: Direction) -> bool {
    apply(board, direction) != board
}

/// The subset of [`Direction::ALL`] that changes `board`. Empty means game over.
pub fn legal_directions(board: Board) -> Vec<Direction> {
    Direction::ALL
        .into_iter()
        .filter(|&d| can_move(board, d))
        .collect()
}

pub fn game_over(board: Board) -> bool {
    Direction::ALL.into_iter().all(|d| !can_move(board, d))
}

fn random_exponent<R: Rng + ?Sized>(rng: &mut R) -> u8 {
    if rng.gen_bool(SPAWN_TWO_PROBABILITY) {
        SPAWN_TWO
    } else {
        SPAWN_FOUR
    }
}

fn insert_random_tile<R: Rng + ?Sized>(board: Board, rng: &mut R) -> Option<Board> {
    let empty = board.empty_cells();
    if empty.is_empty() {
        return None;
    }
    let cell = empty[rng.gen_range(0..empty.len())];
    let exponent = random_exponent(rng);
    trace!("spawning exponent {} at cell {} of {:?}", exponent, cell, board);
    Some(Board(set_nibble(board.raw(), cell, exponent)))
}

/// Places one new tile on a uniformly chosen empty cell: a 2 with probability
/// 0.9, a 4 otherwise.
///
/// All randomness comes from `rng`, so a seeded generator replays the same game.
///
/// # Errors
/// Returns `EngineError::BoardFull` if the board has no empty cell.
///
/// # Examples
/// ```
/// use e2048::engine::{spawn_one, Board};
/// use rand::{rngs::SmallRng, SeedableRng};
/// let mut rng = SmallRng::seed_from_u64(7);
/// let board = spawn_one(Board::EMPTY, &mut rng).unwrap();
/// assert_eq!(board.count_empty(), 15);
/// ```
pub fn spawn_one<R: Rng + ?Sized>(board: Board, rng: &mut R) -> Result<Board> {
    insert_random_tile(board, rng).ok_or(EngineError::BoardFull)
}

/// The empty board with two spawned tiles.
pub fn new_game<R: Rng + ?Sized>(rng: &mut R) -> Board {
    let mut board = Board::EMPTY;
    for _ in 0..2 {
        if let Some(next) = insert_random_tile(board, rng) {
            board = next;
        }
    }
    debug!("new game {:?}", board);
    board
}

/// Applies `direction` and spawns one tile on the result.
///
/// Callers are expected to check [`can_move`] first. An illegal direction
/// spawns onto the unchanged board, which a live game loop must not allow.
///
/// # Errors
/// Returns `EngineError::BoardFull` if the moved board has no empty cell,
/// which only happens when `direction` was illegal on a full board.
pub fn move_and_spawn<R: Rng + ?Sized>(
    board: Board,
    direction: Direction,
    rng: &mut R,
) -> Result<Board> {
    let moved = apply(board, direction);
    if moved == board {
        warn!("move {} does not change {:?}; spawning anyway", direction, board);
    }
    spawn_one(moved, rng)
}
