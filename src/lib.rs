//! # e2048
//!
//! A 2048 game engine built for programmatic play: learning agents, simulators
//! and planners that need to hold millions of boards in memory.
//!
//! A board is a single `u64` (16 cells of 4-bit exponents), so it is `Copy`,
//! hashable and cheap to store. All operations are pure functions returning new
//! boards. Randomness only enters through a caller-supplied `rand::Rng`.
//!
//! It is used by one binary:
//! - `inspect`: renders a board given by key or rows and lists its legal moves
//!   and successor distributions.
//!
//! ## Modules
//! - `engine`: the `Board` and `Direction` types, the packed codec, the move
//!   engine, legality checks and the random spawner.
//! - `row`: the compact-and-merge-left line transform every move is built on.
//! - `outcomes`: enumeration of successor boards with their probabilities.
//! - `render`: text rendering of boards.
//! - `utils`: parsing boards and keys from text.
//! - `error`: the crate's error type.
//!
//! ```
//! use e2048::engine::{new_game, move_and_spawn, Direction};
//! use rand::{rngs::SmallRng, SeedableRng};
//!
//! let mut rng = SmallRng::seed_from_u64(2048);
//! let mut board = new_game(&mut rng);
//! while let Some(&direction) = board.legal_directions().first() {
//!     board = move_and_spawn(board, direction, &mut rng).unwrap();
//!     if board.max_exponent() >= 5 {
//!         break;
//!     }
//! }
//! println!("{}", board);
//! ```

pub mod engine;
pub mod error;
pub mod outcomes;
pub mod render;
pub mod row;
pub mod utils;

pub use engine::{Board, Direction};
pub use error::EngineError;
