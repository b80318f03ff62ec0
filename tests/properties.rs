use e2048::engine::{
    apply, can_move, decode, encode, game_over, legal_directions, move_and_spawn, new_game,
    Board, Direction,
};
use e2048::outcomes::{all_successors, successors};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

const EPS: f64 = 1e-9;

/// Boards visited by a few seeded random play-outs, from openings to game over.
fn played_boards() -> Vec<Board> {
    let mut boards = Vec::new();
    for seed in 0..12u64 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = new_game(&mut rng);
        boards.push(board);
        while !game_over(board) && boards.len() < 4_000 * (seed as usize + 1) {
            let legal = legal_directions(board);
            let direction = legal[rng.gen_range(0..legal.len())];
            board = move_and_spawn(board, direction, &mut rng).unwrap();
            boards.push(board);
        }
    }
    boards
}

fn tile_sum(board: Board) -> u64 {
    decode(board.raw())
        .iter()
        .flatten()
        .filter(|&&e| e != 0)
        .map(|&e| 1u64 << e)
        .sum()
}

fn occupied(board: Board) -> usize {
    16 - board.count_empty()
}

#[test]
fn codec_round_trips_on_random_keys() {
    let mut rng = SmallRng::seed_from_u64(514514);
    for _ in 0..10_000 {
        let key: u64 = rng.gen();
        assert_eq!(encode(&decode(key)), key);
        let grid = decode(key);
        assert_eq!(decode(encode(&grid)), grid);
        assert_eq!(Board::try_from(grid).unwrap().raw(), key);
    }
}

#[test]
fn moves_conserve_tile_mass() {
    for board in played_boards() {
        for direction in Direction::ALL {
            let moved = apply(board, direction);
            assert_eq!(tile_sum(moved), tile_sum(board), "{:?} {}", board, direction);
            // Each merge removes exactly one tile.
            assert!(occupied(moved) <= occupied(board));
        }
    }
}

#[test]
fn legality_matches_key_change() {
    for board in played_boards() {
        for direction in Direction::ALL {
            assert_eq!(can_move(board, direction), apply(board, direction) != board);
        }
        assert_eq!(game_over(board), legal_directions(board).is_empty());
    }
}

#[test]
fn successor_probabilities_sum_to_one() {
    for board in played_boards().into_iter().step_by(7) {
        for direction in Direction::ALL {
            match successors(board, direction) {
                Some(outcomes) => {
                    let moved = apply(board, direction);
                    assert_eq!(outcomes.len(), 2 * moved.count_empty());
                    let total: f64 = outcomes.values().sum();
                    assert!((total - 1.0).abs() < EPS, "{:?} {}: {}", board, direction, total);
                    for next in outcomes.keys() {
                        assert_eq!(next.count_empty() + 1, moved.count_empty());
                    }
                }
                None => assert!(!can_move(board, direction)),
            }
        }
        assert_eq!(all_successors(board).len(), legal_directions(board).len());
    }
}

#[test]
fn opposite_moves_are_mirror_images() {
    // Mirror every row; left on the mirror is right on the original, mirrored back.
    fn mirror(board: Board) -> Board {
        let mut grid = board.to_grid();
        for row in grid.iter_mut() {
            row.reverse();
        }
        Board::from_grid(&grid)
    }
    for board in played_boards().into_iter().step_by(3) {
        assert_eq!(
            mirror(apply(mirror(board), Direction::Left)),
            apply(board, Direction::Right)
        );
    }
}

#[test]
fn random_play_ends_in_locked_board() {
    let mut rng = SmallRng::seed_from_u64(2048);
    let mut board = new_game(&mut rng);
    let mut moves = 0;
    while let Some(&direction) = legal_directions(board).first() {
        board = move_and_spawn(board, direction, &mut rng).unwrap();
        moves += 1;
        assert!(moves < 100_000, "game did not end");
    }
    assert_eq!(board.count_empty(), 0);
    for direction in Direction::ALL {
        assert!(successors(board, direction).is_none());
    }
}
