use crate::engine::{Board, BOARD_SIDE};
use crate::error::{EngineError, Result};
use crate::row::MAX_EXPONENT;

/// Parses rows of displayed tile values into a `Board`.
///
/// Each string slice is one row, starting from row 0, holding up to
/// `BOARD_SIDE` whitespace-separated tokens. Rows or cells that are not given
/// are empty.
///
/// Valid tokens are:
/// - a power of two from `2` to `32768`, the displayed tile value;
/// - `_`, `.` or `0` for an empty cell.
///
/// # Errors
/// Returns `EngineError::Parse` if there are more than `BOARD_SIDE` rows, a row
/// has more than `BOARD_SIDE` tokens, or a token is not a valid tile.
///
/// # Examples
/// ```
/// use e2048::utils::board_from_rows;
///
/// let board = board_from_rows(&["2 _ 4", ". 2048"]).unwrap();
/// assert_eq!(board.tile(0, 0), 1);
/// assert_eq!(board.tile(0, 2), 2);
/// assert_eq!(board.tile(1, 1), 11);
/// assert_eq!(board.tile(3, 3), 0);
///
/// assert!(board_from_rows(&["3"]).is_err());
/// assert!(board_from_rows(&["2"; 5]).is_err());
/// ```
pub fn board_from_rows(rows: &[&str]) -> Result<Board> {
    if rows.len() > BOARD_SIDE {
        return Err(EngineError::Parse(format!(
            "invalid number of rows: expected at most {}, found {}",
            BOARD_SIDE,
            rows.len()
        )));
    }

    let mut grid = [[0u8; BOARD_SIDE]; BOARD_SIDE];
    for (r, row) in rows.iter().enumerate() {
        let tokens: Vec<&str> = row.split_whitespace().collect();
        if tokens.len() > BOARD_SIDE {
            return Err(EngineError::Parse(format!(
                "row {} is too long: expected at most {} cells, found {}",
                r,
                BOARD_SIDE,
                tokens.len()
            )));
        }
        for (c, token) in tokens.into_iter().enumerate() {
            grid[r][c] = parse_tile(token).ok_or_else(|| {
                EngineError::Parse(format!("unrecognized tile '{}' in row {} col {}", token, r, c))
            })?;
        }
    }
    Ok(Board::from_grid(&grid))
}

/// Exponent of a displayed tile token, `None` if it is not a tile.
fn parse_tile(token: &str) -> Option<u8> {
    match token {
        "_" | "." | "0" => Some(0),
        _ => {
            let value: u32 = token.parse().ok()?;
            if value < 2 || !value.is_power_of_two() {
                return None;
            }
            let exponent = value.trailing_zeros() as u8;
            (exponent <= MAX_EXPONENT).then_some(exponent)
        }
    }
}

/// Parses a packed board key, decimal or `0x`-prefixed hexadecimal.
///
/// ```
/// use e2048::utils::parse_key;
/// assert_eq!(parse_key("0x03").unwrap().raw(), 3);
/// assert_eq!(parse_key("64").unwrap().raw(), 64);
/// assert!(parse_key("0xzz").is_err());
/// ```
pub fn parse_key(text: &str) -> Result<Board> {
    let text = text.trim();
    let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(&hex.replace('_', ""), 16),
        None => text.replace('_', "").parse::<u64>(),
    };
    parsed
        .map(Board::from_raw)
        .map_err(|e| EngineError::Parse(format!("invalid board key '{}': {}", text, e)))
}
