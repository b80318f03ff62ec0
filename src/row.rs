//! The compact-and-merge-left transform on a single 4-cell line.
//!
//! `merge_left` is the only line algorithm in the crate. Every direction of the
//! move engine is reduced to it by rotating the board, and the 16-bit lookup
//! table used on the hot path is filled by running it over every possible line.

use std::sync::OnceLock;

/// Largest exponent a nibble can hold.
pub const MAX_EXPONENT: u8 = 0xf;

const LINE_TABLE_SIZE: usize = 0x1_0000; // 65,536 possible 16-bit lines

static SHIFT_LEFT: OnceLock<Box<[u16]>> = OnceLock::new();

/// Slides the non-empty cells of `line` towards index 0 and merges equal
/// neighbours once per pair, scanning left to right.
///
/// A cell produced by a merge is never merged again in the same pass, so
/// `[1, 1, 2, 0]` becomes `[2, 2, 0, 0]` and not `[3, 0, 0, 0]`. Two
/// exponent-15 tiles merge into 15: the nibble cannot represent 2^16.
///
/// ```
/// use e2048::row::merge_left;
/// assert_eq!(merge_left([1, 1, 2, 3]), [2, 2, 3, 0]);
/// assert_eq!(merge_left([0, 2, 0, 2]), [3, 0, 0, 0]);
/// ```
pub fn merge_left(line: [u8; 4]) -> [u8; 4] {
    // Compact
    let mut compacted = [0u8; 4];
    let mut len = 0;
    for &cell in line.iter().filter(|&&c| c != 0) {
        compacted[len] = cell;
        len += 1;
    }

    // Merge
    let mut out = [0u8; 4];
    let mut write = 0;
    let mut read = 0;
    while read < len {
        let cell = compacted[read];
        if read + 1 < len && compacted[read + 1] == cell {
            out[write] = (cell + 1).min(MAX_EXPONENT);
            read += 2;
        } else {
            out[write] = cell;
            read += 1;
        }
        write += 1;
    }
    out
}

/// Packs a line into 16 bits, cell 0 in the lowest nibble.
pub fn pack_line(line: [u8; 4]) -> u16 {
    line.iter()
        .rev()
        .fold(0u16, |acc, &cell| (acc << 4) | u16::from(cell & 0xf))
}

/// Inverse of [`pack_line`].
pub fn unpack_line(packed: u16) -> [u8; 4] {
    let mut line = [0u8; 4];
    for (idx, cell) in line.iter_mut().enumerate() {
        *cell = ((packed >> (4 * idx)) & 0xf) as u8;
    }
    line
}

fn build_table() -> Box<[u16]> {
    (0..LINE_TABLE_SIZE)
        .map(|raw| pack_line(merge_left(unpack_line(raw as u16))))
        .collect()
}

/// Table-backed [`merge_left`] over a packed line.
#[inline]
pub fn shift_left_line(packed: u16) -> u16 {
    let table = SHIFT_LEFT.get_or_init(build_table);
    table[packed as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_row_is_fixed_point() {
        assert_eq!(merge_left([0, 0, 0, 0]), [0, 0, 0, 0]);
    }

    #[test]
    fn test_merge_pairs_once() {
        // 2 2 4 8 -> 4 4 8 _
        assert_eq!(merge_left([1, 1, 2, 3]), [2, 2, 3, 0]);
        // 2 2 2 2 -> 4 4 _ _
        assert_eq!(merge_left([1, 1, 1, 1]), [2, 2, 0, 0]);
        // 2 2 2 _ -> 4 2 _ _
        assert_eq!(merge_left([1, 1, 1, 0]), [2, 1, 0, 0]);
    }

    #[test]
    fn test_compacts_interior_gaps() {
        assert_eq!(merge_left([0, 0, 0, 4]), [4, 0, 0, 0]);
        assert_eq!(merge_left([3, 0, 0, 3]), [4, 0, 0, 0]);
        assert_eq!(merge_left([0, 1, 0, 2]), [1, 2, 0, 0]);
    }

    #[test]
    fn test_settled_row_unchanged() {
        assert_eq!(merge_left([1, 2, 3, 4]), [1, 2, 3, 4]);
        assert_eq!(merge_left([5, 1, 0, 0]), [5, 1, 0, 0]);
    }

    #[test]
    fn test_top_exponent_saturates() {
        assert_eq!(merge_left([15, 15, 0, 0]), [15, 0, 0, 0]);
    }

    #[test]
    fn test_pack_line_nibble_order() {
        assert_eq!(pack_line([3, 0, 0, 0]), 0x0003);
        assert_eq!(pack_line([8, 7, 6, 5]), 0x5678);
        assert_eq!(unpack_line(0x5678), [8, 7, 6, 5]);
    }

    fn has_equal_neighbours(line: [u8; 4]) -> bool {
        line.windows(2).any(|w| w[0] != 0 && w[0] == w[1])
    }

    #[test]
    fn test_idempotent_over_every_line() {
        for raw in 0..=u16::MAX {
            let once = merge_left(unpack_line(raw));
            let first_gap = once.iter().position(|&c| c == 0).unwrap_or(4);
            assert!(once[first_gap..].iter().all(|&c| c == 0), "gap in {:?}", once);
            // Single-pass merging leaves fresh pairs like [2, 2, ..] for the next move.
            if !has_equal_neighbours(once) {
                assert_eq!(merge_left(once), once, "line {:#06x}", raw);
            } else {
                assert_ne!(merge_left(once), once, "line {:#06x}", raw);
            }
        }
    }

    #[test]
    fn test_table_matches_algorithm() {
        for raw in 0..=u16::MAX {
            assert_eq!(
                shift_left_line(raw),
                pack_line(merge_left(unpack_line(raw))),
                "line {:#06x}",
                raw
            );
        }
    }
}
