//! Text rendering of boards.
//!
//! Each cell is right-justified to width 4 and followed by a space; every row
//! ends with a newline. Values wider than four characters (16384 and up) simply
//! push the rest of the row to the right.
use crate::engine::{Board, BOARD_SIDE};
use std::io;

/// How a board is turned into text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    /// Show the raw exponent instead of 2^exponent. Empty cells then show `0`.
    pub numeric_labels: bool,
    /// Glyph for empty cells when `numeric_labels` is off.
    pub blank: String,
    /// Prepended to every rendered row.
    pub line_prefix: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            numeric_labels: false,
            blank: "_".to_string(),
            line_prefix: String::new(),
        }
    }
}

impl RenderOptions {
    pub fn numeric(mut self, numeric_labels: bool) -> Self {
        self.numeric_labels = numeric_labels;
        self
    }

    pub fn with_blank(mut self, blank: impl Into<String>) -> Self {
        self.blank = blank.into();
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.line_prefix = prefix.into();
        self
    }

    fn label(&self, exponent: u8) -> String {
        if self.numeric_labels {
            exponent.to_string()
        } else if exponent == 0 {
            self.blank.clone()
        } else {
            (1u32 << exponent).to_string()
        }
    }
}

/// Renders `board` as four text rows.
///
/// # Examples
/// ```
/// use e2048::engine::Board;
/// use e2048::render::{render, RenderOptions};
/// let text = render(Board::from_raw(0x03), &RenderOptions::default());
/// assert!(text.starts_with("   8    _    _    _ \n"));
/// assert_eq!(text.lines().count(), 4);
/// ```
pub fn render(board: Board, options: &RenderOptions) -> String {
    let mut output = String::new();
    for row in board.to_grid() {
        output.push_str(&options.line_prefix);
        for exponent in row {
            output.push_str(&format!("{:>4} ", options.label(exponent)));
        }
        output.push('\n');
    }
    debug_assert_eq!(output.lines().count(), BOARD_SIDE);
    output
}

/// Writes the rendering of `board` to `out`.
pub fn render_to<W: io::Write + ?Sized>(
    board: Board,
    options: &RenderOptions,
    out: &mut W,
) -> io::Result<()> {
    out.write_all(render(board, options).as_bytes())
}
