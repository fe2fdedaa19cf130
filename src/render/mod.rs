//! Terminal output.
//!
//! The base board is printed once; after that only the cells named by the
//! board's dirty queues are rewritten. Commands are batched with `queue!` and
//! flushed once per pass.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Print, PrintStyledContent};
use crossterm::terminal::{Clear, ClearType};
use tracing::debug;

use crate::game::{Board, Layer};
use crate::tiles::Label;
use crate::types::{Position, Size, TileId};

/// What the detail row of every tile shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailMode {
    #[default]
    Details,
    TileIds,
}

impl DetailMode {
    pub fn toggled(self) -> Self {
        match self {
            DetailMode::Details => DetailMode::TileIds,
            DetailMode::TileIds => DetailMode::Details,
        }
    }
}

pub struct Renderer<W: Write> {
    out: W,
    origin: Position,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W) -> Self {
        Self::with_origin(out, Position::ORIGIN)
    }

    /// Draws the board with its top-left corner at `origin`.
    pub fn with_origin(out: W, origin: Position) -> Self {
        Self { out, origin }
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.out
    }

    fn move_to(&mut self, position: Position) -> io::Result<()> {
        let screen = position.offset_by(self.origin);
        queue!(self.out, MoveTo(screen.col - 1, screen.row - 1))
    }

    pub fn clear_screen(&mut self) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        self.out.flush()
    }

    /// Writes the static board. Dynamic cells come out blank.
    pub fn draw_board(&mut self, board: &Board) -> io::Result<()> {
        for (idx, line) in board.base().lines().enumerate() {
            self.move_to(Position::new(1, idx as u16 + 1))?;
            queue!(self.out, Print(line))?;
        }
        self.out.flush()
    }

    pub fn draw_colors(&mut self, board: &mut Board) -> io::Result<usize> {
        self.drain(board, Layer::Color, |board, tile_id| {
            (
                board.layout().color_position(tile_id),
                board.tile(tile_id).color_band().clone(),
            )
        })
    }

    pub fn draw_details(&mut self, board: &mut Board, mode: DetailMode) -> io::Result<usize> {
        self.drain(board, Layer::Detail, |board, tile_id| {
            let tile = board.tile(tile_id);
            let label = match mode {
                DetailMode::Details => tile.detail().clone(),
                DetailMode::TileIds => tile.id_label(),
            };
            (board.layout().detail_position(tile_id), label)
        })
    }

    pub fn draw_players(&mut self, board: &mut Board) -> io::Result<usize> {
        self.drain(board, Layer::Player, |board, tile_id| {
            (
                board.layout().player_position(tile_id),
                board.presence_label(tile_id),
            )
        })
    }

    /// Runs every pass. Returns the number of cells painted.
    pub fn draw_all(&mut self, board: &mut Board, mode: DetailMode) -> io::Result<usize> {
        Ok(self.draw_colors(board)? + self.draw_details(board, mode)? + self.draw_players(board)?)
    }

    fn drain<F>(&mut self, board: &mut Board, layer: Layer, mut paint: F) -> io::Result<usize>
    where
        F: FnMut(&Board, TileId) -> (Position, Label),
    {
        let mut painted = 0;
        while let Some(tile_id) = board.pop_dirty(layer) {
            let (position, label) = paint(board, tile_id);
            self.paint_label(position, &label)?;
            painted += 1;
        }
        self.out.flush()?;
        if painted > 0 {
            debug!(%layer, painted, "repainted tiles");
        }
        Ok(painted)
    }

    fn paint_label(&mut self, position: Position, label: &Label) -> io::Result<()> {
        self.move_to(position)?;
        for span in label.spans() {
            queue!(self.out, PrintStyledContent(span.clone()))?;
        }
        Ok(())
    }

    /// Input line, right below the board.
    pub fn draw_prompt(&mut self, board_size: Size, prompt: &str) -> io::Result<()> {
        self.draw_console_line(board_size.height + 1, prompt)
    }

    /// Message line, below the prompt.
    pub fn draw_status(&mut self, board_size: Size, message: &str) -> io::Result<()> {
        self.draw_console_line(board_size.height + 2, message)?;
        self.move_to(Position::new(1, board_size.height + 1))?;
        self.out.flush()
    }

    fn draw_console_line(&mut self, row: u16, text: &str) -> io::Result<()> {
        self.move_to(Position::new(1, row))?;
        queue!(self.out, Clear(ClearType::UntilNewLine), Print(text))?;
        self.out.flush()
    }
}
