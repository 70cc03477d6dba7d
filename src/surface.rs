use std::io::{self, Write};

use colored::{Color, Colorize};

use crate::grid::{Coordinates, Grid, BOARD_BACKGROUND_COLOR, BORDER_COLOR};

/// How a single cell is painted: a filled square, optionally framed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paint {
    pub fill: Color,
    pub border: Option<Color>,
}

impl Paint {
    pub fn blank(color: Color) -> Paint {
        Paint {
            fill: color,
            border: None,
        }
    }
}

/// The frame being composed. Objects paint cells into it and the loop
/// presents it once per tick.
#[derive(Debug, Clone)]
pub struct Surface {
    grid: Grid,
    cells: Vec<Paint>,
}

impl Surface {
    pub fn new(grid: Grid) -> Self {
        Surface {
            grid,
            cells: vec![Paint::blank(BOARD_BACKGROUND_COLOR); grid.cell_count()],
        }
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn fill(&mut self, color: Color) {
        self.cells.fill(Paint::blank(color));
    }

    /// Paints one cell. Positions outside the grid are ignored.
    pub fn draw_cell(&mut self, position: Coordinates, fill: Color, border: Option<Color>) {
        if let Some(index) = self.grid.index_of(&position) {
            self.cells[index] = Paint { fill, border };
        }
    }

    pub fn cell(&self, position: Coordinates) -> Option<Paint> {
        self.grid.index_of(&position).map(|index| self.cells[index])
    }

    /// Writes the frame to `out`: clear screen, framed board, status line.
    pub fn present<W: Write>(&self, out: &mut W, status: &str) -> io::Result<()> {
        // clear screen and move the cursor home
        write!(out, "{}[2J{}[1;1H", 27 as char, 27 as char)?;
        //border up
        write!(out, "▗")?;
        for _ in 0..self.grid.width {
            write!(out, "▄▄")?;
        }
        writeln!(out, "▖")?;
        for y in 0..self.grid.height {
            write!(out, "▐")?;
            for x in 0..self.grid.width {
                let paint = self.cells[(y * self.grid.width + x) as usize];
                match paint.border {
                    Some(border) => write!(out, "{}", "[]".color(border).on_color(paint.fill))?,
                    None => write!(out, "{}", "  ".on_color(paint.fill))?,
                }
            }
            writeln!(out, "▌")?;
        }
        //border down
        write!(out, "▝")?;
        for _ in 0..self.grid.width {
            write!(out, "▀▀")?;
        }
        writeln!(out, "▘")?;
        writeln!(out, "{}", status)?;
        out.flush()
    }
}

/// Anything with a position and a color that knows how to draw itself.
pub trait GameObject {
    fn position(&self) -> Coordinates;

    fn body_color(&self) -> Color;

    fn draw(&self, surface: &mut Surface) {
        surface.draw_cell(self.position(), self.body_color(), Some(BORDER_COLOR));
    }
}
