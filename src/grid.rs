// the board is a torus: leaving one edge re-enters from the opposite one
use colored::Color;
use num::Integer;

pub const SCREEN_WIDTH: i32 = 640;
pub const SCREEN_HEIGHT: i32 = 480;
pub const GRID_SIZE: i32 = 20;
pub const GRID_WIDTH: i32 = SCREEN_WIDTH / GRID_SIZE;
pub const GRID_HEIGHT: i32 = SCREEN_HEIGHT / GRID_SIZE;

pub const BOARD_BACKGROUND_COLOR: Color = Color::TrueColor { r: 0, g: 0, b: 0 };
pub const BORDER_COLOR: Color = Color::TrueColor { r: 93, g: 216, b: 228 };
pub const APPLE_COLOR: Color = Color::TrueColor { r: 255, g: 0, b: 0 };
pub const SNAKE_COLOR: Color = Color::TrueColor { r: 0, g: 255, b: 0 };

/// Frames per second when nothing else is configured.
pub const SPEED: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit vector of the direction, y grows downwards.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        self.opposite() == other
    }
}

/// A cell of the grid (not a pixel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coordinates {
    pub x: i32,
    pub y: i32,
}

impl Coordinates {
    pub fn new(x: i32, y: i32) -> Coordinates {
        Coordinates { x, y }
    }

    /// Cell whose top-left corner is the given pixel.
    pub fn from_pixels(px: i32, py: i32) -> Coordinates {
        Coordinates::new(
            Integer::div_floor(&px, &GRID_SIZE),
            Integer::div_floor(&py, &GRID_SIZE),
        )
    }

    /// Top-left pixel of the cell.
    pub fn to_pixels(&self) -> (i32, i32) {
        (self.x * GRID_SIZE, self.y * GRID_SIZE)
    }

    /// The neighbouring cell in `direction`, wrapped around the grid edges.
    pub fn step(&self, direction: Direction, grid: &Grid) -> Coordinates {
        let (dx, dy) = direction.delta();
        grid.wrap(Coordinates::new(self.x + dx, self.y + dy))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
}

impl Default for Grid {
    fn default() -> Self {
        Grid::new(GRID_WIDTH, GRID_HEIGHT)
    }
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Grid {
        Grid { width, height }
    }

    pub fn from_screen(screen_width: i32, screen_height: i32, cell_size: i32) -> Grid {
        Grid::new(screen_width / cell_size, screen_height / cell_size)
    }

    pub fn contains(&self, position: &Coordinates) -> bool {
        position.x >= 0 && position.x < self.width && position.y >= 0 && position.y < self.height
    }

    pub fn wrap(&self, position: Coordinates) -> Coordinates {
        // mod_floor keeps -1 at width - 1, the plain % operator would not
        Coordinates::new(
            position.x.mod_floor(&self.width),
            position.y.mod_floor(&self.height),
        )
    }

    pub fn cell_count(&self) -> usize {
        self.width.max(0) as usize * self.height.max(0) as usize
    }

    pub fn center(&self) -> Coordinates {
        Coordinates::new(self.width / 2, self.height / 2)
    }

    /// Every cell, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Coordinates> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Coordinates::new(x, y)))
    }

    /// Index of the cell in row-major order, `None` outside the grid.
    pub fn index_of(&self, position: &Coordinates) -> Option<usize> {
        if !self.contains(position) {
            return None;
        }
        Some((position.y * self.width + position.x) as usize)
    }
}
