use colored::Color;
use rand::seq::IndexedRandom;
use rand::Rng;

use crate::grid::{Coordinates, Grid, APPLE_COLOR};
use crate::surface::GameObject;

#[derive(Debug, Clone)]
pub struct Apple {
    position: Coordinates,
    body_color: Color,
    grid: Grid,
}

impl Default for Apple {
    fn default() -> Self {
        Apple::new(Grid::default(), &mut rand::rng())
    }
}

impl Apple {
    pub fn new<R: Rng + ?Sized>(grid: Grid, rng: &mut R) -> Self {
        let mut apple = Apple {
            position: Coordinates::new(0, 0),
            body_color: APPLE_COLOR,
            grid,
        };
        apple.randomize_position(rng, None);
        apple
    }

    pub fn place(&mut self, position: Coordinates) {
        self.position = position;
    }

    /// Moves the apple to a uniformly random cell that is not in `excluded`.
    /// Returns the new cell, or `None` (apple left in place) when every cell
    /// is excluded.
    pub fn randomize_position<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        excluded: Option<&[Coordinates]>,
    ) -> Option<Coordinates> {
        let excluded = excluded.unwrap_or(&[]);
        let board_size = self.grid.cell_count();

        // if the snake covers more than 80% of the board pick among the free
        // cells, otherwise sample until a free cell comes up
        let position = if excluded.len() > (board_size * 4) / 5 {
            let free: Vec<Coordinates> = self
                .grid
                .cells()
                .filter(|cell| !excluded.contains(cell))
                .collect();
            *free.choose(rng)?
        } else {
            loop {
                let candidate = Coordinates::new(
                    rng.random_range(0..self.grid.width),
                    rng.random_range(0..self.grid.height),
                );
                if !excluded.contains(&candidate) {
                    break candidate;
                }
            }
        };
        self.position = position;
        Some(position)
    }
}

impl GameObject for Apple {
    fn position(&self) -> Coordinates {
        self.position
    }

    fn body_color(&self) -> Color {
        self.body_color
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::BORDER_COLOR;
    use crate::surface::{Paint, Surface};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_default_apple_is_on_the_board() {
        let apple = Apple::default();
        assert!(Grid::default().contains(&apple.position()));
        assert_eq!(apple.body_color(), APPLE_COLOR);
    }

    #[test]
    fn test_randomize_stays_in_bounds() {
        let grid = Grid::new(12, 10);
        let mut rng = StdRng::seed_from_u64(7);
        let mut apple = Apple::new(grid, &mut rng);
        for _ in 0..500 {
            let position = apple.randomize_position(&mut rng, None).unwrap();
            assert!(grid.contains(&position));
            assert_eq!(apple.position(), position);
        }
    }

    #[test]
    fn test_randomize_avoids_excluded_cells() {
        let grid = Grid::new(10, 10);
        let mut rng = StdRng::seed_from_u64(42);
        let mut apple = Apple::new(grid, &mut rng);
        // whole left half of the board is taken
        let taken: Vec<Coordinates> = grid.cells().filter(|c| c.x < 5).collect();
        for _ in 0..500 {
            let position = apple.randomize_position(&mut rng, Some(&taken)).unwrap();
            assert!(!taken.contains(&position));
        }
    }

    #[test]
    fn test_crowded_board_picks_the_only_free_cell() {
        let grid = Grid::new(10, 10);
        let mut rng = StdRng::seed_from_u64(1);
        let mut apple = Apple::new(grid, &mut rng);
        let free = Coordinates::new(7, 3);
        let taken: Vec<Coordinates> = grid.cells().filter(|c| *c != free).collect();
        assert_eq!(apple.randomize_position(&mut rng, Some(&taken)), Some(free));
    }

    #[test]
    fn test_full_board_leaves_apple_in_place() {
        let grid = Grid::new(10, 10);
        let mut rng = StdRng::seed_from_u64(3);
        let mut apple = Apple::new(grid, &mut rng);
        apple.place(Coordinates::new(4, 4));
        let taken: Vec<Coordinates> = grid.cells().collect();
        assert_eq!(apple.randomize_position(&mut rng, Some(&taken)), None);
        assert_eq!(apple.position(), Coordinates::new(4, 4));
    }

    #[test]
    fn test_draw() {
        let mut surface = Surface::new(Grid::default());
        let mut apple = Apple::default();
        apple.place(Coordinates::new(3, 8));
        apple.draw(&mut surface);
        assert_eq!(
            surface.cell(Coordinates::new(3, 8)),
            Some(Paint {
                fill: APPLE_COLOR,
                border: Some(BORDER_COLOR),
            })
        );
    }
}
