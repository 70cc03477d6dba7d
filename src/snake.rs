// the snake moves head first: a new head is pushed in front and the tail is
// dropped, eating an apple puts the dropped tail back
use colored::Color;
use log::debug;

use crate::grid::{Coordinates, Direction, Grid, BOARD_BACKGROUND_COLOR, BORDER_COLOR, SNAKE_COLOR};
use crate::surface::{GameObject, Surface};

#[derive(Debug, Clone)]
pub struct Snake {
    positions: Vec<Coordinates>, // The head is the first element
    direction: Direction,
    next_direction: Option<Direction>,
    last: Option<Coordinates>,
    body_color: Color,
    grid: Grid,
    start: Coordinates,
    guard_reversal: bool,
}

impl Default for Snake {
    fn default() -> Self {
        let grid = Grid::default();
        Snake::new(grid, grid.center())
    }
}

impl Snake {
    pub fn new(grid: Grid, start: Coordinates) -> Self {
        Snake {
            positions: vec![start],
            direction: Direction::Right,
            next_direction: None,
            last: None,
            body_color: SNAKE_COLOR,
            grid,
            start,
            guard_reversal: true,
        }
    }

    /// Builds a snake with an arbitrary body, head first. Resetting it still
    /// goes back to a single cell at the first position.
    pub fn from_positions(grid: Grid, positions: Vec<Coordinates>, direction: Direction) -> Self {
        let start = positions.first().copied().unwrap_or_else(|| grid.center());
        let mut snake = Snake::new(grid, start);
        if !positions.is_empty() {
            snake.positions = positions;
        }
        snake.direction = direction;
        snake
    }

    /// Allows or refuses 180-degree turns.
    pub fn with_reversal_guard(mut self, guard: bool) -> Self {
        self.guard_reversal = guard;
        self
    }

    pub fn head(&self) -> Coordinates {
        self.positions[0]
    }

    pub fn positions(&self) -> &[Coordinates] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn next_direction(&self) -> Option<Direction> {
        self.next_direction
    }

    /// The cell vacated by the last move, if it has not been regrown.
    pub fn last(&self) -> Option<Coordinates> {
        self.last
    }

    fn refuses(&self, direction: Direction) -> bool {
        self.guard_reversal && self.direction.is_opposite(direction)
    }

    /// Queues a direction change for the next tick. Returns false when the
    /// change would reverse the snake onto itself.
    pub fn queue_direction(&mut self, direction: Direction) -> bool {
        if self.refuses(direction) {
            return false;
        }
        self.next_direction = Some(direction);
        true
    }

    pub fn update_direction(&mut self) {
        if let Some(next) = self.next_direction.take() {
            if self.refuses(next) {
                return;
            }
            if next != self.direction {
                debug!("snake turns {:?} -> {:?}", self.direction, next);
            }
            self.direction = next;
        }
    }

    pub fn move_snake(&mut self) {
        let new_head = self.head().step(self.direction, &self.grid);
        self.positions.insert(0, new_head);
        self.last = self.positions.pop();
    }

    pub fn grow(&mut self) {
        let tail = match self.last.take() {
            Some(last) => last,
            None => self.positions[self.positions.len() - 1],
        };
        self.positions.push(tail);
    }

    pub fn bites_itself(&self) -> bool {
        let head = self.head();
        // iter over the snake skipping the head, which is always at the front
        self.positions.iter().skip(1).any(|part| *part == head)
    }

    pub fn reset(&mut self) {
        self.positions = vec![self.start];
        self.direction = Direction::Right;
        self.next_direction = None;
        self.last = None;
    }
}

impl GameObject for Snake {
    fn position(&self) -> Coordinates {
        self.head()
    }

    fn body_color(&self) -> Color {
        self.body_color
    }

    fn draw(&self, surface: &mut Surface) {
        for position in &self.positions {
            surface.draw_cell(*position, self.body_color, Some(BORDER_COLOR));
        }
        if let Some(last) = self.last {
            if !self.positions.contains(&last) {
                surface.draw_cell(last, BOARD_BACKGROUND_COLOR, None);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Paint;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn line(grid: Grid, head: Coordinates, length: i32) -> Snake {
        let body = (0..length)
            .map(|i| grid.wrap(Coordinates::new(head.x - i, head.y)))
            .collect();
        Snake::from_positions(grid, body, Direction::Right)
    }

    fn adjacent(grid: &Grid, a: Coordinates, b: Coordinates) -> bool {
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right]
            .iter()
            .any(|d| a.step(*d, grid) == b)
    }

    #[test]
    fn test_default_snake() {
        let snake = Snake::default();
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), Coordinates::new(16, 12));
        assert_eq!(snake.direction(), Direction::Right);
        assert_eq!(snake.next_direction(), None);
    }

    #[test]
    fn test_move_right_one_cell() {
        let mut snake = Snake::new(Grid::default(), Coordinates::from_pixels(100, 100));
        snake.move_snake();
        assert_eq!(snake.head().to_pixels(), (120, 100));
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.last(), Some(Coordinates::new(5, 5)));
    }

    #[test]
    fn test_move_wraps_at_right_edge() {
        let mut snake = Snake::new(Grid::default(), Coordinates::from_pixels(620, 100));
        snake.move_snake();
        assert_eq!(snake.head().to_pixels(), (0, 100));
    }

    #[test]
    fn test_update_direction_applies_and_clears() {
        let mut snake = Snake::default();
        assert!(snake.queue_direction(Direction::Up));
        snake.update_direction();
        assert_eq!(snake.direction(), Direction::Up);
        assert_eq!(snake.next_direction(), None);
        snake.move_snake();
        assert_eq!(snake.head(), Coordinates::new(16, 11));
    }

    #[test]
    fn test_reversal_is_refused() {
        let mut snake = Snake::default();
        assert!(!snake.queue_direction(Direction::Left));
        snake.update_direction();
        assert_eq!(snake.direction(), Direction::Right);
    }

    #[test]
    fn test_reversal_allowed_without_guard() {
        let mut snake = Snake::default().with_reversal_guard(false);
        assert!(snake.queue_direction(Direction::Left));
        snake.update_direction();
        assert_eq!(snake.direction(), Direction::Left);
    }

    #[test]
    fn test_grow_restores_dropped_tail() {
        let grid = Grid::default();
        let mut snake = line(grid, Coordinates::new(10, 10), 3);
        snake.move_snake();
        snake.grow();
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.head(), Coordinates::new(11, 10));
        assert_eq!(snake.positions()[3], Coordinates::new(8, 10));
        assert_eq!(snake.last(), None);
    }

    #[test]
    fn test_grow_without_move_duplicates_tail() {
        let mut snake = Snake::default();
        snake.grow();
        assert_eq!(snake.len(), 2);
        assert_eq!(snake.head(), Grid::default().center());
    }

    #[test]
    fn test_bites_itself() {
        let grid = Grid::default();
        let mut snake = line(grid, Coordinates::new(10, 10), 5);
        assert!(!snake.bites_itself());
        for direction in [Direction::Down, Direction::Left, Direction::Up] {
            snake.queue_direction(direction);
            snake.update_direction();
            snake.move_snake();
        }
        assert!(snake.bites_itself());
    }

    #[test]
    fn test_reset() {
        let grid = Grid::default();
        let mut snake = line(grid, Coordinates::new(10, 10), 5);
        snake.queue_direction(Direction::Up);
        snake.move_snake();
        snake.reset();
        assert_eq!(snake.positions(), &[Coordinates::new(10, 10)]);
        assert_eq!(snake.direction(), Direction::Right);
        assert_eq!(snake.next_direction(), None);
        assert_eq!(snake.last(), None);
    }

    #[test]
    fn test_draw_erases_vacated_tail() {
        let grid = Grid::default();
        let mut surface = Surface::new(grid);
        let mut snake = line(grid, Coordinates::new(10, 10), 2);
        snake.draw(&mut surface);
        snake.move_snake();
        snake.draw(&mut surface);
        assert_eq!(
            surface.cell(Coordinates::new(9, 10)),
            Some(Paint::blank(BOARD_BACKGROUND_COLOR))
        );
        for position in snake.positions() {
            assert_eq!(surface.cell(*position).map(|p| p.fill), Some(SNAKE_COLOR));
        }
    }

    #[test]
    fn test_body_stays_connected_and_on_board() {
        let grid = Grid::new(12, 10);
        let mut rng = StdRng::seed_from_u64(11);
        let mut snake = line(grid, Coordinates::new(3, 4), 6);
        let directions = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];
        let mut length = snake.len();
        for tick in 0..400 {
            snake.queue_direction(directions[rng.random_range(0..4)]);
            snake.update_direction();
            snake.move_snake();
            if tick % 25 == 0 {
                snake.grow();
                length += 1;
            }
            assert_eq!(snake.len(), length);
            assert!(snake.positions().iter().all(|p| grid.contains(p)));
            assert!(snake
                .positions()
                .windows(2)
                .all(|pair| adjacent(&grid, pair[0], pair[1])));
        }
    }
}
