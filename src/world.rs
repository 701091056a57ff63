//! Bounded grid world holding collectible items.

use std::fmt;

use rand::Rng;

use crate::error::ContractError;
use crate::sensor::{SensorReading, SensorState};
use crate::types::{Direction, Position};

/// Grid width in cells.
pub const WIDTH: usize = 11;
/// Grid height in cells.
pub const HEIGHT: usize = 11;

/// A fixed-size grid where each cell either holds an item or is empty.
///
/// Cells outside the grid are walls. The world is built fresh for every
/// episode and only ever changes through [`GridWorld::try_pick_at`].
///
/// # Invariant
///
/// `remaining_item_count()` always equals the number of occupied cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridWorld {
    /// Occupancy indexed as `cells[y][x]`.
    cells: [[bool; WIDTH]; HEIGHT],
    item_count: usize,
}

impl GridWorld {
    /// Creates a world with no items.
    pub fn empty() -> Self {
        Self {
            cells: [[false; WIDTH]; HEIGHT],
            item_count: 0,
        }
    }

    /// Creates a world where each cell independently holds an item with
    /// probability `fill_rate`.
    ///
    /// Cells are visited row by row from `y = 0`, drawing one uniform value
    /// in `[0, 1)` each; a cell is occupied iff its draw is below `fill_rate`.
    pub fn create_random<R: Rng + ?Sized>(
        fill_rate: f64,
        rng: &mut R,
    ) -> Result<Self, ContractError> {
        if !(0.0..=1.0).contains(&fill_rate) {
            return Err(ContractError::InvalidFillRate(fill_rate));
        }
        let mut world = Self::empty();
        for row in world.cells.iter_mut() {
            for cell in row.iter_mut() {
                *cell = rng.gen::<f64>() < fill_rate;
                if *cell {
                    world.item_count += 1;
                }
            }
        }
        Ok(world)
    }

    /// Creates a world with items at exactly the given positions.
    pub fn from_items(items: &[Position]) -> Result<Self, ContractError> {
        let mut world = Self::empty();
        for &position in items {
            world.place_item(position)?;
        }
        Ok(world)
    }

    /// Puts an item at `position`. Placing on an occupied cell is a no-op.
    pub fn place_item(&mut self, position: Position) -> Result<(), ContractError> {
        let (col, row) = self.cell_index(position)?;
        if !self.cells[row][col] {
            self.cells[row][col] = true;
            self.item_count += 1;
        }
        Ok(())
    }

    /// Starting cell for the agent: `(WIDTH / 2, HEIGHT / 2)`.
    pub fn center() -> Position {
        Position::new((WIDTH / 2) as i32, (HEIGHT / 2) as i32)
    }

    /// Returns true if `(x, y)` lies inside the grid.
    pub fn is_valid_coordinate(x: i32, y: i32) -> bool {
        (0..WIDTH as i32).contains(&x) && (0..HEIGHT as i32).contains(&y)
    }

    /// Classifies a single cell. Anything outside the grid is a wall.
    pub fn sensor_state_at(&self, x: i32, y: i32) -> SensorState {
        match self.cell_index(Position::new(x, y)) {
            Err(_) => SensorState::Wall,
            Ok((col, row)) if self.cells[row][col] => SensorState::Can,
            Ok(_) => SensorState::Empty,
        }
    }

    /// Reads self, north, east, south and west of `(x, y)`, in that order.
    pub fn read_sensors(&self, x: i32, y: i32) -> SensorReading {
        let here = Position::new(x, y);
        let state = |p: Position| self.sensor_state_at(p.x, p.y);
        let [north, east, south, west] = Direction::all().map(|d| state(here.offset(d)));
        SensorReading::new(state(here), north, east, south, west)
    }

    /// Removes the item at `(x, y)` if there is one.
    ///
    /// Returns `Ok(true)` when an item was picked up, `Ok(false)` when the
    /// cell was already empty.
    pub fn try_pick_at(&mut self, x: i32, y: i32) -> Result<bool, ContractError> {
        let (col, row) = self.cell_index(Position::new(x, y))?;
        if !self.cells[row][col] {
            return Ok(false);
        }
        self.cells[row][col] = false;
        self.item_count -= 1;
        Ok(true)
    }

    /// Number of items still on the grid.
    pub fn remaining_item_count(&self) -> usize {
        self.item_count
    }

    /// Recounts occupied cells from scratch.
    pub fn count_items(&self) -> usize {
        self.cells.iter().flatten().filter(|c| **c).count()
    }

    /// Renders the grid top row first, marking the agent if given.
    ///
    /// `.` empty, `+` item, `#` agent on an empty cell, `@` agent on an item.
    pub fn render(&self, agent: Option<Position>) -> String {
        let mut repr = String::with_capacity((2 * WIDTH + 1) * HEIGHT);
        for (y, row) in self.cells.iter().enumerate().rev() {
            for (x, &has_item) in row.iter().enumerate() {
                let agent_here = agent == Some(Position::new(x as i32, y as i32));
                let glyph = match (agent_here, has_item) {
                    (true, true) => '@',
                    (true, false) => '#',
                    (false, true) => '+',
                    (false, false) => '.',
                };
                repr.push(glyph);
                repr.push(' ');
            }
            repr.push('\n');
        }
        repr
    }

    fn cell_index(&self, position: Position) -> Result<(usize, usize), ContractError> {
        if Self::is_valid_coordinate(position.x, position.y) {
            Ok((position.x as usize, position.y as usize))
        } else {
            Err(ContractError::InvalidCoordinate {
                x: position.x,
                y: position.y,
            })
        }
    }
}

impl fmt::Display for GridWorld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(Some(Self::center())))
    }
}
