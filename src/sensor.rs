//! Local sensor readings and their dense integer encoding.
//!
//! A reading is five cells (self, north, east, south, west), each one of
//! three states, so there are `3^5 = 243` readings. A reading is encoded as
//! a base-3 number with the self cell as the most significant digit.

use std::fmt;

use crate::error::ContractError;

/// State of a single sensed cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SensorState {
    Empty,
    Wall,
    Can,
}

impl SensorState {
    /// Number of distinct states (the radix of the encoding).
    pub const COUNT: usize = 3;

    /// Returns the digit value of this state (0=Empty, 1=Wall, 2=Can).
    pub fn index(&self) -> usize {
        match self {
            SensorState::Empty => 0,
            SensorState::Wall => 1,
            SensorState::Can => 2,
        }
    }

    /// Every state in digit order, so `all()[s.index()] == s`.
    pub fn all() -> [SensorState; SensorState::COUNT] {
        [SensorState::Empty, SensorState::Wall, SensorState::Can]
    }

    /// Inverse of [`SensorState::index`].
    pub fn from_index(index: usize) -> Option<Self> {
        Self::all().get(index).copied()
    }
}

impl fmt::Display for SensorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorState::Empty => write!(f, "Empty"),
            SensorState::Wall => write!(f, "Wall"),
            SensorState::Can => write!(f, "Can"),
        }
    }
}

/// A five-cell reading in fixed order: self, north, east, south, west.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SensorReading {
    pub cells: [SensorState; SensorReading::LENGTH],
}

impl SensorReading {
    /// Cells per reading.
    pub const LENGTH: usize = 5;

    /// Number of distinct readings, `COUNT^LENGTH`.
    pub const COMBINATIONS: usize = 243;

    const GLYPHS: [char; SensorReading::LENGTH] = ['+', '^', '>', 'v', '<'];

    /// Creates a reading from its five cells.
    pub fn new(
        current: SensorState,
        north: SensorState,
        east: SensorState,
        south: SensorState,
        west: SensorState,
    ) -> Self {
        Self {
            cells: [current, north, east, south, west],
        }
    }

    /// Encodes this reading into `[0, 243)` by successive multiply-add.
    pub fn encode(&self) -> usize {
        self.cells
            .iter()
            .fold(0, |code, cell| code * SensorState::COUNT + cell.index())
    }

    /// Decodes a code produced by [`SensorReading::encode`].
    ///
    /// Digits are peeled off by successive division, so the west cell comes
    /// out first.
    pub fn decode(code: usize) -> Result<Self, ContractError> {
        if code >= Self::COMBINATIONS {
            return Err(ContractError::InvalidSensorCode(code));
        }
        let mut cells = [SensorState::Empty; Self::LENGTH];
        let digits = SensorState::all();
        let mut rest = code;
        for cell in cells.iter_mut().rev() {
            *cell = digits[rest % SensorState::COUNT];
            rest /= SensorState::COUNT;
        }
        Ok(Self { cells })
    }

    /// Iterates every reading in code order.
    pub fn all() -> impl Iterator<Item = SensorReading> {
        (0..Self::COMBINATIONS).filter_map(|code| Self::decode(code).ok())
    }
}

impl fmt::Display for SensorReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (glyph, cell) in Self::GLYPHS.iter().zip(self.cells.iter()) {
            write!(f, "({}{}) ", glyph, cell)?;
        }
        Ok(())
    }
}
