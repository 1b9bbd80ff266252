#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Outbreak engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Systems submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values that adapters may
//! log or inspect. Grid arithmetic lives here as well so every crate agrees on
//! how the toroidal grid wraps.

mod issue;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use issue::{IssueKind, ValidationIssue};

/// Number of creatures converted into zombies over the course of a run.
pub type Score = u64;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Resets the world to an empty grid of the provided size.
    ConfigureWorld {
        /// Side length of the square grid.
        size: GridSize,
        /// Movement script every zombie replays, stored verbatim.
        script: MovementScript,
    },
    /// Enqueues a zombie at the back of the pending queue.
    PlaceZombie {
        /// Cell the zombie starts from.
        cell: CellCoord,
    },
    /// Adds an uninfected creature to the bucket of the provided cell.
    PlaceCreature {
        /// Cell the creature waits in.
        cell: CellCoord,
    },
    /// Pops the front pending zombie and replays the full movement script for it.
    AdvanceZombie,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that the world was reset to a new grid and script.
    WorldConfigured {
        /// Side length of the configured grid.
        size: GridSize,
    },
    /// Confirms that a zombie joined the pending queue during set-up.
    ZombiePlaced {
        /// Cell the zombie occupies.
        cell: CellCoord,
    },
    /// Confirms that a creature was bucketed during set-up.
    CreaturePlaced {
        /// Cell the creature occupies.
        cell: CellCoord,
    },
    /// Reports a single recognised movement applied to the active zombie.
    ZombieStepped {
        /// Cell the zombie occupied before the move.
        from: CellCoord,
        /// Cell the zombie occupies after the move.
        to: CellCoord,
        /// Direction that was applied.
        direction: Direction,
    },
    /// Reports a movement symbol that was not recognised and therefore skipped.
    MovementSkipped {
        /// Offending symbol after upper-casing.
        symbol: char,
        /// Cell the zombie remained on.
        cell: CellCoord,
    },
    /// Reports that the active zombie infected every creature waiting in a cell.
    CreaturesInfected {
        /// Cell whose bucket was consumed.
        cell: CellCoord,
        /// Number of creatures converted.
        count: u64,
    },
    /// Reports that a zombie exhausted the movement script.
    ZombieFinished {
        /// Final resting cell of the zombie.
        cell: CellCoord,
    },
    /// Announces that no zombies remain pending.
    OutbreakEnded {
        /// Final score of the run.
        score: Score,
    },
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell (the `x` axis).
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell (the `y` axis).
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

/// Side length of the square, wrap-around grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridSize(u32);

impl GridSize {
    /// Creates a new grid size wrapper.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the number of cells along each axis.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Largest valid index along either axis.
    ///
    /// Grids of size zero and one both collapse onto the single index `0`.
    #[must_use]
    pub const fn max_index(&self) -> u32 {
        self.0.saturating_sub(1)
    }

    /// Reports whether the cell lies inside the grid.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column < self.0 && cell.row < self.0
    }
}

/// Cardinal movement directions available to zombies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// Decodes a movement symbol, ignoring case.
    #[must_use]
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol.to_ascii_uppercase() {
            'U' => Some(Self::Up),
            'D' => Some(Self::Down),
            'L' => Some(Self::Left),
            'R' => Some(Self::Right),
            _ => None,
        }
    }

    /// Canonical upper-case symbol of the direction.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Up => 'U',
            Self::Down => 'D',
            Self::Left => 'L',
            Self::Right => 'R',
        }
    }

    /// Direction that undoes this one.
    #[must_use]
    pub const fn inverse(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Entity inhabiting the grid, either waiting uninfected or roaming as a zombie.
///
/// Creatures carry no identity beyond their position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Creature {
    cell: CellCoord,
}

impl Creature {
    /// Creates a creature standing on the provided cell.
    #[must_use]
    pub const fn at(cell: CellCoord) -> Self {
        Self { cell }
    }

    /// Cell currently occupied by the creature.
    #[must_use]
    pub const fn cell(&self) -> CellCoord {
        self.cell
    }

    /// Moves one row up, wrapping from row `0` to `max_index`.
    pub fn move_up(&mut self, max_index: u32) {
        self.cell.row = if self.cell.row == 0 {
            max_index
        } else {
            self.cell.row - 1
        };
    }

    /// Moves one row down, wrapping from `max_index` to row `0`.
    pub fn move_down(&mut self, max_index: u32) {
        self.cell.row = if self.cell.row >= max_index {
            0
        } else {
            self.cell.row + 1
        };
    }

    /// Moves one column left, wrapping from column `0` to `max_index`.
    pub fn move_left(&mut self, max_index: u32) {
        self.cell.column = if self.cell.column == 0 {
            max_index
        } else {
            self.cell.column - 1
        };
    }

    /// Moves one column right, wrapping from `max_index` to column `0`.
    pub fn move_right(&mut self, max_index: u32) {
        self.cell.column = if self.cell.column >= max_index {
            0
        } else {
            self.cell.column + 1
        };
    }

    /// Applies a single movement in the provided direction.
    pub fn advance(&mut self, direction: Direction, max_index: u32) {
        match direction {
            Direction::Up => self.move_up(max_index),
            Direction::Down => self.move_down(max_index),
            Direction::Left => self.move_left(max_index),
            Direction::Right => self.move_right(max_index),
        }
    }
}

/// Ordered movement symbols replayed by every zombie.
///
/// The script is kept exactly as supplied; case folding happens while
/// iterating over [`MovementScript::movements`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MovementScript(String);

impl MovementScript {
    /// Wraps the raw script text.
    #[must_use]
    pub fn new(script: impl Into<String>) -> Self {
        Self(script.into())
    }

    /// Raw script text as supplied.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterates the upper-cased symbols of the script, decoding each one.
    pub fn movements(&self) -> impl Iterator<Item = Movement> + '_ {
        self.0
            .chars()
            .flat_map(char::to_uppercase)
            .map(|symbol| match Direction::from_symbol(symbol) {
                Some(direction) => Movement::Step(direction),
                None => Movement::Unrecognised(symbol),
            })
    }
}

/// Single decoded entry of a [`MovementScript`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Movement {
    /// A recognised step in the given direction.
    Step(Direction),
    /// A symbol outside `U`, `D`, `L` and `R`.
    Unrecognised(char),
}
