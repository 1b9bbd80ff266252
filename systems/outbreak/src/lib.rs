#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Simulation driver that builds a world from a validated set-up and runs the outbreak.
//!
//! The driver holds no world state of its own. Callers pass the [`World`]
//! explicitly and drive it one zombie at a time through [`Outbreak::advance`],
//! or to completion through [`Outbreak::run`].

use std::fmt;

use outbreak_core::{CellCoord, Command, Event, Score};
use outbreak_system_validation::ValidatedSetup;
use outbreak_world::{self as world, query, World};
use serde::Serialize;
use thiserror::Error;

/// Progress of an outbreak.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutbreakState {
    /// At least one zombie still waits to replay the script.
    Running,
    /// The pending queue is empty; the results are final.
    Done,
}

/// Errors raised while driving an outbreak.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum OutbreakError {
    /// The configured advance limit was reached while zombies were still pending.
    #[error("outbreak still running after {limit} zombie advances")]
    AdvanceLimitExceeded {
        /// Maximum number of advances permitted.
        limit: usize,
    },
}

/// Translates a validated set-up into the commands that populate a fresh world.
#[must_use]
pub fn setup_commands(setup: &ValidatedSetup) -> Vec<Command> {
    let mut commands = Vec::with_capacity(setup.creatures().len() + 2);
    commands.push(Command::ConfigureWorld {
        size: setup.size(),
        script: setup.script().clone(),
    });
    if let Some(cell) = setup.zombie() {
        commands.push(Command::PlaceZombie { cell });
    }
    commands.extend(
        setup
            .creatures()
            .iter()
            .map(|&cell| Command::PlaceCreature { cell }),
    );
    commands
}

/// Builds a world populated from the validated set-up.
///
/// Construction cannot fail; validation already guaranteed every invariant.
pub fn build_world(setup: &ValidatedSetup, out_events: &mut Vec<Event>) -> World {
    let mut world = World::new();
    for command in setup_commands(setup) {
        world::apply(&mut world, command, out_events);
    }
    world
}

/// Reports whether the world still has zombies to advance.
#[must_use]
pub fn state(world: &World) -> OutbreakState {
    if query::has_pending_zombies(world) {
        OutbreakState::Running
    } else {
        OutbreakState::Done
    }
}

/// Drives pending zombies through the movement script.
#[derive(Clone, Debug, Default)]
pub struct Outbreak {
    advance_limit: Option<usize>,
    advances: usize,
}

impl Outbreak {
    /// Creates a driver without an advance limit.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            advance_limit: None,
            advances: 0,
        }
    }

    /// Creates a driver that refuses to advance more than `limit` zombies.
    #[must_use]
    pub const fn with_advance_limit(limit: usize) -> Self {
        Self {
            advance_limit: Some(limit),
            advances: 0,
        }
    }

    /// Number of zombies advanced by this driver so far.
    #[must_use]
    pub const fn advances(&self) -> usize {
        self.advances
    }

    /// Processes the zombie at the front of the pending queue fully.
    ///
    /// Returns [`OutbreakState::Done`] without touching the world once the
    /// queue is empty.
    pub fn advance(
        &mut self,
        world: &mut World,
        out_events: &mut Vec<Event>,
    ) -> Result<OutbreakState, OutbreakError> {
        if state(world) == OutbreakState::Done {
            return Ok(OutbreakState::Done);
        }

        if let Some(limit) = self.advance_limit {
            if self.advances >= limit {
                return Err(OutbreakError::AdvanceLimitExceeded { limit });
            }
        }

        self.advances += 1;
        world::apply(world, Command::AdvanceZombie, out_events);
        Ok(state(world))
    }

    /// Advances zombies until the queue drains, handing every event to `observe`.
    pub fn run<F>(
        &mut self,
        world: &mut World,
        mut observe: F,
    ) -> Result<OutbreakReport, OutbreakError>
    where
        F: FnMut(&Event),
    {
        let mut events = Vec::new();
        loop {
            let progress = self.advance(world, &mut events);
            for event in events.drain(..) {
                observe(&event);
            }
            if progress? == OutbreakState::Done {
                break;
            }
        }
        Ok(OutbreakReport::from_world(world))
    }
}

/// Externally observable outcome of an outbreak.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OutbreakReport {
    score: Score,
    positions: Vec<CellCoord>,
}

impl OutbreakReport {
    /// Captures the current score and finished zombie positions of the world.
    #[must_use]
    pub fn from_world(world: &World) -> Self {
        Self {
            score: query::score(world),
            positions: query::finished_zombies(world),
        }
    }

    /// Number of creatures converted.
    #[must_use]
    pub const fn score(&self) -> Score {
        self.score
    }

    /// Final cells of the finished zombies in finish order.
    #[must_use]
    pub fn positions(&self) -> &[CellCoord] {
        &self.positions
    }
}

impl fmt::Display for OutbreakReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "zombies score: {}", self.score)?;
        write!(f, "zombies positions: ")?;
        for (index, position) in self.positions.iter().enumerate() {
            if index > 0 {
                write!(f, " ")?;
            }
            write!(f, "{position}")?;
        }
        Ok(())
    }
}
