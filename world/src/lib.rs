#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Outbreak.

use std::collections::{BTreeMap, VecDeque};

use outbreak_core::{
    CellCoord, Command, Creature, Event, GridSize, Movement, MovementScript, Score,
};

/// Represents the authoritative Outbreak world state.
#[derive(Debug, Default)]
pub struct World {
    size: GridSize,
    script: MovementScript,
    occupied: BTreeMap<CellCoord, Vec<Creature>>,
    pending: VecDeque<Creature>,
    finished: Vec<Creature>,
    score: Score,
}

impl World {
    /// Creates an empty world with a zero-sized grid and no script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn reset(&mut self, size: GridSize, script: MovementScript) {
        self.size = size;
        self.script = script;
        self.occupied.clear();
        self.pending.clear();
        self.finished.clear();
        self.score = 0;
    }

    fn advance_next_zombie(&mut self, out_events: &mut Vec<Event>) {
        let Some(mut zombie) = self.pending.pop_front() else {
            return;
        };

        let script = std::mem::take(&mut self.script);
        let max_index = self.size.max_index();
        for movement in script.movements() {
            let from = zombie.cell();
            match movement {
                Movement::Step(direction) => {
                    zombie.advance(direction, max_index);
                    out_events.push(Event::ZombieStepped {
                        from,
                        to: zombie.cell(),
                        direction,
                    });
                }
                Movement::Unrecognised(symbol) => {
                    out_events.push(Event::MovementSkipped { symbol, cell: from });
                }
            }

            self.infect(zombie.cell(), out_events);
        }
        self.script = script;

        self.finished.push(zombie);
        out_events.push(Event::ZombieFinished {
            cell: zombie.cell(),
        });

        if self.pending.is_empty() {
            out_events.push(Event::OutbreakEnded { score: self.score });
        }
    }

    fn infect(&mut self, cell: CellCoord, out_events: &mut Vec<Event>) {
        let Some(victims) = self.occupied.remove(&cell) else {
            return;
        };

        let count = victims.len() as u64;
        self.score = self.score.saturating_add(count);
        self.pending.extend(victims);
        out_events.push(Event::CreaturesInfected { cell, count });
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Placement commands that fall outside the configured grid are ignored so
/// every stored coordinate stays within `0..size`.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureWorld { size, script } => {
            world.reset(size, script);
            out_events.push(Event::WorldConfigured { size });
        }
        Command::PlaceZombie { cell } => {
            if world.size.contains(cell) {
                world.pending.push_back(Creature::at(cell));
                out_events.push(Event::ZombiePlaced { cell });
            }
        }
        Command::PlaceCreature { cell } => {
            if world.size.contains(cell) {
                world
                    .occupied
                    .entry(cell)
                    .or_default()
                    .push(Creature::at(cell));
                out_events.push(Event::CreaturePlaced { cell });
            }
        }
        Command::AdvanceZombie => world.advance_next_zombie(out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use outbreak_core::{CellCoord, GridSize, MovementScript, Score};

    /// Side length of the configured grid.
    #[must_use]
    pub fn size(world: &World) -> GridSize {
        world.size
    }

    /// Movement script exactly as configured.
    #[must_use]
    pub fn movement_script(world: &World) -> &MovementScript {
        &world.script
    }

    /// Number of creatures converted so far.
    #[must_use]
    pub fn score(world: &World) -> Score {
        world.score
    }

    /// Reports whether any zombie still waits to replay the script.
    #[must_use]
    pub fn has_pending_zombies(world: &World) -> bool {
        !world.pending.is_empty()
    }

    /// Cells of the pending zombies, front of the queue first.
    #[must_use]
    pub fn pending_zombies(world: &World) -> Vec<CellCoord> {
        world.pending.iter().map(|zombie| zombie.cell()).collect()
    }

    /// Final cells of the finished zombies in the order they finished.
    #[must_use]
    pub fn finished_zombies(world: &World) -> Vec<CellCoord> {
        world.finished.iter().map(|zombie| zombie.cell()).collect()
    }

    /// Cells that still hold uninfected creatures, in ascending order.
    #[must_use]
    pub fn occupied_cells(world: &World) -> Vec<CellCoord> {
        world.occupied.keys().copied().collect()
    }

    /// Number of uninfected creatures waiting in the provided cell.
    #[must_use]
    pub fn creatures_at(world: &World, cell: CellCoord) -> usize {
        world.occupied.get(&cell).map_or(0, Vec::len)
    }
}
