use bit_set::BitSet;
use log::{debug, trace};
use rand::Rng;

use crate::cells::{self, Cartesian2DCoordinate, CompassPrimary, NeighbourSmallVec};
use crate::grid_dimensions::RectGridDimensions;
use crate::walls::{MazeWalls, WallPosition};

/// What a single iteration of a maze walk did.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum StepOutcome {
    /// A wall was removed, linking `from` to the previously unvisited cell `to`.
    Carved {
        from: Cartesian2DCoordinate,
        to: Cartesian2DCoordinate,
        direction: CompassPrimary,
        wall: WallPosition,
    },
    /// The cell had no unvisited neighbours left and was dropped from the stack.
    Backtracked(Cartesian2DCoordinate),
    /// The stack is empty, every cell has been visited.
    Finished,
}

/// Randomised depth first search ("recursive backtracker") over a closed grid, run one
/// iteration at a time.
///
/// The walk starts at `(0,0)`. Each iteration pops the top cell of the stack; if it still has
/// unvisited neighbours it is pushed back, one of those neighbours is chosen uniformly at
/// random, the wall between them is removed and the neighbour is pushed. A wall is only
/// removed when entering an unvisited cell, so the carved passages form a spanning tree.
#[derive(Debug, Clone)]
pub struct RecursiveBacktracker {
    walls: MazeWalls,
    visited: BitSet,
    stack: Vec<Cartesian2DCoordinate>,
    carved: usize,
}

impl RecursiveBacktracker {
    pub fn new(dimensions: RectGridDimensions) -> RecursiveBacktracker {
        let start = Cartesian2DCoordinate::new(0, 0);
        let mut visited = BitSet::with_capacity(dimensions.size().0);
        if let Some(index) = dimensions.coordinate_to_index(start) {
            visited.insert(index);
        }

        RecursiveBacktracker {
            walls: MazeWalls::closed(dimensions),
            visited,
            stack: vec![start],
            carved: 0,
        }
    }

    /// The wall state so far.
    #[inline]
    pub fn walls(&self) -> &MazeWalls {
        &self.walls
    }

    /// Walls removed so far.
    #[inline]
    pub fn carved(&self) -> usize {
        self.carved
    }

    /// Walls that a finished walk will have removed, one per cell except the start.
    #[inline]
    pub fn total_carves(&self) -> usize {
        self.walls.dimensions().size().0 - 1
    }

    #[inline]
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> StepOutcome {

        let current = match self.stack.pop() {
            Some(cell) => cell,
            None => return StepOutcome::Finished,
        };

        let candidates = self.unvisited_neighbours(current);
        if candidates.is_empty() {
            trace!("backtrack from {}", current);
            return StepOutcome::Backtracked(current);
        }

        self.stack.push(current);
        let (direction, chosen) = candidates[rng.gen_range(0..candidates.len())];

        match self.walls.remove_wall(current, direction) {
            Some(wall) => {
                self.mark_visited(chosen);
                self.stack.push(chosen);
                self.carved += 1;
                trace!("carve {} -> {} through {}", current, chosen, wall);
                StepOutcome::Carved {
                    from: current,
                    to: chosen,
                    direction,
                    wall,
                }
            }
            None => {
                // Candidates come from bounds checked neighbour lookups, so there is always an
                // interior wall to remove. Drop the cell rather than loop on it.
                self.stack.pop();
                StepOutcome::Backtracked(current)
            }
        }
    }

    /// Step until the next wall removal. Returns `Finished` if the walk ends first.
    pub fn step_to_next_carve<R: Rng + ?Sized>(&mut self, rng: &mut R) -> StepOutcome {
        loop {
            match self.step(rng) {
                StepOutcome::Backtracked(_) => continue,
                outcome => return outcome,
            }
        }
    }

    pub fn run_to_completion<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        while self.step(rng) != StepOutcome::Finished {}
        debug!("maze walk finished: {} walls removed, {} cells visited",
               self.carved,
               self.visited_count());
    }

    /// Give up the wall state, discarding the visited bookkeeping.
    pub fn into_walls(self) -> MazeWalls {
        self.walls
    }

    fn unvisited_neighbours(&self, coord: Cartesian2DCoordinate) -> NeighbourSmallVec {
        let dimensions = *self.walls.dimensions();
        cells::neighbours(coord, &dimensions)
            .into_iter()
            .filter(|&(_, neighbour)| !self.is_visited(neighbour, &dimensions))
            .collect()
    }

    fn is_visited(&self, coord: Cartesian2DCoordinate, dimensions: &RectGridDimensions) -> bool {
        dimensions.coordinate_to_index(coord).map_or(false, |i| self.visited.contains(i))
    }

    fn mark_visited(&mut self, coord: Cartesian2DCoordinate) {
        if let Some(index) = self.walls.dimensions().coordinate_to_index(coord) {
            self.visited.insert(index);
        }
    }
}

/// Apply the recursive backtracker maze generation algorithm to a fully walled grid and return
/// the finished walls. Long winding corridors, few dead ends.
pub fn recursive_backtracker<R: Rng + ?Sized>(dimensions: RectGridDimensions,
                                              rng: &mut R)
                                              -> MazeWalls {
    let mut walker = RecursiveBacktracker::new(dimensions);
    walker.run_to_completion(rng);
    walker.into_walls()
}
