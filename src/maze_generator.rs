//! Generation lifecycle: clear the old maze, carve a new one and keep the scene geometry in step
//! with it, either all at once or one carve at a time.

use std::time::Duration;

use log::{info, warn};
use rand::Rng;

use crate::builder::GeometryBuilder;
use crate::config::MazeConfig;
use crate::errors::*;
use crate::generators::{self, RecursiveBacktracker, StepOutcome};
use crate::scene::{NodeId, SceneGraph};
use crate::scheduling::{AnimatedRun, Pause};
use crate::walls::MazeWalls;

/// Summary of a finished generation.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct GenerationReport {
    pub removed_walls: usize,
    /// Wall rebuilds after the initial build, one per carve when animated.
    pub wall_refreshes: usize,
    pub floors: usize,
    pub walls: usize,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum GenerationStatus {
    /// Nothing generated since construction or the last clear.
    Idle,
    /// An animated run is waiting on `tick`.
    InProgress,
    Complete(GenerationReport),
}

pub struct MazeGenerator<R: Rng> {
    config: MazeConfig,
    builder: GeometryBuilder,
    rng: R,
    walls: Option<MazeWalls>,
    pending: Option<AnimatedRun>,
    status: GenerationStatus,
}

impl<R: Rng> MazeGenerator<R> {
    /// A generator building under the scene object `root`. Fails if the config cannot produce a
    /// maze.
    pub fn new(config: MazeConfig, root: NodeId, rng: R) -> Result<MazeGenerator<R>> {
        config.validate()?;
        let builder = GeometryBuilder::new(root, config.layout()?, config.appearance());
        Ok(MazeGenerator {
            config,
            builder,
            rng,
            walls: None,
            pending: None,
            status: GenerationStatus::Idle,
        })
    }

    pub fn config(&self) -> &MazeConfig {
        &self.config
    }

    pub fn builder(&self) -> &GeometryBuilder {
        &self.builder
    }

    pub fn status(&self) -> GenerationStatus {
        self.status
    }

    /// The current wall state, partially carved while an animated run is pending.
    pub fn walls(&self) -> Option<&MazeWalls> {
        match self.pending {
            Some(ref run) => Some(run.walker().walls()),
            None => self.walls.as_ref(),
        }
    }

    /// Replace any existing maze with a new one.
    ///
    /// Instant generation completes before returning. Animated generation builds the floors and
    /// a fully walled grid, then carves as `tick` is called. A pending animated run is abandoned.
    pub fn generate_maze<S: SceneGraph + ?Sized>(&mut self, scene: &mut S) -> GenerationStatus {
        self.clear(scene);

        let dimensions = self.builder.layout().dimensions;
        if self.config.animate_generation {
            let run = AnimatedRun::new(RecursiveBacktracker::new(dimensions),
                                       self.config.generation_delay());
            self.builder.build_all(scene, run.walker().walls());
            self.pending = Some(run);
            self.status = GenerationStatus::InProgress;
        } else {
            let walls = generators::recursive_backtracker(dimensions, &mut self.rng);
            self.builder.build_all(scene, &walls);
            self.complete(walls, 0);
        }
        self.status
    }

    /// Advance a pending animated run by `elapsed` frame time, carving once the pause after the
    /// previous carve is over.
    pub fn tick<S: SceneGraph + ?Sized>(&mut self,
                                        scene: &mut S,
                                        elapsed: Duration)
                                        -> GenerationStatus {
        let due = match self.pending {
            Some(ref mut run) => run.elapse(elapsed),
            None => return self.status,
        };
        if due {
            self.advance(scene)
        } else {
            self.status
        }
    }

    /// Generate and, when animating, carve to completion in place, pausing between carves.
    pub fn run_animation<S, P>(&mut self, scene: &mut S, pause: &mut P) -> GenerationReport
        where S: SceneGraph + ?Sized,
              P: Pause + ?Sized
    {
        if let GenerationStatus::Complete(report) = self.generate_maze(scene) {
            return report;
        }
        let delay = self.config.generation_delay();
        loop {
            match self.advance(scene) {
                GenerationStatus::Complete(report) => return report,
                _ => pause.pause(delay),
            }
        }
    }

    /// Destroy the maze objects and abandon any pending run.
    pub fn clear<S: SceneGraph + ?Sized>(&mut self, scene: &mut S) {
        if let Some(run) = self.pending.take() {
            warn!("abandoning animated generation after {} of {} carves",
                  run.walker().carved(),
                  run.walker().total_carves());
        }
        self.builder.clear_all(scene);
        self.walls = None;
        self.status = GenerationStatus::Idle;
    }

    /// Carve once, or retire the run when the walk is over.
    fn advance<S: SceneGraph + ?Sized>(&mut self, scene: &mut S) -> GenerationStatus {
        let outcome = match self.pending {
            Some(ref mut run) => {
                let outcome = run.advance(&mut self.rng);
                if let StepOutcome::Carved { .. } = outcome {
                    self.builder.refresh_walls(scene, run.walker().walls());
                }
                outcome
            }
            None => return self.status,
        };

        if outcome == StepOutcome::Finished {
            if let Some(run) = self.pending.take() {
                let refreshes = run.wall_refreshes();
                self.complete(run.into_walker().into_walls(), refreshes);
            }
        }
        self.status
    }

    fn complete(&mut self, walls: MazeWalls, wall_refreshes: usize) {
        let report = GenerationReport {
            removed_walls: walls.removed_walls_count(),
            wall_refreshes,
            floors: self.builder.floor_count(),
            walls: self.builder.wall_count(),
        };
        info!("maze {}x{} generated: {} walls removed, {} wall objects, {} floor tiles",
              self.config.width,
              self.config.height,
              report.removed_walls,
              report.walls,
              report.floors);
        self.walls = Some(walls);
        self.status = GenerationStatus::Complete(report);
    }
}
