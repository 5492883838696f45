use std::thread;
use std::time::Duration;

use rand::Rng;

use crate::generators::{RecursiveBacktracker, StepOutcome};

/// Suspends the caller between animation steps.
pub trait Pause {
    fn pause(&mut self, delay: Duration);
}

/// Real wall clock suspension of the calling thread.
#[derive(Debug, Copy, Clone, Default)]
pub struct ThreadSleep;

impl Pause for ThreadSleep {
    fn pause(&mut self, delay: Duration) {
        if delay > Duration::from_secs(0) {
            thread::sleep(delay);
        }
    }
}

/// An animated maze walk waiting on the host scheduler.
///
/// The first carve is due immediately. After each carve the run waits `delay` of accumulated
/// tick time before carving again; backtracking never waits.
#[derive(Debug, Clone)]
pub struct AnimatedRun {
    walker: RecursiveBacktracker,
    delay: Duration,
    wait_remaining: Duration,
    wall_refreshes: usize,
}

impl AnimatedRun {
    pub fn new(walker: RecursiveBacktracker, delay: Duration) -> AnimatedRun {
        AnimatedRun {
            walker,
            delay,
            wait_remaining: Duration::from_secs(0),
            wall_refreshes: 0,
        }
    }

    #[inline]
    pub fn walker(&self) -> &RecursiveBacktracker {
        &self.walker
    }

    #[inline]
    pub fn wall_refreshes(&self) -> usize {
        self.wall_refreshes
    }

    /// Let `elapsed` time pass. True once the pending suspension is over.
    pub fn elapse(&mut self, elapsed: Duration) -> bool {
        self.wait_remaining = self.wait_remaining.checked_sub(elapsed)
            .unwrap_or_else(|| Duration::from_secs(0));
        self.is_due()
    }

    #[inline]
    pub fn is_due(&self) -> bool {
        self.wait_remaining == Duration::from_secs(0)
    }

    /// Walk to the next carve. A carve arms the suspension and counts a wall refresh, which the
    /// caller owes the scene.
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) -> StepOutcome {
        let outcome = self.walker.step_to_next_carve(rng);
        if let StepOutcome::Carved { .. } = outcome {
            self.wall_refreshes += 1;
            self.wait_remaining = self.delay;
        }
        outcome
    }

    pub fn into_walker(self) -> RecursiveBacktracker {
        self.walker
    }
}
