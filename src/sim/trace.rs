//! The outer trajectory driver
//!
//! Owns the per-run state (position, unit direction, remaining budget) and
//! advances it one tick at a time: cast, resolve, apply, repeat. Travel ends
//! when the distance budget runs out or a stop wall is struck.

use glam::DVec2;
use thiserror::Error;

use super::ray::cast_step;
use super::resolve::resolve;
use super::wall::{Behavior, WallStore};
use crate::tolerance::{StepTolerances, final_vertex_eps};

/// Why a run was rejected before any tracing happened.
///
/// These are the only recoverable failures; everything past validation is
/// deterministic and side-effect free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SimError {
    #[error("speed must be positive")]
    NonPositiveSpeed,
    #[error("distance budget must be non-negative")]
    NegativeBudget,
    #[error("direction vector must not be zero")]
    ZeroDirection,
}

/// Safety valve on collision events within a single tick. Valid inputs never
/// come close; exceeding it abandons the remainder of the tick.
pub const MAX_INNER_STEPS: usize = 256;

/// Mutable state for one run, threaded through the step functions.
#[derive(Debug, Clone, Copy, PartialEq)]
struct TraceState {
    pos: DVec2,
    /// Unit direction; components flip sign independently on reflection.
    dir: DVec2,
    remaining_budget: f64,
}

/// How a tick left the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TickOutcome {
    Continue,
    Stopped,
}

/// A configured simulation: speed, distance budget and the wall set.
///
/// The wall set is fixed for the lifetime of a run; `run` borrows the
/// simulation immutably and never mutates it, so one `Simulation` can trace
/// any number of paths.
#[derive(Debug, Clone)]
pub struct Simulation {
    speed: f64,
    distance_budget: f64,
    walls: WallStore,
}

impl Simulation {
    /// Validate speed and budget eagerly; walls are added afterwards.
    pub fn new(speed: f64, distance_budget: f64) -> Result<Self, SimError> {
        if speed <= 0.0 {
            return Err(SimError::NonPositiveSpeed);
        }
        if distance_budget < 0.0 {
            return Err(SimError::NegativeBudget);
        }
        Ok(Self {
            speed,
            distance_budget,
            walls: WallStore::new(),
        })
    }

    /// Add a wall given two opposite corners; zero-area input is dropped.
    pub fn add_wall(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, behavior: Behavior) {
        self.walls.add_wall(x1, y1, x2, y2, behavior);
    }

    pub fn walls(&self) -> &WallStore {
        &self.walls
    }

    /// Trace the path from `start` along `direction` until the budget is
    /// exhausted or a stop wall is struck.
    ///
    /// The returned path begins at `start`; every later vertex is a recorded
    /// event (collision, pass-through crossing, exit point when starting
    /// inside a wall) or the final rest point.
    pub fn run(&self, start: DVec2, direction: DVec2) -> Result<Vec<DVec2>, SimError> {
        let len = direction.length();
        if len == 0.0 {
            return Err(SimError::ZeroDirection);
        }
        log::debug!(
            "trace: start=({}, {}) speed={} budget={} walls={}",
            start.x,
            start.y,
            self.speed,
            self.distance_budget,
            self.walls.len()
        );

        let mut path = vec![start];
        let mut st = TraceState {
            pos: start,
            dir: direction / len,
            remaining_budget: self.distance_budget,
        };

        // Bounded iteration is the termination guarantee: one slot per tick
        // plus slack for the final partial tick.
        let max_outer = (self.distance_budget / self.speed).ceil() as usize + 2;

        for _ in 0..max_outer {
            if st.remaining_budget <= 0.0 {
                break;
            }
            if self.trace_tick(&mut st, &mut path) == TickOutcome::Stopped {
                return Ok(path);
            }
        }

        // Swallow a tiny tail instead of emitting a near-duplicate vertex.
        let eps_out = final_vertex_eps(st.pos, self.speed);
        let duplicate = path.last().is_some_and(|last| {
            (st.pos.x - last.x).abs() <= eps_out && (st.pos.y - last.y).abs() <= eps_out
        });
        if !duplicate {
            path.push(st.pos);
        }
        Ok(path)
    }

    /// Advance one tick: repeatedly cast and resolve against the distance
    /// remaining in this tick.
    fn trace_tick(&self, st: &mut TraceState, path: &mut Vec<DVec2>) -> TickOutcome {
        // At most one pass-through event is taken ahead of a blocking event;
        // the flag resets at tick entry and after every blocking resolution.
        let mut pass_recorded = false;
        let mut remaining_in_tick = self.speed.min(st.remaining_budget);

        for inner in 0..MAX_INNER_STEPS {
            if remaining_in_tick <= 0.0 {
                return TickOutcome::Continue;
            }
            let eps = StepTolerances::at(st.pos, st.dir, self.speed);
            let candidates = cast_step(&self.walls, st.pos, st.dir, remaining_in_tick, &eps);

            let Some(res) = resolve(&candidates, pass_recorded, eps.tie) else {
                // Nothing ahead in this tick: glide the remainder silently
                // (no vertex), or swallow it when it is below tolerance.
                if remaining_in_tick > eps.dist {
                    st.pos += st.dir * remaining_in_tick;
                }
                st.remaining_budget -= remaining_in_tick;
                return TickOutcome::Continue;
            };

            let step_used = res.dist.min(remaining_in_tick);
            st.pos = res.point;
            remaining_in_tick -= step_used;
            st.remaining_budget -= step_used;
            path.push(res.point);

            if res.stop {
                log::debug!("trace: stop wall at ({}, {})", res.point.x, res.point.y);
                return TickOutcome::Stopped;
            }
            if res.reflect_x {
                st.dir.x = -st.dir.x;
            }
            if res.reflect_y {
                st.dir.y = -st.dir.y;
            }
            pass_recorded = !res.is_blocking();

            // Nudge off the struck face so the next cast does not re-detect
            // it, but only when travel genuinely continues; tail micro-steps
            // must not spawn extra vertices.
            let will_continue =
                remaining_in_tick > 10.0 * eps.dist && st.remaining_budget > 10.0 * eps.dist;
            if will_continue {
                st.pos += st.dir * eps.push;
            }

            if inner + 1 == MAX_INNER_STEPS {
                log::warn!(
                    "trace: {MAX_INNER_STEPS} collision events in one tick, abandoning tick remainder"
                );
            }
        }
        TickOutcome::Continue
    }
}

/// Trace a path in one call.
///
/// Validation, in order: non-positive `speed` and negative `distance_budget`
/// fail; a zero-magnitude `direction` fails; a zero budget succeeds with a
/// path containing only `start`.
pub fn simulate(
    start: DVec2,
    direction: DVec2,
    speed: f64,
    distance_budget: f64,
    walls: &WallStore,
) -> Result<Vec<DVec2>, SimError> {
    let mut sim = Simulation::new(speed, distance_budget)?;
    sim.walls = walls.clone();
    sim.run(start, direction)
}
