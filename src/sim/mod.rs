//! Deterministic trajectory simulation
//!
//! All collision logic lives here. This module must be pure and deterministic:
//! - One run is a function of (start, direction, speed, budget, walls) only
//! - No shared state across runs
//! - Stable tie resolution (behavior precedence, not discovery order)
//! - Bounded iteration as the sole termination guarantee

pub mod ray;
pub mod resolve;
pub mod trace;
pub mod wall;

pub use ray::{CandidateHit, FaceAxis, cast_step};
pub use resolve::{Resolution, resolve};
pub use trace::{SimError, Simulation, simulate};
pub use wall::{Behavior, Wall, WallStore};
