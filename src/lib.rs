//! Ricochet - deterministic 2D trajectory tracing
//!
//! Traces the path of a point travelling at constant speed through a plane of
//! axis-aligned rectangular walls. Each wall stops the point, reflects it, or
//! lets it pass through while recording the crossing.
//!
//! Core modules:
//! - `sim`: the collision engine (ray casting, event resolution, path tracing)
//! - `tolerance`: scale-aware floating point tolerances shared by the engine
//!
//! A run is a pure function of its inputs: identical start, direction, speed,
//! budget and walls always produce the identical vertex sequence, including
//! tie resolution between simultaneous hits.

pub mod sim;
pub mod tolerance;

pub use sim::{Behavior, CandidateHit, FaceAxis, SimError, Simulation, Wall, WallStore, simulate};

use glam::DVec2;

/// Total Euclidean length of the polyline through `points`.
///
/// For a path returned by [`simulate`] this equals the distance budget
/// (within tolerance) unless a stop wall truncated the run.
pub fn polyline_length(points: &[DVec2]) -> f64 {
    points.windows(2).map(|w| (w[1] - w[0]).length()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polyline_length_empty_and_single() {
        assert_eq!(polyline_length(&[]), 0.0);
        assert_eq!(polyline_length(&[DVec2::new(3.0, 4.0)]), 0.0);
    }

    #[test]
    fn test_polyline_length_segments() {
        let points = [
            DVec2::new(0.0, 0.0),
            DVec2::new(3.0, 4.0),
            DVec2::new(3.0, 0.0),
        ];
        assert!((polyline_length(&points) - 9.0).abs() < 1e-12);
    }
}
