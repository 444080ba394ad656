//! Scale-aware floating point tolerances
//!
//! Every epsilon used by the collision engine is derived here so the
//! multipliers stay tunable in one place. The multipliers are calibrated
//! heuristics (tens to low-thousands of machine epsilon), not exact error
//! bounds: larger-magnitude scenes automatically get proportionally looser
//! absolute tolerances.

use glam::DVec2;

/// Face containment checks scale with coordinate magnitude.
pub const FACE_ULPS: f64 = 64.0;
/// Below this many epsilons, a direction component counts as parallel to a face.
pub const DIR_ULPS: f64 = 64.0;
/// Minimum positive travel distance to an accepted hit.
pub const DIST_ULPS: f64 = 64.0;
/// Window within which candidate hits count as simultaneous.
pub const TIE_ULPS: f64 = 128.0;
/// Post-collision nudge that clears the struck face before the next cast.
pub const PUSH_ULPS: f64 = 1024.0;

/// Absolute span below which a wall dimension counts as zero.
pub const DEGENERATE_SPAN: f64 = 1e-12;

/// Largest absolute magnitude among the operands, floored at 1.
#[inline]
pub fn scale_for(a: f64, b: f64, c: f64, d: f64) -> f64 {
    1.0f64.max(a.abs()).max(b.abs()).max(c.abs()).max(d.abs())
}

/// Inclusive range check with slack on both ends.
#[inline]
pub fn within(v: f64, lo: f64, hi: f64, eps: f64) -> bool {
    v >= lo - eps && v <= hi + eps
}

/// Tolerance set for one cast/resolve step.
///
/// Recomputed every inner iteration because `face` depends on where the
/// current position and its one-tick projection sit in the plane.
#[derive(Debug, Clone, Copy)]
pub struct StepTolerances {
    /// Slack for the perpendicular-axis span check on a wall face.
    pub face: f64,
    /// Parallel-direction cutoff for direction components.
    pub dir: f64,
    /// Minimum positive travel distance (excludes the face we stand on).
    pub dist: f64,
    /// Simultaneous-hit window around the resolved event distance.
    pub tie: f64,
    /// Nudge distance applied after a non-terminal event.
    pub push: f64,
}

impl StepTolerances {
    /// Tolerances at `pos` heading along unit `dir` with per-tick reach `speed`.
    pub fn at(pos: DVec2, dir: DVec2, speed: f64) -> Self {
        let reach = speed.max(1.0);
        let scale = scale_for(pos.x, pos.y, pos.x + dir.x * reach, pos.y + dir.y * reach);
        let ulp = f64::EPSILON;
        Self {
            face: FACE_ULPS * ulp * scale,
            dir: DIR_ULPS * ulp,
            dist: DIST_ULPS * ulp * (1.0 + speed),
            tie: TIE_ULPS * ulp * (1.0 + speed),
            push: PUSH_ULPS * ulp * (1.0 + speed),
        }
    }
}

/// Window for suppressing a near-duplicate final path vertex.
pub fn final_vertex_eps(pos: DVec2, speed: f64) -> f64 {
    let scale = scale_for(pos.x, pos.y, pos.x, pos.y);
    let push = PUSH_ULPS * f64::EPSILON * (1.0 + speed);
    (FACE_ULPS * f64::EPSILON * scale).max(16.0 * push)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_floor_is_one() {
        assert_eq!(scale_for(0.1, -0.2, 0.0, 0.5), 1.0);
    }

    #[test]
    fn test_scale_takes_largest_magnitude() {
        assert_eq!(scale_for(-3.0, 2.0, 0.0, -7.5), 7.5);
    }

    #[test]
    fn test_tolerances_grow_with_scene_magnitude() {
        let near = StepTolerances::at(DVec2::new(1.0, 1.0), DVec2::X, 1.0);
        let far = StepTolerances::at(DVec2::new(1e9, 1e9), DVec2::X, 1.0);
        assert!(far.face > near.face * 1e8);
        // Direction cutoff is magnitude-independent
        assert_eq!(far.dir, near.dir);
    }

    #[test]
    fn test_within_slack() {
        assert!(within(1.0, 1.0, 2.0, 0.0));
        assert!(within(0.9, 1.0, 2.0, 0.2));
        assert!(!within(0.9, 1.0, 2.0, 0.05));
    }
}
