//! Ray casting against wall faces
//!
//! One step casts from the current position along the unit direction and
//! collects every wall-face intersection within the remaining tick distance.
//! Faces are tested individually: two vertical and two horizontal per wall
//! (one per axis when the wall is a segment on that axis).

use glam::DVec2;

use super::wall::{Behavior, Wall, WallStore};
use crate::tolerance::{DEGENERATE_SPAN, StepTolerances, within};

/// Which axis the struck face lies along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceAxis {
    /// Face at constant x; reflecting here flips the X direction component.
    Vertical,
    /// Face at constant y; reflecting here flips the Y direction component.
    Horizontal,
}

/// One wall-face intersection ahead of the current position.
///
/// Ephemeral: produced per cast, never persisted past one step.
#[derive(Debug, Clone, Copy)]
pub struct CandidateHit {
    /// Travel distance along the ray to the impact (direction is unit length,
    /// so the ray parameter is the distance).
    pub dist: f64,
    /// Impact point on the face.
    pub point: DVec2,
    pub axis: FaceAxis,
    pub behavior: Behavior,
}

/// Collect every face intersection within `max_dist` of `pos` along unit `dir`.
///
/// A candidate survives only if the ray is not parallel to the face, the
/// travel distance is strictly positive (beyond `eps.dist`, which excludes
/// the face the point already stands on) and at most `max_dist`, and the
/// impact falls within the wall's span on the perpendicular axis.
pub fn cast_step(
    store: &WallStore,
    pos: DVec2,
    dir: DVec2,
    max_dist: f64,
    eps: &StepTolerances,
) -> Vec<CandidateHit> {
    let mut out = Vec::new();
    for wall in store.walls() {
        if wall.width() <= DEGENERATE_SPAN {
            test_vertical(wall.x_min, wall, pos, dir, max_dist, eps, &mut out);
        } else {
            test_vertical(wall.x_min, wall, pos, dir, max_dist, eps, &mut out);
            test_vertical(wall.x_max, wall, pos, dir, max_dist, eps, &mut out);
        }
        if wall.height() <= DEGENERATE_SPAN {
            test_horizontal(wall.y_min, wall, pos, dir, max_dist, eps, &mut out);
        } else {
            test_horizontal(wall.y_min, wall, pos, dir, max_dist, eps, &mut out);
            test_horizontal(wall.y_max, wall, pos, dir, max_dist, eps, &mut out);
        }
    }
    out
}

fn test_vertical(
    x_face: f64,
    wall: &Wall,
    pos: DVec2,
    dir: DVec2,
    max_dist: f64,
    eps: &StepTolerances,
    out: &mut Vec<CandidateHit>,
) {
    if dir.x.abs() <= eps.dir {
        return; // parallel, tangential grazing is not a hit
    }
    let s = (x_face - pos.x) / dir.x;
    if s <= eps.dist || s > max_dist + eps.dist {
        return;
    }
    let y = pos.y + dir.y * s;
    if !within(y, wall.y_min, wall.y_max, eps.face) {
        return;
    }
    out.push(CandidateHit {
        dist: s,
        point: DVec2::new(x_face, y),
        axis: FaceAxis::Vertical,
        behavior: wall.behavior,
    });
}

fn test_horizontal(
    y_face: f64,
    wall: &Wall,
    pos: DVec2,
    dir: DVec2,
    max_dist: f64,
    eps: &StepTolerances,
    out: &mut Vec<CandidateHit>,
) {
    if dir.y.abs() <= eps.dir {
        return;
    }
    let s = (y_face - pos.y) / dir.y;
    if s <= eps.dist || s > max_dist + eps.dist {
        return;
    }
    let x = pos.x + dir.x * s;
    if !within(x, wall.x_min, wall.x_max, eps.face) {
        return;
    }
    out.push(CandidateHit {
        dist: s,
        point: DVec2::new(x, y_face),
        axis: FaceAxis::Horizontal,
        behavior: wall.behavior,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(walls: &[(f64, f64, f64, f64, Behavior)]) -> WallStore {
        let mut store = WallStore::new();
        for &(x1, y1, x2, y2, b) in walls {
            store.add_wall(x1, y1, x2, y2, b);
        }
        store
    }

    fn eps_at(pos: DVec2, dir: DVec2, speed: f64) -> StepTolerances {
        StepTolerances::at(pos, dir, speed)
    }

    #[test]
    fn test_hits_both_vertical_faces_of_rectangle() {
        let store = store_with(&[(2.0, -1.0, 4.0, 1.0, Behavior::Reflect)]);
        let pos = DVec2::ZERO;
        let dir = DVec2::X;
        let hits = cast_step(&store, pos, dir, 10.0, &eps_at(pos, dir, 10.0));
        let mut dists: Vec<f64> = hits.iter().map(|h| h.dist).collect();
        dists.sort_by(f64::total_cmp);
        assert_eq!(dists, vec![2.0, 4.0]);
        assert!(hits.iter().all(|h| h.axis == FaceAxis::Vertical));
    }

    #[test]
    fn test_segment_wall_exposes_single_face() {
        let store = store_with(&[(2.0, -1.0, 2.0, 1.0, Behavior::Stop)]);
        let pos = DVec2::ZERO;
        let dir = DVec2::X;
        let hits = cast_step(&store, pos, dir, 10.0, &eps_at(pos, dir, 10.0));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].dist, 2.0);
        assert_eq!(hits[0].point, DVec2::new(2.0, 0.0));
    }

    #[test]
    fn test_parallel_ray_never_collides() {
        // Riding exactly along a horizontal wall at y=1
        let store = store_with(&[(-100.0, 1.0, 100.0, 1.0, Behavior::Stop)]);
        let pos = DVec2::new(0.0, 1.0);
        let dir = DVec2::X;
        let hits = cast_step(&store, pos, dir, 5.0, &eps_at(pos, dir, 5.0));
        assert!(hits.is_empty());
    }

    #[test]
    fn test_face_behind_or_underfoot_rejected() {
        let store = store_with(&[(2.0, -1.0, 2.0, 1.0, Behavior::Reflect)]);
        let dir = DVec2::X;
        // Behind the ray
        let pos = DVec2::new(3.0, 0.0);
        assert!(cast_step(&store, pos, dir, 10.0, &eps_at(pos, dir, 10.0)).is_empty());
        // Standing on the face itself
        let pos = DVec2::new(2.0, 0.0);
        assert!(cast_step(&store, pos, dir, 10.0, &eps_at(pos, dir, 10.0)).is_empty());
    }

    #[test]
    fn test_hit_beyond_step_distance_rejected() {
        let store = store_with(&[(6.0, -1.0, 6.0, 1.0, Behavior::Stop)]);
        let pos = DVec2::ZERO;
        let dir = DVec2::X;
        assert!(cast_step(&store, pos, dir, 5.0, &eps_at(pos, dir, 5.0)).is_empty());
    }

    #[test]
    fn test_impact_outside_span_rejected() {
        let store = store_with(&[(2.0, 5.0, 2.0, 9.0, Behavior::Stop)]);
        let pos = DVec2::ZERO;
        let dir = DVec2::X; // crosses x=2 at y=0, below the span
        assert!(cast_step(&store, pos, dir, 10.0, &eps_at(pos, dir, 10.0)).is_empty());
    }

    #[test]
    fn test_scale_aware_span_check_at_large_coordinates() {
        // At 1e9 the face tolerance must absorb representation error
        let store = store_with(&[(
            1e9 + 1.0,
            1e9 - 100.0,
            1e9 + 1.0,
            1e9 + 100.0,
            Behavior::Reflect,
        )]);
        let pos = DVec2::new(1e9, 1e9);
        let dir = DVec2::X;
        let hits = cast_step(&store, pos, dir, 10.0, &eps_at(pos, dir, 10.0));
        assert_eq!(hits.len(), 1);
        assert!((hits[0].dist - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_diagonal_corner_yields_both_axes() {
        let store = store_with(&[(1.0, 1.0, 3.0, 3.0, Behavior::Reflect)]);
        let pos = DVec2::ZERO;
        let dir = DVec2::new(1.0, 1.0).normalize();
        let hits = cast_step(&store, pos, dir, 10.0, &eps_at(pos, dir, 10.0));
        assert!(hits.iter().any(|h| h.axis == FaceAxis::Vertical));
        assert!(hits.iter().any(|h| h.axis == FaceAxis::Horizontal));
    }
}
