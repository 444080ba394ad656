//! Event resolution: earliest hit, tie collection, behavior precedence
//!
//! Given the candidates from one cast, picks the distance the trajectory
//! advances to, gathers every hit within the tie window of that distance, and
//! reduces the set to one aggregate effect under the fixed precedence
//! Stop > Reflect > PassThrough.

use glam::DVec2;

use super::ray::{CandidateHit, FaceAxis};
use super::wall::Behavior;

/// Aggregate effect of one resolved simultaneous-hit set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    /// Travel distance to the event.
    pub dist: f64,
    /// Impact point: coordinate-wise average of all simultaneous hits, which
    /// absorbs tiny floating-point divergence between faces that coincide.
    pub point: DVec2,
    /// A stop wall was struck; travel halts here regardless of other hits.
    pub stop: bool,
    /// A reflect wall was struck on a vertical face; the X component flips.
    pub reflect_x: bool,
    /// A reflect wall was struck on a horizontal face; the Y component flips.
    pub reflect_y: bool,
}

impl Resolution {
    /// Whether the event interrupts travel (anything but a pure pass-through).
    #[inline]
    pub fn is_blocking(&self) -> bool {
        self.stop || self.reflect_x || self.reflect_y
    }
}

/// Resolve one cast's candidates to the event the trajectory advances to.
///
/// Batching rule: when a blocking (stop/reflect) hit lies ahead, at most one
/// pass-through event is taken before it per tick. `pass_recorded` is that
/// carried flag: once a pure pass-through has been resolved since the last
/// blocking event in this tick, any further pass-throughs closer than the
/// blocking hit are skipped and the blocking distance is resolved directly.
/// Without any blocking hit ahead, pass-throughs resolve normally.
///
/// Returns `None` when `candidates` is empty.
pub fn resolve(candidates: &[CandidateHit], pass_recorded: bool, eps_tie: f64) -> Option<Resolution> {
    if candidates.is_empty() {
        return None;
    }

    // Earliest blocking and earliest pass-through distances, independently.
    let mut s_blocking = f64::INFINITY;
    let mut s_pass = f64::INFINITY;
    for hit in candidates {
        if hit.behavior.is_blocking() {
            s_blocking = s_blocking.min(hit.dist);
        } else {
            s_pass = s_pass.min(hit.dist);
        }
    }

    let s_min = if s_blocking.is_finite() {
        if !pass_recorded && s_pass.is_finite() && s_pass + eps_tie < s_blocking {
            s_pass
        } else {
            s_blocking
        }
    } else {
        s_pass
    };

    // Simultaneous-hit set: everything within the tie window of the resolved
    // distance, averaged into one impact point. The dominant behavior is the
    // highest-ranked one under `Behavior::precedence`; reflection axes come
    // from the individual reflect hits.
    let mut sum = DVec2::ZERO;
    let mut count = 0usize;
    let mut dominant: Option<Behavior> = None;
    let mut reflect_x = false;
    let mut reflect_y = false;
    for hit in candidates {
        if (hit.dist - s_min).abs() > eps_tie {
            continue;
        }
        sum += hit.point;
        count += 1;
        if dominant.is_none_or(|d| hit.behavior.precedence() > d.precedence()) {
            dominant = Some(hit.behavior);
        }
        if hit.behavior == Behavior::Reflect {
            match hit.axis {
                FaceAxis::Vertical => reflect_x = true,
                FaceAxis::Horizontal => reflect_y = true,
            }
        }
    }
    debug_assert!(count > 0, "resolved distance selected no candidate");

    Some(Resolution {
        dist: s_min,
        point: sum / count as f64,
        stop: dominant == Some(Behavior::Stop),
        reflect_x,
        reflect_y,
    })
}
