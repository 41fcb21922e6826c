//! Axis-aligned bounding boxes.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// World-space axis-aligned box. Bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: DVec3,
    pub max: DVec3,
}

impl Aabb {
    /// Box spanning two corners given in any order.
    pub fn new(a: DVec3, b: DVec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn from_center_half_extents(center: DVec3, half_extents: DVec3) -> Self {
        let half = half_extents.abs();
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    pub fn contains(&self, p: DVec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    /// Distance from `origin` at which the segment `origin -> target` first
    /// enters the box, or `None` if the segment misses it.
    ///
    /// A segment starting inside the box enters at distance 0.
    pub fn segment_entry(&self, origin: DVec3, target: DVec3) -> Option<f64> {
        let delta = target - origin;
        let length = delta.length();
        if length == 0.0 {
            return self.contains(origin).then_some(0.0);
        }

        // Slab test over the segment parameter t in [0, 1].
        let mut t_enter = 0.0_f64;
        let mut t_exit = 1.0_f64;
        let o = origin.to_array();
        let d = delta.to_array();
        let lo = self.min.to_array();
        let hi = self.max.to_array();

        for axis in 0..3 {
            if d[axis] == 0.0 {
                if o[axis] < lo[axis] || o[axis] > hi[axis] {
                    return None;
                }
                continue;
            }
            let inv = 1.0 / d[axis];
            let mut t0 = (lo[axis] - o[axis]) * inv;
            let mut t1 = (hi[axis] - o[axis]) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_enter = t_enter.max(t0);
            t_exit = t_exit.min(t1);
            if t_enter > t_exit {
                return None;
            }
        }

        Some(t_enter * length)
    }
}
