//! Time-driven object motion
//!
//! Model matrices are recomputed from the elapsed time every frame; no state
//! carries over between frames.

use tetra_math::mat4::{self, Mat4};

/// How an object moves over time
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Motion {
    /// Fixed position, spinning about its local Y axis
    Spin {
        offset: [f32; 3],
        /// Radians per second
        rate: f32,
    },
    /// Swings along the X = Z diagonal while spinning about Y
    Orbit {
        radius: f32,
        /// Radians per second
        rate: f32,
    },
}

impl Motion {
    /// World position at time `t` (seconds)
    pub fn position(&self, t: f32) -> [f32; 3] {
        match *self {
            Motion::Spin { offset, .. } => offset,
            Motion::Orbit { radius, .. } => {
                let swing = t.sin() * radius;
                [swing, 0.0, swing]
            }
        }
    }

    /// Rotation angle about Y at time `t`
    pub fn angle(&self, t: f32) -> f32 {
        match *self {
            Motion::Spin { rate, .. } | Motion::Orbit { rate, .. } => rate * t,
        }
    }

    /// Model matrix `T(position) * R_y(angle)` at time `t`
    pub fn model_matrix(&self, t: f32) -> Mat4 {
        let [x, y, z] = self.position(t);
        mat4::mul(mat4::translation(x, y, z), mat4::rotation_y(self.angle(t)))
    }
}
