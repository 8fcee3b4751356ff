//! The demo scene: two tetrahedra, one light, one camera
//!
//! Scene content is fixed; only the numbers come from configuration.

mod motion;
pub mod tetrahedra;

pub use motion::Motion;

use tetra_math::mat4::Mat4;
use tetra_render::DrawRange;

use crate::config::AppConfig;

/// A drawable object: a vertex range and how it moves
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub name: &'static str,
    pub range: DrawRange,
    pub motion: Motion,
}

/// Point light parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: [f32; 3],
    pub ambient_strength: f32,
    pub specular_strength: f32,
    pub shininess: f32,
}

/// Fixed camera looking down -Z from `eye`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub eye: [f32; 3],
    /// Vertical field of view in radians
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

/// Everything the renderer needs to draw a frame
#[derive(Debug, Clone)]
pub struct Scene {
    pub objects: Vec<SceneObject>,
    pub light: Light,
    pub camera: Camera,
    pub clear_color: [f32; 4],
}

impl Scene {
    /// Build the scene from configuration
    pub fn from_config(config: &AppConfig) -> Self {
        let anim = &config.animation;
        let objects = vec![
            SceneObject {
                name: "spinner",
                range: tetrahedra::SPINNER_RANGE,
                motion: Motion::Spin {
                    offset: anim.spin_offset,
                    rate: anim.spin_rate,
                },
            },
            SceneObject {
                name: "orbiter",
                range: tetrahedra::ORBITER_RANGE,
                motion: Motion::Orbit {
                    radius: anim.orbit_radius,
                    rate: anim.orbit_spin_rate,
                },
            },
        ];

        let lighting = &config.lighting;
        let camera = &config.camera;
        Self {
            objects,
            light: Light {
                position: lighting.position,
                ambient_strength: lighting.ambient_strength,
                specular_strength: lighting.specular_strength,
                shininess: lighting.shininess,
            },
            camera: Camera {
                eye: camera.eye,
                fov_y: camera.fov.to_radians(),
                near: camera.near,
                far: camera.far,
            },
            clear_color: config.rendering.background_color,
        }
    }

    /// Model matrix of every object at time `t`, in draw order
    pub fn model_matrices(&self, t: f32) -> Vec<Mat4> {
        self.objects.iter().map(|o| o.motion.model_matrix(t)).collect()
    }

    /// Vertex ranges in draw order
    pub fn draw_ranges(&self) -> Vec<DrawRange> {
        self.objects.iter().map(|o| o.range).collect()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}
