//! Vertex data for the two tetrahedra
//!
//! Both shapes live in one interleaved array. Each face is listed as its own
//! triangle so every face carries a single normal.

use tetra_render::{DrawRange, Vertex};

/// Vertices per tetrahedron (4 faces x 3 vertices)
pub const VERTICES_PER_TETRAHEDRON: u32 = 12;

/// Vertex range of the spinning tetrahedron
pub const SPINNER_RANGE: DrawRange = DrawRange::new(0, VERTICES_PER_TETRAHEDRON);

/// Vertex range of the orbiting tetrahedron
pub const ORBITER_RANGE: DrawRange =
    DrawRange::new(VERTICES_PER_TETRAHEDRON, VERTICES_PER_TETRAHEDRON);

const RED: [f32; 3] = [1.0, 0.0, 0.0];
const GREEN: [f32; 3] = [0.0, 1.0, 0.0];
const BLUE: [f32; 3] = [0.0, 0.0, 1.0];
const WHITE: [f32; 3] = [1.0, 1.0, 1.0];
const YELLOW: [f32; 3] = [1.0, 1.0, 0.0];
const CYAN: [f32; 3] = [0.0, 1.0, 1.0];
const MAGENTA: [f32; 3] = [1.0, 0.0, 1.0];
const GRAY: [f32; 3] = [0.5, 0.5, 0.5];

// Face normals shared by both shapes
const FRONT: [f32; 3] = [0.0, 0.0, 1.0];
const LOWER_LEFT: [f32; 3] = [-0.5, -0.5, -0.5];
const RIGHT: [f32; 3] = [0.5, 0.0, -0.5];
const UPPER: [f32; 3] = [0.0, 0.5, -0.5];

/// The full static vertex array, uploaded once
pub const VERTICES: [Vertex; 24] = {
    const fn v(position: [f32; 3], color: [f32; 3], normal: [f32; 3]) -> Vertex {
        Vertex::new(position, color, normal)
    }

    // Spinner corners
    let a_left = [-0.5, -0.5, 0.0];
    let a_right = [0.5, -0.5, 0.0];
    let a_top = [0.0, 0.5, 0.0];
    let a_apex = [0.0, 0.0, -0.5];

    // Orbiter corners
    let b_left = [-0.3, -0.3, -0.7];
    let b_right = [0.3, -0.3, -0.7];
    let b_top = [0.0, 0.3, -0.7];
    let b_apex = [0.0, 0.0, -1.2];

    [
        // Spinner
        v(a_left, RED, FRONT),
        v(a_right, GREEN, FRONT),
        v(a_top, BLUE, FRONT),
        v(a_left, RED, LOWER_LEFT),
        v(a_right, GREEN, LOWER_LEFT),
        v(a_apex, WHITE, LOWER_LEFT),
        v(a_right, GREEN, RIGHT),
        v(a_top, BLUE, RIGHT),
        v(a_apex, WHITE, RIGHT),
        v(a_top, BLUE, UPPER),
        v(a_left, RED, UPPER),
        v(a_apex, WHITE, UPPER),
        // Orbiter
        v(b_left, YELLOW, FRONT),
        v(b_right, CYAN, FRONT),
        v(b_top, MAGENTA, FRONT),
        v(b_left, YELLOW, LOWER_LEFT),
        v(b_right, CYAN, LOWER_LEFT),
        v(b_apex, GRAY, LOWER_LEFT),
        v(b_right, CYAN, RIGHT),
        v(b_top, MAGENTA, RIGHT),
        v(b_apex, GRAY, RIGHT),
        v(b_top, MAGENTA, UPPER),
        v(b_left, YELLOW, UPPER),
        v(b_apex, GRAY, UPPER),
    ]
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranges_cover_the_array() {
        assert_eq!(SPINNER_RANGE.vertices(), 0..12);
        assert_eq!(ORBITER_RANGE.vertices(), 12..24);
        assert_eq!(ORBITER_RANGE.vertices().end as usize, VERTICES.len());
    }

    #[test]
    fn test_each_shape_has_four_corners() {
        for range in [SPINNER_RANGE, ORBITER_RANGE] {
            let mut corners: Vec<[f32; 3]> = Vec::new();
            for i in range.vertices() {
                let p = VERTICES[i as usize].position;
                if !corners.contains(&p) {
                    corners.push(p);
                }
            }
            assert_eq!(corners.len(), 4);
        }
    }

    #[test]
    fn test_faces_share_one_normal() {
        for face in VERTICES.chunks(3) {
            assert_eq!(face[0].normal, face[1].normal);
            assert_eq!(face[1].normal, face[2].normal);
        }
    }

    #[test]
    fn test_corner_colors_are_consistent() {
        // A corner keeps its color on every face it belongs to
        for a in VERTICES.iter() {
            for b in VERTICES.iter() {
                if a.position == b.position {
                    assert_eq!(a.color, b.color);
                }
            }
        }
    }

    #[test]
    fn test_byte_size() {
        assert_eq!(std::mem::size_of_val(&VERTICES), 24 * 36);
    }
}
