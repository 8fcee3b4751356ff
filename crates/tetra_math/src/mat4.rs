//! 4x4 matrix utilities for 3D transforms
//!
//! Everything here is closed-form: translations, a rotation about Y, an
//! eye-offset view and an OpenGL-style perspective projection, plus the
//! depth-range fix-up needed before handing that projection to wgpu.

/// 4x4 matrix type (column-major, `m[column][row]`)
pub type Mat4 = [[f32; 4]; 4];

/// Identity matrix
pub const IDENTITY: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Remaps OpenGL clip-space depth (`-w..w`) to wgpu's `0..w`.
///
/// Pre-multiply a [`perspective`] matrix with this before uploading it.
pub const OPENGL_TO_WGPU: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 0.5, 0.0],
    [0.0, 0.0, 0.5, 1.0],
];

/// Translation by `(x, y, z)`
pub fn translation(x: f32, y: f32, z: f32) -> Mat4 {
    let mut m = IDENTITY;
    m[3][0] = x;
    m[3][1] = y;
    m[3][2] = z;
    m
}

/// Rotation about the Y axis by `angle` radians (right-handed)
pub fn rotation_y(angle: f32) -> Mat4 {
    let (s, c) = angle.sin_cos();
    [
        [c, 0.0, -s, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [s, 0.0, c, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

/// View matrix for a camera sitting at `eye` and looking down -Z.
///
/// There is no orientation, so this is just the inverse translation.
pub fn view_from_eye(eye: [f32; 3]) -> Mat4 {
    translation(-eye[0], -eye[1], -eye[2])
}

/// OpenGL-convention perspective projection.
///
/// Eye-space `z = -near` lands on NDC `-1`, `z = -far` on NDC `+1`.
///
/// # Arguments
/// * `fov_y` - Vertical field of view in radians
/// * `aspect` - Width divided by height
/// * `near`, `far` - Clip plane distances (positive)
pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let f = 1.0 / (fov_y / 2.0).tan();
    let nf = 1.0 / (near - far);

    [
        [f / aspect, 0.0, 0.0, 0.0],
        [0.0, f, 0.0, 0.0],
        [0.0, 0.0, (far + near) * nf, -1.0],
        [0.0, 0.0, 2.0 * far * near * nf, 0.0],
    ]
}

/// Multiply two 4x4 matrices: result = a * b
///
/// In column-major convention, this applies b first, then a.
#[allow(clippy::needless_range_loop)]
pub fn mul(a: Mat4, b: Mat4) -> Mat4 {
    let mut result = [[0.0f32; 4]; 4];

    for i in 0..4 {
        for j in 0..4 {
            for k in 0..4 {
                result[i][j] += a[k][j] * b[i][k];
            }
        }
    }

    result
}

/// Transpose a matrix
pub fn transpose(m: Mat4) -> Mat4 {
    [
        [m[0][0], m[1][0], m[2][0], m[3][0]],
        [m[0][1], m[1][1], m[2][1], m[3][1]],
        [m[0][2], m[1][2], m[2][2], m[3][2]],
        [m[0][3], m[1][3], m[2][3], m[3][3]],
    ]
}

/// Transform a point (w = 1) and apply the perspective divide.
///
/// The divide is skipped when the resulting w is zero.
pub fn transform_point(m: Mat4, p: [f32; 3]) -> [f32; 3] {
    let row = |r: usize| m[0][r] * p[0] + m[1][r] * p[1] + m[2][r] * p[2] + m[3][r];
    let w = row(3);
    let w = if w == 0.0 { 1.0 } else { w };
    [row(0) / w, row(1) / w, row(2) / w]
}

/// Upper-left 3x3 of `m` embedded in an otherwise identity matrix
pub fn linear_part(m: Mat4) -> Mat4 {
    let mut out = IDENTITY;
    for c in 0..3 {
        out[c][..3].copy_from_slice(&m[c][..3]);
    }
    out
}

/// Inverse-transpose of the upper-left 3x3, padded to 4x4.
///
/// Returns `None` when that 3x3 block is singular.
pub fn normal_matrix(m: Mat4) -> Option<Mat4> {
    // a[row][col]
    let a = |r: usize, c: usize| m[c][r];
    let cofactor = |r: usize, c: usize| {
        let (r1, r2) = ((r + 1) % 3, (r + 2) % 3);
        let (c1, c2) = ((c + 1) % 3, (c + 2) % 3);
        a(r1, c1) * a(r2, c2) - a(r1, c2) * a(r2, c1)
    };

    let det = a(0, 0) * cofactor(0, 0) + a(0, 1) * cofactor(0, 1) + a(0, 2) * cofactor(0, 2);
    if det.abs() <= f32::EPSILON {
        return None;
    }

    // inverse(A)^T == cofactor(A) / det
    let mut out = IDENTITY;
    for r in 0..3 {
        for c in 0..3 {
            out[c][r] = cofactor(r, c) / det;
        }
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

    const EPSILON: f32 = 0.0001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn vec_approx_eq(a: [f32; 3], b: [f32; 3]) -> bool {
        approx_eq(a[0], b[0]) && approx_eq(a[1], b[1]) && approx_eq(a[2], b[2])
    }

    fn mat_approx_eq(a: Mat4, b: Mat4) -> bool {
        for i in 0..4 {
            for j in 0..4 {
                if !approx_eq(a[i][j], b[i][j]) {
                    return false;
                }
            }
        }
        true
    }

    fn dot3(a: [f32; 4], b: [f32; 4]) -> f32 {
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }

    #[test]
    fn test_identity() {
        let p = [1.0, 2.0, 3.0];
        assert!(vec_approx_eq(transform_point(IDENTITY, p), p));
    }

    #[test]
    fn test_translation_moves_points() {
        let m = translation(1.0, -2.0, 3.0);
        let result = transform_point(m, [0.5, 0.5, 0.5]);
        assert!(vec_approx_eq(result, [1.5, -1.5, 3.5]), "got {:?}", result);
    }

    #[test]
    fn test_rotation_y_quarter_turn() {
        let m = rotation_y(FRAC_PI_2);

        // X goes to -Z
        let result = transform_point(m, [1.0, 0.0, 0.0]);
        assert!(vec_approx_eq(result, [0.0, 0.0, -1.0]), "X should become -Z, got {:?}", result);

        // Z goes to X
        let result = transform_point(m, [0.0, 0.0, 1.0]);
        assert!(vec_approx_eq(result, [1.0, 0.0, 0.0]), "Z should become X, got {:?}", result);

        // Y is the axis
        let result = transform_point(m, [0.0, 1.0, 0.0]);
        assert!(vec_approx_eq(result, [0.0, 1.0, 0.0]));
    }

    #[test]
    fn test_rotation_y_is_orthonormal() {
        for angle in [0.0, 0.3, FRAC_PI_4, 2.0, -5.5, 100.0] {
            let m = rotation_y(angle);
            for i in 0..3 {
                assert!(approx_eq(dot3(m[i], m[i]), 1.0), "column {} not unit at {}", i, angle);
                for j in (i + 1)..3 {
                    assert!(approx_eq(dot3(m[i], m[j]), 0.0), "columns {} and {} not orthogonal", i, j);
                }
            }
            // Orthonormal => inverse-transpose is the matrix itself
            let n = normal_matrix(m).unwrap();
            assert!(mat_approx_eq(n, m));
        }
    }

    #[test]
    fn test_rotation_matches_transpose_inverse() {
        let r = rotation_y(0.7);
        let back = mul(transpose(r), r);
        assert!(mat_approx_eq(back, IDENTITY));
    }

    #[test]
    fn test_view_from_eye_moves_eye_to_origin() {
        let eye = [0.0, 1.0, 20.0];
        let v = view_from_eye(eye);
        assert!(vec_approx_eq(transform_point(v, eye), [0.0, 0.0, 0.0]));
        assert!(vec_approx_eq(transform_point(v, [0.0, 1.0, 0.0]), [0.0, 0.0, -20.0]));
    }

    #[test]
    fn test_perspective_maps_near_and_far() {
        let (near, far) = (0.1, 200.0);
        let proj = perspective(45f32.to_radians(), 800.0 / 600.0, near, far);

        let z_near = transform_point(proj, [0.0, 0.0, -near])[2];
        let z_far = transform_point(proj, [0.0, 0.0, -far])[2];
        assert!(approx_eq(z_near, -1.0), "near plane should map to -1, got {}", z_near);
        assert!((z_far - 1.0).abs() < 1e-3, "far plane should map to 1, got {}", z_far);
    }

    #[test]
    fn test_perspective_matches_closed_form() {
        let fov = 45f32.to_radians();
        let proj = perspective(fov, 2.0, 1.0, 11.0);
        let t = (fov / 2.0).tan();

        assert!(approx_eq(proj[0][0], 1.0 / (2.0 * t)));
        assert!(approx_eq(proj[1][1], 1.0 / t));
        assert!(approx_eq(proj[2][2], -12.0 / 10.0));
        assert!(approx_eq(proj[3][2], -22.0 / 10.0));
        assert_eq!(proj[2][3], -1.0);
        assert_eq!(proj[3][3], 0.0);
    }

    #[test]
    fn test_wgpu_correction_maps_depth_to_unit_range() {
        let (near, far) = (0.1, 200.0);
        let proj = mul(OPENGL_TO_WGPU, perspective(FRAC_PI_4, 1.0, near, far));

        let z_near = transform_point(proj, [0.0, 0.0, -near])[2];
        let z_far = transform_point(proj, [0.0, 0.0, -far])[2];
        assert!(approx_eq(z_near, 0.0), "near should map to 0, got {}", z_near);
        assert!((z_far - 1.0).abs() < 1e-3, "far should map to 1, got {}", z_far);
    }

    #[test]
    fn test_mul_identity() {
        let a = rotation_y(0.5);
        assert!(mat_approx_eq(mul(IDENTITY, a), a));
        assert!(mat_approx_eq(mul(a, IDENTITY), a));
    }

    #[test]
    fn test_mul_composition() {
        // Two 45° rotations equal one 90° rotation
        let r45 = rotation_y(FRAC_PI_4);
        let r90 = rotation_y(FRAC_PI_2);
        assert!(mat_approx_eq(mul(r45, r45), r90));
    }

    #[test]
    fn test_translate_then_rotate_order() {
        // T * R rotates about the local origin, then moves
        let m = mul(translation(0.0, 0.0, -5.0), rotation_y(FRAC_PI_2));
        assert!(vec_approx_eq([m[3][0], m[3][1], m[3][2]], [0.0, 0.0, -5.0]));

        let result = transform_point(m, [1.0, 0.0, 0.0]);
        assert!(vec_approx_eq(result, [0.0, 0.0, -6.0]), "got {:?}", result);
    }

    #[test]
    fn test_normal_matrix_ignores_translation() {
        let m = mul(translation(3.0, 4.0, 5.0), rotation_y(1.2));
        let n = normal_matrix(m).unwrap();
        assert!(mat_approx_eq(n, rotation_y(1.2)));
    }

    #[test]
    fn test_normal_matrix_of_scale() {
        let mut m = IDENTITY;
        m[0][0] = 2.0;
        m[1][1] = 4.0;
        let n = normal_matrix(m).unwrap();
        assert!(approx_eq(n[0][0], 0.5));
        assert!(approx_eq(n[1][1], 0.25));
        assert!(approx_eq(n[2][2], 1.0));
    }

    #[test]
    fn test_normal_matrix_singular() {
        let mut m = IDENTITY;
        m[1][1] = 0.0;
        assert!(normal_matrix(m).is_none());
        assert_eq!(linear_part(m)[1][1], 0.0);
    }

    #[test]
    fn test_linear_part_drops_translation() {
        let m = mul(translation(1.0, 2.0, 3.0), rotation_y(0.4));
        assert!(mat_approx_eq(linear_part(m), rotation_y(0.4)));
    }
}
