//! Texture coordinates for fin polygon points, blended from the fin's original triangle.

use render_api::PenumbraVertex;

use crate::math::{dot, near_equal, sub, Vec2};

/// Barycentric weights `[u, v, w]` of `p` in triangle `(a, b, c)`, `u + v + w == 1`.
/// `None` when the triangle has no area.
pub fn barycentric(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> Option<[f32; 3]> {
    let v0 = sub(b, a);
    let v1 = sub(c, a);
    let v2 = sub(p, a);
    let d00 = dot(v0, v0);
    let d01 = dot(v0, v1);
    let d11 = dot(v1, v1);
    let d20 = dot(v2, v0);
    let d21 = dot(v2, v1);
    let denom = d00 * d11 - d01 * d01;
    if denom.abs() <= f32::EPSILON * d00 * d11 {
        return None;
    }
    let v = (d11 * d20 - d01 * d21) / denom;
    let w = (d00 * d21 - d01 * d20) / denom;
    Some([1.0 - v - w, v, w])
}

/// Texture coordinate for `p` relative to `corners`.
///
/// A point within `tolerance` of a corner reuses that corner's coordinate exactly; anything
/// else is blended by its barycentric weights. A degenerate triangle falls back to the first
/// corner.
pub fn interpolate_tex_coord(p: Vec2, corners: &[PenumbraVertex; 3], tolerance: f32) -> [f32; 2] {
    if let Some(corner) = corners.iter().find(|c| near_equal(p, c.position, tolerance)) {
        return corner.tex_coord;
    }
    let Some([u, v, w]) = barycentric(p, corners[0].position, corners[1].position, corners[2].position)
    else {
        return corners[0].tex_coord;
    };
    let t0 = corners[0].tex_coord;
    let t1 = corners[1].tex_coord;
    let t2 = corners[2].tex_coord;
    [
        t0[0] * u + t1[0] * v + t2[0] * w,
        t0[1] * u + t1[1] * v + t2[1] * w,
    ]
}

/// One vertex per point, in order.
pub fn assign_tex_coords(
    points: &[Vec2],
    corners: &[PenumbraVertex; 3],
    tolerance: f32,
    out: &mut Vec<PenumbraVertex>,
) {
    out.extend(
        points
            .iter()
            .map(|&p| PenumbraVertex::new(p, interpolate_tex_coord(p, corners, tolerance))),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f32 = 1e-4;

    fn corners() -> [PenumbraVertex; 3] {
        [
            PenumbraVertex::new([0.0, 0.0], [0.0, 1.0]),
            PenumbraVertex::new([30.0, 4.0], [0.0, 0.0]),
            PenumbraVertex::new([30.0, 0.0], [1.0, 0.0]),
        ]
    }

    #[test]
    fn weights_at_corners_and_centroid() {
        let [a, b, c] = [[0.0, 0.0], [4.0, 0.0], [0.0, 4.0]];
        assert_eq!(barycentric(a, a, b, c), Some([1.0, 0.0, 0.0]));
        assert_eq!(barycentric(b, a, b, c), Some([0.0, 1.0, 0.0]));
        let w = barycentric([4.0 / 3.0, 4.0 / 3.0], a, b, c).unwrap();
        for wi in w {
            assert!((wi - 1.0 / 3.0).abs() < 1e-5);
        }
    }

    #[test]
    fn degenerate_triangle_has_no_weights() {
        assert_eq!(barycentric([1.0, 1.0], [0.0, 0.0], [1.0, 1.0], [2.0, 2.0]), None);
    }

    #[test]
    fn corner_points_keep_exact_tex_coords() {
        let c = corners();
        // Slightly off the corner but within tolerance: no interpolation drift.
        assert_eq!(interpolate_tex_coord([30.00005, 3.99995], &c, TOL), [0.0, 0.0]);
        assert_eq!(interpolate_tex_coord([30.0, 0.0], &c, TOL), [1.0, 0.0]);
        assert_eq!(interpolate_tex_coord([0.0, 0.0], &c, TOL), [0.0, 1.0]);
    }

    #[test]
    fn edge_midpoint_is_blended() {
        let c = corners();
        // Midpoint between anchor and the lit corner.
        let t = interpolate_tex_coord([15.0, 0.0], &c, TOL);
        assert!((t[0] - 0.5).abs() < 1e-5);
        assert!((t[1] - 0.5).abs() < 1e-5);
        // Midpoint of the far edge.
        let t = interpolate_tex_coord([30.0, 2.0], &c, TOL);
        assert!((t[0] - 0.5).abs() < 1e-5);
        assert!(t[1].abs() < 1e-5);
    }

    #[test]
    fn assign_keeps_point_order() {
        let c = corners();
        let pts = [[0.0, 0.0], [15.0, 0.0], [30.0, 0.0]];
        let mut out = Vec::new();
        assign_tex_coords(&pts, &c, TOL, &mut out);
        let positions: Vec<_> = out.iter().map(|v| v.position).collect();
        assert_eq!(positions, pts.to_vec());
        assert_eq!(out[2].tex_coord, [1.0, 0.0]);
    }
}
