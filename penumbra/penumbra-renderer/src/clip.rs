//! Convex polygon clipping (Sutherland-Hodgman): each hull edge is a half-plane that cuts
//! the subject in turn. The result keeps the subject's orientation.

use crate::math::{cross, dot, lerp, near_equal, signed_area, sub, Vec2};

/// Intersect `subject` with the convex `clip_polygon`, reusing `subject`'s allocation.
///
/// Either winding is accepted for `clip_polygon`. Points within `tolerance` of an edge count
/// as inside. Returns `subject` untouched if `clip_polygon` has fewer than 3 points or no area.
/// A subject entirely outside yields an empty polygon; a partial overlap may yield fewer
/// than 3 points when it only touches the hull.
pub fn clip(mut subject: Vec<Vec2>, clip_polygon: &[Vec2], tolerance: f32) -> Vec<Vec2> {
    let n = clip_polygon.len();
    if n < 3 || subject.is_empty() {
        return subject;
    }
    let area = signed_area(clip_polygon);
    if area.abs() <= tolerance * tolerance {
        return subject;
    }
    // Inside is to the left of each edge for counter-clockwise hulls.
    let orientation = area.signum();

    let mut input = Vec::with_capacity(subject.len() + n);
    for i in 0..n {
        let a = clip_polygon[i];
        let b = clip_polygon[(i + 1) % n];
        let edge = sub(b, a);
        let edge_len = dot(edge, edge).sqrt();
        if edge_len <= tolerance {
            continue;
        }
        let distance = |p: Vec2| cross(edge, sub(p, a)) / edge_len * orientation;

        std::mem::swap(&mut input, &mut subject);
        subject.clear();
        let Some(&last) = input.last() else { break };

        let mut prev = last;
        let mut prev_d = distance(prev);
        for &curr in &input {
            let curr_d = distance(curr);
            let curr_inside = curr_d >= -tolerance;
            let prev_inside = prev_d >= -tolerance;
            if curr_inside != prev_inside {
                subject.push(crossing(prev, prev_d, curr, curr_d));
            }
            if curr_inside {
                subject.push(curr);
            }
            prev = curr;
            prev_d = curr_d;
        }
    }
    dedup_near_equal(&mut subject, tolerance);
    subject
}

/// Point where segment `p..q` crosses the edge line, given their signed distances to it.
fn crossing(p: Vec2, p_d: f32, q: Vec2, q_d: f32) -> Vec2 {
    let denom = p_d - q_d;
    if denom.abs() <= f32::EPSILON {
        return p;
    }
    lerp(p, q, (p_d / denom).clamp(0.0, 1.0))
}

/// Collapse consecutive near-equal points, including a closing duplicate of the first.
pub fn dedup_near_equal(points: &mut Vec<Vec2>, tolerance: f32) {
    points.dedup_by(|b, a| near_equal(*a, *b, tolerance));
    while points.len() > 1 && near_equal(points[0], points[points.len() - 1], tolerance) {
        points.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::barycentric::barycentric;
    use proptest::prelude::*;

    const TOL: f32 = 1e-4;

    fn square(min: Vec2, max: Vec2) -> Vec<Vec2> {
        vec![min, [max[0], min[1]], max, [min[0], max[1]]]
    }

    #[test]
    fn subject_inside_is_unchanged() {
        let tri = vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]];
        let hull = square([-5.0, -5.0], [5.0, 5.0]);
        assert_eq!(clip(tri.clone(), &hull, TOL), tri);
    }

    #[test]
    fn subject_outside_is_empty() {
        let tri = vec![[10.0, 10.0], [11.0, 10.0], [10.0, 11.0]];
        let hull = square([-5.0, -5.0], [5.0, 5.0]);
        assert!(clip(tri, &hull, TOL).is_empty());
    }

    #[test]
    fn partial_overlap_either_hull_winding() {
        let subject = square([0.0, 0.0], [2.0, 2.0]);
        let hull = square([1.0, -1.0], [3.0, 1.0]);
        let mut reversed = hull.clone();
        reversed.reverse();
        for h in [hull, reversed] {
            let out = clip(subject.clone(), &h, TOL);
            assert_eq!(out.len(), 4);
            assert!((signed_area(&out) - 1.0).abs() < 1e-5);
            for p in &out {
                assert!(p[0] >= 1.0 - TOL && p[0] <= 2.0 + TOL);
                assert!(p[1] >= -TOL && p[1] <= 1.0 + TOL);
            }
        }
    }

    #[test]
    fn shared_edge_does_not_duplicate_points() {
        let tri = vec![[0.0, 0.0], [2.0, 0.0], [0.0, 2.0]];
        let hull = square([0.0, 0.0], [1.0, 1.0]);
        let out = clip(tri, &hull, TOL);
        assert_eq!(out.len(), 4);
        for (i, p) in out.iter().enumerate() {
            let next = out[(i + 1) % out.len()];
            assert!(!near_equal(*p, next, TOL));
        }
    }

    #[test]
    fn degenerate_hull_leaves_subject() {
        let tri = vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]];
        assert_eq!(clip(tri.clone(), &[[0.0, 0.0], [1.0, 1.0]], TOL), tri);
        assert_eq!(clip(tri.clone(), &[[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]], TOL), tri);
    }

    #[test]
    fn dedup_drops_closing_duplicate() {
        let mut pts = vec![[0.0, 0.0], [0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [0.00001, 0.0]];
        dedup_near_equal(&mut pts, TOL);
        assert_eq!(pts, vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]);
    }

    fn regular_hull(center: Vec2, radius: f32, sides: usize, phase: f32) -> Vec<Vec2> {
        (0..sides)
            .map(|k| {
                let a = phase + k as f32 * std::f32::consts::TAU / sides as f32;
                [center[0] + radius * a.cos(), center[1] + radius * a.sin()]
            })
            .collect()
    }

    proptest! {
        #[test]
        fn clipped_points_stay_in_triangle(
            ax in -50.0f32..50.0, ay in -50.0f32..50.0,
            bx in -50.0f32..50.0, by in -50.0f32..50.0,
            cx in -50.0f32..50.0, cy in -50.0f32..50.0,
            hx in -50.0f32..50.0, hy in -50.0f32..50.0,
            radius in 1.0f32..60.0,
            sides in 3usize..9,
            phase in 0.0f32..6.28,
        ) {
            let tri = [[ax, ay], [bx, by], [cx, cy]];
            prop_assume!(signed_area(&tri).abs() > 20.0);
            let hull = regular_hull([hx, hy], radius, sides, phase);
            let out = clip(tri.to_vec(), &hull, TOL);
            for p in out {
                let w = barycentric(p, tri[0], tri[1], tri[2]).unwrap();
                prop_assert!((w[0] + w[1] + w[2] - 1.0).abs() < 1e-3);
                for wi in w {
                    prop_assert!(wi >= -1e-2 && wi <= 1.0 + 1e-2);
                }
            }
        }

        #[test]
        fn containing_hull_keeps_triangle(
            ax in -10.0f32..10.0, ay in -10.0f32..10.0,
            bx in -10.0f32..10.0, by in -10.0f32..10.0,
            cx in -10.0f32..10.0, cy in -10.0f32..10.0,
            sides in 3usize..9,
        ) {
            let tri = vec![[ax, ay], [bx, by], [cx, cy]];
            prop_assume!(signed_area(&tri).abs() > 1.0);
            // Inradius is at least 100, well past the triangle's reach.
            let hull = regular_hull([0.0, 0.0], 200.0, sides, 0.3);
            prop_assert_eq!(clip(tri.clone(), &hull, TOL), tri);
        }
    }
}
