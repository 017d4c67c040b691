//! Fan triangulation of convex, anchor-first polygons.

/// Index order of emitted triangles. `Clockwise` walks the polygon in its own point order
/// (`0, i, i + 1`); `CounterClockwise` reverses each triangle. With the y-down screen space
/// hulls usually live in, fins built from a light's left/right edges come out clockwise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WindingOrder {
    #[default]
    Clockwise,
    CounterClockwise,
}

/// Append a triangle fan from point 0 of a `vertex_count`-gon: (n - 2) triangles.
/// Fewer than 3 points appends nothing.
pub fn triangulate_fan(vertex_count: usize, winding: WindingOrder, indices: &mut Vec<u32>) {
    if vertex_count < 3 {
        return;
    }
    indices.reserve((vertex_count - 2) * 3);
    for i in 1..(vertex_count - 1) as u32 {
        match winding {
            WindingOrder::Clockwise => indices.extend_from_slice(&[0, i, i + 1]),
            WindingOrder::CounterClockwise => indices.extend_from_slice(&[0, i + 1, i]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_yields_single_triangle() {
        let mut indices = Vec::new();
        triangulate_fan(3, WindingOrder::Clockwise, &mut indices);
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn pentagon_fan_appends() {
        let mut indices = vec![7];
        triangulate_fan(5, WindingOrder::Clockwise, &mut indices);
        assert_eq!(indices, vec![7, 0, 1, 2, 0, 2, 3, 0, 3, 4]);
    }

    #[test]
    fn counter_clockwise_reverses_each_triangle() {
        let mut indices = Vec::new();
        triangulate_fan(4, WindingOrder::CounterClockwise, &mut indices);
        assert_eq!(indices, vec![0, 2, 1, 0, 3, 2]);
    }

    #[test]
    fn too_few_points() {
        let mut indices = Vec::new();
        triangulate_fan(2, WindingOrder::Clockwise, &mut indices);
        assert!(indices.is_empty());
    }
}
