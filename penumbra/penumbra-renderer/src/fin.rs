//! Penumbra fins: one soft-shadow wedge per silhouette point, anchored at the point and
//! spreading away from the light between the light's two outer edges.
//!
//! A fin goes through `build_fin` (base triangle, optional hull clip, origin-first reorder),
//! then [`Fin::assign_tex_coords`] and [`Fin::triangulate`]. Clipping only touches
//! positions; texture coordinates are always rebuilt against the unclipped triangle.

use render_api::{ExtractedHull, ExtractedLight, PenumbraVertex, SilhouettePointContext};

use crate::barycentric::assign_tex_coords;
use crate::clip::clip;
use crate::config::PenumbraConfig;
use crate::math::{add, dot, near_equal, scale, signed_area, Vec2};
use crate::pool::Reset;
use crate::triangulate::{triangulate_fan, WindingOrder};

/// Which edge of the shadow the fin softens.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FinSide {
    Left,
    #[default]
    Right,
}

/// Why a silhouette point produced no fin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SkipReason {
    /// The point direction is (nearly) perpendicular to the light's outer edge direction.
    RangeDenominator(f32),
    /// Fewer than 3 distinct points, or no area, remain after clipping.
    Degenerate { points: usize },
}

#[derive(Clone, Debug, Default)]
pub struct Fin {
    pub side: FinSide,
    /// Hull point, tex (0, 1).
    pub vertex1: PenumbraVertex,
    /// Projected from the light's left outer point.
    pub vertex2: PenumbraVertex,
    /// Projected from the light's right outer point.
    pub vertex3: PenumbraVertex,
    /// Working polygon, anchor first once built.
    pub points: Vec<Vec2>,
    pub indices: Vec<u32>,
    pub final_vertices: Vec<PenumbraVertex>,
    pub clipped: bool,
}

impl Reset for Fin {
    fn reset(&mut self) {
        self.points.clear();
        self.indices.clear();
        self.final_vertices.clear();
        self.clipped = false;
    }
}

impl Fin {
    pub fn corners(&self) -> [PenumbraVertex; 3] {
        [self.vertex1, self.vertex2, self.vertex3]
    }

    /// Rotate `points` so the anchor leads, keeping cyclic order. No-op if the anchor is gone.
    pub fn reorder_origin_first(&mut self, tolerance: f32) {
        let anchor = self.vertex1.position;
        if let Some(index) = self.points.iter().position(|&p| near_equal(p, anchor, tolerance)) {
            self.points.rotate_left(index);
        }
    }

    pub fn is_degenerate(&self, tolerance: f32) -> bool {
        self.points.len() < 3 || signed_area(&self.points).abs() <= tolerance * tolerance
    }

    /// Fill `final_vertices`, one per point, in point order.
    pub fn assign_tex_coords(&mut self, tolerance: f32) {
        let corners = self.corners();
        self.final_vertices.clear();
        assign_tex_coords(&self.points, &corners, tolerance, &mut self.final_vertices);
    }

    /// Fill `indices` with a fan over `points`, local to this fin.
    pub fn triangulate(&mut self, winding: WindingOrder) {
        self.indices.clear();
        triangulate_fan(self.points.len(), winding, &mut self.indices);
    }

    fn populate_main_vertices(
        &mut self,
        light: &ExtractedLight,
        ctx: &SilhouettePointContext,
        min_range_denominator: f32,
    ) -> Result<(), SkipReason> {
        let right_dir = ctx.light_right_to_point_dir;
        let left_dir = ctx.light_left_to_point_dir;
        // The outer rays are not parallel to the light-to-point axis; stretch them so they
        // still reach the light's range along that axis.
        let denominator = dot(ctx.light_to_point_dir, right_dir);
        if denominator.is_nan() || denominator < min_range_denominator {
            return Err(SkipReason::RangeDenominator(denominator));
        }
        let range = light.range / denominator;

        let inner = 0.0;
        let (left_u, right_u) = match self.side {
            FinSide::Left => (1.0, inner),
            FinSide::Right => (inner, 1.0),
        };
        self.vertex1 = PenumbraVertex::new(ctx.point, [0.0, 1.0]);
        self.vertex2 = PenumbraVertex::new(add(ctx.light_left, scale(left_dir, range)), [left_u, 0.0]);
        self.vertex3 = PenumbraVertex::new(add(ctx.light_right, scale(right_dir, range)), [right_u, 0.0]);

        self.points.clear();
        self.points.extend([self.vertex1.position, self.vertex2.position, self.vertex3.position]);
        Ok(())
    }
}

/// Build the fin's polygon for one silhouette point. On success `fin.points` holds the
/// anchor-first polygon ready for texture assignment and triangulation.
pub fn build_fin(
    fin: &mut Fin,
    light: &ExtractedLight,
    ctx: &SilhouettePointContext,
    hull: &ExtractedHull,
    side: FinSide,
    config: &PenumbraConfig,
) -> Result<(), SkipReason> {
    fin.reset();
    fin.side = side;
    fin.populate_main_vertices(light, ctx, config.min_range_denominator)?;

    if light.shadow_type.clips_fins() {
        let points = std::mem::take(&mut fin.points);
        fin.points = clip(points, &hull.transformed_points, config.tolerance);
        fin.clipped = true;
        fin.reorder_origin_first(config.tolerance);
    }

    if fin.is_degenerate(config.tolerance) {
        return Err(SkipReason::Degenerate { points: fin.points.len() });
    }
    Ok(())
}
