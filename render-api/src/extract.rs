//! Data types extracted from the host each frame and handed to the penumbra builder.
//! The host (or its silhouette classifier) fills these; the builder only reads them.

/// How a light treats the hulls it hits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ShadowType {
    /// Hulls are lit; shadows are cast behind them.
    #[default]
    Illuminated,
    /// Hulls are drawn as solid shadow.
    Solid,
    /// Hulls are fully occluded; penumbra geometry must not spill past the hull boundary.
    Occluded,
}

impl ShadowType {
    /// Whether penumbra fins are clipped against the hull polygon.
    pub fn clips_fins(&self) -> bool {
        matches!(self, ShadowType::Occluded)
    }
}

/// Light data needed by the penumbra builder.
#[derive(Clone, Copy, Debug)]
pub struct ExtractedLight {
    pub entity_id: u64,
    /// Positive reach of the light in world units.
    pub range: f32,
    pub shadow_type: ShadowType,
}

/// Occluder hull in world space.
#[derive(Clone, Debug, Default)]
pub struct ExtractedHull {
    pub entity_id: u64,
    /// Boundary points after the hull's transform; simple and convex, either winding.
    pub transformed_points: Vec<[f32; 2]>,
}

/// Which side of the light a silhouette point sits on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Side {
    #[default]
    None,
    Left,
    Right,
}

/// Classification of one hull boundary point relative to one light.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilhouettePointContext {
    pub point: [f32; 2],
    pub is_convex: bool,
    pub left_side: Side,
    pub right_side: Side,
    pub side: Side,
    /// Unit direction from the light center to `point`.
    pub light_to_point_dir: [f32; 2],
    /// Unit direction from `light_left` to `point`.
    pub light_left_to_point_dir: [f32; 2],
    /// Unit direction from `light_right` to `point`.
    pub light_right_to_point_dir: [f32; 2],
    /// Outer boundary points of the light's area, as seen from `point`.
    pub light_left: [f32; 2],
    pub light_right: [f32; 2],
}

impl SilhouettePointContext {
    /// Convex point bounding the shadow on the light's right.
    pub fn is_right_boundary(&self) -> bool {
        self.is_convex && (self.right_side == Side::Right || self.side == Side::Right)
    }

    /// Convex point bounding the shadow on the light's left.
    pub fn is_left_boundary(&self) -> bool {
        self.is_convex && (self.left_side == Side::Left || self.side == Side::Left)
    }
}

/// All classified points of one hull for one light.
#[derive(Clone, Debug, Default)]
pub struct HullContext {
    pub point_contexts: Vec<SilhouettePointContext>,
}
