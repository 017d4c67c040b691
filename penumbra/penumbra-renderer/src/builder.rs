//! Penumbra builder: accumulates every fin of every hull hit by one light into one indexed
//! vertex buffer, then hands it to the light's output target.
//!
//! Per light: `pre_process` → `process_hull` × N → `build`. The builder owns its buffers
//! and fin pool and reuses them across lights and frames; one builder serves one light at a
//! time.

use render_api::{ExtractedHull, ExtractedLight, HullContext, PenumbraTarget, PenumbraVertex, SilhouettePointContext};

use crate::config::PenumbraConfig;
use crate::error::PenumbraError;
use crate::fin::{build_fin, Fin, FinSide, SkipReason};
use crate::pool::Pool;

/// Counters for the current pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PenumbraStats {
    pub hulls: usize,
    pub fins_built: usize,
    pub fins_clipped: usize,
    pub fins_skipped: usize,
    pub vertices: usize,
    pub indices: usize,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PassState {
    #[default]
    Idle,
    PreProcessed,
    HullProcessed,
}

pub struct PenumbraBuilder {
    config: PenumbraConfig,
    vertices: Vec<PenumbraVertex>,
    indices: Vec<u32>,
    fin_pool: Pool<Fin>,
    /// Vertices accumulated so far; added to each fin's local indices.
    index_offset: u32,
    /// Set when a fin did not fit under `u32::MAX` vertices; `build` reports it.
    overflowed: bool,
    state: PassState,
    stats: PenumbraStats,
}

impl Default for PenumbraBuilder {
    fn default() -> Self {
        Self::from_valid_config(PenumbraConfig::default())
    }
}

impl PenumbraBuilder {
    pub fn new() -> Self { Self::default() }

    pub fn with_config(config: PenumbraConfig) -> Result<Self, PenumbraError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: PenumbraConfig) -> Self {
        let fin_pool = Pool::new(config.fin_pool_capacity);
        Self {
            config,
            vertices: Vec::new(),
            indices: Vec::new(),
            fin_pool,
            index_offset: 0,
            overflowed: false,
            state: PassState::Idle,
            stats: PenumbraStats::default(),
        }
    }

    pub fn config(&self) -> &PenumbraConfig { &self.config }
    pub fn vertices(&self) -> &[PenumbraVertex] { &self.vertices }
    pub fn indices(&self) -> &[u32] { &self.indices }
    pub fn stats(&self) -> PenumbraStats { self.stats }
    pub fn state(&self) -> PassState { self.state }
    pub fn fin_pool(&self) -> &Pool<Fin> { &self.fin_pool }

    /// Start a pass for a new light: clear accumulated geometry and counters.
    pub fn pre_process(&mut self) {
        self.index_offset = 0;
        self.overflowed = false;
        self.vertices.clear();
        self.indices.clear();
        self.stats = PenumbraStats::default();
        self.state = PassState::PreProcessed;
    }

    /// Build and accumulate the fins of every qualifying silhouette point of `hull`.
    /// Convex right boundaries get a right fin, convex left boundaries a left fin; a point
    /// that is both gets both, right first.
    pub fn process_hull(&mut self, light: &ExtractedLight, hull: &ExtractedHull, hull_ctx: &HullContext) {
        if self.state == PassState::Idle {
            log::warn!("penumbra: process_hull for light {} without pre_process; starting a new pass", light.entity_id);
            self.pre_process();
        }
        self.stats.hulls += 1;
        for ctx in &hull_ctx.point_contexts {
            if ctx.is_right_boundary() {
                self.process_fin(light, ctx, hull, FinSide::Right);
            }
            if ctx.is_left_boundary() {
                self.process_fin(light, ctx, hull, FinSide::Left);
            }
        }
        self.state = PassState::HullProcessed;
    }

    fn process_fin(&mut self, light: &ExtractedLight, ctx: &SilhouettePointContext, hull: &ExtractedHull, side: FinSide) {
        let mut fin = self.fin_pool.fetch();
        match build_fin(&mut fin, light, ctx, hull, side, &self.config) {
            Ok(()) => {
                fin.assign_tex_coords(self.config.tolerance);
                fin.triangulate(self.config.winding);
                if fin.clipped {
                    self.stats.fins_clipped += 1;
                }
                self.append_fin(&fin, hull.entity_id);
            }
            Err(reason) => {
                self.stats.fins_skipped += 1;
                match reason {
                    SkipReason::RangeDenominator(d) => log::trace!(
                        "penumbra: hull {} point {:?} skipped, range denominator {d}",
                        hull.entity_id,
                        ctx.point
                    ),
                    SkipReason::Degenerate { points } => log::trace!(
                        "penumbra: hull {} point {:?} clipped to {points} points, no fin",
                        hull.entity_id,
                        ctx.point
                    ),
                }
            }
        }
        self.fin_pool.release(fin);
    }

    fn append_fin(&mut self, fin: &Fin, hull_id: u64) {
        let count = fin.final_vertices.len();
        let next_offset = u32::try_from(count).ok().and_then(|c| self.index_offset.checked_add(c));
        let Some(next_offset) = next_offset else {
            if !self.overflowed {
                log::warn!("penumbra: hull {hull_id} overflows u32 indices at {} vertices", self.vertices.len());
            }
            self.overflowed = true;
            return;
        };
        let offset = self.index_offset;
        self.vertices.extend_from_slice(&fin.final_vertices);
        self.indices.extend(fin.indices.iter().map(|&i| i + offset));
        self.index_offset = next_offset;
        self.stats.fins_built += 1;
        self.stats.vertices = self.vertices.len();
        self.stats.indices = self.indices.len();
    }

    /// Hand the pass's geometry to `target`. With no geometry the target is only marked as
    /// having no penumbra. Ends the pass either way.
    pub fn build(&mut self, light: &ExtractedLight, target: &mut impl PenumbraTarget) -> Result<(), PenumbraError> {
        self.state = PassState::Idle;
        if self.overflowed {
            target.set_has_penumbra(false);
            return Err(PenumbraError::IndexOverflow { vertices: self.vertices.len() });
        }
        log::debug!(
            "penumbra: light {} hulls={} fins={} clipped={} skipped={} vertices={} indices={}",
            light.entity_id,
            self.stats.hulls,
            self.stats.fins_built,
            self.stats.fins_clipped,
            self.stats.fins_skipped,
            self.stats.vertices,
            self.stats.indices,
        );
        if !self.vertices.is_empty() && !self.indices.is_empty() {
            target.set_geometry(&self.vertices, &self.indices)?;
            target.set_has_penumbra(true);
        } else {
            target.set_has_penumbra(false);
        }
        Ok(())
    }
}
