//! Build penumbra fins for one round light and a few box hulls, print them, and optionally
//! upload them to a headless wgpu device.
//! Run: RUST_LOG=debug cargo run -p debug --bin penumbra_fins [-- --occluded] [-- --gpu]

use std::sync::Arc;

use penumbra_renderer::{LightVaos, PenumbraBuilder, PenumbraError};
use render_api::{ExtractedHull, ExtractedLight, HullContext, MeshBuffers, ShadowType, Side, SilhouettePointContext};

const LIGHT_CENTER: [f32; 2] = [0.0, 0.0];
const LIGHT_RADIUS: f32 = 1.5;

fn normalize(v: [f32; 2]) -> [f32; 2] {
    let len = (v[0] * v[0] + v[1] * v[1]).sqrt();
    if len == 0.0 { v } else { [v[0] / len, v[1] / len] }
}

/// Stand-in for the host's silhouette classifier: a convex hull point bounds the shadow on
/// the right when every other point lies left of the ray from the light center, and vice versa.
fn classify(center: [f32; 2], radius: f32, hull: &ExtractedHull) -> HullContext {
    let pts = &hull.transformed_points;
    let point_contexts = pts
        .iter()
        .map(|&p| {
            let d = [p[0] - center[0], p[1] - center[1]];
            let side_of = |q: [f32; 2]| d[0] * (q[1] - center[1]) - d[1] * (q[0] - center[0]);
            let is_right = pts.iter().filter(|&&q| q != p).all(|&q| side_of(q) >= 0.0);
            let is_left = pts.iter().filter(|&&q| q != p).all(|&q| side_of(q) <= 0.0);
            let dir = normalize(d);
            let perp = [-dir[1], dir[0]];
            let light_left = [center[0] + perp[0] * radius, center[1] + perp[1] * radius];
            let light_right = [center[0] - perp[0] * radius, center[1] - perp[1] * radius];
            SilhouettePointContext {
                point: p,
                is_convex: true,
                left_side: if is_left { Side::Left } else { Side::None },
                right_side: if is_right { Side::Right } else { Side::None },
                side: Side::None,
                light_to_point_dir: dir,
                light_left_to_point_dir: normalize([p[0] - light_left[0], p[1] - light_left[1]]),
                light_right_to_point_dir: normalize([p[0] - light_right[0], p[1] - light_right[1]]),
                light_left,
                light_right,
            }
        })
        .collect();
    HullContext { point_contexts }
}

fn box_hull(entity_id: u64, center: [f32; 2], half: f32) -> ExtractedHull {
    let [x, y] = center;
    ExtractedHull {
        entity_id,
        transformed_points: vec![[x - half, y - half], [x + half, y - half], [x + half, y + half], [x - half, y + half]],
    }
}

fn main() -> Result<(), PenumbraError> {
    env_logger::init();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let shadow_type = if args.iter().any(|a| a == "--occluded") { ShadowType::Occluded } else { ShadowType::Illuminated };
    let light = ExtractedLight { entity_id: 1, range: 40.0, shadow_type };
    let hulls = [box_hull(10, [12.0, 0.0], 2.0), box_hull(11, [-6.0, 8.0], 1.0), box_hull(12, [0.0, -15.0], 3.0)];

    let mut builder = PenumbraBuilder::new();
    builder.pre_process();
    for hull in &hulls {
        builder.process_hull(&light, hull, &classify(LIGHT_CENTER, LIGHT_RADIUS, hull));
    }

    let mut mesh = MeshBuffers::default();
    builder.build(&light, &mut mesh)?;
    println!("{:?} light: has_penumbra={} {:?}", shadow_type, mesh.has_penumbra, builder.stats());
    for (i, v) in mesh.vertices.iter().enumerate() {
        println!("  v{i:<3} pos=({:8.3}, {:8.3}) uv=({:.3}, {:.3})", v.position[0], v.position[1], v.tex_coord[0], v.tex_coord[1]);
    }
    for tri in mesh.indices.chunks(3) {
        println!("  tri {tri:?}");
    }

    if args.iter().any(|a| a == "--gpu") {
        let Some((device, queue)) = pollster::block_on(request_device()) else {
            log::warn!("no wgpu adapter/device available; skipping upload");
            return Ok(());
        };
        let mut vaos = LightVaos::new(Arc::new(device), Arc::new(queue));
        builder.pre_process();
        for hull in &hulls {
            builder.process_hull(&light, hull, &classify(LIGHT_CENTER, LIGHT_RADIUS, hull));
        }
        builder.build(&light, &mut vaos)?;
        println!(
            "uploaded: has_penumbra={} vertices={} indices={}",
            vaos.has_penumbra,
            vaos.penumbra_vao.vertex_count(),
            vaos.penumbra_vao.index_count()
        );
    }
    Ok(())
}

async fn request_device() -> Option<(wgpu::Device, wgpu::Queue)> {
    let instance = wgpu::Instance::default();
    let adapter = instance.request_adapter(&wgpu::RequestAdapterOptions::default()).await?;
    adapter.request_device(&wgpu::DeviceDescriptor::default(), None).await.ok()
}
