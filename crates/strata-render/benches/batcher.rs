use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use glam::{Vec2, Vec3};
use strata_render::{BlendType, Layer, RenderBatcher, RenderMaterial, TextureId, TexturedQuad, TexturedVertex};
use strata_test_utils::MockRenderDevice;

fn quad(i: u32) -> TexturedQuad {
    let x = (i % 64) as f32 * 8.0;
    let y = (i / 64) as f32 * 8.0;
    let corner = |dx: f32, dy: f32, u: f32, v: f32| {
        TexturedVertex::new(Vec3::new(x + dx, y + dy, 0.5), 1.0, [255; 4], Vec2::new(u, v))
    };
    TexturedQuad::new([
        corner(0.0, 0.0, 0.0, 0.0),
        corner(8.0, 0.0, 1.0, 0.0),
        corner(8.0, 8.0, 1.0, 1.0),
        corner(0.0, 8.0, 0.0, 1.0),
    ])
}

fn materials(count: u64) -> Vec<RenderMaterial> {
    (0..count)
        .map(|i| {
            RenderMaterial::default()
                .with_texture(Some(TextureId::from_raw(i % 16)))
                .with_blend_type(BlendType::ALL[(i % 6) as usize])
                .with_layer(if i % 2 == 0 { Layer::Effect } else { Layer::Decal })
        })
        .collect()
}

fn bench_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("batcher_add");

    for material_count in [1u64, 16, 64] {
        let materials = materials(material_count);
        group.bench_with_input(
            BenchmarkId::from_parameter(material_count),
            &materials,
            |b, materials| {
                let mut batcher = RenderBatcher::new();
                b.iter(|| {
                    for i in 0..4096u32 {
                        batcher.add(&materials[i as usize % materials.len()], &quad(i));
                    }
                    batcher.clear();
                });
            },
        );
    }

    group.finish();
}

fn bench_frame(c: &mut Criterion) {
    let device = MockRenderDevice::new();
    let materials = materials(32);
    let mut batcher = RenderBatcher::new();
    batcher.initialize();

    c.bench_function("batcher_frame_4096_quads", |b| {
        b.iter(|| {
            for i in 0..4096u32 {
                batcher.add(&materials[i as usize % materials.len()], &quad(i));
            }
            black_box(batcher.render(&device));
            batcher.clear();
            device.clear_calls();
        });
    });
}

criterion_group!(benches, bench_add, bench_frame);
criterion_main!(benches);
