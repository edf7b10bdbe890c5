//! State-keyed sprite batching.
//!
//! [`RenderBatcher`] collects triangles and quads under a [`RenderMaterial`]
//! and flushes them grouped by material, in material order: one state
//! application per material, and one draw per material unless the transient
//! ring is too small to hold the whole group.
//!
//! # Frame lifecycle
//!
//! ```ignore
//! // scene traversal
//! batcher.add(&material, &triangle);
//! batcher.add(&glow, &quad);
//!
//! // frame boundary
//! batcher.render(&device);
//! batcher.clear();
//! ```
//!
//! `render()` does not clear; call [`RenderBatcher::clear`] once the frame's
//! batches are no longer needed. `clear()` keeps the allocations of the
//! materials used this frame, [`RenderBatcher::reset`] gives them all back.

use std::collections::BTreeMap;

use strata_core::profiling::{profile_function, profile_scope};
use strata_test_utils::{RenderDevice, TexturedVertex};

use crate::buffer_pool::CircularVertexBuffer;
use crate::error::BatchError;
use crate::material::RenderMaterial;

/// Default transient ring capacity, in vertices.
pub const DEFAULT_TRANSIENT_CAPACITY: u32 = 64 * 1024;

/// A screen-space quad, vertices in perimeter order.
///
/// Expanded to the fan `(v0, v1, v2), (v0, v2, v3)`, so both triangles keep
/// the quad's winding and share the `v0`-`v2` diagonal.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TexturedQuad {
    pub v: [TexturedVertex; 4],
}

impl TexturedQuad {
    pub fn new(v: [TexturedVertex; 4]) -> Self {
        Self { v }
    }

    /// The two triangles this quad draws as.
    pub fn triangles(&self) -> [[TexturedVertex; 3]; 2] {
        let [v0, v1, v2, v3] = self.v;
        [[v0, v1, v2], [v0, v2, v3]]
    }
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for [strata_test_utils::TexturedVertex; 3] {}
    impl Sealed for super::TexturedQuad {}
}

/// Something the batcher can append as whole triangles.
///
/// Sealed: only triangles and [`TexturedQuad`]s can be batched, which keeps
/// every batch a whole number of triangles.
///
/// ```compile_fail
/// use strata_render::{Primitive, TexturedVertex};
///
/// struct Line([TexturedVertex; 2]);
///
/// impl Primitive for Line {
///     const VERTEX_COUNT: usize = 2;
///
///     fn append_to(&self, batch: &mut Vec<TexturedVertex>) {
///         batch.extend_from_slice(&self.0);
///     }
/// }
/// ```
pub trait Primitive: sealed::Sealed {
    /// Number of vertices appended; always a multiple of 3.
    const VERTEX_COUNT: usize;

    fn append_to(&self, batch: &mut Vec<TexturedVertex>);
}

impl Primitive for [TexturedVertex; 3] {
    const VERTEX_COUNT: usize = 3;

    fn append_to(&self, batch: &mut Vec<TexturedVertex>) {
        batch.extend_from_slice(self);
    }
}

impl Primitive for TexturedQuad {
    const VERTEX_COUNT: usize = 6;

    fn append_to(&self, batch: &mut Vec<TexturedVertex>) {
        for triangle in self.triangles() {
            batch.extend_from_slice(&triangle);
        }
    }
}

/// Descriptor for configuring a [`RenderBatcher`].
#[derive(Debug, Clone)]
pub struct RenderBatcherDescriptor {
    /// Transient ring capacity in vertices. Must hold at least one triangle.
    pub transient_capacity: u32,
    /// Name used in log output.
    pub label: Option<String>,
}

impl Default for RenderBatcherDescriptor {
    fn default() -> Self {
        Self {
            transient_capacity: DEFAULT_TRANSIENT_CAPACITY,
            label: None,
        }
    }
}

impl RenderBatcherDescriptor {
    pub fn validate(&self) -> Result<(), BatchError> {
        if self.transient_capacity < 3 {
            return Err(BatchError::InvalidConfig {
                reason: format!(
                    "transient capacity of {} vertices cannot hold a triangle",
                    self.transient_capacity
                ),
            });
        }
        Ok(())
    }
}

/// Statistics from the last [`RenderBatcher::render`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchRenderStats {
    /// Non-empty material groups flushed.
    pub groups: u32,
    /// Vertices submitted.
    pub vertex_count: u32,
    /// Draw submissions.
    pub draw_calls: u32,
    /// Material applications.
    pub state_changes: u32,
    /// Groups that did not fit the ring and were drawn in several parts.
    pub split_groups: u32,
    /// Times the ring wrapped during the flush.
    pub buffer_wraps: u32,
}

type VertexBatch = Vec<TexturedVertex>;

/// Groups sprites by material and flushes them with minimal state changes.
///
/// The material map is both the grouping and the draw order: iterating it
/// yields groups in ascending [`RenderMaterial`] order. Vertices within a
/// group keep their submission order.
///
/// Not synchronized; confine it to the render thread (or use
/// [`crate::global`], which serializes access).
pub struct RenderBatcher {
    batches: BTreeMap<RenderMaterial, VertexBatch>,
    vertex_buffer: CircularVertexBuffer<TexturedVertex>,
    label: Option<String>,
    stats: BatchRenderStats,
}

impl RenderBatcher {
    /// Create a batcher with the default descriptor.
    pub fn new() -> Self {
        Self::from_valid_descriptor(RenderBatcherDescriptor::default())
    }

    pub fn with_descriptor(descriptor: RenderBatcherDescriptor) -> Result<Self, BatchError> {
        descriptor.validate()?;
        Ok(Self::from_valid_descriptor(descriptor))
    }

    fn from_valid_descriptor(descriptor: RenderBatcherDescriptor) -> Self {
        Self {
            batches: BTreeMap::new(),
            vertex_buffer: CircularVertexBuffer::new(descriptor.transient_capacity as usize),
            label: descriptor.label,
            stats: BatchRenderStats::default(),
        }
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Allocate the transient ring up front.
    ///
    /// Optional: [`render`](Self::render) allocates on demand.
    pub fn initialize(&mut self) {
        self.vertex_buffer.allocate();
        tracing::debug!(label = ?self.label, "Render batcher initialized");
    }

    /// Release every allocation. The batcher stays usable.
    pub fn shutdown(&mut self) {
        self.reset();
        tracing::debug!(label = ?self.label, "Render batcher shut down");
    }

    /// Queue a triangle or quad under `material`.
    ///
    /// No geometric validation is done; degenerate primitives are drawn as given.
    pub fn add<P: Primitive>(&mut self, material: &RenderMaterial, primitive: &P) {
        profile_function!();
        let batch = self.batches.entry(*material).or_default();
        batch.reserve(P::VERTEX_COUNT);
        primitive.append_to(batch);
    }

    /// Flush every non-empty group to `device`, in material order.
    ///
    /// Each group gets exactly one [`RenderMaterial::apply`]. Its vertices are
    /// staged into the transient ring and drawn with one call; a group larger
    /// than the ring is drawn in triangle-aligned parts under the same state.
    /// Batches are left in place; see [`clear`](Self::clear).
    pub fn render(&mut self, device: &dyn RenderDevice) -> BatchRenderStats {
        profile_function!();
        let mut stats = BatchRenderStats::default();
        let wraps_before = self.vertex_buffer.wraps();
        let max_run = self.vertex_buffer.max_triangle_run();
        let capacity = self.vertex_buffer.capacity();

        for (material, batch) in &self.batches {
            if batch.is_empty() {
                continue;
            }
            profile_scope!("flush_group");

            material.apply(device);
            stats.state_changes += 1;
            stats.groups += 1;

            if batch.len() > max_run {
                stats.split_groups += 1;
                tracing::warn!(
                    label = ?self.label,
                    vertices = batch.len(),
                    capacity,
                    "Batch exceeds transient storage, drawing in {} parts",
                    batch.len().div_ceil(max_run)
                );
            }

            for run in batch.chunks(max_run) {
                // Runs are at most `max_triangle_run()` long, which never exceeds
                // the ring capacity, so the ring always has room after a wrap.
                let Some(mut region) = self.vertex_buffer.reserve(run.len()) else {
                    unreachable!(
                        "run of {} vertices exceeds transient capacity {}",
                        run.len(),
                        capacity
                    );
                };
                region.write(run);
                device.draw_triangles(region.range(), region.vertices());
                stats.draw_calls += 1;
                stats.vertex_count += run.len() as u32;
            }

            tracing::trace!(?material, vertices = batch.len(), "Flushed batch");
        }

        stats.buffer_wraps = (self.vertex_buffer.wraps() - wraps_before) as u32;
        self.stats = stats;
        tracing::trace!(label = ?self.label, ?stats, "Render batcher flushed");
        stats
    }

    /// Remove all queued vertices.
    ///
    /// Materials drawn since the previous clear keep their vertex allocation
    /// for the next frame. Materials that stayed empty for a whole frame are
    /// dropped, so the map tracks the live working set.
    pub fn clear(&mut self) {
        self.batches.retain(|_, batch| {
            let live = !batch.is_empty();
            batch.clear();
            live
        });
    }

    /// Drop all batches and free the map, vertex and transient storage.
    pub fn reset(&mut self) {
        self.batches = BTreeMap::new();
        self.vertex_buffer.release();
        self.stats = BatchRenderStats::default();
    }

    /// Bytes reserved by the material map, the vertex batches and the ring.
    pub fn memory_used(&self) -> usize {
        let entry_size = std::mem::size_of::<(RenderMaterial, VertexBatch)>();
        let vertex_size = TexturedVertex::SIZE as usize;
        let table: usize = self
            .batches
            .values()
            .map(|batch| entry_size + batch.capacity() * vertex_size)
            .sum();
        table + self.vertex_buffer.reserved_bytes()
    }

    /// Number of materials with queued vertices.
    pub fn batch_count(&self) -> usize {
        self.batches.values().filter(|batch| !batch.is_empty()).count()
    }

    /// Total queued vertices.
    pub fn vertex_count(&self) -> usize {
        self.batches.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.values().all(Vec::is_empty)
    }

    /// Queued groups in draw order.
    pub fn iter(&self) -> impl Iterator<Item = (&RenderMaterial, &[TexturedVertex])> {
        self.batches
            .iter()
            .filter(|(_, batch)| !batch.is_empty())
            .map(|(material, batch)| (material, batch.as_slice()))
    }

    /// Statistics from the last flush.
    pub fn last_stats(&self) -> BatchRenderStats {
        self.stats
    }

    /// The transient ring, for inspection.
    pub fn transient_buffer(&self) -> &CircularVertexBuffer<TexturedVertex> {
        &self.vertex_buffer
    }
}

impl Default for RenderBatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BlendType, Layer};
    use glam::{Vec2, Vec3};
    use strata_test_utils::MockRenderDevice;

    fn vertex(x: f32) -> TexturedVertex {
        TexturedVertex::new(Vec3::new(x, 0.0, 0.5), 1.0, [255; 4], Vec2::ZERO)
    }

    fn triangle(base: f32) -> [TexturedVertex; 3] {
        [vertex(base), vertex(base + 1.0), vertex(base + 2.0)]
    }

    #[test]
    fn test_quad_expands_to_fan() {
        let quad = TexturedQuad::new([vertex(0.0), vertex(1.0), vertex(2.0), vertex(3.0)]);
        let mut batch = Vec::new();
        quad.append_to(&mut batch);

        let xs: Vec<f32> = batch.iter().map(|v| v.position[0]).collect();
        assert_eq!(xs, vec![0.0, 1.0, 2.0, 0.0, 2.0, 3.0]);
    }

    #[test]
    fn test_primitives_append_whole_triangles() {
        let mut batch = Vec::new();
        triangle(0.0).append_to(&mut batch);
        assert_eq!(batch.len(), <[TexturedVertex; 3]>::VERTEX_COUNT);

        batch.clear();
        TexturedQuad::default().append_to(&mut batch);
        assert_eq!(batch.len(), TexturedQuad::VERTEX_COUNT);
        assert_eq!(batch.len() % 3, 0);
    }

    #[test]
    fn test_descriptor_rejects_tiny_ring() {
        let descriptor = RenderBatcherDescriptor {
            transient_capacity: 2,
            label: None,
        };
        assert!(matches!(
            RenderBatcher::with_descriptor(descriptor),
            Err(BatchError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_add_groups_by_material() {
        let mut batcher = RenderBatcher::new();
        let a = RenderMaterial::default();
        let b = RenderMaterial::default().with_blend_type(BlendType::Additive);

        batcher.add(&a, &triangle(0.0));
        batcher.add(&b, &triangle(10.0));
        batcher.add(&a, &triangle(20.0));

        assert_eq!(batcher.batch_count(), 2);
        assert_eq!(batcher.vertex_count(), 9);

        let (material, vertices) = batcher.iter().next().unwrap();
        assert_eq!(*material, a);
        assert_eq!(vertices[3].position[0], 20.0);
    }

    #[test]
    fn test_render_does_not_clear() {
        let device = MockRenderDevice::new();
        let mut batcher = RenderBatcher::new();
        batcher.add(&RenderMaterial::default(), &triangle(0.0));

        batcher.render(&device);
        assert_eq!(batcher.vertex_count(), 3);

        batcher.render(&device);
        assert_eq!(device.count_draws(), 2);
    }

    #[test]
    fn test_clear_hides_groups_but_keeps_memory() {
        let device = MockRenderDevice::new();
        let mut batcher = RenderBatcher::new();
        let material = RenderMaterial::default().with_layer(Layer::Effect);
        batcher.add(&material, &triangle(0.0));
        batcher.render(&device);

        let used = batcher.memory_used();
        batcher.clear();

        assert!(batcher.is_empty());
        assert_eq!(batcher.batch_count(), 0);
        assert_eq!(batcher.iter().count(), 0);
        assert_eq!(batcher.memory_used(), used);

        device.clear_calls();
        let stats = batcher.render(&device);
        assert_eq!(stats, BatchRenderStats::default());
        assert_eq!(device.call_count(), 0);
    }

    #[test]
    fn test_clear_drops_materials_idle_for_a_frame() {
        let mut batcher = RenderBatcher::new();
        let kept = RenderMaterial::default();
        let idle = RenderMaterial::default().with_layer(Layer::Effect);
        batcher.add(&kept, &triangle(0.0));
        batcher.add(&idle, &triangle(3.0));
        batcher.clear();
        let both = batcher.memory_used();

        batcher.add(&kept, &triangle(0.0));
        batcher.clear();
        assert!(batcher.memory_used() < both);

        batcher.add(&kept, &triangle(0.0));
        batcher.add(&idle, &triangle(3.0));
        let (material, _) = batcher.iter().nth(1).unwrap();
        assert_eq!(*material, idle);
    }

    #[test]
    fn test_shutdown_returns_to_baseline() {
        let mut batcher = RenderBatcher::new();
        assert_eq!(batcher.memory_used(), 0);

        batcher.initialize();
        assert_eq!(
            batcher.memory_used(),
            DEFAULT_TRANSIENT_CAPACITY as usize * std::mem::size_of::<TexturedVertex>()
        );

        batcher.add(&RenderMaterial::default(), &triangle(0.0));
        batcher.shutdown();
        assert_eq!(batcher.memory_used(), 0);
        assert!(batcher.is_empty());
    }
}
