//! Value types shared between the batcher and the device.
//!
//! Everything here is plain data: cheap to copy, comparable, and free of
//! device handles, so both a real backend and the mock can consume it.

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};
use static_assertions::assert_eq_size;

/// Opaque texture identity.
///
/// The batcher never dereferences it; it only compares and forwards it to
/// [`RenderDevice::bind_texture`](crate::RenderDevice::bind_texture).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TextureId(u64);

impl TextureId {
    /// Wrap a raw backend handle.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw backend handle.
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// A projected, screen-space vertex.
///
/// 28 bytes, tightly packed so it can be uploaded with `bytemuck::cast_slice`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct TexturedVertex {
    /// Screen x, screen y, depth.
    pub position: [f32; 3],
    /// Reciprocal of homogeneous w.
    pub rhw: f32,
    /// RGBA color, 8 bits per channel.
    pub color: [u8; 4],
    /// Texture coordinates.
    pub uv: [f32; 2],
}

assert_eq_size!(TexturedVertex, [u8; 28]);

impl TexturedVertex {
    /// Size of one vertex in bytes.
    pub const SIZE: u64 = std::mem::size_of::<Self>() as u64;

    pub fn new(position: Vec3, rhw: f32, color: [u8; 4], uv: Vec2) -> Self {
        Self {
            position: position.to_array(),
            rhw,
            color,
            uv: uv.to_array(),
        }
    }
}

/// Where a draw's vertices live in the device's transient vertex storage.
///
/// `generation` changes every time the ring wraps. Within one generation the
/// ranges handed to the device never overlap, so a region still being read
/// from an earlier submission is never overwritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StagedRange {
    /// Storage generation; bumps on every wrap or release.
    pub generation: u64,
    /// Index of the first vertex in the storage.
    pub first_vertex: u32,
    /// Number of vertices; always a multiple of 3.
    pub vertex_count: u32,
    /// The device must orphan its previous storage before writing this range.
    pub discard: bool,
}

impl StagedRange {
    /// One past the last vertex index.
    pub fn end_vertex(&self) -> u32 {
        self.first_vertex + self.vertex_count
    }
}

/// Snapshot of every piece of fixed-function state the batcher programs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceState {
    pub texture: Option<TextureId>,
    pub depth_test: bool,
    /// `None` means blending is disabled.
    pub blend: Option<wgpu::BlendState>,
    pub wrap_mode: wgpu::AddressMode,
    pub depth_bias: wgpu::DepthBiasState,
    /// Faces to cull, assuming counter-clockwise front faces.
    pub cull_mode: Option<wgpu::Face>,
}

impl Default for DeviceState {
    /// The state of a freshly created device.
    fn default() -> Self {
        Self {
            texture: None,
            depth_test: true,
            blend: None,
            wrap_mode: wgpu::AddressMode::ClampToEdge,
            depth_bias: wgpu::DepthBiasState::default(),
            cull_mode: None,
        }
    }
}
