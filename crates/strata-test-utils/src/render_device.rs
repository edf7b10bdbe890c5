//! Trait abstracting the fixed-function device the batcher drives.
//!
//! The `RenderDevice` trait covers the handful of operations a batch flush
//! needs, so the batcher can run against a real backend or a mock.

use crate::gpu_types::{DeviceState, StagedRange, TextureId, TexturedVertex};

/// Fixed-function state programming and triangle submission.
///
/// # Borrow Checking Pattern
///
/// Methods take `&self`. Implementations that track state use interior
/// mutability, which keeps the trait object-safe and lets one device be
/// shared (via `Arc`) between the batcher and the rest of the frame.
///
/// # Example
///
/// ```rust,no_run
/// use strata_test_utils::{DeviceState, RenderDevice};
///
/// fn restore_defaults(device: &dyn RenderDevice) {
///     device.apply_state(&DeviceState::default());
/// }
/// ```
pub trait RenderDevice: Send + Sync {
    /// Bind the texture sampled by subsequent draws, or unbind with `None`.
    fn bind_texture(&self, texture: Option<TextureId>);

    /// Enable or disable depth testing.
    ///
    /// Enabled compares with `LessEqual`, disabled passes every fragment
    /// (`Always`).
    fn set_depth_test(&self, enabled: bool);

    /// Set the blend function. `None` disables blending.
    fn set_blend(&self, blend: Option<wgpu::BlendState>);

    /// Set the texture address mode for U and V.
    fn set_wrap_mode(&self, mode: wgpu::AddressMode);

    /// Set the constant/slope depth bias.
    fn set_depth_bias(&self, bias: wgpu::DepthBiasState);

    /// Set which faces are culled. Front faces are counter-clockwise.
    fn set_cull_mode(&self, cull: Option<wgpu::Face>);

    /// Submit a triangle list staged in transient storage.
    ///
    /// `vertices.len()` equals `range.vertex_count`. The device must consume
    /// (upload or copy) the slice before returning. When `range.discard` is
    /// set the device orphans its previous storage first.
    fn draw_triangles(&self, range: StagedRange, vertices: &[TexturedVertex]);

    /// Program every state value in `state`.
    fn apply_state(&self, state: &DeviceState) {
        self.bind_texture(state.texture);
        self.set_depth_test(state.depth_test);
        self.set_blend(state.blend);
        self.set_wrap_mode(state.wrap_mode);
        self.set_depth_bias(state.depth_bias);
        self.set_cull_mode(state.cull_mode);
    }
}
