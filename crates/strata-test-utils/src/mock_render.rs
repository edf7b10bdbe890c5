//! Mock implementation of RenderDevice for testing.
//!
//! This module provides a device that records every call and tracks the
//! resulting state without touching a GPU.

use crate::{
    gpu_types::{DeviceState, StagedRange, TextureId, TexturedVertex},
    render_device::RenderDevice,
};
use parking_lot::Mutex;

/// Records a device call for verification in tests.
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceCall {
    BindTexture(Option<TextureId>),
    SetDepthTest(bool),
    SetBlend(Option<wgpu::BlendState>),
    SetWrapMode(wgpu::AddressMode),
    SetDepthBias(wgpu::DepthBiasState),
    SetCullMode(Option<wgpu::Face>),
    DrawTriangles { range: StagedRange },
}

/// A draw as the device saw it: the state in effect and the uploaded vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedDraw {
    pub state: DeviceState,
    pub range: StagedRange,
    pub vertices: Vec<TexturedVertex>,
}

/// Mock implementation of RenderDevice for testing.
///
/// # Borrow Checking Pattern: Interior Mutability
///
/// `RenderDevice` methods take `&self` but the mock has to record calls, so
/// its state sits behind `parking_lot::Mutex` (which keeps it `Send + Sync`).
///
/// # Example
///
/// ```rust
/// use strata_test_utils::{MockRenderDevice, RenderDevice, StagedRange, TexturedVertex};
///
/// let device = MockRenderDevice::new();
/// let vertices = [TexturedVertex::default(); 3];
/// device.draw_triangles(
///     StagedRange { generation: 1, first_vertex: 0, vertex_count: 3, discard: true },
///     &vertices,
/// );
///
/// assert_eq!(device.count_draws(), 1);
/// assert_eq!(device.draws()[0].vertices.len(), 3);
/// ```
pub struct MockRenderDevice {
    /// Recorded calls for verification
    calls: Mutex<Vec<DeviceCall>>,

    /// Draws with the state snapshot taken at submission time
    draws: Mutex<Vec<RecordedDraw>>,

    /// State as programmed so far
    state: Mutex<DeviceState>,
}

impl MockRenderDevice {
    /// Create a new mock device in the default state.
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            draws: Mutex::new(Vec::new()),
            state: Mutex::new(DeviceState::default()),
        }
    }

    /// Get a copy of all recorded calls (for test assertions).
    pub fn calls(&self) -> Vec<DeviceCall> {
        self.calls.lock().clone()
    }

    /// Get a copy of all recorded draws.
    pub fn draws(&self) -> Vec<RecordedDraw> {
        self.draws.lock().clone()
    }

    /// The state the device is currently in.
    pub fn current_state(&self) -> DeviceState {
        *self.state.lock()
    }

    /// Count draw submissions.
    pub fn count_draws(&self) -> usize {
        self.draws.lock().len()
    }

    /// Count texture binds. The batcher binds exactly once per applied material.
    pub fn count_texture_binds(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| matches!(call, DeviceCall::BindTexture(_)))
            .count()
    }

    /// Total number of vertices submitted across all draws.
    pub fn count_vertices(&self) -> usize {
        self.draws.lock().iter().map(|draw| draw.vertices.len()).sum()
    }

    /// Clear recorded calls and draws (useful between frames). State is kept.
    pub fn clear_calls(&self) {
        self.calls.lock().clear();
        self.draws.lock().clear();
    }

    /// Get total number of recorded calls.
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    fn record(&self, call: DeviceCall, update: impl FnOnce(&mut DeviceState)) {
        update(&mut self.state.lock());
        self.calls.lock().push(call);
    }
}

impl Default for MockRenderDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderDevice for MockRenderDevice {
    fn bind_texture(&self, texture: Option<TextureId>) {
        self.record(DeviceCall::BindTexture(texture), |state| state.texture = texture);
    }

    fn set_depth_test(&self, enabled: bool) {
        self.record(DeviceCall::SetDepthTest(enabled), |state| state.depth_test = enabled);
    }

    fn set_blend(&self, blend: Option<wgpu::BlendState>) {
        self.record(DeviceCall::SetBlend(blend), |state| state.blend = blend);
    }

    fn set_wrap_mode(&self, mode: wgpu::AddressMode) {
        self.record(DeviceCall::SetWrapMode(mode), |state| state.wrap_mode = mode);
    }

    fn set_depth_bias(&self, bias: wgpu::DepthBiasState) {
        self.record(DeviceCall::SetDepthBias(bias), |state| state.depth_bias = bias);
    }

    fn set_cull_mode(&self, cull: Option<wgpu::Face>) {
        self.record(DeviceCall::SetCullMode(cull), |state| state.cull_mode = cull);
    }

    fn draw_triangles(&self, range: StagedRange, vertices: &[TexturedVertex]) {
        assert_eq!(
            vertices.len(),
            range.vertex_count as usize,
            "Staged range covers {} vertices but {} were passed",
            range.vertex_count,
            vertices.len()
        );
        let state = self.current_state();
        self.calls.lock().push(DeviceCall::DrawTriangles { range });
        self.draws.lock().push(RecordedDraw {
            state,
            range,
            vertices: vertices.to_vec(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_tracks_setters() {
        let device = MockRenderDevice::new();
        device.bind_texture(Some(TextureId::from_raw(9)));
        device.set_cull_mode(Some(wgpu::Face::Back));

        let state = device.current_state();
        assert_eq!(state.texture, Some(TextureId::from_raw(9)));
        assert_eq!(state.cull_mode, Some(wgpu::Face::Back));
        assert_eq!(device.call_count(), 2);
        assert_eq!(device.count_texture_binds(), 1);
    }

    #[test]
    fn test_apply_state_issues_one_call_per_field() {
        let device = MockRenderDevice::new();
        let target = DeviceState {
            depth_test: false,
            wrap_mode: wgpu::AddressMode::Repeat,
            ..DeviceState::default()
        };
        device.apply_state(&target);

        assert_eq!(device.call_count(), 6);
        assert_eq!(device.current_state(), target);
    }

    #[test]
    fn test_draw_snapshots_state() {
        let device = MockRenderDevice::new();
        device.set_depth_test(false);
        device.draw_triangles(
            StagedRange {
                generation: 1,
                first_vertex: 0,
                vertex_count: 3,
                discard: true,
            },
            &[TexturedVertex::default(); 3],
        );
        device.set_depth_test(true);

        let draws = device.draws();
        assert_eq!(draws.len(), 1);
        assert!(!draws[0].state.depth_test);
        assert_eq!(device.count_vertices(), 3);

        device.clear_calls();
        assert_eq!(device.call_count(), 0);
        assert!(device.current_state().depth_test);
    }
}
