//! Render materials: the state key batches are grouped and sorted by.
//!
//! A [`RenderMaterial`] bundles every piece of fixed-function state a batch
//! of sprites needs. It is a plain value: equal materials are
//! interchangeable, and the derived ordering is the draw order.
//!
//! # Sort order
//!
//! Fields compare lexicographically, most significant first:
//!
//! 1. texture (no texture first, then by raw handle)
//! 2. depth test (disabled first)
//! 3. [`BlendType`]
//! 4. [`Layer`]
//! 5. [`WrapMode`]
//! 6. depth bias
//! 7. [`CullingMode`]
//!
//! # Example
//!
//! ```
//! use strata_render::{BlendType, Layer, RenderMaterial};
//!
//! let glow = RenderMaterial::default()
//!     .with_blend_type(BlendType::Additive)
//!     .with_layer(Layer::Effect);
//!
//! assert!(RenderMaterial::default() < glow);
//! ```

use strata_test_utils::{DeviceState, RenderDevice, TextureId};

use crate::blend::BlendType;
use crate::cull::CullingMode;
use crate::depth::depth_bias_state;
use crate::sampler::WrapMode;
use crate::texture::{TextureResource, texture_of};

/// Compositing layer, an ordering hint independent of blending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Layer {
    /// World-attached decals.
    #[default]
    Decal,
    /// World effects.
    Effect,
    /// Effects drawn over other world effects.
    EffectForeground,
    /// Full-screen overlays such as flashes and fades.
    FullscreenEffect,
    /// Effects attached to the HUD.
    HudEffect,
}

/// Fixed-function state for one batch.
///
/// Field order is the comparison priority; do not reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RenderMaterial {
    texture: Option<TextureId>,
    depth_test: bool,
    blend_type: BlendType,
    layer: Layer,
    wrap_mode: WrapMode,
    depth_bias: i32,
    culling: CullingMode,
}

impl Default for RenderMaterial {
    fn default() -> Self {
        Self {
            texture: None,
            depth_test: true,
            blend_type: BlendType::Opaque,
            layer: Layer::Decal,
            wrap_mode: WrapMode::Clamp,
            depth_bias: 0,
            culling: CullingMode::Disabled,
        }
    }
}

impl RenderMaterial {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn texture(&self) -> Option<TextureId> {
        self.texture
    }

    pub fn set_texture(&mut self, texture: Option<TextureId>) {
        self.texture = texture;
    }

    /// Set the texture from a higher-level resource. See [`texture_of`].
    pub fn set_texture_resource<R: TextureResource + ?Sized>(&mut self, resource: Option<&R>) {
        self.texture = texture_of(resource);
    }

    pub fn reset_texture(&mut self) {
        self.texture = None;
    }

    pub fn depth_test(&self) -> bool {
        self.depth_test
    }

    pub fn set_depth_test(&mut self, enabled: bool) {
        self.depth_test = enabled;
    }

    pub fn blend_type(&self) -> BlendType {
        self.blend_type
    }

    pub fn set_blend_type(&mut self, blend_type: BlendType) {
        self.blend_type = blend_type;
    }

    pub fn layer(&self) -> Layer {
        self.layer
    }

    pub fn set_layer(&mut self, layer: Layer) {
        self.layer = layer;
    }

    pub fn wrap_mode(&self) -> WrapMode {
        self.wrap_mode
    }

    pub fn set_wrap_mode(&mut self, mode: WrapMode) {
        self.wrap_mode = mode;
    }

    /// Depth bias in device depth steps. See [`crate::depth`] for the unit.
    pub fn depth_bias(&self) -> i32 {
        self.depth_bias
    }

    pub fn set_depth_bias(&mut self, bias: i32) {
        self.depth_bias = bias;
    }

    pub fn culling(&self) -> CullingMode {
        self.culling
    }

    pub fn set_culling(&mut self, culling: CullingMode) {
        self.culling = culling;
    }

    pub fn with_texture(mut self, texture: Option<TextureId>) -> Self {
        self.texture = texture;
        self
    }

    pub fn with_texture_resource<R: TextureResource + ?Sized>(mut self, resource: Option<&R>) -> Self {
        self.set_texture_resource(resource);
        self
    }

    pub fn with_depth_test(mut self, enabled: bool) -> Self {
        self.depth_test = enabled;
        self
    }

    pub fn with_blend_type(mut self, blend_type: BlendType) -> Self {
        self.blend_type = blend_type;
        self
    }

    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.layer = layer;
        self
    }

    pub fn with_wrap_mode(mut self, mode: WrapMode) -> Self {
        self.wrap_mode = mode;
        self
    }

    pub fn with_depth_bias(mut self, bias: i32) -> Self {
        self.depth_bias = bias;
        self
    }

    pub fn with_culling(mut self, culling: CullingMode) -> Self {
        self.culling = culling;
        self
    }

    /// The device state this material programs.
    pub fn device_state(&self) -> DeviceState {
        DeviceState {
            texture: self.texture,
            depth_test: self.depth_test,
            blend: self.blend_type.to_blend_state(),
            wrap_mode: self.wrap_mode.to_address_mode(),
            depth_bias: depth_bias_state(self.depth_bias),
            cull_mode: self.culling.to_cull_face(),
        }
    }

    /// Program the device to match this material.
    ///
    /// Every state value is set unconditionally; applying the same material
    /// twice leaves the device in the same state.
    pub fn apply(&self, device: &dyn RenderDevice) {
        device.apply_state(&self.device_state());
    }
}
