//! Strata Render
//!
//! Batches screen-space sprites by fixed-function render state and streams
//! them to a device through a transient vertex ring.
//!
//! - [`RenderMaterial`] is the state key. Its ordering is the draw order.
//! - [`RenderBatcher`] groups [`TexturedVertex`] triangles and quads by
//!   material and flushes them with one state application per material.
//! - [`CircularVertexBuffer`] stages vertices without overwriting storage a
//!   device may still be reading.
//! - [`global`] offers a process-wide batcher with an explicit lifecycle.
//!
//! The device itself is abstracted by [`RenderDevice`].

pub mod batcher;
pub mod blend;
pub mod buffer_pool;
pub mod cull;
pub mod depth;
mod error;
pub mod global;
pub mod material;
pub mod sampler;
pub mod texture;

pub use batcher::*;
pub use blend::BlendType;
pub use buffer_pool::{CircularVertexBuffer, TransientRegion};
pub use cull::CullingMode;
pub use error::BatchError;
pub use material::{Layer, RenderMaterial};
pub use sampler::WrapMode;
pub use texture::{TextureResource, texture_of};

pub use strata_test_utils::{DeviceState, RenderDevice, StagedRange, TextureId, TexturedVertex};
