//! Device abstraction and test utilities for Strata.
//!
//! This crate holds the value types that cross the batcher/device boundary
//! and the [`RenderDevice`] trait the batcher drives.
//!
//! # Overview
//!
//! - [`RenderDevice`] - Trait abstracting fixed-function state and draw submission
//! - `MockRenderDevice` - Recording implementation for tests (requires `mock` feature)
//! - [`TexturedVertex`], [`StagedRange`], [`DeviceState`] - Boundary value types
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "mock")]
//! # {
//! use strata_test_utils::{MockRenderDevice, RenderDevice};
//!
//! let device = MockRenderDevice::new();
//! device.set_depth_test(false);
//!
//! assert_eq!(device.call_count(), 1);
//! assert!(!device.current_state().depth_test);
//! # }
//! ```

pub mod gpu_types;
#[cfg(feature = "mock")]
pub mod mock_render;
pub mod render_device;

pub use gpu_types::*;
#[cfg(feature = "mock")]
pub use mock_render::*;
pub use render_device::*;
