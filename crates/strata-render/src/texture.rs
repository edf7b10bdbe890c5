//! Texture identity resolution at the submission boundary.
//!
//! Materials only store an `Option<TextureId>`. Higher-level texture
//! resources are resolved to that identity here, before they reach the key.

use strata_test_utils::TextureId;

/// A texture resource that may or may not currently have device storage.
pub trait TextureResource {
    /// The device texture backing this resource, if it has been uploaded.
    fn texture_id(&self) -> Option<TextureId>;
}

impl TextureResource for TextureId {
    fn texture_id(&self) -> Option<TextureId> {
        Some(*self)
    }
}

/// Resolve an optional resource to a texture identity.
///
/// A missing resource, or one without device storage, yields `None` ("no
/// texture") rather than an error.
pub fn texture_of<R: TextureResource + ?Sized>(resource: Option<&R>) -> Option<TextureId> {
    resource.and_then(|resource| resource.texture_id())
}
