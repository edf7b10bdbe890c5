//! Face culling modes.

/// Which triangles are discarded by winding.
///
/// The device treats counter-clockwise triangles as front facing, so culling
/// clockwise triangles culls back faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum CullingMode {
    /// Draw both windings.
    #[default]
    Disabled,
    /// Discard clockwise triangles.
    Clockwise,
    /// Discard counter-clockwise triangles.
    CounterClockwise,
}

impl CullingMode {
    /// Convert to the wgpu face to cull with `FrontFace::Ccw`.
    pub fn to_cull_face(self) -> Option<wgpu::Face> {
        match self {
            CullingMode::Disabled => None,
            CullingMode::Clockwise => Some(wgpu::Face::Back),
            CullingMode::CounterClockwise => Some(wgpu::Face::Front),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cull_faces() {
        assert_eq!(CullingMode::Disabled.to_cull_face(), None);
        assert_eq!(CullingMode::Clockwise.to_cull_face(), Some(wgpu::Face::Back));
        assert_eq!(CullingMode::CounterClockwise.to_cull_face(), Some(wgpu::Face::Front));
    }
}
