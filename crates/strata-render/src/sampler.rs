//! Texture wrap modes.

/// How texture coordinates outside `[0, 1]` are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum WrapMode {
    /// Tile the texture.
    Repeat,
    /// Tile the texture, mirroring every other tile.
    Mirror,
    /// Clamp to the edge texel.
    #[default]
    Clamp,
}

impl WrapMode {
    /// Convert to the wgpu address mode applied to U and V.
    pub fn to_address_mode(self) -> wgpu::AddressMode {
        match self {
            WrapMode::Repeat => wgpu::AddressMode::Repeat,
            WrapMode::Mirror => wgpu::AddressMode::MirrorRepeat,
            WrapMode::Clamp => wgpu::AddressMode::ClampToEdge,
        }
    }
}

impl From<WrapMode> for wgpu::AddressMode {
    fn from(mode: WrapMode) -> Self {
        mode.to_address_mode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_modes() {
        assert_eq!(WrapMode::Repeat.to_address_mode(), wgpu::AddressMode::Repeat);
        assert_eq!(WrapMode::Mirror.to_address_mode(), wgpu::AddressMode::MirrorRepeat);
        assert_eq!(WrapMode::default().to_address_mode(), wgpu::AddressMode::ClampToEdge);
    }
}
