//! Blend types used by batched effects and sprites.

/// How a batch's source color is combined with the framebuffer.
///
/// Color and alpha channels use the same factors. Variant order is part of
/// the material sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum BlendType {
    /// No blending - source completely replaces destination.
    #[default]
    Opaque,

    /// Formula: `src + dst`
    ///
    /// Use for: Glow, fire, light halos.
    Additive,

    /// Formula: `src * src.a + dst`
    ///
    /// Use for: Additive particles that fade out through alpha.
    AlphaAdditive,

    /// Formula: `src + dst * (1 - src)`
    ///
    /// Use for: Soft brightening that saturates instead of clipping.
    Screen,

    /// Formula: `dst * (1 - src)`
    ///
    /// Use for: Darkening decals such as scorch marks.
    Subtractive,

    /// Formula: `src * (1 - dst) + dst`
    ///
    /// Use for: Inverting flashes.
    SubtractiveVariant,
}

impl BlendType {
    /// Every blend type, in sort order.
    pub const ALL: [BlendType; 6] = [
        BlendType::Opaque,
        BlendType::Additive,
        BlendType::AlphaAdditive,
        BlendType::Screen,
        BlendType::Subtractive,
        BlendType::SubtractiveVariant,
    ];

    /// Convert to wgpu BlendState. `None` disables blending.
    pub fn to_blend_state(self) -> Option<wgpu::BlendState> {
        use wgpu::BlendFactor as F;

        match self {
            BlendType::Opaque => None,
            BlendType::Additive => Some(symmetric(F::One, F::One)),
            BlendType::AlphaAdditive => Some(symmetric(F::SrcAlpha, F::One)),
            BlendType::Screen => Some(symmetric(F::One, F::OneMinusSrc)),
            BlendType::Subtractive => Some(symmetric(F::Zero, F::OneMinusSrc)),
            BlendType::SubtractiveVariant => Some(symmetric(F::OneMinusDst, F::One)),
        }
    }
}

impl From<BlendType> for Option<wgpu::BlendState> {
    fn from(blend: BlendType) -> Self {
        blend.to_blend_state()
    }
}

fn symmetric(src_factor: wgpu::BlendFactor, dst_factor: wgpu::BlendFactor) -> wgpu::BlendState {
    let component = wgpu::BlendComponent {
        src_factor,
        dst_factor,
        operation: wgpu::BlendOperation::Add,
    };
    wgpu::BlendState {
        color: component,
        alpha: component,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opaque_disables_blending() {
        assert_eq!(BlendType::Opaque.to_blend_state(), None);
    }

    #[test]
    fn test_additive_factors() {
        let state = BlendType::Additive.to_blend_state().unwrap();
        assert_eq!(state.color.src_factor, wgpu::BlendFactor::One);
        assert_eq!(state.color.dst_factor, wgpu::BlendFactor::One);
        assert_eq!(state.alpha, state.color);
    }

    #[test]
    fn test_every_blended_type_has_distinct_state() {
        let states: Vec<_> = BlendType::ALL
            .iter()
            .filter_map(|blend| blend.to_blend_state())
            .collect();
        assert_eq!(states.len(), BlendType::ALL.len() - 1);

        for (i, a) in states.iter().enumerate() {
            for b in &states[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_variants_sort_in_declaration_order() {
        let mut sorted = BlendType::ALL;
        sorted.sort();
        assert_eq!(sorted, BlendType::ALL);
    }
}
