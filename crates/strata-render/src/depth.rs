//! Depth bias conversion.
//!
//! # Bias unit
//!
//! A material's depth bias is an integer count of the device's smallest
//! resolvable depth step, the unit of [`wgpu::DepthBiasState::constant`].
//! Positive values pull geometry toward the viewer so decals win against the
//! surface they sit on. With a `LessEqual` depth compare that means the
//! constant is negated. No slope-scaled bias is applied.

/// Device bias state for a material depth bias.
pub fn depth_bias_state(bias: i32) -> wgpu::DepthBiasState {
    wgpu::DepthBiasState {
        constant: bias.checked_neg().unwrap_or(i32::MAX),
        slope_scale: 0.0,
        clamp: 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_bias_is_device_default() {
        assert_eq!(depth_bias_state(0), wgpu::DepthBiasState::default());
    }

    #[test]
    fn test_positive_bias_pulls_toward_viewer() {
        let state = depth_bias_state(4);
        assert_eq!(state.constant, -4);
        assert_eq!(state.slope_scale, 0.0);

        assert_eq!(depth_bias_state(-2).constant, 2);
    }

    #[test]
    fn test_extreme_bias_saturates() {
        assert_eq!(depth_bias_state(i32::MIN).constant, i32::MAX);
        assert_eq!(depth_bias_state(i32::MAX).constant, -i32::MAX);
    }
}
