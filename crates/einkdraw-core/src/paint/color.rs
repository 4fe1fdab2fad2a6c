/// Linear premultiplied RGBA color.
///
/// Invariant:
/// - `rgb` components are multiplied by `a`.
///
/// Hosts can upload the channels directly to a premultiplied-alpha blend state.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32, // premultiplied
    pub g: f32, // premultiplied
    pub b: f32, // premultiplied
    pub a: f32,
}

impl Color {
    #[inline]
    pub const fn transparent() -> Self {
        Self { r: 0.0, g: 0.0, b: 0.0, a: 0.0 }
    }

    #[inline]
    pub const fn black() -> Self {
        Self { r: 0.0, g: 0.0, b: 0.0, a: 1.0 }
    }

    /// Creates a premultiplied color from straight sRGB bytes (`0`–`255`).
    #[inline]
    pub fn from_srgb_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::from_straight(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a as f32 / 255.0)
    }

    /// Creates a premultiplied color from a packed `0xAARRGGBB` value.
    ///
    /// This is the layout most touch platforms use for paint colors.
    #[inline]
    pub fn from_argb_u32(argb: u32) -> Self {
        let [a, r, g, b] = argb.to_be_bytes();
        Self::from_srgb_u8(r, g, b, a)
    }

    /// Creates a premultiplied color from premultiplied components.
    #[inline]
    pub const fn from_premul(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a premultiplied color from straight alpha components.
    #[inline]
    pub fn from_straight(r: f32, g: f32, b: f32, a: f32) -> Self {
        let a = a.clamp(0.0, 1.0);
        Self {
            r: (r.clamp(0.0, 1.0)) * a,
            g: (g.clamp(0.0, 1.0)) * a,
            b: (b.clamp(0.0, 1.0)) * a,
            a,
        }
    }

    /// Returns a straight-alpha representation.
    ///
    /// For `a == 0`, RGB is returned as 0.
    #[inline]
    pub fn to_straight(self) -> (f32, f32, f32, f32) {
        if self.a <= 0.0 {
            (0.0, 0.0, 0.0, 0.0)
        } else {
            let inv = 1.0 / self.a;
            (self.r * inv, self.g * inv, self.b * inv, self.a)
        }
    }

    /// Returns the channels as `[r, g, b, a]`, ready for a vertex buffer.
    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argb_opaque_black() {
        assert_eq!(Color::from_argb_u32(0xFF00_0000), Color::black());
    }

    #[test]
    fn argb_channels_are_premultiplied() {
        // Half-transparent pure red.
        let c = Color::from_argb_u32(0x80FF_0000);
        let a = 128.0 / 255.0;
        assert!((c.a - a).abs() < 1e-6);
        assert!((c.r - a).abs() < 1e-6);
        assert_eq!(c.g, 0.0);
        assert_eq!(c.b, 0.0);
    }

    #[test]
    fn straight_round_trip_keeps_rgb() {
        let (r, g, b, a) = Color::from_straight(0.2, 0.4, 0.6, 0.5).to_straight();
        assert!((r - 0.2).abs() < 1e-6);
        assert!((g - 0.4).abs() < 1e-6);
        assert!((b - 0.6).abs() < 1e-6);
        assert_eq!(a, 0.5);
    }

    #[test]
    fn fully_transparent_straight_is_zero() {
        assert_eq!(Color::transparent().to_straight(), (0.0, 0.0, 0.0, 0.0));
    }
}
