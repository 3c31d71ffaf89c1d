use core::ops::Mul;

/// Straight-alpha RGBA color with components in `[0, 1]`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Self = Color::new(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Self = Color::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Self = Color::new(1.0, 1.0, 1.0, 1.0);

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Color { r, g, b, a }
    }

    /// Unpacks a `0xAARRGGBB` word.
    pub fn from_argb(argb: u32) -> Self {
        let channel = |shift: u32| ((argb >> shift) & 0xFF) as f32 / 255.0;
        Color {
            r: channel(16),
            g: channel(8),
            b: channel(0),
            a: channel(24),
        }
    }

    /// Packs the color into a `0xAARRGGBB` word.
    ///
    /// Each channel is scaled by 255.5 and truncated to 8 bits.
    pub fn to_argb(self) -> u32 {
        (pack_channel(self.a) << 24)
            | (pack_channel(self.r) << 16)
            | (pack_channel(self.g) << 8)
            | pack_channel(self.b)
    }

    #[inline]
    pub const fn with_alpha(mut self, a: f32) -> Self {
        self.a = a;
        self
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

/// Component-wise product, used to tint a whole mesh.
impl Mul for Color {
    type Output = Color;

    #[inline]
    fn mul(self, other: Color) -> Color {
        Color {
            r: self.r * other.r,
            g: self.g * other.g,
            b: self.b * other.b,
            a: self.a * other.a,
        }
    }
}

#[inline]
fn pack_channel(value: f32) -> u32 {
    (value * 255.5) as u32 & 0xFF
}

#[test]
fn argb_round_trip() {
    for k in 0..=255u32 {
        let v = k as f32 / 255.0;
        let color = Color::new(v, 1.0 - v, v * 0.5, 1.0);
        let argb = color.to_argb();

        assert_eq!((argb >> 16) & 0xFF, k);
        assert_eq!(argb >> 24, 255);

        let same = Color::new(v, v, v, v);
        assert_eq!(same.to_argb(), k << 24 | k << 16 | k << 8 | k);
        assert_eq!(Color::from_argb(same.to_argb()).to_argb(), same.to_argb());
    }
}

#[test]
fn argb_channel_order() {
    assert_eq!(Color::new(1.0, 0.0, 0.0, 0.0).to_argb(), 0x00FF_0000);
    assert_eq!(Color::new(0.0, 1.0, 0.0, 0.0).to_argb(), 0x0000_FF00);
    assert_eq!(Color::new(0.0, 0.0, 1.0, 0.0).to_argb(), 0x0000_00FF);
    assert_eq!(Color::new(0.0, 0.0, 0.0, 1.0).to_argb(), 0xFF00_0000);
    assert_eq!(Color::WHITE.to_argb(), 0xFFFF_FFFF);
}

#[test]
fn tint() {
    let c = Color::new(1.0, 0.5, 0.25, 1.0) * Color::new(0.5, 0.5, 1.0, 0.5);
    assert_eq!(c, Color::new(0.5, 0.25, 0.25, 0.5));
    assert_eq!(Color::WHITE * c, c);
}
