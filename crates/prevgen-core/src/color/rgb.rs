//! RGB Color Primitives
//!
//! Gamma-encoded sRGB in floating point. This is the canonical
//! representation every [`Color`](crate::Color) carries.

/// Gamma-encoded sRGB color in floating-point (0.0-1.0 range)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgb {
    /// Red component (0.0 to 1.0)
    pub r: f64,
    /// Green component (0.0 to 1.0)
    pub g: f64,
    /// Blue component (0.0 to 1.0)
    pub b: f64,
}

impl Rgb {
    /// Create a new RGB color
    #[inline]
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Create RGB from an array
    #[inline]
    pub const fn from_array(arr: [f64; 3]) -> Self {
        Self {
            r: arr[0],
            g: arr[1],
            b: arr[2],
        }
    }

    /// Convert to array
    #[inline]
    pub const fn to_array(&self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }

    /// Create from 8-bit values (0-255)
    #[inline]
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
        }
    }

    /// Convert to 8-bit values (0-255)
    #[inline]
    pub fn to_u8(&self) -> [u8; 3] {
        [channel_to_u8(self.r), channel_to_u8(self.g), channel_to_u8(self.b)]
    }

    /// Clamp all components to [0, 1]
    #[inline]
    pub fn clamp(&self) -> Self {
        Self {
            r: self.r.clamp(0.0, 1.0),
            g: self.g.clamp(0.0, 1.0),
            b: self.b.clamp(0.0, 1.0),
        }
    }

    /// Check if all components are in [0, 1]
    #[inline]
    pub fn is_in_gamut(&self) -> bool {
        self.is_within(0.0)
    }

    /// Check if all components are in [-epsilon, 1 + epsilon]
    #[inline]
    pub fn is_within(&self, epsilon: f64) -> bool {
        self.to_array()
            .iter()
            .all(|c| (-epsilon..=1.0 + epsilon).contains(c))
    }

    /// Check if approximately equal to another RGB color
    #[inline]
    pub fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        (self.r - other.r).abs() < epsilon
            && (self.g - other.g).abs() < epsilon
            && (self.b - other.b).abs() < epsilon
    }

    /// Black color
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);

    /// White color
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);
}

/// Quantize one normalized channel to 8 bits
#[inline]
pub fn channel_to_u8(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

impl From<[f64; 3]> for Rgb {
    fn from(arr: [f64; 3]) -> Self {
        Self::from_array(arr)
    }
}

impl From<Rgb> for [f64; 3] {
    fn from(rgb: Rgb) -> Self {
        rgb.to_array()
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(arr: [u8; 3]) -> Self {
        Self::from_u8(arr[0], arr[1], arr[2])
    }
}
