//! sRGB transfer function
//!
//! IEC 61966-2-1 encode/decode between gamma-encoded sRGB and linear light.
//! Values outside [0, 1] pass through the same piecewise formulas, which
//! keeps out-of-gamut intermediates detectable by the caller.

/// sRGB gamma decode (encoded → linear)
#[inline]
pub fn srgb_gamma_decode(encoded: f64) -> f64 {
    if encoded <= 0.04045 {
        encoded / 12.92
    } else {
        ((encoded + 0.055) / 1.055).powf(2.4)
    }
}

/// sRGB gamma encode (linear → encoded)
#[inline]
pub fn srgb_gamma_encode(linear: f64) -> f64 {
    if linear <= 0.0031308 {
        linear * 12.92
    } else {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    }
}
