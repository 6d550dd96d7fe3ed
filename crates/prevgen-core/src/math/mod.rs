//! Mathematical operations for color conversion
//!
//! - 3x3 matrix operations for the OKLab and YIQ transforms
//! - sRGB transfer function

pub mod gamma;
pub mod matrix;

pub use gamma::{srgb_gamma_decode, srgb_gamma_encode};
pub use matrix::Matrix3x3;
