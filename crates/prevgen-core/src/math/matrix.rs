//! 3x3 Matrix operations for color space transforms
//!
//! These matrices carry the OKLab and YIQ transforms.
//! All operations use f64 so that repeated conversions stay well inside
//! the 8-bit quantization step of rendered artifacts.

use std::ops::Mul;

/// A 3x3 matrix for color space transformations
///
/// Stored in row-major order: m[row][col]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix3x3 {
    /// Matrix elements in row-major order
    pub m: [[f64; 3]; 3],
}

impl Matrix3x3 {
    /// Create a new matrix from row-major elements
    #[inline]
    pub const fn new(m: [[f64; 3]; 3]) -> Self {
        Self { m }
    }

    /// Create an identity matrix
    #[inline]
    pub const fn identity() -> Self {
        Self {
            m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    /// Multiply this matrix by a 3-element vector
    ///
    /// Returns M × v
    #[inline]
    pub fn multiply_vec(&self, v: [f64; 3]) -> [f64; 3] {
        [
            self.m[0][0] * v[0] + self.m[0][1] * v[1] + self.m[0][2] * v[2],
            self.m[1][0] * v[0] + self.m[1][1] * v[1] + self.m[1][2] * v[2],
            self.m[2][0] * v[0] + self.m[2][1] * v[1] + self.m[2][2] * v[2],
        ]
    }

    /// Multiply this matrix by another matrix
    ///
    /// Returns self × other
    #[inline]
    pub fn multiply(&self, other: &Self) -> Self {
        let mut result = Self::new([[0.0; 3]; 3]);
        for i in 0..3 {
            for j in 0..3 {
                result.m[i][j] = self.m[i][0] * other.m[0][j]
                    + self.m[i][1] * other.m[1][j]
                    + self.m[i][2] * other.m[2][j];
            }
        }
        result
    }

    /// Check if this matrix is approximately equal to another
    pub fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.m
            .iter()
            .flatten()
            .zip(other.m.iter().flatten())
            .all(|(a, b)| (a - b).abs() <= epsilon)
    }
}

impl Default for Matrix3x3 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul<[f64; 3]> for Matrix3x3 {
    type Output = [f64; 3];

    fn mul(self, rhs: [f64; 3]) -> Self::Output {
        self.multiply_vec(rhs)
    }
}

// ============================================================================
// OKLab (Björn Ottosson, sRGB primaries, D65)
// ============================================================================

/// Linear sRGB to LMS cone response
#[allow(clippy::excessive_precision)]
pub const LINEAR_SRGB_TO_LMS: Matrix3x3 = Matrix3x3::new([
    [0.412165612, 0.536275208, 0.0514575653],
    [0.211859107, 0.6807189584, 0.107406579],
    [0.0883097947, 0.2818474174, 0.6302613616],
]);

/// Cube-rooted LMS to OKLab
#[allow(clippy::excessive_precision)]
pub const LMS_TO_OKLAB: Matrix3x3 = Matrix3x3::new([
    [0.2104542553, 0.793617785, -0.0040720468],
    [1.9779984951, -2.428592205, 0.4505937099],
    [0.0259040371, 0.7827717662, -0.808675766],
]);

/// OKLab to cube-rooted LMS
#[allow(clippy::excessive_precision)]
pub const OKLAB_TO_LMS: Matrix3x3 = Matrix3x3::new([
    [1.0, 0.3963377774, 0.2158037573],
    [1.0, -0.1055613458, -0.0638541728],
    [1.0, -0.0894841775, -1.2914855480],
]);

/// LMS cone response to linear sRGB
#[allow(clippy::excessive_precision)]
pub const LMS_TO_LINEAR_SRGB: Matrix3x3 = Matrix3x3::new([
    [4.0767245293, -3.3072168827, 0.2307590544],
    [-1.2681437731, 2.6093323231, -0.3411344290],
    [-0.0041119885, -0.7034763098, 1.7068625689],
]);

// ============================================================================
// YIQ (FCC NTSC coefficients)
// ============================================================================

/// RGB to YIQ
pub const RGB_TO_YIQ: Matrix3x3 = Matrix3x3::new([
    [0.30, 0.59, 0.11],
    [0.599, -0.2773, -0.3217],
    [0.213, -0.5251, 0.3121],
]);

/// YIQ to RGB
#[allow(clippy::excessive_precision)]
pub const YIQ_TO_RGB: Matrix3x3 = Matrix3x3::new([
    [1.0, 0.9468822170900693, 0.6235565819861433],
    [1.0, -0.27478764629897834, -0.6356910791873801],
    [1.0, -1.1085450346420322, 1.7090069284064666],
]);
