//! # prevgen-tests
//!
//! Cross-checks and end-to-end tests for prevgen.
//!
//! This crate provides:
//! - Reference conversions through the `palette` crate
//! - Perceptual difference statistics in OKLab
//! - Seeded palette generators for layout and artifact round trips
//!
//! ## Test Categories
//!
//! 1. **Parity**: HSV, HLS, OKLab and OKLCH against `palette`
//! 2. **Layout**: grid dimensions and tile iteration
//! 3. **Raster round trip**: PNG render and recovery
//! 4. **Vector round trip**: SVG render and recovery

pub mod accuracy;
pub mod patterns;
pub mod reference;

pub use accuracy::{DeltaEStats, compare_colors, delta_e_ok};
pub use patterns::{PalettePattern, generate_colors, random_settings};

/// Install `env_logger` once so `RUST_LOG=debug` shows library logs
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
