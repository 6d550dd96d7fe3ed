//! Accuracy measurement in OKLab
//!
//! OKLab is close enough to perceptually uniform that plain Euclidean
//! distance works as a difference metric (deltaEOK). Distances here are
//! scaled by 100 so that 1.0 is roughly a just-noticeable difference.

use prevgen_core::{Color, Space};

use crate::reference::reference_oklab;

/// Statistics from a deltaEOK comparison
#[derive(Debug, Clone)]
pub struct DeltaEStats {
    /// Mean deltaE across all samples
    pub mean: f64,
    /// Maximum deltaE
    pub max: f64,
    /// 95th percentile deltaE
    pub p95: f64,
    /// Number of samples
    pub count: usize,
}

impl DeltaEStats {
    /// All differences imperceptible (deltaE < 1.0)
    pub fn is_excellent(&self) -> bool {
        self.max < 1.0
    }

    fn from_samples(mut delta_es: Vec<f64>) -> Self {
        delta_es.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let count = delta_es.len();
        let mean = if count == 0 {
            0.0
        } else {
            delta_es.iter().sum::<f64>() / count as f64
        };
        let max = delta_es.last().copied().unwrap_or(0.0);
        let p95 = delta_es
            .get((count as f64 * 0.95) as usize)
            .copied()
            .unwrap_or(max);

        Self {
            mean,
            max,
            p95,
            count,
        }
    }
}

/// Scaled Euclidean distance between two OKLab colors
pub fn delta_e_ok(lab1: [f64; 3], lab2: [f64; 3]) -> f64 {
    let dl = lab1[0] - lab2[0];
    let da = lab1[1] - lab2[1];
    let db = lab1[2] - lab2[2];
    (dl * dl + da * da + db * db).sqrt() * 100.0
}

/// Compare two color lists pairwise
pub fn compare_colors(reference: &[Color], result: &[Color]) -> DeltaEStats {
    assert_eq!(reference.len(), result.len());
    DeltaEStats::from_samples(
        reference
            .iter()
            .zip(result)
            .map(|(a, b)| delta_e_ok(a.to_space(Space::Oklab), b.to_space(Space::Oklab)))
            .collect(),
    )
}

/// Our OKLab against the `palette` crate's for each 8-bit sample
pub fn compare_oklab_with_reference(samples: &[[u8; 3]]) -> DeltaEStats {
    DeltaEStats::from_samples(
        samples
            .iter()
            .map(|&[r, g, b]| {
                let ours = Color::from_rgba8([r, g, b, 255]).to_space(Space::Oklab);
                delta_e_ok(ours, reference_oklab([r, g, b]))
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_e_same_color() {
        let lab = [0.5, 0.1, -0.1];
        assert!(delta_e_ok(lab, lab) < 1e-12);
    }

    #[test]
    fn test_delta_e_scale() {
        let de = delta_e_ok([0.5, 0.0, 0.0], [0.51, 0.0, 0.0]);
        assert!((de - 1.0).abs() < 1e-9, "deltaE={}", de);
    }

    #[test]
    fn test_identical_lists() {
        let colors = vec![
            Color::from_hex("ff8040").unwrap(),
            Color::from_hex("102030").unwrap(),
        ];
        let stats = compare_colors(&colors, &colors);
        assert!(stats.is_excellent());
        assert_eq!(stats.count, 2);
    }

    #[test]
    fn test_empty_stats() {
        let stats = DeltaEStats::from_samples(Vec::new());
        assert_eq!(stats.count, 0);
        assert_eq!(stats.max, 0.0);
    }
}
