//! Angle utilities used across the detection pipeline.
//!
//! Line orientations are ambiguous modulo 180°; all helpers here work in the
//! degree domain because the tunable thresholds are specified in degrees.

/// Normalizes an angle in degrees into the range [0, 180).
#[inline]
pub fn normalize_half_turn_deg(angle: f64) -> f64 {
    let norm = angle.rem_euclid(180.0);
    if norm >= 180.0 - 1e-9 {
        0.0
    } else {
        norm
    }
}

/// Computes the smallest unsigned difference between two line orientations,
/// treating antipodal directions as equivalent (i.e. 180° apart → 0).
/// Returns a value in [0, 90].
#[inline]
pub fn orientation_difference_deg(a: f64, b: f64) -> f64 {
    let diff = (normalize_half_turn_deg(a) - normalize_half_turn_deg(b)).abs();
    if diff > 90.0 {
        180.0 - diff
    } else {
        diff
    }
}

/// Computes the unsigned angle between two 2D vectors in degrees.
/// Returns a value in [0, 180]. Zero if the vectors point the same way,
/// 180 if they are opposite.
#[inline]
pub fn angle_between_vectors_deg(a: &[f64; 2], b: &[f64; 2]) -> f64 {
    let dot = a[0] * b[0] + a[1] * b[1];
    let na = (a[0] * a[0] + a[1] * a[1]).sqrt().max(1e-12);
    let nb = (b[0] * b[0] + b[1] * b[1]).sqrt().max(1e-12);
    (dot / (na * nb)).clamp(-1.0, 1.0).acos().to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn normalize_half_turn_basic() {
        assert!(approx_eq(normalize_half_turn_deg(45.0), 45.0));
        assert!(approx_eq(normalize_half_turn_deg(-45.0), 135.0));
        assert!(approx_eq(normalize_half_turn_deg(180.0), 0.0));
        assert!(approx_eq(normalize_half_turn_deg(540.0), 0.0));
    }

    #[test]
    fn orientation_difference_is_symmetric() {
        let a = 14.0;
        let b = 98.0;
        assert!(approx_eq(
            orientation_difference_deg(a, b),
            orientation_difference_deg(b, a)
        ));
    }

    #[test]
    fn orientation_difference_handles_wrap() {
        assert!(approx_eq(orientation_difference_deg(0.0, 180.0), 0.0));
        assert!(approx_eq(orientation_difference_deg(170.0, 10.0), 20.0));
        assert!(approx_eq(orientation_difference_deg(0.0, 90.0), 90.0));
    }

    #[test]
    fn vector_angle_basic() {
        let a = [1.0, 0.0];
        assert!(approx_eq(angle_between_vectors_deg(&a, &[1.0, 0.0]), 0.0));
        assert!(approx_eq(angle_between_vectors_deg(&a, &[-1.0, 0.0]), 180.0));
        assert!(approx_eq(angle_between_vectors_deg(&a, &[0.0, 1.0]), 90.0));
    }
}
