//! Floating point tolerance helpers.

/// Values with a magnitude below this are treated as zero.
pub const EPSILON: f64 = 1e-10;

/// Returns true if `x` is within [`EPSILON`] of zero.
#[inline]
pub fn is_zero(x: f64) -> bool {
    x.abs() < EPSILON
}

/// Snaps values within [`EPSILON`] of zero to exactly zero.
#[inline]
pub fn align_zero(x: f64) -> f64 {
    if is_zero(x) {
        0.0
    } else {
        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_zero() {
        assert!(is_zero(0.0));
        assert!(is_zero(1e-12));
        assert!(is_zero(-1e-12));
        assert!(!is_zero(1e-6));
    }

    #[test]
    fn test_align_zero() {
        assert_eq!(align_zero(1e-13), 0.0);
        assert_eq!(align_zero(-1e-13), 0.0);
        assert_eq!(align_zero(0.5), 0.5);
        assert_eq!(align_zero(-2.0), -2.0);
    }
}
