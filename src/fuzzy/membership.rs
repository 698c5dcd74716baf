use serde::{Deserialize, Serialize};

/// Shape mapping a crisp value to a truth degree in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum MembershipFunction {
    /// Rises from `a` to a peak at `b`, falls to `c`
    Triangular { a: f64, b: f64, c: f64 },
    /// Rises from `a`, plateau `[b, c]`, falls to `d`
    Trapezoidal { a: f64, b: f64, c: f64, d: f64 },
    Gaussian { center: f64, width: f64 },
}

impl MembershipFunction {
    pub const fn triangular(a: f64, b: f64, c: f64) -> Self {
        MembershipFunction::Triangular { a, b, c }
    }

    pub const fn trapezoidal(a: f64, b: f64, c: f64, d: f64) -> Self {
        MembershipFunction::Trapezoidal { a, b, c, d }
    }

    pub const fn gaussian(center: f64, width: f64) -> Self {
        MembershipFunction::Gaussian { center, width }
    }

    /// Truth degree of `x`
    ///
    /// Peaks and plateaus are tested before the slopes, so a shape with a
    /// zero-width edge still reaches exactly 1.0 at its degenerate point.
    pub fn degree(&self, x: f64) -> f64 {
        if x.is_nan() {
            return 0.0;
        }
        let degree = match *self {
            MembershipFunction::Triangular { a, b, c } => {
                if x == b {
                    1.0
                } else if x <= a || x >= c {
                    0.0
                } else if x < b {
                    (x - a) / (b - a)
                } else {
                    (c - x) / (c - b)
                }
            }
            MembershipFunction::Trapezoidal { a, b, c, d } => {
                if (b..=c).contains(&x) {
                    1.0
                } else if x <= a || x >= d {
                    0.0
                } else if x < b {
                    (x - a) / (b - a)
                } else {
                    (d - x) / (d - c)
                }
            }
            MembershipFunction::Gaussian { center, width } => {
                let z = (x - center) / width;
                (-0.5 * z * z).exp()
            }
        };
        degree.clamp(0.0, 1.0)
    }

    /// Center of the shape's peak, used by max defuzzification
    ///
    /// Only triangles have a single well-defined peak.
    pub fn peak(&self) -> Option<f64> {
        match *self {
            MembershipFunction::Triangular { b, .. } => Some(b),
            MembershipFunction::Trapezoidal { .. } | MembershipFunction::Gaussian { .. } => None,
        }
    }

    /// Check the parameters can be evaluated; the error is a short reason
    pub fn validate(&self) -> Result<(), String> {
        match *self {
            MembershipFunction::Triangular { a, b, c } => {
                if ![a, b, c].iter().all(|v| v.is_finite()) {
                    return Err("triangular points must be finite".into());
                }
                if !(a <= b && b <= c) {
                    return Err(format!("triangular points out of order ({}, {}, {})", a, b, c));
                }
            }
            MembershipFunction::Trapezoidal { a, b, c, d } => {
                if ![a, b, c, d].iter().all(|v| v.is_finite()) {
                    return Err("trapezoidal points must be finite".into());
                }
                if !(a <= b && b <= c && c <= d) {
                    return Err(format!(
                        "trapezoidal points out of order ({}, {}, {}, {})",
                        a, b, c, d
                    ));
                }
            }
            MembershipFunction::Gaussian { center, width } => {
                if !center.is_finite() {
                    return Err("gaussian center must be finite".into());
                }
                if !(width.is_finite() && width > 0.0) {
                    return Err(format!("gaussian width must be positive, got {}", width));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triangular_shape() {
        let mf = MembershipFunction::triangular(0.1, 0.3, 0.5);
        assert_eq!(mf.degree(0.3), 1.0);
        assert_eq!(mf.degree(0.1), 0.0);
        assert_eq!(mf.degree(0.5), 0.0);
        assert!((mf.degree(0.2) - 0.5).abs() < 1e-12);
        assert!((mf.degree(0.4) - 0.5).abs() < 1e-12);
        assert_eq!(mf.degree(0.9), 0.0);
    }

    #[test]
    fn test_degenerate_left_edge_peaks_at_one() {
        let mf = MembershipFunction::triangular(0.0, 0.0, 0.2);
        assert_eq!(mf.degree(0.0), 1.0);
        assert!((mf.degree(0.1) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_right_edge_peaks_at_one() {
        let mf = MembershipFunction::triangular(0.8, 1.0, 1.0);
        assert_eq!(mf.degree(1.0), 1.0);
        assert!((mf.degree(0.9) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_single_point_spike() {
        let mf = MembershipFunction::triangular(0.5, 0.5, 0.5);
        assert_eq!(mf.degree(0.5), 1.0);
        assert_eq!(mf.degree(0.49), 0.0);
        assert!(mf.validate().is_ok());
    }

    #[test]
    fn test_trapezoid_plateau() {
        let mf = MembershipFunction::trapezoidal(0.0, 0.2, 0.4, 0.6);
        assert_eq!(mf.degree(0.2), 1.0);
        assert_eq!(mf.degree(0.3), 1.0);
        assert_eq!(mf.degree(0.4), 1.0);
        assert!((mf.degree(0.5) - 0.5).abs() < 1e-12);
        assert_eq!(mf.degree(0.7), 0.0);
    }

    #[test]
    fn test_gaussian_peak_and_tail() {
        let mf = MembershipFunction::gaussian(0.5, 0.1);
        assert_eq!(mf.degree(0.5), 1.0);
        assert!(mf.degree(0.9) < 0.001);
    }

    #[test]
    fn test_nan_input_is_zero() {
        assert_eq!(MembershipFunction::triangular(0.0, 0.5, 1.0).degree(f64::NAN), 0.0);
    }

    #[test]
    fn test_validate_rejects_bad_shapes() {
        assert!(MembershipFunction::triangular(0.5, 0.2, 0.9).validate().is_err());
        assert!(MembershipFunction::trapezoidal(0.0, 0.5, 0.4, 1.0).validate().is_err());
        assert!(MembershipFunction::gaussian(0.5, 0.0).validate().is_err());
        assert!(MembershipFunction::triangular(0.0, f64::NAN, 1.0).validate().is_err());
    }

    #[test]
    fn test_peak_only_for_triangles() {
        assert_eq!(MembershipFunction::triangular(0.0, 0.3, 1.0).peak(), Some(0.3));
        assert_eq!(MembershipFunction::gaussian(0.3, 0.1).peak(), None);
    }
}
