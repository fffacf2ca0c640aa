// Numerical helpers for the per-cell model: the gamma function family
// needed by the Weibull wind statistics, and spherical cell geometry.

use crate::config::constants::{EARTH_RADIUS_M, GRID_RESOLUTION_DEG};

const LANCZOS_G: f64 = 7.0;
const LANCZOS_COEFFS: [f64; 9] = [
    0.999_999_999_999_809_93,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_13,
    -176.615_029_162_140_59,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_571_6e-6,
    1.505_632_735_149_311_6e-7,
];

const MAX_ITERATIONS: usize = 500;
const EPSILON: f64 = 1e-15;

/// Gamma function, Lanczos approximation (g = 7, 9 terms).
pub fn gamma(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    if x < 0.5 {
        // Reflection formula
        return std::f64::consts::PI / ((std::f64::consts::PI * x).sin() * gamma(1.0 - x));
    }
    let x = x - 1.0;
    let mut acc = LANCZOS_COEFFS[0];
    for (i, c) in LANCZOS_COEFFS.iter().enumerate().skip(1) {
        acc += c / (x + i as f64);
    }
    let t = x + LANCZOS_G + 0.5;
    (2.0 * std::f64::consts::PI).sqrt() * t.powf(x + 0.5) * (-t).exp() * acc
}

/// Natural log of the gamma function, valid for x > 0.
pub fn ln_gamma(x: f64) -> f64 {
    if x.is_nan() || x <= 0.0 {
        return f64::NAN;
    }
    if x < 0.5 {
        return (std::f64::consts::PI / (std::f64::consts::PI * x).sin()).ln() - ln_gamma(1.0 - x);
    }
    let x = x - 1.0;
    let mut acc = LANCZOS_COEFFS[0];
    for (i, c) in LANCZOS_COEFFS.iter().enumerate().skip(1) {
        acc += c / (x + i as f64);
    }
    let t = x + LANCZOS_G + 0.5;
    0.5 * (2.0 * std::f64::consts::PI).ln() + (x + 0.5) * t.ln() - t + acc.ln()
}

/// Regularized lower incomplete gamma function P(s, x) = γ(s, x)/Γ(s).
///
/// Series expansion for x < s + 1, Lentz continued fraction otherwise
/// (both standard). NaN inputs propagate as NaN so degenerate cells
/// stay total instead of panicking or spinning.
pub fn reg_lower_gamma(s: f64, x: f64) -> f64 {
    if s.is_nan() || x.is_nan() || s <= 0.0 || x < 0.0 {
        return f64::NAN;
    }
    if x == 0.0 {
        return 0.0;
    }
    if x.is_infinite() {
        return 1.0;
    }
    if s.is_infinite() {
        return f64::NAN;
    }
    let log_prefactor = s * x.ln() - x - ln_gamma(s);
    if x < s + 1.0 {
        // Series: γ(s,x) = x^s e^-x Σ x^n / (s (s+1) ... (s+n))
        let mut term = 1.0 / s;
        let mut sum = term;
        for n in 1..MAX_ITERATIONS {
            term *= x / (s + n as f64);
            sum += term;
            if term.abs() < sum.abs() * EPSILON {
                break;
            }
        }
        sum * log_prefactor.exp()
    } else {
        // Continued fraction for Q(s,x), modified Lentz
        let tiny = 1e-300;
        let mut b = x + 1.0 - s;
        let mut c = 1.0 / tiny;
        let mut d = 1.0 / b;
        let mut h = d;
        for i in 1..MAX_ITERATIONS {
            let an = -(i as f64) * (i as f64 - s);
            b += 2.0;
            d = an * d + b;
            if d.abs() < tiny {
                d = tiny;
            }
            c = b + an / c;
            if c.abs() < tiny {
                c = tiny;
            }
            d = 1.0 / d;
            let delta = d * c;
            h *= delta;
            if (delta - 1.0).abs() < EPSILON {
                break;
            }
        }
        1.0 - log_prefactor.exp() * h
    }
}

/// Lower incomplete gamma function γ(s, x).
pub fn lower_incomplete_gamma(s: f64, x: f64) -> f64 {
    reg_lower_gamma(s, x) * gamma(s)
}

/// Area of one grid cell centred at the given latitude [m²].
///
/// Exact on the sphere for a fixed angular cell size, so two cells at
/// the same latitude get identical area regardless of longitude.
pub fn cell_area(lat_deg: f64) -> f64 {
    let half = GRID_RESOLUTION_DEG / 2.0;
    let north = (lat_deg + half).to_radians().sin();
    let south = (lat_deg - half).to_radians().sin();
    EARTH_RADIUS_M * EARTH_RADIUS_M * GRID_RESOLUTION_DEG.to_radians() * (north - south)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gamma_matches_reference_values() {
        assert!((gamma(1.0) - 1.0).abs() < 1e-12);
        assert!((gamma(5.0) - 24.0).abs() < 1e-9);
        assert!((gamma(0.5) - std::f64::consts::PI.sqrt()).abs() < 1e-12);
        assert!((gamma(1.5) - 0.886_226_925_452_758).abs() < 1e-12);
    }

    #[test]
    fn ln_gamma_consistent_with_gamma() {
        for &x in &[0.7, 1.3, 2.5, 6.0, 11.5] {
            assert!((ln_gamma(x) - gamma(x).ln()).abs() < 1e-10, "x = {}", x);
        }
    }

    #[test]
    fn reg_lower_gamma_exponential_case() {
        // P(1, x) = 1 - e^-x exactly
        for &x in &[0.1, 0.5, 1.0, 2.0, 5.0, 10.0] {
            let expected = 1.0 - (-x as f64).exp();
            assert!((reg_lower_gamma(1.0, x) - expected).abs() < 1e-12, "x = {}", x);
        }
    }

    #[test]
    fn reg_lower_gamma_is_monotone_and_saturates() {
        let s = 2.5;
        let mut previous = 0.0;
        for i in 1..40 {
            let x = i as f64 * 0.5;
            let p = reg_lower_gamma(s, x);
            assert!(p >= previous);
            previous = p;
        }
        assert!((reg_lower_gamma(s, 1e3) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn reg_lower_gamma_propagates_nan() {
        assert!(reg_lower_gamma(f64::NAN, 1.0).is_nan());
        assert!(reg_lower_gamma(2.0, f64::NAN).is_nan());
    }

    #[test]
    fn cell_area_shrinks_with_cos_latitude() {
        let equator = cell_area(0.0);
        let mid = cell_area(60.0);
        assert!(equator > 0.0);
        // 2 R² Δλ sin(Δ/2) cos(φ): the ratio to the equator is cos(φ)
        assert!((mid / equator - 60.0_f64.to_radians().cos()).abs() < 1e-9);
    }
}
