//! Type definition of Float, otherwise constants and functions which
//! can be used almost everywhere else in the code.

// std
use std::f64::consts::PI;

pub type Float = f64;

pub const TWO_PI: Float = 6.283_185_307_179_586_476_93;
pub const SQRT_PI: Float = 1.772_453_850_905_516_027_30;

/// Default tolerance used when checking that a vector has unit length
/// or that a point lies on the removed pole.
pub const DEFAULT_TOLERANCE: Float = 1.0e-9;
/// Default number of candidates a rejection sampler may draw for a
/// single sample.
pub const DEFAULT_RETRY_CAP: u64 = 100_000;
/// Radius of the disc the unit sphere is projected onto.
pub const DISC_RADIUS: Float = 2.0;

/// Clamp the given value *val* to lie between the values *low* and *high*.
pub fn clamp_t<T>(val: T, low: T, high: T) -> T
where
    T: PartialOrd,
{
    let r: T;
    if val < low {
        r = low;
    } else if val > high {
        r = high;
    } else {
        r = val;
    }
    r
}

/// Natural logarithm of the gamma function evaluated at half
/// integers, Γ(n / 2), using Γ(1) = 1, Γ(1/2) = √π and Γ(x + 1) = x Γ(x).
pub fn ln_gamma_half(n: u32) -> Float {
    assert!(n > 0, "Γ(0) is undefined");
    let (mut x, mut acc): (Float, Float) = if n % 2 == 0 {
        (1.0, 0.0)
    } else {
        (0.5, SQRT_PI.ln())
    };
    let target: Float = n as Float / 2.0;
    while x < target {
        acc += x.ln();
        x += 1.0;
    }
    acc
}

/// Volume of the unit ball in *d* dimensions, π^(d/2) / Γ(d/2 + 1).
pub fn unit_ball_volume(d: usize) -> Float {
    let d = d as Float;
    ((d / 2.0) * PI.ln() - ln_gamma_half(d as u32 + 2)).exp()
}

/// Surface area of the unit (d-1)-sphere embedded in *d* dimensions,
/// 2 π^(d/2) / Γ(d/2).
pub fn unit_sphere_area(d: usize) -> Float {
    assert!(d > 0);
    let d = d as Float;
    2.0 as Float * ((d / 2.0) * PI.ln() - ln_gamma_half(d as u32)).exp()
}
