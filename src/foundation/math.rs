/// Linear interpolation, unclamped.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Euclidean wrap of `v` into `[0, period)`.
///
/// `f64::rem_euclid` may round up to exactly `period` for tiny negative inputs; that case maps to 0.
pub fn wrap_into(v: f64, period: f64) -> f64 {
    if period.is_nan() || period <= 0.0 || !v.is_finite() {
        return 0.0;
    }
    let r = v.rem_euclid(period);
    if r >= period { 0.0 } else { r }
}

pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y).min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
