//! Angle helpers

use std::f32::consts::TAU;

/// Wrap an angle in radians into `[0, 2π)`
///
/// `rem_euclid` alone can round tiny negative inputs up to exactly `TAU`.
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}
