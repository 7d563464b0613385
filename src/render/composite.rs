//! Per-pixel operations on RGBA8 buffers.

use crate::foundation::error::{ShorelineError, ShorelineResult};
use crate::foundation::math::{mul_div255_u16, mul_div255_u8};

/// Premultiply one straight-alpha RGBA8 pixel.
pub fn premul_rgba8(rgba: [u8; 4]) -> [u8; 4] {
    let [r, g, b, a] = rgba;
    let a16 = u16::from(a);
    let premul = |c: u8| mul_div255_u8(u16::from(c), a16);
    [premul(r), premul(g), premul(b), a]
}

/// Replace every pixel with `color` scaled by the pixel's coverage (its alpha).
///
/// Turns rendered shapes into a shadow silhouette: the shadow takes the shape's alpha and the
/// shadow's color.
pub fn tint_coverage_in_place(rgba_premul: &mut [u8], color: [u8; 4]) {
    let [r, g, b, a] = premul_rgba8(color);
    for px in rgba_premul.chunks_exact_mut(4) {
        let cov = u16::from(px[3]);
        px[0] = mul_div255_u8(u16::from(r), cov);
        px[1] = mul_div255_u8(u16::from(g), cov);
        px[2] = mul_div255_u8(u16::from(b), cov);
        px[3] = mul_div255_u8(u16::from(a), cov);
    }
}

/// Composite premultiplied RGBA8 over an opaque background, producing opaque RGBA8.
pub fn flatten_premul_over_bg(
    dst: &mut [u8],
    src_premul: &[u8],
    bg_rgba: [u8; 4],
) -> ShorelineResult<()> {
    if dst.len() != src_premul.len() || !dst.len().is_multiple_of(4) {
        return Err(ShorelineError::encode(
            "flatten_premul_over_bg expects equal-length rgba8 buffers",
        ));
    }

    let bg = [
        u16::from(bg_rgba[0]),
        u16::from(bg_rgba[1]),
        u16::from(bg_rgba[2]),
    ];
    for (d, s) in dst.chunks_exact_mut(4).zip(src_premul.chunks_exact(4)) {
        let inv = 255u16 - u16::from(s[3]);
        for c in 0..3 {
            d[c] = (u16::from(s[c]) + mul_div255_u16(bg[c], inv)).min(255) as u8;
        }
        d[3] = 255;
    }
    Ok(())
}

/// Convert premultiplied RGBA8 to straight alpha, rounding to nearest.
pub fn unpremultiply_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u32::from(px[3]);
        match a {
            0 => px[..3].fill(0),
            255 => {}
            _ => {
                for c in &mut px[..3] {
                    *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
