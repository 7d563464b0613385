use crate::foundation::error::{ShorelineError, ShorelineResult};

/// Kernel radius and Gaussian sigma, in device pixels, for a drop shadow of `blur` viewport units.
///
/// Follows the 2D-canvas convention: the Gaussian standard deviation is half the blur value.
pub fn shadow_blur_params(blur: f64, pixel_ratio: f64) -> (u32, f32) {
    let sigma = (blur.max(0.0) * 0.5 * pixel_ratio) as f32;
    if !sigma.is_finite() || sigma <= 0.0 {
        return (0, 0.0);
    }
    ((3.0 * sigma).ceil() as u32, sigma)
}

/// Normalized Gaussian weights in Q16 fixed point; they sum to exactly `1 << 16`.
pub fn gaussian_kernel_q16(radius: u32, sigma: f32) -> ShorelineResult<Vec<u32>> {
    if radius == 0 {
        return Ok(vec![1 << 16]);
    }
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(ShorelineError::validation("blur sigma must be > 0"));
    }

    let r = radius as i32;
    let denom = 2.0 * f64::from(sigma) * f64::from(sigma);
    let weights_f: Vec<f64> = (-r..=r)
        .map(|i| {
            let x = f64::from(i);
            (-x * x / denom).exp()
        })
        .collect();
    let sum: f64 = weights_f.iter().sum();
    if sum <= 0.0 {
        return Err(ShorelineError::render("gaussian kernel sum is zero"));
    }

    let mut weights: Vec<u32> = weights_f
        .iter()
        .map(|wf| ((wf / sum) * 65536.0).round().clamp(0.0, 65536.0) as u32)
        .collect();
    let acc: i64 = weights.iter().map(|&w| i64::from(w)).sum();
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        weights[mid] = (i64::from(weights[mid]) + delta).clamp(0, 65536) as u32;
    }
    Ok(weights)
}

/// Separable Gaussian blur of a premultiplied RGBA8 buffer; samples clamp at the edges.
///
/// `tmp` holds the horizontal pass and must be as long as `src`.
pub fn blur_rgba8_premul(
    src: &[u8],
    dst: &mut [u8],
    tmp: &mut [u8],
    width: u32,
    height: u32,
    kernel_q16: &[u32],
) -> ShorelineResult<()> {
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| ShorelineError::render("blur buffer size overflow"))?;
    if src.len() != expected || dst.len() != expected || tmp.len() != expected {
        return Err(ShorelineError::render(
            "blur buffers must all be width*height*4 bytes",
        ));
    }
    if kernel_q16.len() <= 1 || expected == 0 {
        dst.copy_from_slice(src);
        return Ok(());
    }

    horizontal_pass(src, tmp, width, height, kernel_q16);
    vertical_pass(tmp, dst, width, height, kernel_q16);
    Ok(())
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    for y in 0..height as i32 {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let sx = (x + ki as i32 - radius).clamp(0, w - 1);
                let idx = ((y * w + sx) as usize) * 4;
                for (c, a) in acc.iter_mut().enumerate() {
                    *a += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out = ((y * w + x) as usize) * 4;
            for (c, a) in acc.iter().enumerate() {
                dst[out + c] = q16_to_u8(*a);
            }
        }
    }
}

fn vertical_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    let h = height as i32;
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let sy = (y + ki as i32 - radius).clamp(0, h - 1);
                let idx = ((sy * w + x) as usize) * 4;
                for (c, a) in acc.iter_mut().enumerate() {
                    *a += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out = ((y * w + x) as usize) * 4;
            for (c, a) in acc.iter().enumerate() {
                dst[out + c] = q16_to_u8(*a);
            }
        }
    }
}

fn q16_to_u8(acc: u64) -> u8 {
    ((acc + 32768) >> 16).min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/blur.rs"]
mod tests;
