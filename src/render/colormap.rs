// Colormap - perceptually uniform "magma" scale
//
// Nine anchor colors sampled from the magma colormap at even steps; values in
// between are linearly interpolated in RGB.

const MAGMA_ANCHORS: [(u8, u8, u8); 9] = [
    (0x00, 0x00, 0x04),
    (0x1c, 0x10, 0x44),
    (0x4f, 0x12, 0x7b),
    (0x81, 0x25, 0x81),
    (0xb5, 0x36, 0x7a),
    (0xe5, 0x50, 0x64),
    (0xfb, 0x87, 0x61),
    (0xfe, 0xc2, 0x87),
    (0xfc, 0xfd, 0xbf),
];

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Map t in [0, 1] onto magma; out-of-range and NaN values are clamped
pub fn magma(t: f32) -> Rgb {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let scaled = t * (MAGMA_ANCHORS.len() - 1) as f32;
    let index = (scaled.floor() as usize).min(MAGMA_ANCHORS.len() - 2);
    let frac = scaled - index as f32;

    let (r0, g0, b0) = MAGMA_ANCHORS[index];
    let (r1, g1, b1) = MAGMA_ANCHORS[index + 1];
    let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * frac).round() as u8;

    Rgb {
        r: lerp(r0, r1),
        g: lerp(g0, g1),
        b: lerp(b0, b1),
    }
}

/// Quantize t into one of `levels` buckets and return the bucket's color
///
/// Neighbouring cells with the same bucket can be merged by the caller.
pub fn quantized(t: f32, levels: usize) -> (usize, Rgb) {
    let levels = levels.max(2);
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let bucket = ((t * (levels - 1) as f32).round() as usize).min(levels - 1);
    (bucket, magma(bucket as f32 / (levels - 1) as f32))
}
