//! Face-region sampling and skin pixel extraction.
//!
//! Regions are fixed fractions of the frame, which assumes a roughly
//! centered portrait. Each region picks its skin mask from its own average
//! brightness so very fair and very deep skin are not filtered out by the
//! mid-range rules.

use image::RgbImage;

/// A region must yield more than this many skin pixels to be used.
pub const MIN_REGION_PIXELS: usize = 10;

/// A mask must keep more than this many pixels to count at all.
const MIN_MASK_PIXELS: usize = 5;

/// Fractional bounds of a sampled face region: `(numerator, denominator)`.
#[derive(Debug, Clone, Copy)]
pub struct FaceRegion {
    pub name: &'static str,
    top: (u32, u32),
    bottom: (u32, u32),
    left: (u32, u32),
    right: (u32, u32),
}

pub const FACE_REGIONS: [FaceRegion; 5] = [
    FaceRegion {
        name: "forehead",
        top: (1, 8),
        bottom: (1, 3),
        left: (2, 5),
        right: (3, 5),
    },
    FaceRegion {
        name: "left_cheek",
        top: (2, 5),
        bottom: (3, 5),
        left: (1, 6),
        right: (2, 5),
    },
    FaceRegion {
        name: "right_cheek",
        top: (2, 5),
        bottom: (3, 5),
        left: (3, 5),
        right: (5, 6),
    },
    FaceRegion {
        name: "nose_bridge",
        top: (1, 3),
        bottom: (1, 2),
        left: (2, 5),
        right: (3, 5),
    },
    FaceRegion {
        name: "chin",
        top: (3, 5),
        bottom: (4, 5),
        left: (2, 5),
        right: (3, 5),
    },
];

fn frac(total: u32, (num, den): (u32, u32)) -> u32 {
    total * num / den
}

impl FaceRegion {
    /// Pixel bounds `(x0, y0, x1, y1)`, exclusive on the far edge.
    pub fn bounds(&self, width: u32, height: u32) -> (u32, u32, u32, u32) {
        (
            frac(width, self.left),
            frac(height, self.top),
            frac(width, self.right),
            frac(height, self.bottom),
        )
    }
}

/// Collect the pixels of a rectangular window as float triples.
pub fn window(image: &RgbImage, x0: u32, y0: u32, x1: u32, y1: u32) -> Vec<[f64; 3]> {
    let x1 = x1.min(image.width());
    let y1 = y1.min(image.height());
    let mut pixels = Vec::with_capacity(((x1.saturating_sub(x0)) * (y1.saturating_sub(y0))) as usize);
    for y in y0..y1 {
        for x in x0..x1 {
            let p = image.get_pixel(x, y).0;
            pixels.push([p[0] as f64, p[1] as f64, p[2] as f64]);
        }
    }
    pixels
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MaskRule {
    Bright,
    Deep,
    Standard,
}

fn is_skin(rule: MaskRule, [r, g, b]: [f64; 3]) -> bool {
    let sum = r + g + b;
    let rg = (r - g).abs();
    let rb = (r - b).abs();
    let unsaturated = r < 255.0 && g < 255.0 && b < 255.0;
    match rule {
        MaskRule::Bright => {
            sum > 400.0
                && sum < 750.0
                && r >= g * 0.95
                && g >= b * 0.9
                && unsaturated
                && rg < 50.0
                && rb < 70.0
        }
        MaskRule::Deep => {
            sum > 60.0
                && sum < 300.0
                && r >= g * 0.8
                && r >= b * 0.7
                && r > 20.0
                && g > 15.0
                && b > 10.0
                && rg < 40.0
                && rb < 50.0
        }
        MaskRule::Standard => {
            r >= g
                && r >= b
                && r > 60.0
                && g > 40.0
                && b > 30.0
                && unsaturated
                && sum > 150.0
                && sum < 600.0
                && rg < 60.0
                && rb < 80.0
        }
    }
}

/// Extract skin pixels from a region using brightness-adaptive rules.
pub fn extract_skin_adaptive(region: &[[f64; 3]]) -> Vec<[f64; 3]> {
    if region.is_empty() {
        return Vec::new();
    }
    let avg = region.iter().map(|p| p[0] + p[1] + p[2]).sum::<f64>() / (region.len() as f64 * 3.0);
    let rule = if avg > 200.0 {
        MaskRule::Bright
    } else if avg < 100.0 {
        MaskRule::Deep
    } else {
        MaskRule::Standard
    };

    let skin: Vec<[f64; 3]> = region.iter().copied().filter(|p| is_skin(rule, *p)).collect();
    if skin.len() > MIN_MASK_PIXELS {
        skin
    } else {
        Vec::new()
    }
}

/// Per-region summary kept for confidence scoring and the response payload.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct RegionStats {
    pub brightness: f64,
    pub pixel_count: usize,
}

/// Skin pixels pooled across every usable face region.
#[derive(Debug, Default)]
pub struct SkinSample {
    pub pixels: Vec<[f64; 3]>,
    pub regions: Vec<(&'static str, RegionStats)>,
}

/// Sample all face regions and pool their skin pixels.
pub fn extract_face_skin(image: &RgbImage) -> SkinSample {
    let (w, h) = image.dimensions();
    let mut sample = SkinSample::default();

    for region in FACE_REGIONS {
        let (x0, y0, x1, y1) = region.bounds(w, h);
        if x1 <= x0 || y1 <= y0 {
            continue;
        }
        let skin = extract_skin_adaptive(&window(image, x0, y0, x1, y1));
        if skin.len() > MIN_REGION_PIXELS {
            let brightness = skin.iter().map(|p| p[0] + p[1] + p[2]).sum::<f64>()
                / (skin.len() as f64 * 3.0);
            sample.regions.push((
                region.name,
                RegionStats {
                    brightness,
                    pixel_count: skin.len(),
                },
            ));
            sample.pixels.extend(skin);
        }
    }
    sample
}

/// Median of a slice (average of the two middle values for even lengths).
pub fn median(values: &mut [f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.sort_by(|a, b| a.total_cmp(b));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}

/// Linear-interpolated percentile of an already sorted slice.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let rank = p / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (rank - lo as f64)
}

/// Per-channel median of a pixel set.
pub fn channel_median(pixels: &[[f64; 3]]) -> [f64; 3] {
    let mut out = [0.0; 3];
    for (c, slot) in out.iter_mut().enumerate() {
        let mut channel: Vec<f64> = pixels.iter().map(|p| p[c]).collect();
        *slot = median(&mut channel);
    }
    out
}

/// Per-channel mean of a pixel set.
pub fn channel_mean(pixels: &[[f64; 3]]) -> [f64; 3] {
    if pixels.is_empty() {
        return [0.0; 3];
    }
    let n = pixels.len() as f64;
    let mut out = [0.0; 3];
    for p in pixels {
        for c in 0..3 {
            out[c] += p[c];
        }
    }
    out.map(|v| v / n)
}

/// Representative skin color: drop brightness outliers beyond 1.5 IQR of
/// the median, then take the per-channel median.
pub fn representative_color(pixels: &[[f64; 3]]) -> [f64; 3] {
    if pixels.is_empty() {
        return [200.0, 180.0, 160.0];
    }
    let brightness: Vec<f64> = pixels.iter().map(|p| (p[0] + p[1] + p[2]) / 3.0).collect();
    let mut sorted = brightness.clone();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let iqr = percentile(&sorted, 75.0) - percentile(&sorted, 25.0);
    let mid = median(&mut sorted);

    let kept: Vec<[f64; 3]> = pixels
        .iter()
        .zip(brightness.iter())
        .filter(|(_, b)| **b >= mid - 1.5 * iqr && **b <= mid + 1.5 * iqr)
        .map(|(p, _)| *p)
        .collect();

    if kept.len() > MIN_MASK_PIXELS {
        channel_median(&kept)
    } else {
        channel_median(pixels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn region_bounds_are_integer_fractions() {
        let forehead = FACE_REGIONS[0];
        assert_eq!(forehead.bounds(100, 100), (40, 12, 60, 33));
        let right_cheek = FACE_REGIONS[2];
        assert_eq!(right_cheek.bounds(60, 50), (36, 20, 50, 30));
    }

    #[test]
    fn medium_skin_passes_standard_mask() {
        let region = vec![[215.0, 189.0, 150.0]; 20];
        assert_eq!(extract_skin_adaptive(&region).len(), 20);
    }

    #[test]
    fn very_fair_and_very_deep_skin_pass_their_masks() {
        assert_eq!(extract_skin_adaptive(&vec![[246.0, 237.0, 228.0]; 20]).len(), 20);
        assert_eq!(extract_skin_adaptive(&vec![[41.0, 36.0, 32.0]; 20]).len(), 20);
    }

    #[test]
    fn blue_is_not_skin() {
        assert!(extract_skin_adaptive(&vec![[0.0, 0.0, 255.0]; 50]).is_empty());
    }

    #[test]
    fn too_few_skin_pixels_yield_nothing() {
        let mut region = vec![[0.0, 0.0, 255.0]; 50];
        region.extend(vec![[215.0, 189.0, 150.0]; 3]);
        assert!(extract_skin_adaptive(&region).is_empty());
    }

    #[test]
    fn median_handles_even_and_odd() {
        assert_eq!(median(&mut [3.0, 1.0, 2.0]), 2.0);
        assert_eq!(median(&mut [4.0, 1.0, 3.0, 2.0]), 2.5);
        assert_eq!(median(&mut []), 0.0);
    }

    #[test]
    fn representative_color_ignores_outliers() {
        let mut pixels = vec![[180.0, 150.0, 120.0]; 40];
        pixels.extend(vec![[20.0, 20.0, 20.0]; 3]);
        assert_eq!(representative_color(&pixels), [180.0, 150.0, 120.0]);
    }

    #[test]
    fn uniform_portrait_uses_every_region() {
        let image = RgbImage::from_pixel(100, 100, Rgb([215, 189, 150]));
        let sample = extract_face_skin(&image);
        assert_eq!(sample.regions.len(), FACE_REGIONS.len());
        let expected: usize = FACE_REGIONS
            .iter()
            .map(|r| {
                let (x0, y0, x1, y1) = r.bounds(100, 100);
                ((x1 - x0) * (y1 - y0)) as usize
            })
            .sum();
        assert_eq!(sample.pixels.len(), expected);
    }
}
