// Pixel measurements: Laplacian sharpness and HSV color spread.
//
// Both follow the OpenCV 8-bit conventions the thresholds were tuned on:
// BT.601 fixed-point grayscale, a 3x3 4-neighbour Laplacian with
// reflect-101 borders, and HSV with hue halved into 0..180.

use image::RgbImage;

/// Measurements used by the authenticity heuristics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageMetrics {
    /// Variance of the Laplacian over the grayscale image
    pub sharpness: f64,
    /// Population standard deviation over all H, S and V values
    pub color_std: f64,
}

impl ImageMetrics {
    pub fn measure(img: &RgbImage) -> Self {
        Self {
            sharpness: laplacian_variance(img),
            color_std: hsv_std(img),
        }
    }
}

/// BT.601 luma, fixed-point with rounding.
fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((r as u32 * 4899 + g as u32 * 9617 + b as u32 * 1868 + 8192) >> 14) as u8
}

/// Reflect-101 border index: -1 -> 1, len -> len - 2.
fn reflect101(i: i64, len: i64) -> usize {
    if len == 1 {
        return 0;
    }
    let mut i = i;
    if i < 0 {
        i = -i;
    }
    if i >= len {
        i = 2 * (len - 1) - i;
    }
    i as usize
}

/// Variance of the 4-neighbour Laplacian response over the grayscale image.
pub fn laplacian_variance(img: &RgbImage) -> f64 {
    let (w, h) = (img.width() as usize, img.height() as usize);
    if w == 0 || h == 0 {
        return 0.0;
    }

    let gray: Vec<f64> = img
        .pixels()
        .map(|p| luma(p[0], p[1], p[2]) as f64)
        .collect();
    let at = |x: i64, y: i64| -> f64 {
        gray[reflect101(y, h as i64) * w + reflect101(x, w as i64)]
    };

    let mut stats = RunningStats::default();
    for y in 0..h as i64 {
        for x in 0..w as i64 {
            let response =
                at(x - 1, y) + at(x + 1, y) + at(x, y - 1) + at(x, y + 1) - 4.0 * at(x, y);
            stats.push(response);
        }
    }
    stats.variance()
}

/// 8-bit HSV conversion: H in 0..180, S and V in 0..255.
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (u8, u8, u8) {
    let (rf, gf, bf) = (r as f64, g as f64, b as f64);
    let v = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let diff = v - min;

    let s = if v == 0.0 { 0.0 } else { 255.0 * diff / v };

    let mut hue = if diff == 0.0 {
        0.0
    } else if v == rf {
        60.0 * (gf - bf) / diff
    } else if v == gf {
        120.0 + 60.0 * (bf - rf) / diff
    } else {
        240.0 + 60.0 * (rf - gf) / diff
    };
    if hue < 0.0 {
        hue += 360.0;
    }

    // Hues just under 360 degrees round to 180, which wraps to red (0)
    let h = (hue / 2.0).round();
    let h = if h >= 180.0 { 0.0 } else { h };
    (h as u8, s.round() as u8, v as u8)
}

/// Standard deviation over every H, S and V value of every pixel.
pub fn hsv_std(img: &RgbImage) -> f64 {
    let mut stats = RunningStats::default();
    for p in img.pixels() {
        let (h, s, v) = rgb_to_hsv(p[0], p[1], p[2]);
        stats.push(h as f64);
        stats.push(s as f64);
        stats.push(v as f64);
    }
    stats.variance().sqrt()
}

/// Welford's online mean/variance.
#[derive(Default)]
struct RunningStats {
    n: u64,
    mean: f64,
    m2: f64,
}

impl RunningStats {
    fn push(&mut self, x: f64) {
        self.n += 1;
        let delta = x - self.mean;
        self.mean += delta / self.n as f64;
        self.m2 += delta * (x - self.mean);
    }

    /// Population variance; 0 when empty.
    fn variance(&self) -> f64 {
        if self.n == 0 {
            0.0
        } else {
            self.m2 / self.n as f64
        }
    }
}
