//! Hue-band color profiling.
//!
//! HSV values use the 8-bit convention of the board photos' original
//! calibration: hue in `[0, 180)` (degrees halved), saturation and value in
//! `[0, 255]`. Band bounds are inclusive.

use crate::geometry::Rect;
use crate::util::math::clamp_span;
use image::{Rgb, RgbImage};
use palette::{FromColor, Srgb};

/// One 8-bit HSV pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hsv {
    pub h: u8,
    pub s: u8,
    pub v: u8,
}

impl Hsv {
    /// Converts an RGB pixel, quantizing to the 8-bit bands.
    pub fn from_rgb(Rgb([r, g, b]): Rgb<u8>) -> Self {
        let hsv: palette::Hsv = palette::Hsv::from_color(Srgb::new(r, g, b).into_format::<f32>());
        let hue = hsv.hue.into_positive_degrees();
        Self {
            // 359.x degrees rounds to 180, which is still a valid red bound.
            h: (hue / 2.0).round().min(180.0) as u8,
            s: (hsv.saturation * 255.0).round() as u8,
            v: (hsv.value * 255.0).round() as u8,
        }
    }
}

/// Inclusive HSV box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HsvRange {
    pub lower: [u8; 3],
    pub upper: [u8; 3],
}

impl HsvRange {
    pub const fn new(lower: [u8; 3], upper: [u8; 3]) -> Self {
        Self { lower, upper }
    }

    pub fn contains(&self, px: Hsv) -> bool {
        (self.lower[0]..=self.upper[0]).contains(&px.h)
            && (self.lower[1]..=self.upper[1]).contains(&px.s)
            && (self.lower[2]..=self.upper[2]).contains(&px.v)
    }
}

/// A named union of HSV bands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HueProfile {
    pub name: &'static str,
    pub bands: &'static [HsvRange],
}

impl HueProfile {
    /// True when the pixel falls in any band.
    pub fn matches(&self, px: Rgb<u8>) -> bool {
        let hsv = Hsv::from_rgb(px);
        self.bands.iter().any(|band| band.contains(hsv))
    }
}

/// Sea water: a broad cyan-to-blue band with low saturation/value floors.
pub const WATER_BLUE: HueProfile = HueProfile {
    name: "water_blue",
    bands: &[HsvRange::new([90, 30, 30], [140, 255, 255])],
};

/// Red paint on buoys and lighthouses; two bands around the hue wrap.
pub const MARKER_RED: HueProfile = HueProfile {
    name: "marker_red",
    bands: &[
        HsvRange::new([0, 30, 30], [15, 255, 255]),
        HsvRange::new([165, 30, 30], [180, 255, 255]),
    ],
};

/// Fraction of all pixels of `image` inside `profile`.
pub fn hue_fraction(image: &RgbImage, profile: &HueProfile) -> f32 {
    hue_fraction_sampled(image, profile, 1)
}

/// Fraction of sampled pixels inside `profile`.
///
/// Visits every `step`-th pixel of the row-major pixel sequence, starting at
/// the first. `step` 0 is treated as 1. Empty images give 0.
pub fn hue_fraction_sampled(image: &RgbImage, profile: &HueProfile, step: usize) -> f32 {
    let mut total = 0usize;
    let mut hits = 0usize;
    for px in image.pixels().step_by(step.max(1)) {
        total += 1;
        if profile.matches(*px) {
            hits += 1;
        }
    }
    if total == 0 {
        return 0.0;
    }
    hits as f32 / total as f32
}

/// Fraction of pixels inside `profile` within `region`, clamped to the image.
///
/// A region with no pixels inside the image gives 0.
pub fn hue_fraction_in(image: &RgbImage, region: Rect, profile: &HueProfile) -> f32 {
    let Some((x0, x1)) = clamp_span(region.left, region.right, image.width() as usize) else {
        return 0.0;
    };
    let Some((y0, y1)) = clamp_span(region.top, region.bottom, image.height() as usize) else {
        return 0.0;
    };

    let mut hits = 0usize;
    for y in y0..y1 {
        for x in x0..x1 {
            if profile.matches(*image.get_pixel(x as u32, y as u32)) {
                hits += 1;
            }
        }
    }
    hits as f32 / ((x1 - x0) * (y1 - y0)) as f32
}
