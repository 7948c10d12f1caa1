//! Skin tone analysis of an uploaded photo.
//!
//! The analyzer runs a cascade: the precision path samples fixed face
//! regions with brightness-adaptive skin masks; when too few skin pixels
//! survive it falls back to a rule-based match on the center of the frame;
//! images too small to sample at all use a plain nearest-swatch match.

pub mod matching;
pub mod regions;

use std::collections::BTreeMap;

use image::imageops::FilterType;
use image::RgbImage;
use serde::Serialize;

use crate::color::Rgb;
use crate::error::CoreError;
use crate::monk::MonkTone;
use crate::progress::AnalysisStage;
use crate::season::{SeasonalType, Undertone};

use self::regions::{RegionStats, FACE_REGIONS};

/// Below this many pooled skin pixels the precision path gives up.
pub const MIN_SKIN_PIXELS: usize = 10;

/// Images narrower or shorter than this skip region sampling.
pub const MIN_IMAGE_SIDE: u32 = 10;

/// Confidence reported by the simple path.
const SIMPLE_CONFIDENCE: f64 = 0.6;

/// Which branch of the cascade produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisMethod {
    Precision,
    RuleBased,
    Simple,
}

impl AnalysisMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            AnalysisMethod::Precision => "precision",
            AnalysisMethod::RuleBased => "rule_based",
            AnalysisMethod::Simple => "simple",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl ConfidenceLevel {
    pub fn from_score(confidence: f64) -> Self {
        if confidence >= 0.8 {
            ConfidenceLevel::High
        } else if confidence >= 0.6 {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ConfidenceLevel::High => "high",
            ConfidenceLevel::Medium => "medium",
            ConfidenceLevel::Low => "low",
        }
    }
}

/// Outcome of analyzing one image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkinToneAnalysis {
    pub monk_skin_tone: MonkTone,
    pub monk_tone_display: String,
    pub monk_hex: &'static str,
    pub derived_hex_code: String,
    pub dominant_rgb: [u8; 3],
    pub confidence: f64,
    pub confidence_level: ConfidenceLevel,
    pub analysis_method: AnalysisMethod,
    pub skin_pixels_analyzed: usize,
    pub regions_analyzed: Vec<&'static str>,
    pub region_statistics: BTreeMap<String, RegionStats>,
    pub seasonal_type: SeasonalType,
    pub undertone: Undertone,
}

impl SkinToneAnalysis {
    fn new(
        tone: MonkTone,
        color: [f64; 3],
        confidence: f64,
        method: AnalysisMethod,
        skin_pixels: usize,
        regions: Vec<(&'static str, RegionStats)>,
    ) -> Self {
        let dominant = Rgb::from_f64(color);
        let confidence = round2(confidence.clamp(0.0, 1.0));
        let season = tone.seasonal_type();
        Self {
            monk_skin_tone: tone,
            monk_tone_display: tone.display_name(),
            monk_hex: tone.hex(),
            derived_hex_code: dominant.to_hex(),
            dominant_rgb: [dominant.r, dominant.g, dominant.b],
            confidence,
            confidence_level: ConfidenceLevel::from_score(confidence),
            analysis_method: method,
            skin_pixels_analyzed: skin_pixels,
            regions_analyzed: regions.iter().map(|(name, _)| *name).collect(),
            region_statistics: regions
                .into_iter()
                .map(|(name, stats)| (name.to_string(), stats))
                .collect(),
            seasonal_type: season,
            undertone: season.undertone(),
        }
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Decode uploaded bytes into an RGB image, downscaling anything larger
/// than `max_dimension` on either side. A `max_dimension` of zero disables
/// downscaling.
pub fn decode_image(bytes: &[u8], max_dimension: u32) -> Result<RgbImage, CoreError> {
    if bytes.is_empty() {
        return Err(CoreError::InvalidImage("Empty image data".to_string()));
    }
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| CoreError::InvalidImage(format!("Could not decode image: {e}")))?;

    let decoded = if max_dimension > 0
        && (decoded.width() > max_dimension || decoded.height() > max_dimension)
    {
        decoded.resize(max_dimension, max_dimension, FilterType::Triangle)
    } else {
        decoded
    };
    Ok(decoded.to_rgb8())
}

/// Decode and analyze in one step.
pub fn analyze(bytes: &[u8], max_dimension: u32) -> Result<SkinToneAnalysis, CoreError> {
    let image = decode_image(bytes, max_dimension)?;
    Ok(analyze_image(&image))
}

pub fn analyze_image(image: &RgbImage) -> SkinToneAnalysis {
    analyze_image_with_progress(image, |_| {})
}

/// Run the cascade, reporting intermediate stages to `on_stage`.
pub fn analyze_image_with_progress(
    image: &RgbImage,
    mut on_stage: impl FnMut(AnalysisStage),
) -> SkinToneAnalysis {
    let (w, h) = image.dimensions();
    if w < MIN_IMAGE_SIDE || h < MIN_IMAGE_SIDE {
        on_stage(AnalysisStage::SkinExtracted);
        let result = simple(image);
        on_stage(AnalysisStage::Matched);
        return result;
    }

    let sample = regions::extract_face_skin(image);
    on_stage(AnalysisStage::SkinExtracted);

    let result = if sample.pixels.len() < MIN_SKIN_PIXELS {
        rule_based(image)
    } else {
        let color = regions::representative_color(&sample.pixels);
        let m = matching::match_brightness_aware(color);
        let stats: Vec<RegionStats> = sample.regions.iter().map(|(_, s)| *s).collect();
        let confidence =
            matching::precision_confidence(color, m.distance, sample.pixels.len(), &stats);
        SkinToneAnalysis::new(
            m.tone,
            color,
            confidence,
            AnalysisMethod::Precision,
            sample.pixels.len(),
            sample.regions,
        )
    };
    on_stage(AnalysisStage::Matched);
    result
}

/// Median color of the center third, matched within its brightness band.
fn rule_based(image: &RgbImage) -> SkinToneAnalysis {
    let (w, h) = image.dimensions();
    let center = regions::window(image, w / 3, h / 3, 2 * w / 3, 2 * h / 3);
    let color = regions::channel_median(&center);
    let (m, confidence) = matching::match_rule_based(color);
    SkinToneAnalysis::new(
        m.tone,
        color,
        confidence,
        AnalysisMethod::RuleBased,
        center.len(),
        Vec::new(),
    )
}

/// Mean of the center half (or the whole frame if that is empty).
fn simple(image: &RgbImage) -> SkinToneAnalysis {
    let (w, h) = image.dimensions();
    let mut pixels = regions::window(image, w / 4, h / 4, 3 * w / 4, 3 * h / 4);
    if pixels.is_empty() {
        pixels = regions::window(image, 0, 0, w, h);
    }
    let color = regions::channel_mean(&pixels);
    let tone = MonkTone::closest_to(Rgb::from_f64(color));
    SkinToneAnalysis::new(
        tone,
        color,
        SIMPLE_CONFIDENCE,
        AnalysisMethod::Simple,
        pixels.len(),
        Vec::new(),
    )
}

/// Description of the active detector.
#[derive(Debug, Clone, Serialize)]
pub struct DetectorInfo {
    pub method: &'static str,
    pub ml_enabled: bool,
    pub description: &'static str,
    pub face_regions: Vec<&'static str>,
    pub fallbacks: [&'static str; 2],
    pub scale: &'static str,
    pub tone_count: usize,
}

pub fn method_info() -> DetectorInfo {
    DetectorInfo {
        method: AnalysisMethod::Precision.as_str(),
        ml_enabled: false,
        description: "Rule-based detector: adaptive skin masks over fixed face regions, \
                      brightness-aware matching against the Monk reference swatches",
        face_regions: FACE_REGIONS.iter().map(|r| r.name).collect(),
        fallbacks: [
            AnalysisMethod::RuleBased.as_str(),
            AnalysisMethod::Simple.as_str(),
        ],
        scale: "Monk Skin Tone",
        tone_count: MonkTone::ALL.len(),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use assert_matches::assert_matches;
    use image::{DynamicImage, ImageFormat, Rgb as Pixel};

    use super::*;

    fn solid(w: u32, h: u32, rgb: [u8; 3]) -> RgbImage {
        RgbImage::from_pixel(w, h, Pixel(rgb))
    }

    fn png_bytes(image: RgbImage) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(image)
            .write_to(&mut buf, ImageFormat::Png)
            .unwrap();
        buf.into_inner()
    }

    #[test]
    fn medium_portrait_uses_precision_path() {
        let result = analyze_image(&solid(100, 100, [215, 189, 150]));
        assert_eq!(result.analysis_method, AnalysisMethod::Precision);
        assert_eq!(result.monk_skin_tone, MonkTone::Monk05);
        assert_eq!(result.monk_hex, "#d7bd96");
        assert_eq!(result.derived_hex_code, "#d7bd96");
        assert_eq!(result.regions_analyzed.len(), 5);
        assert_eq!(result.confidence, 1.0);
        assert_eq!(result.confidence_level, ConfidenceLevel::High);
        assert_eq!(result.seasonal_type, SeasonalType::SoftAutumn);
        assert_eq!(result.undertone, Undertone::Neutral);
    }

    #[test]
    fn extremes_of_the_scale() {
        let fair = analyze_image(&solid(100, 100, [246, 237, 228]));
        assert_eq!(fair.monk_skin_tone, MonkTone::Monk01);
        assert_eq!(fair.analysis_method, AnalysisMethod::Precision);

        let deep = analyze_image(&solid(100, 100, [41, 36, 32]));
        assert_eq!(deep.monk_skin_tone, MonkTone::Monk10);
        assert_eq!(deep.analysis_method, AnalysisMethod::Precision);
    }

    #[test]
    fn non_skin_falls_back_to_rule_based() {
        let result = analyze_image(&solid(50, 50, [0, 0, 255]));
        assert_eq!(result.analysis_method, AnalysisMethod::RuleBased);
        assert!(result.regions_analyzed.is_empty());
        assert!((7..=9).contains(&result.monk_skin_tone.number()));
    }

    #[test]
    fn tiny_image_uses_simple_path() {
        let result = analyze_image(&solid(4, 4, [130, 92, 67]));
        assert_eq!(result.analysis_method, AnalysisMethod::Simple);
        assert_eq!(result.monk_skin_tone, MonkTone::Monk07);
        assert_eq!(result.confidence, 0.6);
        assert_eq!(result.confidence_level, ConfidenceLevel::Medium);
    }

    #[test]
    fn single_pixel_image_is_analyzed() {
        let result = analyze_image(&solid(1, 1, [41, 36, 32]));
        assert_eq!(result.analysis_method, AnalysisMethod::Simple);
        assert_eq!(result.skin_pixels_analyzed, 1);
    }

    #[test]
    fn progress_stages_are_reported_in_order() {
        let mut stages = Vec::new();
        analyze_image_with_progress(&solid(100, 100, [215, 189, 150]), |s| stages.push(s));
        assert_eq!(
            stages,
            vec![AnalysisStage::SkinExtracted, AnalysisStage::Matched]
        );
    }

    #[test]
    fn decodes_png_upload() {
        let bytes = png_bytes(solid(40, 30, [160, 126, 86]));
        let image = decode_image(&bytes, 1024).unwrap();
        assert_eq!(image.dimensions(), (40, 30));
        assert_eq!(analyze(&bytes, 1024).unwrap().monk_skin_tone, MonkTone::Monk06);
    }

    #[test]
    fn large_uploads_are_downscaled_keeping_aspect() {
        let bytes = png_bytes(solid(400, 200, [160, 126, 86]));
        let image = decode_image(&bytes, 100).unwrap();
        assert_eq!(image.dimensions(), (100, 50));
    }

    #[test]
    fn rejects_empty_and_garbage_input() {
        assert_matches!(decode_image(&[], 1024), Err(CoreError::InvalidImage(_)));
        assert_matches!(
            decode_image(b"definitely not an image", 1024),
            Err(CoreError::InvalidImage(_))
        );
    }

    #[test]
    fn confidence_levels() {
        assert_eq!(ConfidenceLevel::from_score(0.8), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_score(0.79), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::from_score(0.6), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::from_score(0.59), ConfidenceLevel::Low);
    }

    #[test]
    fn method_info_reports_rule_based_detector() {
        let info = method_info();
        assert!(!info.ml_enabled);
        assert_eq!(info.face_regions.len(), 5);
        assert_eq!(info.tone_count, 10);
    }
}
