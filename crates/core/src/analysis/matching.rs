//! Mapping a representative skin color onto the Monk scale.

use crate::color;
use crate::monk::MonkTone;

use super::regions::RegionStats;

/// Result of matching a color to the scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneMatch {
    pub tone: MonkTone,
    pub distance: f64,
}

/// Nearest tone, weighting brightness heavily at the extremes of the scale.
pub fn match_brightness_aware(rgb: [f64; 3]) -> ToneMatch {
    let brightness = color::brightness(rgb);
    let mut best = ToneMatch {
        tone: MonkTone::Monk01,
        distance: f64::INFINITY,
    };

    for tone in MonkTone::ALL {
        let reference = tone.rgb().channels();
        let euclid = color::distance(rgb, reference);
        let brightness_diff = (brightness - color::brightness(reference)).abs();

        let combined = if !(80.0..=200.0).contains(&brightness) {
            euclid * 0.3 + brightness_diff * 2.0
        } else {
            euclid * 0.7 + brightness_diff * 0.5
        };

        if combined < best.distance {
            best = ToneMatch {
                tone,
                distance: combined,
            };
        }
    }
    best
}

/// Candidate tones for a brightness band.
fn candidates_for_brightness(brightness: f64) -> &'static [MonkTone] {
    use MonkTone::*;
    if brightness >= 220.0 {
        &[Monk01, Monk02]
    } else if brightness >= 190.0 {
        &[Monk01, Monk02, Monk03]
    } else if brightness >= 150.0 {
        &[Monk02, Monk03, Monk04, Monk05]
    } else if brightness >= 120.0 {
        &[Monk04, Monk05, Monk06]
    } else if brightness >= 90.0 {
        &[Monk05, Monk06, Monk07, Monk08]
    } else if brightness >= 60.0 {
        &[Monk07, Monk08, Monk09]
    } else {
        &[Monk08, Monk09, Monk10]
    }
}

/// Distance scale for rule-based confidence.
const RULE_BASED_MAX_DISTANCE: f64 = 300.0;

/// Rule-based match restricted to the tones plausible for the color's
/// brightness band. Returns the match and its confidence.
pub fn match_rule_based(rgb: [f64; 3]) -> (ToneMatch, f64) {
    let brightness = color::brightness(rgb);
    let saturation = color::saturation(rgb);
    let mut best = ToneMatch {
        tone: candidates_for_brightness(brightness)[0],
        distance: f64::INFINITY,
    };

    for &tone in candidates_for_brightness(brightness) {
        let reference = tone.rgb().channels();
        let euclid = color::distance(rgb, reference);
        let brightness_diff = (brightness - color::brightness(reference)).abs();
        let saturation_diff = (saturation - color::saturation(reference)).abs();

        let d = if brightness >= 190.0 {
            euclid * 0.4 + brightness_diff * 3.0 + saturation_diff * 10.0
        } else if brightness >= 120.0 {
            euclid * 0.6 + brightness_diff * 1.5 + saturation_diff * 15.0
        } else {
            euclid * 0.7 + brightness_diff * 2.0 + saturation_diff * 20.0
        };

        if d < best.distance {
            best = ToneMatch { tone, distance: d };
        }
    }

    let confidence = (1.0 - best.distance / RULE_BASED_MAX_DISTANCE).max(0.0);
    (best, confidence)
}

/// Confidence for the precision path.
///
/// Weighted blend of match distance, sample size, agreement between
/// regions, and whether the color is plausibly skin at all.
pub fn precision_confidence(
    rgb: [f64; 3],
    distance: f64,
    pixel_count: usize,
    regions: &[RegionStats],
) -> f64 {
    let distance_score = (1.0 - distance / 100.0).max(0.0);
    let pixel_score = (pixel_count as f64 / 1000.0).min(1.0);

    let consistency_score = if regions.len() > 1 {
        let n = regions.len() as f64;
        let mean = regions.iter().map(|r| r.brightness).sum::<f64>() / n;
        let variance = regions
            .iter()
            .map(|r| (r.brightness - mean).powi(2))
            .sum::<f64>()
            / n;
        (1.0 - variance.sqrt() / 50.0).max(0.0)
    } else {
        0.5
    };

    let brightness_score = if (30.0..=240.0).contains(&color::brightness(rgb)) {
        1.0
    } else {
        0.7
    };

    (distance_score * 0.4
        + pixel_score * 0.25
        + consistency_score * 0.2
        + brightness_score * 0.15)
        .min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_swatches_match_at_zero_distance() {
        for tone in MonkTone::ALL {
            let m = match_brightness_aware(tone.rgb().channels());
            assert_eq!(m.tone, tone);
            assert_eq!(m.distance, 0.0);
        }
    }

    #[test]
    fn rule_based_stays_inside_brightness_band() {
        let (m, confidence) = match_rule_based([0.0, 0.0, 255.0]);
        assert!(matches!(
            m.tone,
            MonkTone::Monk07 | MonkTone::Monk08 | MonkTone::Monk09
        ));
        assert!((0.0..=1.0).contains(&confidence));
    }

    #[test]
    fn rule_based_exact_swatch_is_confident() {
        let (m, confidence) = match_rule_based(MonkTone::Monk05.rgb().channels());
        assert_eq!(m.tone, MonkTone::Monk05);
        assert!((confidence - 1.0).abs() < 1e-9);
    }

    #[test]
    fn perfect_sample_scores_one() {
        let regions = vec![
            RegionStats {
                brightness: 180.0,
                pixel_count: 500,
            };
            3
        ];
        let c = precision_confidence([200.0, 180.0, 160.0], 0.0, 1500, &regions);
        assert!((c - 1.0).abs() < 1e-9);
    }

    #[test]
    fn single_region_and_small_sample_lower_confidence() {
        let regions = [RegionStats {
            brightness: 250.0,
            pixel_count: 20,
        }];
        let c = precision_confidence([250.0, 250.0, 250.0], 50.0, 20, &regions);
        // 0.5*0.4 + 0.02*0.25 + 0.5*0.2 + 0.7*0.15
        assert!((c - 0.41).abs() < 1e-9);
    }
}
