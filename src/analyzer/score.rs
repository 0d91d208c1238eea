// ---------------------------------------------------------------------------
// analyzer/score.rs — threshold buckets and grade mapping
// ---------------------------------------------------------------------------

use crate::advice;
use crate::models::{Grade, PageMetrics};

// Per-metric thresholds: [good, medium, heavy]. At or below a threshold
// stays in that band; above the last band costs 3 points.
const WEIGHT_KB_THRESHOLDS: [f64; 3] = [700.0, 1500.0, 2500.0];
const REQUEST_THRESHOLDS: [f64; 3] = [40.0, 80.0, 120.0];
const LARGE_IMAGE_THRESHOLDS: [f64; 3] = [1.0, 4.0, 8.0];
const THIRD_PARTY_THRESHOLDS: [f64; 3] = [10.0, 25.0, 40.0];
const INLINE_SCRIPT_KB_THRESHOLDS: [f64; 3] = [50.0, 150.0, 300.0];

/// Outcome of scoring one set of metrics.
#[derive(Debug, Clone)]
pub struct Verdict {
    pub grade: Grade,
    pub message: &'static str,
    pub advice: String,
}

/// 0 to 3 points depending on which threshold band the value lands in.
/// Boundaries are inclusive: a value equal to a threshold stays in the
/// cheaper band.
pub fn bucket(value: f64, thresholds: [f64; 3]) -> u32 {
    if value <= thresholds[0] {
        0
    } else if value <= thresholds[1] {
        1
    } else if value <= thresholds[2] {
        2
    } else {
        3
    }
}

/// Sum of the five metric buckets, 0 to 15. `image_count` informs the
/// diagnostic but is not scored; only large images cost points.
pub fn impact_score(metrics: &PageMetrics) -> u32 {
    bucket(metrics.page_weight_kb, WEIGHT_KB_THRESHOLDS)
        + bucket(f64::from(metrics.request_count), REQUEST_THRESHOLDS)
        + bucket(f64::from(metrics.large_image_count), LARGE_IMAGE_THRESHOLDS)
        + bucket(f64::from(metrics.third_party_requests), THIRD_PARTY_THRESHOLDS)
        + bucket(metrics.inline_script_kb, INLINE_SCRIPT_KB_THRESHOLDS)
}

/// Map a total score onto the grade ladder.
pub fn grade_for_score(score: u32) -> Grade {
    match score {
        0..=3 => Grade::A,
        4..=6 => Grade::B,
        7..=9 => Grade::C,
        10..=12 => Grade::D,
        _ => Grade::E,
    }
}

/// Score metrics and attach the grade's frontend copy.
pub fn score(metrics: &PageMetrics) -> Verdict {
    let grade = grade_for_score(impact_score(metrics));
    Verdict {
        grade,
        message: advice::message(grade),
        advice: advice::tips_joined(grade),
    }
}
