//! Rule-based sanitary fixture classification.
//!
//! Pure over its inputs: the same candidate always yields the same result,
//! and nothing here performs I/O. The trait seam exists so a model-backed
//! classifier can replace the rule tables without touching callers.

pub mod rules;
pub mod types;

use serde::Deserialize;

pub use self::types::{DetectionCandidate, DetectionResult, FixtureType, ParsedPlan};
use crate::domain::geometry::{BoundingBox, Dimensions};

pub trait FixtureClassifier: Send + Sync {
    /// Classify one candidate, or drop it (`None`) when neither its name
    /// nor its dimensions match any fixture type.
    fn classify(&self, candidate: &DetectionCandidate) -> Option<DetectionResult>;

    /// Classify a parser batch. Input order is preserved among emitted
    /// results; non-matches are omitted, not emitted with a guess.
    fn classify_all(&self, candidates: &[DetectionCandidate]) -> Vec<DetectionResult> {
        candidates.iter().filter_map(|candidate| self.classify(candidate)).collect()
    }
}

/// Keyword and dimension-range matching per [`rules`].
#[derive(Default)]
pub struct RuleBasedClassifier;

impl FixtureClassifier for RuleBasedClassifier {
    fn classify(&self, candidate: &DetectionCandidate) -> Option<DetectionResult> {
        // Unnamed objects are skipped before any matching is attempted.
        if candidate.name.is_empty() {
            return None;
        }

        let name_match = rules::match_name(&candidate.name);

        let bounding_box = candidate.geometry.as_ref().and_then(geometry_bounding_box);
        let dimensions = match (candidate.dimensions, bounding_box) {
            (Some(explicit), _) => explicit,
            (None, Some(derived)) => derived.dimensions(),
            (None, None) => Dimensions::default(),
        };
        let dimension_match = rules::match_dimensions(&dimensions);

        let fixture_type = name_match.or(dimension_match)?;
        let confidence = confidence(
            name_match.is_some(),
            dimension_match.is_some(),
            candidate.geometry.is_some(),
        );

        Some(DetectionResult {
            fixture_type,
            name: candidate.name.clone(),
            confidence,
            position: candidate.position,
            dimensions,
            bounding_box,
        })
    }
}

/// Additive confidence, capped at 1.0. The geometry bonus applies whenever a
/// payload was present, independent of whether its dimensions were the ones
/// that matched.
fn confidence(name_match: bool, dimension_match: bool, has_geometry: bool) -> f64 {
    let mut confidence: f64 = 0.0;
    if name_match {
        confidence += 0.6;
    }
    if dimension_match {
        confidence += 0.3;
    }
    if has_geometry {
        confidence += 0.1;
    }
    confidence.min(1.0)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeometryPayload {
    bounding_box: Option<BoundingBox>,
}

/// Pull an axis-aligned bounding box out of an opaque geometry payload.
/// Anything that does not carry a well-formed `boundingBox` degrades to
/// `None` rather than an error.
fn geometry_bounding_box(geometry: &serde_json::Value) -> Option<BoundingBox> {
    serde_json::from_value::<GeometryPayload>(geometry.clone()).ok()?.bounding_box
}
