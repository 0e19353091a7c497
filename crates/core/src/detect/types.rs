use serde::{Deserialize, Serialize};

use crate::domain::geometry::{BoundingBox, Dimensions, Vec3};

/// Sanitary fixture categories the classifier can emit.
///
/// `ALL` fixes the enumeration order used by every rule pass (keyword and
/// dimension matching alike): declaration order, which mirrors the order of
/// the rule tables in [`super::rules`]. First-match and tie-break semantics
/// depend on it, so changing the order is a behavior change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FixtureType {
    Toilet,
    Sink,
    Faucet,
    Shower,
    Bathtub,
    Bidet,
    Urinal,
    Washbasin,
    ShowerTray,
    ShowerCabin,
    Accessories,
    Other,
}

impl FixtureType {
    pub const ALL: [FixtureType; 12] = [
        FixtureType::Toilet,
        FixtureType::Sink,
        FixtureType::Faucet,
        FixtureType::Shower,
        FixtureType::Bathtub,
        FixtureType::Bidet,
        FixtureType::Urinal,
        FixtureType::Washbasin,
        FixtureType::ShowerTray,
        FixtureType::ShowerCabin,
        FixtureType::Accessories,
        FixtureType::Other,
    ];
}

/// One raw object handed over by the plan parser, prior to classification.
/// `geometry` is an opaque payload; a bounding box is pulled out of it when
/// the shape allows, and it is ignored otherwise.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetectionCandidate {
    #[serde(default)]
    pub name: String,
    pub position: Vec3,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<serde_json::Value>,
}

/// A classified candidate. Candidates that match nothing are dropped rather
/// than emitted with a guessed type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionResult {
    #[serde(rename = "type")]
    pub fixture_type: FixtureType,
    pub name: String,
    pub confidence: f64,
    pub position: Vec3,
    pub dimensions: Dimensions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingBox>,
}

/// The plan parser's handoff document: the flat object list extracted from
/// one uploaded plan file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParsedPlan {
    pub objects: Vec<DetectionCandidate>,
}
