//! Rule tables for fixture classification: keyword sets and typical
//! real-world sizes per fixture type. Both passes walk the types in
//! [`FixtureType::ALL`] order; the tables below are written in that same
//! order.

use super::types::FixtureType;
use crate::domain::geometry::Dimensions;

/// Lowercase keyword substrings recognized per fixture type. French terms
/// appear where supplier plans commonly use them.
pub(crate) const fn keywords(fixture: FixtureType) -> &'static [&'static str] {
    match fixture {
        FixtureType::Toilet => &["toilet", "wc", "water closet", "commode", "lavatory"],
        FixtureType::Sink => &["sink", "washbasin", "basin", "lavabo", "hand basin"],
        FixtureType::Faucet => &["faucet", "tap", "mixer", "valve", "spout"],
        FixtureType::Shower => &["shower", "douche", "shower head", "rain shower"],
        FixtureType::Bathtub => &["bathtub", "bath", "tub", "baignoire", "jacuzzi"],
        FixtureType::Bidet => &["bidet"],
        FixtureType::Urinal => &["urinal", "urinals", "wall urinal"],
        FixtureType::Washbasin => &["washbasin", "wash basin", "pedestal basin"],
        FixtureType::ShowerTray => &["shower tray", "shower base", "shower pan", "receveur"],
        FixtureType::ShowerCabin => {
            &["shower cabin", "shower enclosure", "shower cubicle", "cabine"]
        }
        FixtureType::Accessories => &["towel", "holder", "rack", "dispenser", "mirror", "shelf"],
        FixtureType::Other => &[],
    }
}

/// Inclusive (low, high) bounds in meters per axis.
pub(crate) struct TypicalSize {
    pub width: (f64, f64),
    pub height: (f64, f64),
    pub depth: (f64, f64),
}

pub(crate) const fn typical_size(fixture: FixtureType) -> TypicalSize {
    match fixture {
        FixtureType::Toilet => {
            TypicalSize { width: (0.35, 0.45), height: (0.4, 0.8), depth: (0.5, 0.75) }
        }
        FixtureType::Sink => {
            TypicalSize { width: (0.4, 0.8), height: (0.15, 0.25), depth: (0.4, 0.6) }
        }
        FixtureType::Faucet => {
            TypicalSize { width: (0.05, 0.15), height: (0.15, 0.35), depth: (0.05, 0.15) }
        }
        FixtureType::Shower => {
            TypicalSize { width: (0.15, 0.25), height: (0.15, 0.3), depth: (0.05, 0.15) }
        }
        FixtureType::Bathtub => {
            TypicalSize { width: (0.7, 0.9), height: (0.4, 0.6), depth: (1.4, 1.8) }
        }
        FixtureType::Bidet => {
            TypicalSize { width: (0.35, 0.45), height: (0.35, 0.45), depth: (0.5, 0.65) }
        }
        FixtureType::Urinal => {
            TypicalSize { width: (0.3, 0.45), height: (0.45, 0.65), depth: (0.3, 0.4) }
        }
        FixtureType::Washbasin => {
            TypicalSize { width: (0.45, 0.65), height: (0.15, 0.25), depth: (0.45, 0.55) }
        }
        FixtureType::ShowerTray => {
            TypicalSize { width: (0.7, 1.2), height: (0.05, 0.15), depth: (0.7, 1.2) }
        }
        FixtureType::ShowerCabin => {
            TypicalSize { width: (0.8, 1.2), height: (1.9, 2.3), depth: (0.8, 1.2) }
        }
        FixtureType::Accessories => {
            TypicalSize { width: (0.1, 0.5), height: (0.05, 0.5), depth: (0.05, 0.3) }
        }
        FixtureType::Other => TypicalSize { width: (0.1, 2.0), height: (0.1, 2.0), depth: (0.1, 2.0) },
    }
}

/// First type whose any keyword occurs in the lowercased name wins; the walk
/// order is `FixtureType::ALL`, so earlier types shadow later ones (a name
/// containing both "toilet" and "sink" resolves to `Toilet`).
pub fn match_name(name: &str) -> Option<FixtureType> {
    let lowered = name.to_lowercase();

    for fixture in FixtureType::ALL {
        for keyword in keywords(fixture) {
            if lowered.contains(keyword) {
                return Some(fixture);
            }
        }
    }

    None
}

/// Score each type by how many of the three axes fall inside its typical
/// range, discard scores below 2, and keep the highest scorer. On a score
/// tie the earliest type in `ALL` order wins. Incomplete dimensions never
/// match.
pub fn match_dimensions(dimensions: &Dimensions) -> Option<FixtureType> {
    let (width, height, depth) = dimensions.complete()?;

    let mut best: Option<(FixtureType, u8)> = None;
    for fixture in FixtureType::ALL {
        let typical = typical_size(fixture);
        let mut score = 0u8;
        if within(width, typical.width) {
            score += 1;
        }
        if within(height, typical.height) {
            score += 1;
        }
        if within(depth, typical.depth) {
            score += 1;
        }

        if score < 2 {
            continue;
        }
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((fixture, score)),
        }
    }

    best.map(|(fixture, _)| fixture)
}

fn within(value: f64, (low, high): (f64, f64)) -> bool {
    value >= low && value <= high
}

#[cfg(test)]
mod tests {
    use super::{match_dimensions, match_name, FixtureType};
    use crate::domain::geometry::Dimensions;

    #[test]
    fn name_match_is_case_insensitive_substring_containment() {
        assert_eq!(match_name("Modern Wall-Mounted Toilet"), Some(FixtureType::Toilet));
        assert_eq!(match_name("RECEVEUR 90x90"), Some(FixtureType::ShowerTray));
        assert_eq!(match_name("structural column"), None);
    }

    #[test]
    fn name_match_resolves_multi_keyword_names_by_enumeration_order() {
        // Toilet precedes Sink in FixtureType::ALL, so a combo name pins to
        // the first tested type.
        assert_eq!(match_name("Toilet Sink Combo"), Some(FixtureType::Toilet));
        assert_eq!(match_name("Sink Toilet Combo"), Some(FixtureType::Toilet));
    }

    #[test]
    fn washbasin_keyword_is_shadowed_by_sink() {
        // "washbasin" is also a Sink keyword, and Sink is enumerated before
        // Washbasin. Inherited behavior, pinned so nobody reorders the table
        // without noticing.
        assert_eq!(match_name("Pedestal Washbasin"), Some(FixtureType::Sink));
    }

    #[test]
    fn dimension_match_requires_all_three_axes() {
        let partial = Dimensions { width: Some(0.4), height: Some(0.75), depth: None };
        assert_eq!(match_dimensions(&partial), None);
        assert_eq!(match_dimensions(&Dimensions::default()), None);
    }

    #[test]
    fn toilet_sized_object_matches_toilet() {
        let dimensions = Dimensions::new(0.4, 0.75, 0.6);
        assert_eq!(match_dimensions(&dimensions), Some(FixtureType::Toilet));
    }

    #[test]
    fn catch_all_range_classifies_unremarkable_boxes_as_other() {
        // Nothing specific matches a meter cube, but the Other ranges span
        // 0.1..=2.0 on every axis.
        let dimensions = Dimensions::new(1.0, 1.0, 1.0);
        assert_eq!(match_dimensions(&dimensions), Some(FixtureType::Other));
    }

    #[test]
    fn out_of_range_dimensions_match_nothing() {
        let dimensions = Dimensions::new(5.0, 3.0, 4.0);
        assert_eq!(match_dimensions(&dimensions), None);
    }

    #[test]
    fn score_ties_resolve_to_the_earliest_type() {
        // 0.45/0.2/0.5 scores 3 for Sink and 3 for Washbasin; Sink is
        // enumerated first and must win.
        let dimensions = Dimensions::new(0.45, 0.2, 0.5);
        assert_eq!(match_dimensions(&dimensions), Some(FixtureType::Sink));
    }
}
