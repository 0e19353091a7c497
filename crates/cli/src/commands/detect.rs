use std::fs;
use std::path::Path;

use anyhow::Context;
use fixtura_core::{
    DetectionCandidate, DetectionResult, Dimensions, FixtureClassifier, ParsedPlan,
    RuleBasedClassifier, Vec3,
};
use tracing::info;

use crate::commands::CommandResult;

pub fn run(file: Option<&Path>, json_output: bool) -> CommandResult {
    let plan = match file {
        Some(path) => match load_plan(path) {
            Ok(plan) => plan,
            Err(error) => {
                return CommandResult::failure("detect", "input_parse", format!("{error:#}"), 2)
            }
        },
        None => sample_plan(),
    };

    let classifier = RuleBasedClassifier;
    let results = classifier.classify_all(&plan.objects);
    info!(
        objects = plan.objects.len(),
        classified = results.len(),
        "plan objects classified"
    );

    if json_output {
        let data = match serde_json::to_value(&results) {
            Ok(data) => data,
            Err(error) => {
                return CommandResult::failure("detect", "serialization", error.to_string(), 3)
            }
        };
        return CommandResult::with_data(
            "detect",
            format!("{} of {} objects classified", results.len(), plan.objects.len()),
            Some(data),
        );
    }

    CommandResult::text(render_human(&plan, &results))
}

fn load_plan(path: &Path) -> anyhow::Result<ParsedPlan> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("could not read `{}`", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("could not parse `{}`", path.display()))
}

fn render_human(plan: &ParsedPlan, results: &[DetectionResult]) -> String {
    let mut lines =
        vec![format!("{} of {} plan objects classified:", results.len(), plan.objects.len())];

    for result in results {
        let dimensions = match result.dimensions.complete() {
            Some((width, height, depth)) => format!("{width:.2}x{height:.2}x{depth:.2}m"),
            None => "no dimensions".to_string(),
        };
        lines.push(format!(
            "  {:<13} {:>4.0}%  {}  ({})",
            format!("{:?}", result.fixture_type),
            result.confidence * 100.0,
            result.name,
            dimensions,
        ));
    }

    lines.join("\n")
}

/// Stand-in for a real CAD parser: the fixed object list used in demos and
/// smoke runs.
fn sample_plan() -> ParsedPlan {
    ParsedPlan {
        objects: vec![
            DetectionCandidate {
                name: "Toilet_01".to_owned(),
                position: Vec3::new(2.5, 0.0, 1.5),
                dimensions: Some(Dimensions::new(0.4, 0.75, 0.6)),
                geometry: None,
            },
            DetectionCandidate {
                name: "Sink_Wall_Mount".to_owned(),
                position: Vec3::new(1.2, 0.85, 0.5),
                dimensions: Some(Dimensions::new(0.5, 0.2, 0.45)),
                geometry: None,
            },
            DetectionCandidate {
                name: "Shower_Tray_90x90".to_owned(),
                position: Vec3::new(4.0, 0.0, 2.0),
                dimensions: Some(Dimensions::new(0.9, 0.1, 0.9)),
                geometry: None,
            },
        ],
    }
}
