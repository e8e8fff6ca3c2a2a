//! Built-in scenarios, laid out relative to the canvas size

use sandgrid_core::simulation::MaterialKind;

use super::actions::{ScenarioAction, ScenarioStep};
use super::definition::ScenarioDefinition;

/// Names and descriptions of the built-in scenarios
pub const BUILTIN_SCENARIOS: [(&str, &str); 3] = [
    ("hourglass", "Sand poured into a wall funnel drains onto the floor"),
    ("dam_break", "A wall holding back water is erased"),
    ("rain", "Water drops on ledges, a pause, then a sand shower"),
];

/// Build the named scenario for a `width x height` pixel canvas
pub fn builtin(name: &str, width: i32, height: i32) -> Option<ScenarioDefinition> {
    let steps = match name {
        "hourglass" => hourglass(width, height),
        "dam_break" => dam_break(width, height),
        "rain" => rain(width, height),
        _ => return None,
    };
    let description = BUILTIN_SCENARIOS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, d)| d.to_string())
        .unwrap_or_default();
    Some(ScenarioDefinition {
        name: name.to_string(),
        description,
        frames: None,
        steps,
    })
}

/// Point at a fraction of the canvas
fn at(width: i32, height: i32, fx: f32, fy: f32) -> (i32, i32) {
    ((width as f32 * fx) as i32, (height as f32 * fy) as i32)
}

fn line(frame: u64, material: MaterialKind, from: (i32, i32), to: (i32, i32)) -> ScenarioStep {
    ScenarioStep::new(frame, ScenarioAction::Line { material, from, to })
}

fn paint(frame: u64, material: MaterialKind, (x, y): (i32, i32)) -> ScenarioStep {
    ScenarioStep::new(frame, ScenarioAction::Paint { material, x, y })
}

fn hourglass(w: i32, h: i32) -> Vec<ScenarioStep> {
    let mut steps = vec![
        line(0, MaterialKind::Wall, at(w, h, 0.15, 0.15), at(w, h, 0.47, 0.5)),
        line(0, MaterialKind::Wall, at(w, h, 0.85, 0.15), at(w, h, 0.53, 0.5)),
    ];
    for frame in (0..120).step_by(20) {
        for fx in [0.35, 0.5, 0.65] {
            steps.push(paint(frame, MaterialKind::Sand, at(w, h, fx, 0.2)));
        }
    }
    steps
}

fn dam_break(w: i32, h: i32) -> Vec<ScenarioStep> {
    let (dam_x, dam_top) = at(w, h, 0.35, 0.3);
    let mut steps = vec![line(0, MaterialKind::Wall, (dam_x, dam_top), (dam_x, h - 1))];
    for frame in (0..90).step_by(10) {
        for fx in [0.08, 0.18, 0.28] {
            steps.push(paint(frame, MaterialKind::Water, at(w, h, fx, 0.4)));
        }
    }
    steps.push(ScenarioStep::new(
        150,
        ScenarioAction::Log {
            message: "Breaking the dam".to_string(),
        },
    ));
    for y in (dam_top..h).step_by(50) {
        steps.push(ScenarioStep::new(150, ScenarioAction::Erase { x: dam_x, y }));
    }
    steps
}

fn rain(w: i32, h: i32) -> Vec<ScenarioStep> {
    let mut steps = vec![
        line(0, MaterialKind::Wall, at(w, h, 0.1, 0.4), at(w, h, 0.4, 0.45)),
        line(0, MaterialKind::Wall, at(w, h, 0.9, 0.6), at(w, h, 0.55, 0.65)),
    ];
    for (i, frame) in (0..200).step_by(8).enumerate() {
        // Fixed stride across the canvas so runs are reproducible
        let fx = ((i * 37) % 100) as f32 / 100.0;
        steps.push(paint(frame, MaterialKind::Water, at(w, h, fx, 0.05)));
    }
    steps.push(ScenarioStep::new(200, ScenarioAction::Pause));
    steps.push(ScenarioStep::new(230, ScenarioAction::Resume));
    for frame in (230..300).step_by(10) {
        steps.push(paint(frame, MaterialKind::Sand, at(w, h, 0.5, 0.05)));
    }
    steps
}
