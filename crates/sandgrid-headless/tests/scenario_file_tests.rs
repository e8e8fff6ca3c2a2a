//! End-to-end runs of scenario files through the headless app

use std::io::Write;

use sandgrid_core::simulation::MaterialKind;
use sandgrid_headless::scenario::ScenarioDefinition;
use sandgrid_headless::{App, AppConfig};

const SCENARIO: &str = r#"(
    name: "bucket",
    description: "Fill a walled bucket with water, then stop",
    frames: Some(80),
    steps: [
        (frame: 0, action: Line(material: Wall, from: (40, 60), to: (40, 196))),
        (frame: 0, action: Line(material: Wall, from: (160, 60), to: (160, 196))),
        (frame: 0, action: Line(material: Wall, from: (40, 196), to: (160, 196))),
        (frame: 1, action: Paint(material: Water, x: 100, y: 120)),
        (frame: 20, action: Paint(material: Sand, x: 100, y: 40)),
        (frame: 60, action: Stop),
    ],
)"#;

fn config() -> AppConfig {
    let mut config = AppConfig::default();
    config.world.canvas_width = 200;
    config.world.canvas_height = 200;
    config
}

#[test]
fn test_scenario_file_runs_until_stop() {
    let mut file = tempfile::Builder::new().suffix(".ron").tempfile().unwrap();
    file.write_all(SCENARIO.as_bytes()).unwrap();

    let scenario = ScenarioDefinition::from_file(file.path()).unwrap();
    assert_eq!(scenario.frames, Some(80));

    let mut app = App::new(config(), Some(&scenario)).unwrap();
    let summary = app.run(scenario.frames.unwrap_or(0));

    assert!(summary.stopped_early);
    assert_eq!(summary.frames, 60);

    let world = app.world();
    assert!(world.particle_count(MaterialKind::Wall) > 0);
    assert!(world.particle_count(MaterialKind::Water) > 0);
    assert!(world.particle_count(MaterialKind::Sand) > 0);
    world.verify_consistency().unwrap();

    // Nothing escapes the bucket: every particle stays between its walls
    for kind in [MaterialKind::Sand, MaterialKind::Water] {
        for quad in app.last_snapshot().layer(kind) {
            let x = quad.min().x;
            assert!(x > 40.0 && x < 160.0, "{kind} escaped at x = {x}");
        }
    }
}

#[test]
fn test_same_seed_same_final_frame() {
    let run = || {
        let scenario = ron::from_str::<ScenarioDefinition>(SCENARIO).unwrap();
        let mut app = App::new(config(), Some(&scenario)).unwrap();
        app.run(60);
        app.world().grid().clone()
    };
    assert_eq!(run(), run());
}
