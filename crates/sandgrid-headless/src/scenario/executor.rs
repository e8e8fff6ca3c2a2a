//! Scenario execution engine

use sandgrid_core::simulation::MaterialKind;
use sandgrid_core::world::World;

use super::actions::{ScenarioAction, ScenarioStep};
use super::definition::ScenarioDefinition;
use crate::config::BrushConfig;
use crate::tools::{EraseTool, PenTool, Tool};

/// Replays a scenario's steps frame by frame
pub struct ScenarioExecutor {
    name: String,

    /// Steps ordered by frame, ties kept in listed order
    steps: Vec<ScenarioStep>,

    /// Index of the next step to run
    cursor: usize,

    brushes: BrushConfig,

    paused: bool,

    stopped: bool,
}

impl ScenarioExecutor {
    pub fn new(scenario: &ScenarioDefinition, brushes: BrushConfig) -> Self {
        let mut steps = scenario.steps.clone();
        steps.sort_by_key(|step| step.frame);
        Self {
            name: scenario.name.clone(),
            steps,
            cursor: 0,
            brushes,
            paused: false,
            stopped: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// True while a `Pause` is in effect
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// True once a `Stop` has run
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// True once every step has run
    pub fn is_finished(&self) -> bool {
        self.cursor >= self.steps.len()
    }

    /// Run every pending step scheduled at or before `frame`. Returns how many ran.
    pub fn run_frame(&mut self, frame: u64, world: &mut World) -> usize {
        let mut ran = 0;
        while let Some(step) = self.steps.get(self.cursor) {
            if step.frame > frame || self.stopped {
                break;
            }
            let action = step.action.clone();
            self.cursor += 1;
            self.execute_action(&action, world);
            ran += 1;
        }
        ran
    }

    /// Apply a single action immediately
    pub fn execute_action(&mut self, action: &ScenarioAction, world: &mut World) {
        match action {
            ScenarioAction::Paint { material, x, y } => {
                let brush = self.brushes.for_material(*material);
                let placed = PenTool::new(*material).apply(world, *x, *y, brush);
                log::trace!("[{}] painted {} {} at ({}, {})", self.name, placed, material, x, y);
            }
            ScenarioAction::Line { material, from, to } => {
                let placed = draw_line(world, *material, *from, *to);
                log::trace!("[{}] line of {} {} cells", self.name, placed, material);
            }
            ScenarioAction::Erase { x, y } => {
                let erased = EraseTool.apply(world, *x, *y, self.brushes.erase);
                log::trace!("[{}] erased {} at ({}, {})", self.name, erased, x, y);
            }
            ScenarioAction::Clear => {
                world.remove_all();
            }
            ScenarioAction::Pause => {
                self.paused = true;
                log::info!("[{}] paused", self.name);
            }
            ScenarioAction::Resume => {
                self.paused = false;
                log::info!("[{}] resumed", self.name);
            }
            ScenarioAction::Stop => {
                self.stopped = true;
                log::info!("[{}] stop requested", self.name);
            }
            ScenarioAction::Log { message } => {
                log::info!("[{}] {}", self.name, message);
            }
        }
    }
}

/// Plot a 4-connected pixel path from `from` to `to`. Returns cells filled.
///
/// Diagonal pixel steps get an extra horizontal pixel so the resulting cells
/// leave no diagonal gap for particles to slip through.
fn draw_line(world: &mut World, material: MaterialKind, from: (i32, i32), to: (i32, i32)) -> usize {
    let (x1, y1) = to;
    let (mut x, mut y) = from;
    let dx = (x1 - x).abs();
    let dy = -(y1 - y).abs();
    let sx = if x < x1 { 1 } else { -1 };
    let sy = if y < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let mut placed = usize::from(world.add_material(material, x, y));

    while (x, y) != (x1, y1) {
        let e2 = 2 * err;
        let step_x = e2 >= dy;
        let step_y = e2 <= dx;
        if step_x {
            err += dy;
            x += sx;
        }
        if step_x && step_y {
            placed += usize::from(world.add_material(material, x, y));
        }
        if step_y {
            err += dx;
            y += sy;
        }
        placed += usize::from(world.add_material(material, x, y));
    }
    placed
}
