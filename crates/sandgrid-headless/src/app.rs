//! Headless frame loop: scenario actions, ticks, snapshots and stats reports

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use web_time::Instant;

use sandgrid_core::simulation::MaterialKind;
use sandgrid_core::world::{Snapshot, TickCounters, World};

use crate::config::AppConfig;
use crate::render::PixelRenderer;
use crate::scenario::{ScenarioDefinition, ScenarioExecutor};

/// Timings and counters accumulated between stats reports
#[derive(Debug, Default)]
pub struct FrameStats {
    pub frames: u64,
    pub ticks: u64,
    pub tick_time: Duration,
    pub snapshot_time: Duration,
    pub counters: TickCounters,
    /// Simulated seconds since the last report
    pub sim_elapsed: f32,
}

impl FrameStats {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Log one report line and start a new interval
    pub fn report(&mut self, world: &World) {
        log::info!(
            "Particles = {} (sand {}, water {}, wall {}) | frames {} | tick {:.2}ms | snapshot {:.2}ms | moved {} | freefall {}",
            world.total_particles(),
            world.particle_count(MaterialKind::Sand),
            world.particle_count(MaterialKind::Water),
            world.particle_count(MaterialKind::Wall),
            self.frames,
            self.tick_time.as_secs_f64() * 1000.0,
            self.snapshot_time.as_secs_f64() * 1000.0,
            self.counters.particles_moved,
            self.counters.freefalling,
        );
        self.reset();
    }
}

/// Outcome of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Frames executed, including paused ones
    pub frames: u64,
    /// Frames in which the world was ticked
    pub ticks: u64,
    /// True when a scenario `Stop` ended the run early
    pub stopped_early: bool,
    pub particles: usize,
}

/// Main application state
pub struct App {
    world: World,
    config: AppConfig,
    executor: Option<ScenarioExecutor>,
    frame: u64,
    total_ticks: u64,
    stats: FrameStats,
    last_snapshot: Snapshot,
}

impl App {
    /// Create a new app, optionally replaying a scenario
    pub fn new(config: AppConfig, scenario: Option<&ScenarioDefinition>) -> Result<Self> {
        let world = World::new(config.world.clone())?;
        let executor = scenario.map(|s| {
            log::info!("Loaded scenario '{}': {}", s.name, s.description);
            ScenarioExecutor::new(s, config.brush.clone())
        });

        Ok(Self {
            world,
            config,
            executor,
            frame: 0,
            total_ticks: 0,
            stats: FrameStats::default(),
            last_snapshot: Snapshot::default(),
        })
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Frames executed so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn is_paused(&self) -> bool {
        self.executor.as_ref().is_some_and(|e| e.is_paused())
    }

    fn is_stopped(&self) -> bool {
        self.executor.as_ref().is_some_and(|e| e.is_stopped())
    }

    /// Snapshot taken at the end of the last frame
    pub fn last_snapshot(&self) -> &Snapshot {
        &self.last_snapshot
    }

    /// Run one frame. Returns false once a scenario has asked to stop.
    pub fn step(&mut self) -> bool {
        if let Some(executor) = self.executor.as_mut() {
            executor.run_frame(self.frame, &mut self.world);
        }
        if self.is_stopped() {
            return false;
        }

        let dt = self.config.run.dt;
        if !self.is_paused() {
            let tick_start = Instant::now();
            self.world.tick_with_stats(dt, &mut self.stats.counters);
            self.stats.tick_time += tick_start.elapsed();
            self.stats.ticks += 1;
            self.total_ticks += 1;
        }

        let snapshot_start = Instant::now();
        self.last_snapshot = self.world.snapshot();
        self.stats.snapshot_time += snapshot_start.elapsed();

        self.frame += 1;
        self.stats.frames += 1;
        self.stats.sim_elapsed += dt;
        if self.stats.sim_elapsed >= self.config.run.stats_interval_secs {
            self.stats.report(&self.world);
        }
        true
    }

    /// Run up to `frames` frames, stopping early if the scenario says so
    pub fn run(&mut self, frames: u64) -> RunSummary {
        let start = Instant::now();
        let mut stopped_early = false;
        for _ in 0..frames {
            if !self.step() {
                stopped_early = true;
                break;
            }
        }
        if self.stats.frames > 0 {
            self.stats.report(&self.world);
        }

        log::info!(
            "Ran {} frames ({} ticks) in {:.2}s",
            self.frame,
            self.total_ticks,
            start.elapsed().as_secs_f64()
        );

        RunSummary {
            frames: self.frame,
            ticks: self.total_ticks,
            stopped_early,
            particles: self.world.total_particles(),
        }
    }

    /// Rasterise the last snapshot at canvas resolution and save it as PNG
    pub fn save_frame(&self, path: impl AsRef<Path>) -> Result<()> {
        let world = &self.config.world;
        let mut renderer =
            PixelRenderer::new(world.canvas_width as usize, world.canvas_height as usize);
        renderer.render(&self.last_snapshot);
        renderer.save_png(path.as_ref())?;
        log::info!("Saved frame to {}", path.as_ref().display());
        Ok(())
    }
}
