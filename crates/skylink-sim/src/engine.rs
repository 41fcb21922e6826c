//! Simulation engine, the owned context behind every tick.
//!
//! `AirfieldEngine` holds all simulation state: path progress, the RF
//! session, zone evaluation and the per-frame task registry. Scene access
//! is passed into each call, so the engine is independent of any host
//! event loop and fully testable headless.

use std::collections::VecDeque;

use tracing::{info, warn};

use skylink_core::commands::Command;
use skylink_core::config::AirfieldConfig;
use skylink_core::enums::FrameTask;
use skylink_core::error::{CoreError, CoreResult};
use skylink_core::events::SimEvent;
use skylink_core::state::FrameReport;
use skylink_core::types::SimTime;
use skylink_scene::SceneAccess;

use crate::path::{PathFollower, WaypointPath};
use crate::rf::RfVisualizer;
use crate::scheduler::FrameScheduler;
use crate::zones::ZoneEvaluator;

pub struct AirfieldEngine {
    config: AirfieldConfig,
    time: SimTime,
    follower: Option<PathFollower>,
    rf: RfVisualizer,
    zones: ZoneEvaluator,
    scheduler: FrameScheduler,
    command_queue: VecDeque<Command>,
    events: Vec<SimEvent>,
}

impl AirfieldEngine {
    /// Create an engine for a validated configuration. Nothing runs until `init`.
    pub fn new(config: AirfieldConfig) -> CoreResult<Self> {
        config.validate()?;
        Ok(Self {
            time: SimTime::default(),
            follower: None,
            rf: RfVisualizer::new(config.rf.clone()),
            zones: ZoneEvaluator::new(config.zones.clone()),
            scheduler: FrameScheduler::new(),
            command_queue: VecDeque::new(),
            events: Vec::new(),
            config,
        })
    }

    /// Verify the scene, capture the waypoint path, place the moving entity
    /// at the path start and start the zone monitor.
    ///
    /// On failure nothing stays registered and the engine is left shut down.
    pub fn init<S: SceneAccess + ?Sized>(&mut self, scene: &mut S) -> CoreResult<()> {
        info!("airfield engine starting");
        match self.try_init(scene) {
            Ok(()) => {
                info!("airfield engine started");
                Ok(())
            }
            Err(e) => {
                warn!("scene verification failed: {e}");
                self.events.push(SimEvent::FeatureAborted {
                    reason: e.to_string(),
                });
                self.shutdown();
                Err(e)
            }
        }
    }

    fn try_init<S: SceneAccess + ?Sized>(&mut self, scene: &mut S) -> CoreResult<()> {
        let path = WaypointPath::capture(&*scene, &self.config.path)?;
        info!("loaded {} waypoints", path.len());

        let mut follower = PathFollower::new(path, self.config.path.moving_entity.clone());
        if !follower.set_progress(scene, 0.0) {
            return Err(CoreError::MissingEntity(
                self.config.path.moving_entity.clone(),
            ));
        }
        self.follower = Some(follower);
        self.scheduler.register(FrameTask::ZoneMonitor);
        Ok(())
    }

    /// Release every per-frame task and end the RF session. Safe to call repeatedly.
    pub fn shutdown(&mut self) {
        let rf_was_enabled = self.rf.disable();
        let released = self.scheduler.cancel_all();
        if released > 0 || rf_was_enabled {
            info!("airfield engine shut down ({released} tasks released)");
        }
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: Command) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = Command>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting report.
    pub fn tick<S: SceneAccess + ?Sized>(&mut self, scene: &mut S) -> FrameReport {
        self.process_commands(scene);

        let mut lines = Vec::new();
        let mut status = Vec::new();
        for task in self.scheduler.active_tasks() {
            match task {
                FrameTask::ZoneMonitor => {
                    self.zones.run(scene, &mut self.events);
                    status = self.zones.status_table(&*scene);
                }
                FrameTask::RfVisualization => {
                    self.rf.run(&*scene, &mut lines, &mut self.events);
                }
            }
        }

        self.time.advance();

        FrameReport {
            time: self.time,
            progress: self.progress(),
            rf_enabled: self.rf.is_enabled(),
            lines,
            status,
            events: std::mem::take(&mut self.events),
        }
    }

    /// Move the aircraft to `progress` (clamped). Returns false, leaving the
    /// progress unchanged, if the path is not loaded or the aircraft does not resolve.
    pub fn set_progress<S: SceneAccess + ?Sized>(&mut self, scene: &mut S, progress: f64) -> bool {
        let Some(follower) = self.follower.as_mut() else {
            return false;
        };
        let moved = follower.set_progress(scene, progress);
        if moved {
            self.events.push(SimEvent::ProgressChanged {
                progress: follower.progress(),
            });
        }
        moved
    }

    /// Move the aircraft onto a waypoint (0-based).
    pub fn jump_to_waypoint<S: SceneAccess + ?Sized>(&mut self, scene: &mut S, index: usize) -> bool {
        let Some(progress) = self
            .follower
            .as_ref()
            .and_then(|f| f.path().waypoint_progress(index))
        else {
            return false;
        };
        self.set_progress(scene, progress)
    }

    /// Start (or restart) RF visualization with a fresh tower scan.
    /// Returns the number of towers found.
    pub fn enable_rf<S: SceneAccess + ?Sized>(&mut self, scene: &S) -> CoreResult<usize> {
        let was_enabled = self.rf.is_enabled();
        match self.rf.enable(scene) {
            Ok(towers) => {
                self.scheduler.register(FrameTask::RfVisualization);
                self.events.push(SimEvent::RfEnabled {
                    towers,
                    occlusion_available: scene.occlusion().is_some(),
                });
                Ok(towers)
            }
            Err(e) => {
                self.scheduler.cancel_task(FrameTask::RfVisualization);
                if was_enabled {
                    self.events.push(SimEvent::RfDisabled);
                }
                self.events.push(SimEvent::FeatureAborted {
                    reason: e.to_string(),
                });
                Err(e)
            }
        }
    }

    /// Stop RF visualization. A no-op when it was never enabled.
    pub fn disable_rf(&mut self) {
        self.scheduler.cancel_task(FrameTask::RfVisualization);
        if self.rf.disable() {
            self.events.push(SimEvent::RfDisabled);
        }
    }

    fn process_commands<S: SceneAccess + ?Sized>(&mut self, scene: &mut S) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(scene, command);
        }
    }

    fn handle_command<S: SceneAccess + ?Sized>(&mut self, scene: &mut S, command: Command) {
        match command {
            Command::SetProgress { progress } => {
                self.set_progress(scene, progress);
            }
            Command::JumpToWaypoint { index } => {
                self.jump_to_waypoint(scene, index);
            }
            Command::EnableRf => {
                // Failure is already reported as an event.
                let _ = self.enable_rf(&*scene);
            }
            Command::DisableRf => self.disable_rf(),
        }
    }

    pub fn config(&self) -> &AirfieldConfig {
        &self.config
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Current path progress, 0.0 before `init`.
    pub fn progress(&self) -> f64 {
        self.follower.as_ref().map_or(0.0, PathFollower::progress)
    }

    pub fn is_initialized(&self) -> bool {
        self.follower.is_some() && self.scheduler.is_active(FrameTask::ZoneMonitor)
    }

    pub fn rf_enabled(&self) -> bool {
        self.rf.is_enabled()
    }

    /// Towers of the current RF session.
    pub fn towers(&self) -> &[String] {
        self.rf.towers()
    }

    pub fn path(&self) -> Option<&WaypointPath> {
        self.follower.as_ref().map(PathFollower::path)
    }

    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    pub fn rf(&self) -> &RfVisualizer {
        &self.rf
    }

    pub fn zones(&self) -> &ZoneEvaluator {
        &self.zones
    }
}

impl Drop for AirfieldEngine {
    fn drop(&mut self) {
        self.shutdown();
    }
}
