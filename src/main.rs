//! Cranesim - headless crane driver
//!
//! Steers the claw over a load with the keyboard bindings, lowers it until
//! the load latches and lets the pick-and-place cycle run to completion.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use winit::keyboard::KeyCode;

use cranesim::core::logging;
use cranesim::core::time::{Clock, FixedClock, FrameTimer};
use cranesim::crane::{CraneConfig, CraneSim, LoadId};
use cranesim::math::wrap_angle;

/// Manual phases before the sequencer takes over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Slew,
    Reach,
    Lower,
    Cycle,
    Done,
}

/// Presses keys the way an operator would to reach one load.
struct Autopilot {
    target_yaw: f32,
    target_x: f32,
    phase: Phase,
    held: Option<KeyCode>,
}

impl Autopilot {
    fn new(sim: &CraneSim, load: LoadId) -> Result<Self, String> {
        let position = sim
            .load_position(load)
            .ok_or_else(|| format!("no load with index {}", load.0))?;
        let reach = (position.x * position.x + position.z * position.z).sqrt();
        let limits = sim.limits();
        if reach < limits.trolley_min || reach > limits.trolley_max {
            return Err(format!(
                "load at {:?} is {:.1} from the tower, outside trolley travel [{:.1}, {:.1}]",
                position, reach, limits.trolley_min, limits.trolley_max
            ));
        }
        Ok(Self {
            target_yaw: (-position.z).atan2(position.x),
            target_x: reach,
            phase: Phase::Slew,
            held: None,
        })
    }

    /// Hold `key` and release whatever was held before.
    fn hold(&mut self, sim: &mut CraneSim, key: Option<KeyCode>) {
        if self.held == key {
            return;
        }
        if let Some(previous) = self.held.take() {
            sim.key_up(previous);
        }
        if let Some(key) = key {
            sim.key_down(key);
        }
        self.held = key;
    }

    fn enter(&mut self, phase: Phase) {
        log::info!("Autopilot: {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
    }

    /// Choose the keys for the coming frame.
    fn drive(&mut self, sim: &mut CraneSim, dt: f32) -> Result<(), String> {
        let motion = &sim.config().motion;
        let frames = dt / motion.reference_frame;
        let yaw_step = motion.rotate_degrees.to_radians() * frames;
        let trolley_step = motion.trolley_speed * frames;

        match self.phase {
            Phase::Slew => {
                let error = self.target_yaw - sim.pose().yaw;
                if error.abs() <= yaw_step / 2.0 {
                    self.hold(sim, None);
                    self.enter(Phase::Reach);
                } else {
                    self.hold(sim, Some(if error > 0.0 { KeyCode::KeyQ } else { KeyCode::KeyA }));
                }
            }
            Phase::Reach => {
                let error = self.target_x - sim.pose().trolley_x;
                if error.abs() <= trolley_step / 2.0 {
                    self.hold(sim, None);
                    self.enter(Phase::Lower);
                } else {
                    self.hold(sim, Some(if error > 0.0 { KeyCode::KeyW } else { KeyCode::KeyS }));
                }
            }
            Phase::Lower => {
                if sim.is_latched() {
                    self.hold(sim, None);
                    self.enter(Phase::Cycle);
                } else if sim.pose().claw_y <= sim.limits().claw_floor() {
                    self.hold(sim, None);
                    return Err("claw reached the ground without touching the load".to_string());
                } else {
                    self.hold(sim, Some(KeyCode::KeyD));
                }
            }
            Phase::Cycle => {
                if !sim.is_latched() {
                    self.enter(Phase::Done);
                }
            }
            Phase::Done => {}
        }
        Ok(())
    }
}

fn main() -> ExitCode {
    logging::init();

    let args: Vec<String> = std::env::args().collect();
    let config_path = parse_str_arg(&args, "--config").map(PathBuf::from);
    let load_index = parse_usize_arg(&args, "--load").unwrap_or(0);
    let dt = parse_f32_arg(&args, "--dt").unwrap_or(1.0 / 60.0);
    let max_frames = parse_u64_arg(&args, "--max-frames").unwrap_or(20_000);
    let realtime = args.iter().any(|a| a == "--realtime");
    let dump_path = parse_str_arg(&args, "--dump-config").map(PathBuf::from);

    let config = match &config_path {
        Some(path) => match CraneConfig::load(path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::error!("Failed to load config {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => CraneConfig::default(),
    };

    if let Some(path) = dump_path {
        return match config.save(&path) {
            Ok(()) => {
                log::info!("Wrote config to {}", path.display());
                ExitCode::SUCCESS
            }
            Err(e) => {
                log::error!("Failed to write config {}: {}", path.display(), e);
                ExitCode::FAILURE
            }
        };
    }

    if dt <= 0.0 {
        log::error!("--dt must be positive, got {}", dt);
        return ExitCode::FAILURE;
    }

    let mut sim = match CraneSim::new(config) {
        Ok(sim) => sim,
        Err(e) => {
            log::error!("Invalid crane config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let load = LoadId(load_index);
    let mut autopilot = match Autopilot::new(&sim, load) {
        Ok(autopilot) => autopilot,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    let name = sim.loads()[load.0].name.clone();
    log::info!("Picking up '{}' (dt {:.4}s{})", name, dt, if realtime { ", realtime" } else { "" });

    let mut clock: Box<dyn Clock> = if realtime {
        Box::new(FrameTimer::new())
    } else {
        Box::new(FixedClock::new(dt))
    };

    let mut stage = sim.stage();
    let mut stage_frames = 0u64;
    while autopilot.phase != Phase::Done {
        if sim.frame_count() >= max_frames {
            log::error!(
                "Gave up after {} frames in {:?} / {:?}",
                max_frames,
                autopilot.phase,
                sim.stage()
            );
            return ExitCode::FAILURE;
        }
        if let Err(e) = autopilot.drive(&mut sim, dt) {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }

        if realtime {
            std::thread::sleep(Duration::from_secs_f32(dt));
        }
        sim.advance(clock.as_mut());
        let frame = sim.frame();
        stage_frames += 1;

        if sim.is_latched() && sim.stage() != stage {
            log::info!("{:?} done after {} frames ({} draw items)", stage, stage_frames, frame.items.len());
            stage = sim.stage();
            stage_frames = 0;
        }
    }

    let Some(position) = sim.load_position(load) else {
        return ExitCode::FAILURE;
    };
    let container = sim.graph().world_position(sim.container());
    let yaw = wrap_angle(sim.pose().yaw).to_degrees();
    log::info!(
        "'{}' dropped at ({:.2}, {:.2}, {:.2}) after {} frames; container at ({:.1}, {:.1}, {:.1}); crane heading {:.1} deg",
        name,
        position.x,
        position.y,
        position.z,
        sim.frame_count(),
        container.x,
        container.y,
        container.z,
        yaw
    );
    ExitCode::SUCCESS
}

fn parse_f32_arg(args: &[String], flag: &str) -> Option<f32> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_u64_arg(args: &[String], flag: &str) -> Option<u64> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_usize_arg(args: &[String], flag: &str) -> Option<usize> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_str_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}
