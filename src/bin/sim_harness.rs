//! Headless simulation harness
//!
//! Runs the gameplay core against a flat ground plane with a scripted input
//! sequence and logs what happens. Useful for checking tuning changes without
//! a renderer:
//!
//! ```text
//! RUST_LOG=info cargo run --bin sim_harness -- --ticks 600 --initial-mode build
//! ```

use std::path::PathBuf;

use build_royale_engine::config::GameplayConfig;
use build_royale_engine::input::{InputAction, InputSnapshot};
use build_royale_engine::modes::ModeKind;
use build_royale_engine::physics::{Aabb, GroundContact, StaticScene};
use build_royale_engine::simulation::{CharacterFrame, Simulation};
use clap::Parser;
use glam::Vec3;

/// Command-line arguments for the headless harness.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Number of ticks to simulate.
    #[arg(long, default_value_t = 600)]
    ticks: u32,

    /// Seconds per tick.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// JSON tuning file; defaults apply when omitted.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Mode to start in (weapon, build or edit).
    #[arg(long, value_name = "MODE")]
    initial_mode: Option<ModeKind>,
}

/// Minimal character controller: integrates `move_delta` over a flat floor.
struct FlatGround {
    position: Vec3,
    height: f32,
    grounded: bool,
}

impl FlatGround {
    fn frame(&self, root_motion: Vec3) -> CharacterFrame {
        let contact = if self.grounded {
            GroundContact::GROUNDED
        } else {
            GroundContact::AIRBORNE
        };
        CharacterFrame::standing_at(self.position, self.height)
            .with_contact(contact)
            .with_root_motion(root_motion)
    }

    fn apply(&mut self, delta: Vec3) {
        self.position += delta;
        if self.position.y <= 0.0 {
            self.position.y = 0.0;
            self.grounded = true;
        } else {
            self.grounded = false;
        }
    }
}

/// Scripted input for tick `i`: walk, run, jump, look down, place, demolish.
fn scripted_input(i: u32) -> InputSnapshot {
    let mut input = InputSnapshot::new();
    match i {
        0..=119 => input = input.with_axes(1.0, 0.0),
        120..=239 => input = input.with_axes(1.0, 0.3).with_held(InputAction::Run),
        240 => input = input.with_pressed(InputAction::Jump),
        300..=309 => input = input.with_mouse(0.0, -4.0),
        320 => input = input.with_pressed(InputAction::Place),
        330 => input = input.with_pressed(InputAction::BuildKey3),
        340 => input = input.with_pressed(InputAction::Place),
        360 => input = input.with_pressed(InputAction::Edit),
        380 => input = input.with_pressed(InputAction::Demolish),
        400 => input = input.with_pressed(InputAction::Weapon),
        _ => {}
    }
    input
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = CliArgs::parse();

    let mut config = match &args.config {
        Some(path) => match GameplayConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("[Harness] Failed to load {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => GameplayConfig::default(),
    };
    if let Some(mode) = args.initial_mode {
        config.initial_mode = mode;
    }

    let mut sim = match Simulation::new(config) {
        Ok(sim) => sim,
        Err(e) => {
            log::error!("[Harness] Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let mut scene = StaticScene::flat(0.0);
    let mut body = FlatGround {
        position: Vec3::ZERO,
        height: sim.locomotion().controller_height(),
        grounded: true,
    };

    for i in 0..args.ticks {
        let input = scripted_input(i);
        // Stand-in for animation root motion: forward speed along the facing
        let state = sim.locomotion().state();
        let facing = sim.camera().character_rotation();
        let root_motion = facing * Vec3::Z * state.current_forward_speed * args.dt;

        let frame = body.frame(root_motion);
        let out = sim.tick(args.dt, &input, &frame, &scene);
        body.height = sim.locomotion().controller_height();
        body.apply(out.move_delta);

        if let Some(id) = sim.modes().build_mode().and_then(|m| m.last_placed()) {
            if let Some(placed) = sim.registry().find(id) {
                let half = Vec3::splat(0.5);
                if !scene.boxes().iter().any(|b| b.construction == Some(id)) {
                    scene.add_box(Aabb::from_center(placed.anchor(), half), Some(id));
                }
            }
        }
        if let Some(id) = sim.modes().edit_mode().and_then(|m| m.last_demolished()) {
            scene.remove_construction(id);
        }

        if i % 60 == 0 {
            log::info!(
                "[Harness] tick {:4} mode {:?} pos {:.2} speed {:.3} pitch {:.1} constructions {}",
                i,
                out.mode,
                body.position,
                out.pose.forward_speed,
                out.camera.pitch_degrees,
                sim.registry().len()
            );
        }
    }

    log::info!(
        "[Harness] Done after {} ticks: {} constructions, final mode {:?}",
        args.ticks,
        sim.registry().len(),
        sim.active_mode()
    );
}
